// Path: crates/engine/src/merge.rs
//! Layering of runtime-discovered values over static configuration.

use chaincap_types::chain::{ConfigMapping, ConfigOption};

/// Returns `base` with every key of `overrides` written over it.
///
/// Keys only in `base` pass through, keys only in `overrides` are added.
/// The merge is shallow: a nested table in `overrides` replaces the one in
/// `base` rather than being merged into it.
pub fn apply_runtime_values(base: &ConfigMapping, overrides: &ConfigMapping) -> ConfigMapping {
    let mut merged = base.clone();
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Converts an unsigned integer into a config value.
///
/// TOML integers are signed 64-bit; larger values are carried as decimal
/// strings so they still render verbatim.
pub fn integer_value(value: u64) -> toml::Value {
    match i64::try_from(value) {
        Ok(v) => toml::Value::Integer(v),
        Err(_) => toml::Value::String(value.to_string()),
    }
}

/// Values discovered at deployment time, keyed by the options the engine owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeValues {
    values: ConfigMapping,
}

impl RuntimeValues {
    /// An empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a string-valued option.
    pub fn with_str(mut self, option: ConfigOption, value: impl Into<String>) -> Self {
        self.values
            .insert(option.key().to_string(), toml::Value::String(value.into()));
        self
    }

    /// Sets an integer-valued option.
    pub fn with_u64(mut self, option: ConfigOption, value: u64) -> Self {
        self.values
            .insert(option.key().to_string(), integer_value(value));
        self
    }

    /// Layers these values over `base`.
    pub fn apply_to(&self, base: &ConfigMapping) -> ConfigMapping {
        apply_runtime_values(base, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_and_base_only_keys_survive() {
        let mut base = ConfigMapping::new();
        base.insert("GasLimitDefault".into(), 400_000.into());
        base.insert("FromAddress".into(), "stale".into());

        let merged = RuntimeValues::new()
            .with_str(ConfigOption::FromAddress, "0xaa")
            .with_u64(ConfigOption::ChainId, 1337)
            .apply_to(&base);

        assert_eq!(merged["GasLimitDefault"], toml::Value::Integer(400_000));
        assert_eq!(merged["FromAddress"], toml::Value::String("0xaa".into()));
        assert_eq!(merged["ChainID"], toml::Value::Integer(1337));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn nested_tables_are_replaced_not_merged() {
        let base: ConfigMapping = toml::from_str("[Nested]\na = 1\nb = 2").unwrap();
        let overrides: ConfigMapping = toml::from_str("[Nested]\nc = 3").unwrap();
        let merged = apply_runtime_values(&base, &overrides);
        let nested = merged["Nested"].as_table().unwrap();
        assert_eq!(nested.len(), 1);
        assert!(nested.contains_key("c"));
    }

    #[test]
    fn oversized_integers_fall_back_to_strings() {
        assert_eq!(integer_value(42), toml::Value::Integer(42));
        assert_eq!(
            integer_value(16015286601757825753),
            toml::Value::String("16015286601757825753".into())
        );
    }
}
