// Path: crates/types/src/codec.rs

//! Serde helpers shared by the policy and document structures.
//!
//! Durations are carried as integer milliseconds so the JSON and TOML forms
//! stay readable, and chain identifiers follow the node document convention
//! of a quoted decimal string while still accepting bare integers on input.

/// (De)serializes a `std::time::Duration` as whole milliseconds.
pub mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serializes the duration as a `u64` millisecond count.
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).map_err(serde::ser::Error::custom)?;
        serializer.serialize_u64(millis)
    }

    /// Deserializes a `u64` millisecond count into a duration.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }

    /// The same encoding for an optional duration.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use std::time::Duration;

        /// Serializes `Some(d)` as milliseconds and `None` as unit.
        pub fn serialize<S: Serializer>(
            value: &Option<Duration>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(d) => super::serialize(d, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserializes an optional millisecond count.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Duration>, D::Error> {
            Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
        }
    }
}

/// (De)serializes a chain id or selector as a decimal string, accepting integers too.
///
/// Chain selectors routinely exceed `i64::MAX`, which TOML integers cannot hold.
pub mod decimal_u64 {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    /// Serializes the value as a decimal string.
    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Accepts `'1337'` as well as `1337`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(DecimalVisitor)
    }

    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("negative value {v}")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.trim()
                .parse::<u64>()
                .map_err(|e| E::custom(format!("invalid decimal '{v}': {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Probe {
        #[serde(with = "super::decimal_u64")]
        chain_id: u64,
        #[serde(with = "super::duration_ms")]
        timeout: Duration,
    }

    #[test]
    fn chain_id_accepts_string_and_integer() {
        let a: Probe = toml::from_str("chain_id = '1337'\ntimeout = 1500").unwrap();
        let b: Probe = toml::from_str("chain_id = 1337\ntimeout = 1500").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn chain_id_serializes_as_string() {
        let probe = Probe {
            chain_id: 2337,
            timeout: Duration::from_secs(2),
        };
        let out = toml::to_string(&probe).unwrap();
        assert!(out.contains("chain_id = \"2337\""));
        assert!(out.contains("timeout = 2000"));
    }

    #[test]
    fn negative_chain_id_is_rejected() {
        let res: Result<Probe, _> = toml::from_str("chain_id = -1\ntimeout = 1");
        assert!(res.is_err());
    }
}
