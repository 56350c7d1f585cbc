// Path: crates/engine/src/template.rs
//! Placeholder substitution for configuration templates.
//!
//! Templates use `{{ Key }}` placeholders whose names are the keys of a
//! [`ConfigMapping`]. Rendering is strict: a placeholder without a value is
//! an error, and the output is scanned for leftover template syntax before it
//! is handed back.

use chaincap_types::chain::ConfigMapping;
use chaincap_types::error::TemplateError;
use std::error::Error as _;
use tera::{Context, Tera};

/// Fragments that indicate a placeholder survived rendering.
const RESIDUAL_MARKERS: [&str; 5] = ["{{", "}}", "{%", "%}", "<no value>"];

/// A named, fixed configuration template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigTemplate {
    /// Short name used in error contexts.
    pub name: &'static str,
    /// The template text.
    pub body: &'static str,
}

/// The `EVM.Workflow` section spliced into a node's configuration document.
pub const WORKFLOW_TEMPLATE: ConfigTemplate = ConfigTemplate {
    name: "workflow",
    body: r#"
FromAddress = '{{ FromAddress }}'
ForwarderAddress = '{{ ForwarderAddress }}'
GasLimitDefault = {{ GasLimitDefault }}
TxAcceptanceState = {{ TxAcceptanceState }}
PollPeriod = '{{ PollPeriod }}'
AcceptanceTimeout = '{{ AcceptanceTimeout }}'
"#,
};

/// The per-chain config string embedded in a capability job definition.
pub const JOB_CONFIG_TEMPLATE: ConfigTemplate = ConfigTemplate {
    name: "job-config",
    body: r#"'{"chainId":{{ ChainID }},"network":"{{ NetworkFamily }}","logTriggerPollInterval":{{ LogTriggerPollInterval }}, "creForwarderAddress":"{{ CreForwarderAddress }}","receiverGasMinimum":{{ ReceiverGasMinimum }},"nodeAddress":"{{ NodeAddress }}"}'"#,
};

impl ConfigTemplate {
    /// Renders this template for `capability`.
    pub fn render(&self, capability: &str, values: &ConfigMapping) -> Result<String, TemplateError> {
        render_template(&format!("{capability}/{}", self.name), self.body, values)
    }
}

/// Renders `template` against `values` and validates that every placeholder
/// was substituted.
///
/// `context` names the capability and template in every error.
pub fn render_template(
    context: &str,
    template: &str,
    values: &ConfigMapping,
) -> Result<String, TemplateError> {
    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.add_raw_template(context, template)
        .map_err(|e| TemplateError::Parse {
            context: context.to_string(),
            reason: describe(&e),
        })?;

    let render_error = |e: tera::Error| TemplateError::Render {
        context: context.to_string(),
        reason: describe(&e),
    };
    let data = Context::from_serialize(values).map_err(render_error)?;
    let rendered = tera.render(context, &data).map_err(render_error)?;

    validate_template_substitution(&rendered, context)?;
    Ok(rendered)
}

/// Fails if `rendered` still contains placeholder syntax.
pub fn validate_template_substitution(rendered: &str, context: &str) -> Result<(), TemplateError> {
    match RESIDUAL_MARKERS.iter().find(|m| rendered.contains(*m)) {
        Some(marker) => Err(TemplateError::UnresolvedPlaceholder {
            context: context.to_string(),
            marker: (*marker).to_string(),
        }),
        None => Ok(()),
    }
}

// Tera keeps the useful part of a failure (the missing variable, the parse
// position) in the source chain.
fn describe(err: &tera::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaincap_types::document::WorkflowSection;

    fn values(pairs: &[(&str, toml::Value)]) -> ConfigMapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn substitutes_strings_and_integers() {
        let out = render_template(
            "evm/test",
            "A = '{{ A }}'\nB = {{ B }}",
            &values(&[("A", "x".into()), ("B", 7.into())]),
        )
        .unwrap();
        assert_eq!(out, "A = 'x'\nB = 7");
    }

    #[test]
    fn missing_value_fails_with_render_error() {
        let err = render_template("evm/test", "A = {{ A }}", &ConfigMapping::new()).unwrap_err();
        match err {
            TemplateError::Render { context, reason } => {
                assert_eq!(context, "evm/test");
                assert!(reason.contains('A'), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed_template_fails_with_parse_error() {
        let err = render_template("evm/test", "A = {{ A", &values(&[("A", 1.into())])).unwrap_err();
        assert!(matches!(err, TemplateError::Parse { .. }));
    }

    #[test]
    fn residual_markers_are_detected() {
        assert!(validate_template_substitution("PollPeriod = '2s'", "evm").is_ok());
        assert_eq!(
            validate_template_substitution("GasLimitDefault = <no value>", "evm"),
            Err(TemplateError::UnresolvedPlaceholder {
                context: "evm".into(),
                marker: "<no value>".into(),
            })
        );
        // A substituted value that itself looks like a placeholder is rejected too.
        let err = render_template("evm/test", "A = '{{ A }}'", &values(&[("A", "{{ B }}".into())]))
            .unwrap_err();
        assert!(matches!(err, TemplateError::UnresolvedPlaceholder { .. }));
    }

    #[test]
    fn workflow_template_renders_to_a_workflow_section() {
        let rendered = WORKFLOW_TEMPLATE
            .render(
                "evm",
                &values(&[
                    ("FromAddress", "0x00000000000000000000000000000000000000aa".into()),
                    ("ForwarderAddress", "0x00000000000000000000000000000000000000bb".into()),
                    ("GasLimitDefault", 400_000.into()),
                    ("TxAcceptanceState", 3.into()),
                    ("PollPeriod", "2s".into()),
                    ("AcceptanceTimeout", "30s".into()),
                ]),
            )
            .unwrap();
        let section: WorkflowSection = toml::from_str(&rendered).unwrap();
        assert_eq!(section.gas_limit_default, Some(400_000));
        assert_eq!(section.tx_acceptance_state, Some(3));
        assert_eq!(section.poll_period.as_deref(), Some("2s"));
        assert!(section.extra.is_empty());
    }

    #[test]
    fn job_config_template_renders_single_quoted_json() {
        let rendered = JOB_CONFIG_TEMPLATE
            .render(
                "evm",
                &values(&[
                    ("ChainID", 1337.into()),
                    ("NetworkFamily", "evm".into()),
                    ("LogTriggerPollInterval", 1_500_000_000.into()),
                    ("CreForwarderAddress", "0xf0".into()),
                    ("ReceiverGasMinimum", 500.into()),
                    ("NodeAddress", "0xaa".into()),
                ]),
            )
            .unwrap();
        assert_eq!(
            rendered,
            r#"'{"chainId":1337,"network":"evm","logTriggerPollInterval":1500000000, "creForwarderAddress":"0xf0","receiverGasMinimum":500,"nodeAddress":"0xaa"}'"#
        );
        let json: serde_json::Value =
            serde_json::from_str(rendered.trim_matches('\'')).unwrap();
        assert_eq!(json["chainId"], 1337);
    }
}
