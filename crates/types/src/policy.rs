// Path: crates/types/src/policy.rs
//! Remote-call policies registered for each method of a capability.

use crate::codec::duration_ms;
use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// How a request is fanned out to the nodes serving a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum TransmissionSchedule {
    /// Every node is contacted at once.
    AllAtOnce,
    /// Nodes are contacted sequentially, each after `delta_stage`.
    OneAtATime,
}

/// How incoming requests are hashed for de-duplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum RequestHasherType {
    /// Hash over the full request payload.
    Simple,
    /// Hash over a write report, ignoring its signatures, so a retransmission
    /// after partial failure maps to the same request.
    WriteReportExcludeSignatures,
}

/// The kind of a capability method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MethodKind {
    /// A query-style method.
    ReadAction,
    /// A method that delivers a signed report on-chain.
    WriteReportAction,
    /// A trigger subscription for chain logs.
    LogTrigger,
}

/// Policy for executable (request/response) methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteExecutableConfig {
    /// Fan-out schedule.
    pub transmission_schedule: TransmissionSchedule,
    /// Per-request timeout.
    #[serde(with = "duration_ms")]
    pub request_timeout: Duration,
    /// Maximum concurrent requests the serving node accepts.
    pub server_max_parallel_requests: u32,
    /// De-duplication hashing.
    pub request_hasher_type: RequestHasherType,
    /// Delay between sequential transmissions; only set for `OneAtATime`.
    #[serde(
        default,
        with = "duration_ms::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub delta_stage: Option<Duration>,
}

/// Policy for trigger subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTriggerConfig {
    /// How often a subscriber refreshes its registration.
    #[serde(with = "duration_ms")]
    pub registration_refresh: Duration,
    /// How long a registration lives without a refresh.
    #[serde(with = "duration_ms")]
    pub registration_expiry: Duration,
    /// Number of matching responses required before aggregation.
    pub min_responses_to_aggregate: u32,
    /// How long a trigger message is retained.
    #[serde(with = "duration_ms")]
    pub message_expiry: Duration,
    /// Maximum number of events delivered per batch.
    pub max_batch_size: u32,
    /// How long events are collected before a batch is sent.
    #[serde(with = "duration_ms")]
    pub batch_collection_period: Duration,
}

/// The remote-call contract for one named method of a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "config", rename_all = "PascalCase")]
pub enum CapabilityMethodPolicy {
    /// A query-style method.
    ReadAction(RemoteExecutableConfig),
    /// The report delivery method.
    WriteReportAction(RemoteExecutableConfig),
    /// The log trigger subscription.
    LogTrigger(RemoteTriggerConfig),
}

/// The complete per-method policy set of a capability, keyed by method name.
pub type MethodPolicies = BTreeMap<String, CapabilityMethodPolicy>;

impl CapabilityMethodPolicy {
    /// Returns the method kind.
    pub fn kind(&self) -> MethodKind {
        match self {
            Self::ReadAction(_) => MethodKind::ReadAction,
            Self::WriteReportAction(_) => MethodKind::WriteReportAction,
            Self::LogTrigger(_) => MethodKind::LogTrigger,
        }
    }

    /// Checks the protocol invariants of this policy.
    pub fn validate(&self, method: &str) -> Result<(), PolicyError> {
        let violated = |reason: String| PolicyError::InvariantViolated {
            method: method.to_string(),
            reason,
        };
        match self {
            Self::ReadAction(cfg) | Self::WriteReportAction(cfg) => {
                if cfg.server_max_parallel_requests == 0 {
                    return Err(violated("server_max_parallel_requests must be > 0".into()));
                }
                if cfg.request_timeout.is_zero() {
                    return Err(violated("request_timeout must be > 0".into()));
                }
                if cfg.transmission_schedule == TransmissionSchedule::OneAtATime
                    && cfg.delta_stage.is_none()
                {
                    return Err(violated("OneAtATime transmission requires delta_stage".into()));
                }
            }
            Self::LogTrigger(cfg) => {
                if cfg.registration_expiry <= cfg.registration_refresh {
                    return Err(violated(format!(
                        "registration_expiry ({:?}) must exceed registration_refresh ({:?})",
                        cfg.registration_expiry, cfg.registration_refresh
                    )));
                }
                if cfg.min_responses_to_aggregate < 1 {
                    return Err(violated("min_responses_to_aggregate must be >= 1".into()));
                }
                if cfg.message_expiry < cfg.registration_expiry.saturating_mul(2) {
                    return Err(violated(format!(
                        "message_expiry ({:?}) must be at least twice registration_expiry ({:?})",
                        cfg.message_expiry, cfg.registration_expiry
                    )));
                }
                if cfg.max_batch_size == 0 {
                    return Err(violated("max_batch_size must be > 0".into()));
                }
            }
        }
        Ok(())
    }
}
