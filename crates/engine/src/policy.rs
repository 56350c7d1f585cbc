// Path: crates/engine/src/policy.rs
//! Construction of the remote-call policy set a capability is registered with.

use chaincap_types::config::PolicyParams;
use chaincap_types::error::PolicyError;
use chaincap_types::policy::{
    CapabilityMethodPolicy, MethodPolicies, RemoteExecutableConfig, RemoteTriggerConfig,
    RequestHasherType, TransmissionSchedule,
};
use chaincap_types::topology::NodeSet;

/// Builds method policies from a validated set of [`PolicyParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodPolicyBuilder {
    params: PolicyParams,
}

impl MethodPolicyBuilder {
    /// Creates a builder, rejecting inconsistent parameters.
    pub fn new(params: PolicyParams) -> Result<Self, PolicyError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The policy shared by every query-style method: fan out to all nodes at
    /// once and hash the full request.
    pub fn read_action_policy(&self) -> CapabilityMethodPolicy {
        CapabilityMethodPolicy::ReadAction(RemoteExecutableConfig {
            transmission_schedule: TransmissionSchedule::AllAtOnce,
            request_timeout: self.params.request_timeout(),
            server_max_parallel_requests: self.params.max_parallel_requests,
            request_hasher_type: RequestHasherType::Simple,
            delta_stage: None,
        })
    }

    /// The report delivery policy: nodes transmit one at a time, each waiting
    /// one block plus a margin for the previous attempt to land.
    pub fn write_report_policy(&self) -> CapabilityMethodPolicy {
        CapabilityMethodPolicy::WriteReportAction(RemoteExecutableConfig {
            transmission_schedule: TransmissionSchedule::OneAtATime,
            request_timeout: self.params.request_timeout(),
            server_max_parallel_requests: self.params.max_parallel_requests,
            request_hasher_type: RequestHasherType::WriteReportExcludeSignatures,
            delta_stage: Some(self.params.delta_stage()),
        })
    }

    /// The log trigger policy for a DON tolerating `max_faulty` faulty nodes.
    pub fn log_trigger_policy(&self, max_faulty: u32) -> Result<CapabilityMethodPolicy, PolicyError> {
        let min_responses = max_faulty.checked_add(1).ok_or_else(|| {
            PolicyError::InvalidParams(format!("fault tolerance {max_faulty} is out of range"))
        })?;
        Ok(CapabilityMethodPolicy::LogTrigger(RemoteTriggerConfig {
            registration_refresh: self.params.registration_refresh(),
            registration_expiry: self.params.registration_expiry(),
            min_responses_to_aggregate: min_responses,
            message_expiry: self.params.message_expiry(),
            max_batch_size: self.params.max_batch_size,
            batch_collection_period: self.params.batch_collection_period(),
        }))
    }

    /// Builds the complete policy set. Either every method gets a valid
    /// policy or an error is returned.
    pub fn build(&self, max_faulty: u32) -> Result<MethodPolicies, PolicyError> {
        let mut policies = MethodPolicies::new();
        let read = self.read_action_policy();
        for action in &self.params.read_actions {
            policies.insert(action.clone(), read.clone());
        }
        policies.insert(self.params.trigger_method.clone(), self.log_trigger_policy(max_faulty)?);
        policies.insert(self.params.write_method.clone(), self.write_report_policy());

        for (method, policy) in &policies {
            policy.validate(method)?;
        }
        tracing::debug!(
            target: "chaincap::policy",
            methods = policies.len(),
            max_faulty,
            "built method policies"
        );
        Ok(policies)
    }

    /// Builds the policy set using the fault tolerance of `node_set`.
    pub fn build_for_node_set(
        &self,
        capability: &str,
        node_set: &NodeSet,
    ) -> Result<MethodPolicies, PolicyError> {
        let max_faulty = node_set
            .max_faulty_nodes()
            .map_err(|source| PolicyError::TopologyResolution {
                capability: capability.to_string(),
                source,
            })?;
        self.build(max_faulty)
    }
}
