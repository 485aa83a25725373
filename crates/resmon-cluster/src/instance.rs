//! One resource monitoring cluster instance: the generic state machine plus
//! its resource-type delegate.

use tracing::debug;

use crate::command::{CommandInvocation, ResetCondition};
use crate::delegate::MonitorDelegate;
use crate::error::ClusterError;
use crate::ports::ClusterPorts;
use crate::state::ClusterState;
use crate::types::{
    commands, is_valid_alias_cluster, AttributeId, AttributeValue, ChangeIndication, ClusterId,
    CommandId, DegradationDirection, EndpointId, Feature, FeatureMap, Status,
};

/// A resource monitoring cluster on one endpoint.
///
/// Construct it with its immutable identity, then call [`Instance::init`]
/// exactly once before the dispatcher routes anything to it. The host owns
/// the instance for its whole lifetime; dispatch addresses it by
/// (endpoint, cluster) path and never copies or relocates it.
pub struct Instance {
    state: ClusterState,
    delegate: Box<dyn MonitorDelegate>,
    initialized: bool,
}

impl Instance {
    pub fn new(
        endpoint: EndpointId,
        cluster: ClusterId,
        feature_map: FeatureMap,
        degradation_direction: DegradationDirection,
        reset_condition_command_supported: bool,
        ports: ClusterPorts,
        delegate: Box<dyn MonitorDelegate>,
    ) -> Self {
        Instance {
            state: ClusterState::new(
                endpoint,
                cluster,
                feature_map,
                degradation_direction,
                reset_condition_command_supported,
                ports,
            ),
            delegate,
            initialized: false,
        }
    }

    /// Initialize the instance: validate the fatal preconditions, load the
    /// persisted attributes, register with the dispatch runtime, then run
    /// the delegate's application init.
    ///
    /// An invalid alias cluster id or a (endpoint, cluster) pair the host
    /// configuration does not enable is a deployment bug; the fatal handler
    /// takes over and this call does not return. Registration and
    /// application-init failures propagate as errors and abort init.
    pub fn init(&mut self) -> Result<(), ClusterError> {
        debug!(
            endpoint = self.state.endpoint(),
            cluster = format_args!("{:#06x}", self.state.cluster()),
            "resource monitoring init"
        );

        if !is_valid_alias_cluster(self.state.cluster()) {
            self.state.fatal(&format!(
                "cluster id {:#06x} is not a resource monitoring alias",
                self.state.cluster()
            ));
        }
        if !self.state.enabled_in_layout() {
            self.state.fatal(&format!(
                "cluster {:#06x} is not enabled on endpoint {}",
                self.state.cluster(),
                self.state.endpoint()
            ));
        }

        self.state.load_persistent_attributes();
        self.state.register_with_dispatch()?;

        debug!("running application init");
        self.delegate.app_init(&mut self.state)?;

        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Entry point for command invocations routed to this instance.
    ///
    /// Invocations already handled elsewhere and command ids this cluster
    /// does not know are left untouched for the dispatcher's fallback
    /// handling.
    pub fn invoke_command(&mut self, invocation: &mut CommandInvocation<'_>) {
        if invocation.handled() {
            return;
        }
        match invocation.path().command {
            commands::RESET_CONDITION => self.handle_reset_condition(invocation),
            _ => {}
        }
    }

    fn handle_reset_condition(&mut self, invocation: &mut CommandInvocation<'_>) {
        debug!("handling ResetCondition");

        // Take responsibility for the command before validating anything, so
        // a decode failure still suppresses fallback dispatch.
        invocation.set_handled();

        if ResetCondition::decode(invocation.payload()).is_none() {
            invocation.respond(Status::InvalidCommand);
            return;
        }

        let status = self.delegate.on_reset_condition(&mut self.state);
        invocation.respond(status);
    }

    // Registry-facing attribute surface.

    pub fn read_attribute(&self, attribute: AttributeId) -> Option<AttributeValue> {
        self.state.read_attribute(attribute)
    }

    pub fn write_attribute(&mut self, attribute: AttributeId, value: &AttributeValue) -> Status {
        self.state.write_attribute(attribute, value)
    }

    pub fn accepted_commands(&self) -> Vec<CommandId> {
        self.state.accepted_commands()
    }

    pub fn generated_commands(&self) -> Vec<CommandId> {
        self.state.generated_commands()
    }

    pub fn attribute_list(&self) -> Vec<AttributeId> {
        self.state.attribute_list()
    }

    // Typed setters and getters for application logic.

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.state.has_feature(feature)
    }

    pub fn update_condition(&mut self, new_condition: u8) -> Status {
        self.state.update_condition(new_condition)
    }

    pub fn update_change_indication(&mut self, new_indication: ChangeIndication) -> Status {
        self.state.update_change_indication(new_indication)
    }

    pub fn update_in_place_indicator(&mut self, new_in_place: bool) -> Status {
        self.state.update_in_place_indicator(new_in_place)
    }

    pub fn update_last_changed_time(&mut self, new_time: Option<u32>) -> Status {
        self.state.update_last_changed_time(new_time)
    }

    pub fn endpoint(&self) -> EndpointId {
        self.state.endpoint()
    }

    pub fn cluster(&self) -> ClusterId {
        self.state.cluster()
    }

    pub fn condition(&self) -> u8 {
        self.state.condition()
    }

    pub fn degradation_direction(&self) -> DegradationDirection {
        self.state.degradation_direction()
    }

    pub fn change_indication(&self) -> ChangeIndication {
        self.state.change_indication()
    }

    pub fn in_place_indicator(&self) -> bool {
        self.state.in_place_indicator()
    }

    pub fn last_changed_time(&self) -> Option<u32> {
        self.state.last_changed_time()
    }

    pub fn feature_map(&self) -> FeatureMap {
        self.state.feature_map()
    }
}
