//! The attribute data store of one cluster instance, together with the
//! change-gated setters and the generic read/write accessors.

use tracing::debug;

use crate::ports::ClusterPorts;
use crate::types::{
    attributes, commands, AttributeId, AttributePath, AttributeValue, ChangeIndication, ClusterId,
    CommandId, DegradationDirection, EndpointId, Feature, FeatureMap, Status, CLUSTER_REVISION,
};

/// Attribute storage plus the collaborator ports of one instance.
///
/// Identity, degradation direction and feature map are fixed at
/// construction. All mutation goes through the typed `update_*` setters so
/// that change notification and durability stay change-gated: a write that
/// leaves the value unchanged never notifies and never persists.
pub struct ClusterState {
    endpoint: EndpointId,
    cluster: ClusterId,

    // Attribute data store.
    condition: u8,
    degradation_direction: DegradationDirection,
    change_indication: ChangeIndication,
    in_place_indicator: bool,
    last_changed_time: Option<u32>,

    feature_map: FeatureMap,
    reset_condition_command_supported: bool,

    ports: ClusterPorts,
}

impl ClusterState {
    pub fn new(
        endpoint: EndpointId,
        cluster: ClusterId,
        feature_map: FeatureMap,
        degradation_direction: DegradationDirection,
        reset_condition_command_supported: bool,
        ports: ClusterPorts,
    ) -> Self {
        ClusterState {
            endpoint,
            cluster,
            condition: 100,
            degradation_direction,
            change_indication: ChangeIndication::Ok,
            in_place_indicator: true,
            last_changed_time: None,
            feature_map,
            reset_condition_command_supported,
            ports,
        }
    }

    pub fn endpoint(&self) -> EndpointId {
        self.endpoint
    }

    pub fn cluster(&self) -> ClusterId {
        self.cluster
    }

    pub fn condition(&self) -> u8 {
        self.condition
    }

    pub fn degradation_direction(&self) -> DegradationDirection {
        self.degradation_direction
    }

    pub fn change_indication(&self) -> ChangeIndication {
        self.change_indication
    }

    pub fn in_place_indicator(&self) -> bool {
        self.in_place_indicator
    }

    pub fn last_changed_time(&self) -> Option<u32> {
        self.last_changed_time
    }

    pub fn feature_map(&self) -> FeatureMap {
        self.feature_map
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.feature_map.has(feature)
    }

    fn path(&self, attribute: AttributeId) -> AttributePath {
        AttributePath {
            endpoint: self.endpoint,
            cluster: self.cluster,
            attribute,
        }
    }

    fn notify(&mut self, attribute: AttributeId) {
        let path = self.path(attribute);
        self.ports.reporting.attribute_changed(path);
    }

    /// Set the condition percentage. The producer guarantees the [0, 100]
    /// range; it is not re-validated here.
    pub fn update_condition(&mut self, new_condition: u8) -> Status {
        let old = self.condition;
        self.condition = new_condition;
        if self.condition != old {
            self.notify(attributes::CONDITION);
        }
        Status::Success
    }

    /// Set the change indication. `Warning` is only legal when the Warning
    /// feature is enabled; otherwise the update is rejected unchanged.
    pub fn update_change_indication(&mut self, new_indication: ChangeIndication) -> Status {
        if new_indication == ChangeIndication::Warning && !self.has_feature(Feature::Warning) {
            return Status::InvalidValue;
        }
        let old = self.change_indication;
        self.change_indication = new_indication;
        if self.change_indication != old {
            self.notify(attributes::CHANGE_INDICATION);
        }
        Status::Success
    }

    pub fn update_in_place_indicator(&mut self, new_in_place: bool) -> Status {
        let old = self.in_place_indicator;
        self.in_place_indicator = new_in_place;
        if self.in_place_indicator != old {
            self.notify(attributes::IN_PLACE_INDICATOR);
        }
        Status::Success
    }

    /// Set the nullable LastChangedTime. On an actual change the value is
    /// persisted first and the change notification fires second.
    pub fn update_last_changed_time(&mut self, new_time: Option<u32>) -> Status {
        let old = self.last_changed_time;
        self.last_changed_time = new_time;
        if self.last_changed_time != old {
            let path = self.path(attributes::LAST_CHANGED_TIME);
            self.ports.persistence.write_scalar(&path, self.last_changed_time);
            self.notify(attributes::LAST_CHANGED_TIME);
        }
        Status::Success
    }

    /// Encode the field addressed by `attribute`. `None` for ids this
    /// cluster does not know; the dispatcher turns that into its
    /// unsupported-attribute answer.
    pub fn read_attribute(&self, attribute: AttributeId) -> Option<AttributeValue> {
        match attribute {
            attributes::CONDITION => Some(AttributeValue::Percent(self.condition)),
            attributes::DEGRADATION_DIRECTION => Some(AttributeValue::DegradationDirection(
                self.degradation_direction,
            )),
            attributes::CHANGE_INDICATION => {
                Some(AttributeValue::ChangeIndication(self.change_indication))
            }
            attributes::IN_PLACE_INDICATOR => {
                Some(AttributeValue::Boolean(self.in_place_indicator))
            }
            attributes::LAST_CHANGED_TIME => {
                Some(AttributeValue::NullableEpochSeconds(self.last_changed_time))
            }
            attributes::FEATURE_MAP => Some(AttributeValue::Bitmap32(self.feature_map.bits())),
            attributes::CLUSTER_REVISION => Some(AttributeValue::Revision(CLUSTER_REVISION)),
            attributes::ACCEPTED_COMMAND_LIST => {
                Some(AttributeValue::CommandList(self.accepted_commands()))
            }
            attributes::GENERATED_COMMAND_LIST => {
                Some(AttributeValue::CommandList(self.generated_commands()))
            }
            attributes::ATTRIBUTE_LIST => Some(AttributeValue::AttributeList(self.attribute_list())),
            _ => None,
        }
    }

    /// Generic write path. Only LastChangedTime is externally writable;
    /// every other field is mutated through its typed setter exclusively.
    pub fn write_attribute(&mut self, attribute: AttributeId, value: &AttributeValue) -> Status {
        match attribute {
            attributes::LAST_CHANGED_TIME => match value {
                AttributeValue::NullableEpochSeconds(time) => self.update_last_changed_time(*time),
                _ => Status::InvalidDataType,
            },
            _ => Status::UnsupportedWrite,
        }
    }

    /// Commands this instance accepts, queried by the dispatcher to answer
    /// capability discovery.
    pub fn accepted_commands(&self) -> Vec<CommandId> {
        if self.reset_condition_command_supported {
            vec![commands::RESET_CONDITION]
        } else {
            Vec::new()
        }
    }

    /// ResetCondition has no response payload, so nothing is ever generated.
    pub fn generated_commands(&self) -> Vec<CommandId> {
        Vec::new()
    }

    pub fn attribute_list(&self) -> Vec<AttributeId> {
        let mut list = vec![
            attributes::CONDITION,
            attributes::DEGRADATION_DIRECTION,
            attributes::CHANGE_INDICATION,
            attributes::IN_PLACE_INDICATOR,
        ];
        if self.declares_last_changed_time() {
            list.push(attributes::LAST_CHANGED_TIME);
        }
        list.extend([
            attributes::GENERATED_COMMAND_LIST,
            attributes::ACCEPTED_COMMAND_LIST,
            attributes::ATTRIBUTE_LIST,
            attributes::FEATURE_MAP,
            attributes::CLUSTER_REVISION,
        ]);
        list
    }

    fn declares_last_changed_time(&self) -> bool {
        self.ports
            .layout
            .contains_attribute(self.endpoint, self.cluster, attributes::LAST_CHANGED_TIME)
    }

    /// The built-in reset: condition back to the direction-appropriate
    /// extreme (untouched when the direction is unknown), change indication
    /// back to Ok, and a best-effort timestamp stamp.
    pub fn reset_condition_to_defaults(&mut self) {
        match self.degradation_direction {
            DegradationDirection::Down => {
                self.update_condition(100);
            }
            DegradationDirection::Up => {
                self.update_condition(0);
            }
            DegradationDirection::Unknown => {}
        }
        self.update_change_indication(ChangeIndication::Ok);
        self.stamp_last_changed_time();
    }

    /// Stamp LastChangedTime with the current wall-clock time, if and only
    /// if the concrete cluster declares the attribute and the clock can
    /// produce a real time. A clock failure leaves the value untouched.
    pub fn stamp_last_changed_time(&mut self) {
        if !self.declares_last_changed_time() {
            return;
        }
        if let Some(now) = self.ports.clock.unix_time() {
            self.update_last_changed_time(Some(now));
        }
    }

    /// Load the persisted LastChangedTime. A missing stored value means
    /// null. Runs before registration, so no notification fires.
    pub(crate) fn load_persistent_attributes(&mut self) {
        let path = self.path(attributes::LAST_CHANGED_TIME);
        match self.ports.persistence.read_scalar(&path) {
            Some(stored) => {
                self.last_changed_time = stored;
                match stored {
                    Some(time) => debug!("loaded LastChangedTime as {time}"),
                    None => debug!("loaded LastChangedTime as null"),
                }
            }
            None => {
                // Nothing stored from a previous run; assume null.
                debug!("no stored LastChangedTime, assuming null");
                self.last_changed_time = None;
            }
        }
    }

    pub(crate) fn enabled_in_layout(&self) -> bool {
        self.ports.layout.contains_cluster(self.endpoint, self.cluster)
    }

    pub(crate) fn register_with_dispatch(&mut self) -> Result<(), crate::error::ClusterError> {
        self.ports
            .registry
            .register_command_handler(self.endpoint, self.cluster)?;
        self.ports
            .registry
            .register_attribute_access(self.endpoint, self.cluster)?;
        Ok(())
    }

    pub(crate) fn fatal(&self, message: &str) -> ! {
        self.ports.fatal.fatal(message)
    }
}
