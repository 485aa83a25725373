//! Static device configuration: which clusters live on which endpoints and
//! which of them declare the optional LastChangedTime attribute. Stand-in
//! for the code-generated configuration a production host ships.

use std::collections::HashSet;

use resmon_cluster::{attributes, AttributeId, ClusterId, EndpointId, EndpointLayout};

#[derive(Default)]
pub struct DeviceLayout {
    enabled: HashSet<(EndpointId, ClusterId)>,
    with_last_changed_time: HashSet<(EndpointId, ClusterId)>,
}

impl DeviceLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable `cluster` on `endpoint` without the LastChangedTime attribute.
    pub fn enable(&mut self, endpoint: EndpointId, cluster: ClusterId) -> &mut Self {
        self.enabled.insert((endpoint, cluster));
        self
    }

    /// Enable `cluster` on `endpoint` with LastChangedTime declared.
    pub fn enable_with_last_changed_time(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
    ) -> &mut Self {
        self.enabled.insert((endpoint, cluster));
        self.with_last_changed_time.insert((endpoint, cluster));
        self
    }
}

impl EndpointLayout for DeviceLayout {
    fn contains_cluster(&self, endpoint: EndpointId, cluster: ClusterId) -> bool {
        self.enabled.contains(&(endpoint, cluster))
    }

    fn contains_attribute(
        &self,
        endpoint: EndpointId,
        cluster: ClusterId,
        attribute: AttributeId,
    ) -> bool {
        if !self.contains_cluster(endpoint, cluster) {
            return false;
        }
        match attribute {
            attributes::LAST_CHANGED_TIME => {
                self.with_last_changed_time.contains(&(endpoint, cluster))
            }
            _ => true,
        }
    }
}
