//! Minimal in-process dispatch runtime: the stand-in for the interaction
//! model engine that owns the cluster instances and routes requests to
//! them, one at a time, on a single thread.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use resmon_cluster::{
    AttributeId, AttributeValue, ClusterError, ClusterId, CommandId, CommandInvocation,
    CommandPath, DispatchRegistry, EndpointId, Instance, Status,
};
use tracing::{debug, warn};

/// Registration bookkeeping shared between the dispatcher and the instances
/// it hosts. Duplicate registration is a wiring bug and fails init.
#[derive(Default)]
pub struct RegistrationTable {
    command_handlers: HashSet<(EndpointId, ClusterId)>,
    attribute_accessors: HashSet<(EndpointId, ClusterId)>,
}

impl DispatchRegistry for RegistrationTable {
    fn register_command_handler(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
    ) -> Result<(), ClusterError> {
        if !self.command_handlers.insert((endpoint, cluster)) {
            return Err(ClusterError::HandlerAlreadyRegistered { endpoint, cluster });
        }
        Ok(())
    }

    fn register_attribute_access(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
    ) -> Result<(), ClusterError> {
        if !self.attribute_accessors.insert((endpoint, cluster)) {
            return Err(ClusterError::AttributeAccessRegistration { endpoint, cluster });
        }
        Ok(())
    }
}

pub struct Dispatcher {
    registrations: Rc<RefCell<RegistrationTable>>,
    instances: HashMap<(EndpointId, ClusterId), Instance>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher {
            registrations: Rc::new(RefCell::new(RegistrationTable::default())),
            instances: HashMap::new(),
        }
    }

    /// Registry port handed to instances built for this dispatcher.
    pub fn registry(&self) -> Rc<RefCell<RegistrationTable>> {
        Rc::clone(&self.registrations)
    }

    /// Adopt an initialized instance. Routing only reaches instances that
    /// registered through this dispatcher's registry during their init.
    pub fn adopt(&mut self, instance: Instance) {
        let key = (instance.endpoint(), instance.cluster());
        self.instances.insert(key, instance);
    }

    /// Direct access for the application logic that owns the device (wear
    /// simulation, sensor readings). Not part of the protocol surface.
    pub fn instance_mut(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
    ) -> Option<&mut Instance> {
        self.instances.get_mut(&(endpoint, cluster))
    }

    pub fn read(
        &self,
        endpoint: EndpointId,
        cluster: ClusterId,
        attribute: AttributeId,
    ) -> Option<AttributeValue> {
        if !self
            .registrations
            .borrow()
            .attribute_accessors
            .contains(&(endpoint, cluster))
        {
            warn!("read for unregistered path {endpoint}/{cluster:#06x}");
            return None;
        }
        self.instances
            .get(&(endpoint, cluster))?
            .read_attribute(attribute)
    }

    pub fn write(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
        attribute: AttributeId,
        value: &AttributeValue,
    ) -> Status {
        if !self
            .registrations
            .borrow()
            .attribute_accessors
            .contains(&(endpoint, cluster))
        {
            return Status::UnsupportedAttribute;
        }
        match self.instances.get_mut(&(endpoint, cluster)) {
            Some(instance) => instance.write_attribute(attribute, value),
            None => Status::UnsupportedAttribute,
        }
    }

    pub fn invoke(&mut self, path: CommandPath, payload: &[u8]) -> Status {
        if !self
            .registrations
            .borrow()
            .command_handlers
            .contains(&(path.endpoint, path.cluster))
        {
            warn!(
                "command {:#06x} for unregistered path {}/{:#06x}",
                path.command, path.endpoint, path.cluster
            );
            return Status::UnsupportedCommand;
        }
        let Some(instance) = self.instances.get_mut(&(path.endpoint, path.cluster)) else {
            return Status::UnsupportedCommand;
        };

        let mut invocation = CommandInvocation::new(path, payload);
        instance.invoke_command(&mut invocation);
        if !invocation.handled() {
            debug!("no handler claimed command {:#06x}", path.command);
            return Status::UnsupportedCommand;
        }
        invocation.status().unwrap_or(Status::Failure)
    }

    /// Capability discovery: the commands the addressed cluster accepts.
    pub fn accepted_commands(&self, endpoint: EndpointId, cluster: ClusterId) -> Vec<CommandId> {
        self.instances
            .get(&(endpoint, cluster))
            .map(Instance::accepted_commands)
            .unwrap_or_default()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
