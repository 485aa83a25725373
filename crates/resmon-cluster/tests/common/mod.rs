//! Shared fakes for the cluster tests: in-memory collaborators that record
//! calls so tests can assert counts and arguments.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use resmon_cluster::{
    attributes, clusters, commands, is_valid_alias_cluster, AttributeChangeListener, AttributeId,
    AttributePath, ChangeIndication, ClusterError, ClusterId, ClusterPorts, ClusterState,
    CommandInvocation, CommandPath, DegradationDirection, DispatchRegistry, EndpointId,
    EndpointLayout, FatalHandler, FeatureMap, Instance, MonitorDelegate, PersistenceProvider,
    Status, WallClock,
};

pub const ENDPOINT: EndpointId = 1;
pub const CLUSTER: ClusterId = clusters::HEPA_FILTER_MONITORING;

#[derive(Default)]
pub struct MemoryPersistence {
    pub values: HashMap<AttributePath, Option<u32>>,
    pub writes: usize,
}

impl PersistenceProvider for MemoryPersistence {
    fn read_scalar(&self, path: &AttributePath) -> Option<Option<u32>> {
        self.values.get(path).copied()
    }

    fn write_scalar(&mut self, path: &AttributePath, value: Option<u32>) {
        self.writes += 1;
        self.values.insert(*path, value);
    }
}

#[derive(Default)]
pub struct RecordingReporter {
    pub changes: Vec<AttributePath>,
}

impl RecordingReporter {
    pub fn count_for(&self, attribute: AttributeId) -> usize {
        self.changes
            .iter()
            .filter(|path| path.attribute == attribute)
            .count()
    }
}

impl AttributeChangeListener for RecordingReporter {
    fn attribute_changed(&mut self, path: AttributePath) {
        self.changes.push(path);
    }
}

pub struct FixedClock(pub Option<u32>);

impl WallClock for FixedClock {
    fn unix_time(&self) -> Option<u32> {
        self.0
    }
}

/// Layout that enables every alias cluster on [`ENDPOINT`] and declares
/// LastChangedTime only when asked to.
pub struct StaticLayout {
    pub declares_last_changed_time: bool,
}

impl EndpointLayout for StaticLayout {
    fn contains_cluster(&self, endpoint: EndpointId, cluster: ClusterId) -> bool {
        endpoint == ENDPOINT && is_valid_alias_cluster(cluster)
    }

    fn contains_attribute(
        &self,
        _endpoint: EndpointId,
        _cluster: ClusterId,
        attribute: AttributeId,
    ) -> bool {
        if attribute == attributes::LAST_CHANGED_TIME {
            self.declares_last_changed_time
        } else {
            true
        }
    }
}

#[derive(Default)]
pub struct AcceptingRegistry {
    pub command_handlers: usize,
    pub attribute_accessors: usize,
}

impl DispatchRegistry for AcceptingRegistry {
    fn register_command_handler(
        &mut self,
        _endpoint: EndpointId,
        _cluster: ClusterId,
    ) -> Result<(), ClusterError> {
        self.command_handlers += 1;
        Ok(())
    }

    fn register_attribute_access(
        &mut self,
        _endpoint: EndpointId,
        _cluster: ClusterId,
    ) -> Result<(), ClusterError> {
        self.attribute_accessors += 1;
        Ok(())
    }
}

/// Registry that already holds a handler for every path.
pub struct DuplicateRegistry;

impl DispatchRegistry for DuplicateRegistry {
    fn register_command_handler(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
    ) -> Result<(), ClusterError> {
        Err(ClusterError::HandlerAlreadyRegistered { endpoint, cluster })
    }

    fn register_attribute_access(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
    ) -> Result<(), ClusterError> {
        Err(ClusterError::AttributeAccessRegistration { endpoint, cluster })
    }
}

/// Abort hook for tests: panics instead of taking the process down.
pub struct PanicOnFatal;

impl FatalHandler for PanicOnFatal {
    fn fatal(&self, message: &str) -> ! {
        panic!("fatal precondition: {message}")
    }
}

pub struct Harness {
    pub persistence: Rc<RefCell<MemoryPersistence>>,
    pub reporter: Rc<RefCell<RecordingReporter>>,
    pub registry: Rc<RefCell<AcceptingRegistry>>,
}

pub fn test_ports(clock: Option<u32>, declares_last_changed_time: bool) -> (ClusterPorts, Harness) {
    let persistence = Rc::new(RefCell::new(MemoryPersistence::default()));
    let reporter = Rc::new(RefCell::new(RecordingReporter::default()));
    let registry = Rc::new(RefCell::new(AcceptingRegistry::default()));
    let ports = ClusterPorts {
        persistence: Box::new(Rc::clone(&persistence)),
        reporting: Box::new(Rc::clone(&reporter)),
        clock: Box::new(FixedClock(clock)),
        layout: Box::new(StaticLayout {
            declares_last_changed_time,
        }),
        registry: Box::new(Rc::clone(&registry)),
        fatal: Box::new(PanicOnFatal),
    };
    let harness = Harness {
        persistence,
        reporter,
        registry,
    };
    (ports, harness)
}

/// Hook-based delegate with default hooks.
pub struct PassiveMonitor;

impl MonitorDelegate for PassiveMonitor {
    fn app_init(&mut self, _state: &mut ClusterState) -> Result<(), ClusterError> {
        Ok(())
    }
}

/// Hook-based delegate with configurable hook statuses.
pub struct HookMonitor {
    pub pre_status: Status,
    pub post_status: Status,
}

impl MonitorDelegate for HookMonitor {
    fn app_init(&mut self, _state: &mut ClusterState) -> Result<(), ClusterError> {
        Ok(())
    }

    fn pre_reset_condition(&mut self, _state: &mut ClusterState) -> Status {
        self.pre_status
    }

    fn post_reset_condition(&mut self, _state: &mut ClusterState) -> Status {
        self.post_status
    }
}

/// Full-override delegate; counts hook invocations to prove the bypass.
pub struct OverrideMonitor {
    pub hooks_called: Rc<Cell<u32>>,
}

impl MonitorDelegate for OverrideMonitor {
    fn app_init(&mut self, _state: &mut ClusterState) -> Result<(), ClusterError> {
        Ok(())
    }

    fn on_reset_condition(&mut self, state: &mut ClusterState) -> Status {
        match state.degradation_direction() {
            DegradationDirection::Down => {
                state.update_condition(100);
            }
            DegradationDirection::Up => {
                state.update_condition(0);
            }
            DegradationDirection::Unknown => {}
        }
        state.update_change_indication(ChangeIndication::Ok);
        state.stamp_last_changed_time();
        Status::Success
    }

    fn pre_reset_condition(&mut self, _state: &mut ClusterState) -> Status {
        self.hooks_called.set(self.hooks_called.get() + 1);
        Status::Success
    }

    fn post_reset_condition(&mut self, _state: &mut ClusterState) -> Status {
        self.hooks_called.set(self.hooks_called.get() + 1);
        Status::Success
    }
}

/// Delegate whose application init fails.
pub struct FailingInitMonitor;

impl MonitorDelegate for FailingInitMonitor {
    fn app_init(&mut self, _state: &mut ClusterState) -> Result<(), ClusterError> {
        Err(ClusterError::AppInit("sensor probe not found".into()))
    }
}

/// Build and initialize an instance on [`ENDPOINT`]/[`CLUSTER`] with the
/// reset command supported.
pub fn make_instance(
    feature_map: FeatureMap,
    direction: DegradationDirection,
    delegate: Box<dyn MonitorDelegate>,
    clock: Option<u32>,
    declares_last_changed_time: bool,
) -> (Instance, Harness) {
    let (ports, harness) = test_ports(clock, declares_last_changed_time);
    let mut instance = Instance::new(ENDPOINT, CLUSTER, feature_map, direction, true, ports, delegate);
    instance.init().expect("init should succeed");
    (instance, harness)
}

/// Route a ResetCondition invocation with the given payload to the instance.
pub fn invoke_reset_with_payload(
    instance: &mut Instance,
    payload: &[u8],
) -> (bool, Option<Status>) {
    let path = CommandPath {
        endpoint: instance.endpoint(),
        cluster: instance.cluster(),
        command: commands::RESET_CONDITION,
    };
    let mut invocation = CommandInvocation::new(path, payload);
    instance.invoke_command(&mut invocation);
    (invocation.handled(), invocation.status())
}

pub fn invoke_reset(instance: &mut Instance) -> (bool, Option<Status>) {
    invoke_reset_with_payload(instance, &[])
}
