//! Assembly of the demo device: an air purifier endpoint with four filter
//! monitors and a printer endpoint with an ink cartridge monitor.

use std::cell::RefCell;
use std::rc::Rc;

use resmon_cluster::{
    clusters, AbortOnFatal, ClusterError, ClusterId, ClusterPorts, DegradationDirection,
    EndpointId, Feature, FeatureMap, Instance, MonitorDelegate, WallClock,
};

use crate::dispatch::Dispatcher;
use crate::instances::{
    ActivatedCarbonFilterMonitor, HepaFilterMonitor, InkCartridgeMonitor, IonizingFilterMonitor,
    ZeoliteFilterMonitor,
};
use crate::layout::DeviceLayout;
use crate::persistence::FilePersistence;
use crate::report::LogReporter;

pub const AIR_PURIFIER_ENDPOINT: EndpointId = 1;
pub const PRINTER_ENDPOINT: EndpointId = 2;

/// Every (endpoint, cluster) pair the demo device monitors.
pub const MONITOR_PATHS: [(EndpointId, ClusterId); 5] = [
    (AIR_PURIFIER_ENDPOINT, clusters::HEPA_FILTER_MONITORING),
    (AIR_PURIFIER_ENDPOINT, clusters::ACTIVATED_CARBON_FILTER_MONITORING),
    (AIR_PURIFIER_ENDPOINT, clusters::IONIZING_FILTER_MONITORING),
    (AIR_PURIFIER_ENDPOINT, clusters::ZEOLITE_FILTER_MONITORING),
    (PRINTER_ENDPOINT, clusters::INK_CARTRIDGE_MONITORING),
];

/// Build and initialize the whole device on top of the given attribute
/// store. `make_clock` supplies one wall-clock port per instance, so hosts
/// without real time can plug in a null clock.
pub fn build_device(
    store: FilePersistence,
    make_clock: impl Fn() -> Box<dyn WallClock>,
) -> Result<Dispatcher, ClusterError> {
    let persistence = Rc::new(RefCell::new(store));
    let reporter = Rc::new(RefCell::new(LogReporter::default()));

    let mut layout = DeviceLayout::new();
    layout
        .enable_with_last_changed_time(AIR_PURIFIER_ENDPOINT, clusters::HEPA_FILTER_MONITORING)
        .enable_with_last_changed_time(
            AIR_PURIFIER_ENDPOINT,
            clusters::ACTIVATED_CARBON_FILTER_MONITORING,
        )
        .enable(AIR_PURIFIER_ENDPOINT, clusters::IONIZING_FILTER_MONITORING)
        .enable(AIR_PURIFIER_ENDPOINT, clusters::ZEOLITE_FILTER_MONITORING)
        .enable_with_last_changed_time(PRINTER_ENDPOINT, clusters::INK_CARTRIDGE_MONITORING);
    let layout = Rc::new(RefCell::new(layout));

    let mut dispatcher = Dispatcher::new();

    type Monitor = (
        EndpointId,
        ClusterId,
        FeatureMap,
        DegradationDirection,
        Box<dyn MonitorDelegate>,
    );
    let condition_only = FeatureMap::NONE.with(Feature::Condition);
    let condition_and_warning = condition_only.with(Feature::Warning);
    let monitors: Vec<Monitor> = vec![
        (
            AIR_PURIFIER_ENDPOINT,
            clusters::HEPA_FILTER_MONITORING,
            condition_and_warning,
            DegradationDirection::Down,
            Box::new(HepaFilterMonitor),
        ),
        (
            AIR_PURIFIER_ENDPOINT,
            clusters::ACTIVATED_CARBON_FILTER_MONITORING,
            condition_only,
            DegradationDirection::Down,
            Box::new(ActivatedCarbonFilterMonitor),
        ),
        (
            AIR_PURIFIER_ENDPOINT,
            clusters::IONIZING_FILTER_MONITORING,
            condition_only,
            DegradationDirection::Up,
            Box::new(IonizingFilterMonitor),
        ),
        (
            AIR_PURIFIER_ENDPOINT,
            clusters::ZEOLITE_FILTER_MONITORING,
            condition_only,
            DegradationDirection::Down,
            Box::new(ZeoliteFilterMonitor),
        ),
        (
            PRINTER_ENDPOINT,
            clusters::INK_CARTRIDGE_MONITORING,
            condition_and_warning,
            DegradationDirection::Down,
            Box::new(InkCartridgeMonitor),
        ),
    ];

    for (endpoint, cluster, features, direction, delegate) in monitors {
        let ports = ClusterPorts {
            persistence: Box::new(Rc::clone(&persistence)),
            reporting: Box::new(Rc::clone(&reporter)),
            clock: make_clock(),
            layout: Box::new(Rc::clone(&layout)),
            registry: Box::new(dispatcher.registry()),
            fatal: Box::new(AbortOnFatal),
        };
        let mut instance =
            Instance::new(endpoint, cluster, features, direction, true, ports, delegate);
        instance.init()?;
        dispatcher.adopt(instance);
    }

    Ok(dispatcher)
}
