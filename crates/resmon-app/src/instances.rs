//! Per-resource-type monitors, one for each cluster the demo device
//! exposes.

use resmon_cluster::{
    ChangeIndication, ClusterError, ClusterState, DegradationDirection, MonitorDelegate, Status,
};
use tracing::{debug, info, warn};

/// HEPA filter: supplies the entire reset behavior itself (full override),
/// replicating the direction-based math and timestamp stamp explicitly.
pub struct HepaFilterMonitor;

impl MonitorDelegate for HepaFilterMonitor {
    fn app_init(&mut self, _state: &mut ClusterState) -> Result<(), ClusterError> {
        debug!("HepaFilterMonitor init");
        Ok(())
    }

    fn on_reset_condition(&mut self, state: &mut ClusterState) -> Status {
        debug!("HepaFilterMonitor reset");
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
}

/// Activated carbon filter: hook-based, fully served by the built-in reset.
pub struct ActivatedCarbonFilterMonitor;

impl MonitorDelegate for ActivatedCarbonFilterMonitor {
    fn app_init(&mut self, _state: &mut ClusterState) -> Result<(), ClusterError> {
        debug!("ActivatedCarbonFilterMonitor init");
        Ok(())
    }
}

/// Ionizing filter: hook-based; the post hook only notes the plate cleaning
/// that accompanies a reset (advisory, never blocks the committed state).
pub struct IonizingFilterMonitor;

impl MonitorDelegate for IonizingFilterMonitor {
    fn app_init(&mut self, _state: &mut ClusterState) -> Result<(), ClusterError> {
        debug!("IonizingFilterMonitor init");
        Ok(())
    }

    fn post_reset_condition(&mut self, _state: &mut ClusterState) -> Status {
        info!("ionizing plates assumed cleaned");
        Status::Success
    }
}

/// Zeolite filter: hook-based, same shape as the ionizing filter.
pub struct ZeoliteFilterMonitor;

impl MonitorDelegate for ZeoliteFilterMonitor {
    fn app_init(&mut self, _state: &mut ClusterState) -> Result<(), ClusterError> {
        debug!("ZeoliteFilterMonitor init");
        Ok(())
    }

    fn post_reset_condition(&mut self, _state: &mut ClusterState) -> Status {
        info!("zeolite regeneration cycle restarted");
        Status::Success
    }
}

/// Ink cartridge: the pre hook refuses a reset while no cartridge is in
/// place, so the built-in reset never runs for an empty bay.
pub struct InkCartridgeMonitor;

impl MonitorDelegate for InkCartridgeMonitor {
    fn app_init(&mut self, _state: &mut ClusterState) -> Result<(), ClusterError> {
        debug!("InkCartridgeMonitor init");
        Ok(())
    }

    fn pre_reset_condition(&mut self, state: &mut ClusterState) -> Status {
        if !state.in_place_indicator() {
            warn!("refusing ResetCondition: no cartridge in place");
            return Status::Failure;
        }
        Status::Success
    }
}
