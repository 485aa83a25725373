//! Per-resource-type behavior plugged into a cluster [`crate::Instance`].

use crate::error::ClusterError;
use crate::state::ClusterState;
use crate::types::Status;

/// Resource-type-specific behavior. One flat trait; implementations pick one
/// of two extension strategies:
///
/// 1. Override [`MonitorDelegate::on_reset_condition`] entirely and supply
///    the whole reset behavior (state update and notification) themselves.
/// 2. Keep the provided `on_reset_condition` and supply only the pre and
///    post hooks around the built-in reset.
///
/// With strategy 2 the pre hook gates the sequence: any status other than
/// `Success` aborts before any state mutation and becomes the command
/// result. The built-in reset then commits; the post hook runs last and its
/// status is the final result, but a post-hook failure does not unwind the
/// already-committed state. Side effects behind the pre hook must therefore
/// be safe to attempt and abort, while the post hook is advisory cleanup on
/// top of committed state.
pub trait MonitorDelegate {
    /// Runs once during [`crate::Instance::init`], after the instance has
    /// been validated and registered. An error aborts initialization.
    fn app_init(&mut self, state: &mut ClusterState) -> Result<(), ClusterError>;

    /// Full reset behavior for the ResetCondition command.
    fn on_reset_condition(&mut self, state: &mut ClusterState) -> Status {
        let status = self.pre_reset_condition(state);
        if status != Status::Success {
            return status;
        }
        state.reset_condition_to_defaults();
        self.post_reset_condition(state)
    }

    fn pre_reset_condition(&mut self, _state: &mut ClusterState) -> Status {
        Status::Success
    }

    fn post_reset_condition(&mut self, _state: &mut ClusterState) -> Status {
        Status::Success
    }
}
