//! The three-phase reset protocol and the full-override escape hatch.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::*;
use resmon_cluster::{
    commands, ChangeIndication, CommandInvocation, CommandPath, DegradationDirection, Feature,
    FeatureMap, Status,
};

const CLOCK_TIME: u32 = 1_700_000_000;

#[test]
fn hook_based_reset_down_direction_restores_full_condition() {
    let (mut instance, _harness) = make_instance(
        FeatureMap::NONE.with(Feature::Warning),
        DegradationDirection::Down,
        Box::new(PassiveMonitor),
        Some(CLOCK_TIME),
        true,
    );
    instance.update_condition(15);
    instance.update_change_indication(ChangeIndication::Critical);

    let (handled, status) = invoke_reset(&mut instance);

    assert!(handled);
    assert_eq!(status, Some(Status::Success));
    assert_eq!(instance.condition(), 100);
    assert_eq!(instance.change_indication(), ChangeIndication::Ok);
    assert_eq!(instance.last_changed_time(), Some(CLOCK_TIME));
}

#[test]
fn hook_based_reset_up_direction_restores_zero_condition() {
    let (mut instance, _harness) = make_instance(
        FeatureMap::NONE,
        DegradationDirection::Up,
        Box::new(PassiveMonitor),
        Some(CLOCK_TIME),
        true,
    );
    instance.update_condition(85);

    let (_, status) = invoke_reset(&mut instance);

    assert_eq!(status, Some(Status::Success));
    assert_eq!(instance.condition(), 0);
    assert_eq!(instance.change_indication(), ChangeIndication::Ok);
}

#[test]
fn unknown_direction_leaves_condition_but_still_clears_indication() {
    let (mut instance, _harness) = make_instance(
        FeatureMap::NONE,
        DegradationDirection::Unknown,
        Box::new(PassiveMonitor),
        Some(CLOCK_TIME),
        true,
    );
    instance.update_condition(42);
    instance.update_change_indication(ChangeIndication::Critical);

    let (_, status) = invoke_reset(&mut instance);

    assert_eq!(status, Some(Status::Success));
    assert_eq!(instance.condition(), 42);
    assert_eq!(instance.change_indication(), ChangeIndication::Ok);
}

#[test]
fn pre_hook_failure_blocks_all_state_mutation() {
    let (mut instance, harness) = make_instance(
        FeatureMap::NONE,
        DegradationDirection::Down,
        Box::new(HookMonitor {
            pre_status: Status::Failure,
            post_status: Status::Success,
        }),
        Some(CLOCK_TIME),
        true,
    );
    instance.update_condition(30);
    let reports_before = harness.reporter.borrow().changes.len();

    let (handled, status) = invoke_reset(&mut instance);

    assert!(handled);
    assert_eq!(status, Some(Status::Failure));
    assert_eq!(instance.condition(), 30);
    assert_eq!(instance.change_indication(), ChangeIndication::Ok);
    assert_eq!(instance.last_changed_time(), None);
    assert_eq!(harness.reporter.borrow().changes.len(), reports_before);
}

#[test]
fn post_hook_failure_reports_failure_over_committed_state() {
    let (mut instance, _harness) = make_instance(
        FeatureMap::NONE,
        DegradationDirection::Down,
        Box::new(HookMonitor {
            pre_status: Status::Success,
            post_status: Status::Failure,
        }),
        Some(CLOCK_TIME),
        true,
    );
    instance.update_condition(30);

    let (_, status) = invoke_reset(&mut instance);

    // The built-in reset committed even though the post hook failed.
    assert_eq!(status, Some(Status::Failure));
    assert_eq!(instance.condition(), 100);
    assert_eq!(instance.change_indication(), ChangeIndication::Ok);
    assert_eq!(instance.last_changed_time(), Some(CLOCK_TIME));
}

#[test]
fn full_override_runs_without_touching_the_hooks() {
    let hooks_called = Rc::new(Cell::new(0));
    let (mut instance, _harness) = make_instance(
        FeatureMap::NONE,
        DegradationDirection::Down,
        Box::new(OverrideMonitor {
            hooks_called: Rc::clone(&hooks_called),
        }),
        Some(CLOCK_TIME),
        true,
    );
    instance.update_condition(10);

    let (_, status) = invoke_reset(&mut instance);

    assert_eq!(status, Some(Status::Success));
    assert_eq!(instance.condition(), 100);
    assert_eq!(hooks_called.get(), 0);
}

#[test]
fn malformed_payload_is_rejected_before_the_reset_protocol() {
    let (mut instance, _harness) = make_instance(
        FeatureMap::NONE,
        DegradationDirection::Down,
        Box::new(PassiveMonitor),
        Some(CLOCK_TIME),
        true,
    );
    instance.update_condition(55);

    let (handled, status) = invoke_reset_with_payload(&mut instance, &[0x15, 0x18]);

    // Handled anyway: no fallback dispatch once the command was recognized.
    assert!(handled);
    assert_eq!(status, Some(Status::InvalidCommand));
    assert_eq!(instance.condition(), 55);
}

#[test]
fn foreign_command_ids_are_left_for_fallback_dispatch() {
    let (mut instance, _harness) = make_instance(
        FeatureMap::NONE,
        DegradationDirection::Down,
        Box::new(PassiveMonitor),
        Some(CLOCK_TIME),
        true,
    );

    let path = CommandPath {
        endpoint: instance.endpoint(),
        cluster: instance.cluster(),
        command: 0x1234,
    };
    let mut invocation = CommandInvocation::new(path, &[]);
    instance.invoke_command(&mut invocation);

    assert!(!invocation.handled());
    assert_eq!(invocation.status(), None);
}

#[test]
fn already_handled_invocations_are_ignored() {
    let (mut instance, _harness) = make_instance(
        FeatureMap::NONE,
        DegradationDirection::Down,
        Box::new(PassiveMonitor),
        Some(CLOCK_TIME),
        true,
    );
    instance.update_condition(55);

    let path = CommandPath {
        endpoint: instance.endpoint(),
        cluster: instance.cluster(),
        command: commands::RESET_CONDITION,
    };
    let mut invocation = CommandInvocation::new(path, &[]);
    invocation.set_handled();
    instance.invoke_command(&mut invocation);

    assert_eq!(invocation.status(), None);
    assert_eq!(instance.condition(), 55);
}

#[test]
fn clock_failure_leaves_the_timestamp_untouched() {
    let (mut instance, _harness) = make_instance(
        FeatureMap::NONE,
        DegradationDirection::Down,
        Box::new(PassiveMonitor),
        None,
        true,
    );
    instance.update_last_changed_time(Some(10));
    instance.update_condition(20);

    let (_, status) = invoke_reset(&mut instance);

    // Best-effort clock: the reset still succeeds and the old stamp stays.
    assert_eq!(status, Some(Status::Success));
    assert_eq!(instance.condition(), 100);
    assert_eq!(instance.last_changed_time(), Some(10));
}

#[test]
fn undeclared_timestamp_attribute_is_never_stamped() {
    let (mut instance, harness) = make_instance(
        FeatureMap::NONE,
        DegradationDirection::Down,
        Box::new(PassiveMonitor),
        Some(CLOCK_TIME),
        false,
    );
    instance.update_condition(20);

    let (_, status) = invoke_reset(&mut instance);

    assert_eq!(status, Some(Status::Success));
    assert_eq!(instance.last_changed_time(), None);
    assert_eq!(harness.persistence.borrow().writes, 0);
}
