//! Command payloads and the handler context a dispatcher hands to an
//! instance.

use crate::types::{CommandPath, Status};

/// Payload of the ResetCondition command. The command carries no fields, so
/// decoding only accepts an empty payload.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResetCondition;

impl ResetCondition {
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.is_empty() {
            Some(ResetCondition)
        } else {
            None
        }
    }
}

/// One in-flight command invocation.
///
/// The dispatcher builds it, passes it to every candidate handler, then
/// inspects `handled` and `status`. A handler that recognizes the command id
/// marks the invocation handled before validating anything, so no fallback
/// dispatch runs even if the payload later turns out to be malformed.
pub struct CommandInvocation<'a> {
    path: CommandPath,
    payload: &'a [u8],
    handled: bool,
    status: Option<Status>,
}

impl<'a> CommandInvocation<'a> {
    pub fn new(path: CommandPath, payload: &'a [u8]) -> Self {
        CommandInvocation {
            path,
            payload,
            handled: false,
            status: None,
        }
    }

    pub fn path(&self) -> CommandPath {
        self.path
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub fn set_handled(&mut self) {
        self.handled = true;
    }

    pub fn handled(&self) -> bool {
        self.handled
    }

    /// Report the command result on the response channel.
    pub fn respond(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }
}
