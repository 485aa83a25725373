//! Error types for cluster initialization.
//!
//! Fatal preconditions (bad alias cluster id, cluster not enabled on the
//! endpoint) are not represented here; they go through
//! [`crate::ports::FatalHandler`] and never return.

use thiserror::Error;

use crate::types::{ClusterId, EndpointId};

#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("a command handler is already registered for endpoint {endpoint} cluster {cluster:#06x}")]
    HandlerAlreadyRegistered {
        endpoint: EndpointId,
        cluster: ClusterId,
    },

    #[error("attribute access registration failed for endpoint {endpoint} cluster {cluster:#06x}")]
    AttributeAccessRegistration {
        endpoint: EndpointId,
        cluster: ClusterId,
    },

    #[error("application init failed: {0}")]
    AppInit(String),
}
