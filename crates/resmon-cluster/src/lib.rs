//! Generic resource monitoring cluster.
//!
//! A device can expose several logically identical measurement facets
//! (filter wear, ink level, tank fill) as aliased clusters sharing one
//! behavioral contract: a bounded condition value that degrades over time, a
//! coarse change indication, and a ResetCondition command. This crate
//! implements the shared state machine once; per-resource-type crates plug
//! in through [`MonitorDelegate`] and the collaborator ports.

pub mod command;
pub mod delegate;
pub mod error;
pub mod instance;
pub mod ports;
pub mod state;
pub mod types;

pub use command::{CommandInvocation, ResetCondition};
pub use delegate::MonitorDelegate;
pub use error::ClusterError;
pub use instance::Instance;
pub use ports::{
    AbortOnFatal, AttributeChangeListener, ClusterPorts, DispatchRegistry, EndpointLayout,
    FatalHandler, PersistenceProvider, WallClock,
};
pub use state::ClusterState;
pub use types::{
    attributes, clusters, commands, is_valid_alias_cluster, AttributeId, AttributePath,
    AttributeValue, ChangeIndication, ClusterId, CommandId, CommandPath, DegradationDirection,
    EndpointId, Feature, FeatureMap, Status, ALIASED_CLUSTERS, CLUSTER_REVISION,
};
