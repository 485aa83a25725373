//! Collaborator interfaces the cluster depends on.
//!
//! The dispatch model is single-threaded and synchronous, so the traits take
//! `&mut self` where the collaborator observes calls and nothing here is
//! `Send` or `Sync`. A host that shares one adapter between several
//! instances wraps it in `Rc<RefCell<_>>`; the blanket impls below make the
//! wrapper usable wherever the trait is expected.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ClusterError;
use crate::types::{AttributeId, AttributePath, ClusterId, EndpointId};

/// Durable storage for attribute values that must survive a restart.
///
/// Only the nullable LastChangedTime timestamp goes through this port.
pub trait PersistenceProvider {
    /// Read a previously stored nullable scalar. Returns `None` when nothing
    /// has ever been written under `path`; the inner option is the stored
    /// value itself, which may be null.
    fn read_scalar(&self, path: &AttributePath) -> Option<Option<u32>>;

    /// Store a nullable scalar under `path`. Fire and forget; the cluster
    /// does not observe write failures.
    fn write_scalar(&mut self, path: &AttributePath, value: Option<u32>);
}

/// Change-notification sink, called exactly once per attribute whose value
/// actually changed, after the in-memory update.
pub trait AttributeChangeListener {
    fn attribute_changed(&mut self, path: AttributePath);
}

/// Best-effort wall clock.
pub trait WallClock {
    /// Current real time as Unix seconds, or `None` when the host has no
    /// trustworthy wall-clock time. Failure is not an error.
    fn unix_time(&self) -> Option<u32>;
}

/// Host configuration probe: which clusters are enabled on which endpoints,
/// and which optional attributes a concrete cluster declares.
pub trait EndpointLayout {
    fn contains_cluster(&self, endpoint: EndpointId, cluster: ClusterId) -> bool;

    fn contains_attribute(
        &self,
        endpoint: EndpointId,
        cluster: ClusterId,
        attribute: AttributeId,
    ) -> bool;
}

/// Registration surface of the command/attribute dispatch runtime. Called
/// once per instance during init.
pub trait DispatchRegistry {
    fn register_command_handler(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
    ) -> Result<(), ClusterError>;

    fn register_attribute_access(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
    ) -> Result<(), ClusterError>;
}

/// Handler for unrecoverable configuration bugs detected at init.
///
/// Implementations must not return. Tests inject a panicking handler instead
/// of taking the process down.
pub trait FatalHandler {
    fn fatal(&self, message: &str) -> !;
}

/// Default fatal handler: log and abort the process.
pub struct AbortOnFatal;

impl FatalHandler for AbortOnFatal {
    fn fatal(&self, message: &str) -> ! {
        tracing::error!("fatal precondition violated: {message}");
        std::process::abort()
    }
}

/// The full collaborator set owned by one cluster instance.
pub struct ClusterPorts {
    pub persistence: Box<dyn PersistenceProvider>,
    pub reporting: Box<dyn AttributeChangeListener>,
    pub clock: Box<dyn WallClock>,
    pub layout: Box<dyn EndpointLayout>,
    pub registry: Box<dyn DispatchRegistry>,
    pub fatal: Box<dyn FatalHandler>,
}

impl<T: PersistenceProvider> PersistenceProvider for Rc<RefCell<T>> {
    fn read_scalar(&self, path: &AttributePath) -> Option<Option<u32>> {
        self.borrow().read_scalar(path)
    }

    fn write_scalar(&mut self, path: &AttributePath, value: Option<u32>) {
        self.borrow_mut().write_scalar(path, value)
    }
}

impl<T: AttributeChangeListener> AttributeChangeListener for Rc<RefCell<T>> {
    fn attribute_changed(&mut self, path: AttributePath) {
        self.borrow_mut().attribute_changed(path)
    }
}

impl<T: WallClock> WallClock for Rc<RefCell<T>> {
    fn unix_time(&self) -> Option<u32> {
        self.borrow().unix_time()
    }
}

impl<T: EndpointLayout> EndpointLayout for Rc<RefCell<T>> {
    fn contains_cluster(&self, endpoint: EndpointId, cluster: ClusterId) -> bool {
        self.borrow().contains_cluster(endpoint, cluster)
    }

    fn contains_attribute(
        &self,
        endpoint: EndpointId,
        cluster: ClusterId,
        attribute: AttributeId,
    ) -> bool {
        self.borrow().contains_attribute(endpoint, cluster, attribute)
    }
}

impl<T: DispatchRegistry> DispatchRegistry for Rc<RefCell<T>> {
    fn register_command_handler(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
    ) -> Result<(), ClusterError> {
        self.borrow_mut().register_command_handler(endpoint, cluster)
    }

    fn register_attribute_access(
        &mut self,
        endpoint: EndpointId,
        cluster: ClusterId,
    ) -> Result<(), ClusterError> {
        self.borrow_mut().register_attribute_access(endpoint, cluster)
    }
}
