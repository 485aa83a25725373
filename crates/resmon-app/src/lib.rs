//! Example wiring for the resource monitoring cluster: five concrete
//! monitors on an air purifier and a printer endpoint, an in-process
//! dispatcher standing in for the interaction model, file-backed
//! persistence and a logging change-report sink.

pub mod clock;
pub mod device;
pub mod dispatch;
pub mod instances;
pub mod layout;
pub mod persistence;
pub mod report;
