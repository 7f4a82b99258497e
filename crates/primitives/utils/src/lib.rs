//! Service lifecycle plumbing.

pub mod service;

pub use service::ServiceContext;
