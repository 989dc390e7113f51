//! Runtime glue
//!
//! Executes the commands produced by the list state on tokio and layers CRUD
//! orchestration on top.

pub mod crud;
pub mod store;
