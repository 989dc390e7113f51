//! Core Elm Architecture pieces shared by the model and the runtime
//!
//! - Commands: side effects requested by `update`
//! - Errors surfaced by loaders and CRUD APIs

pub mod cmd;
pub mod error;
