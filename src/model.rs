//! Pure state machines
//!
//! Nothing in here performs I/O or touches the clock; every change goes through
//! an `update` function and side effects come back as [`crate::core::cmd::Cmd`].

pub mod list;
pub mod pagination;
