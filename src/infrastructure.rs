//! Infrastructure layer
//!
//! This module handles external integrations:
//! - Page loader abstraction and the JSON fixture loader
//! - Configuration loading
//! - CLI argument processing

pub mod cli;
pub mod config;
pub mod fixture;
pub mod loader;
