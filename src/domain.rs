//! Domain types
//!
//! This module contains the data the list store works with:
//! - Entities and their identifiers
//! - The ordered, id-deduplicated entity collection
//! - Page parameters and page responses
//! - Filter sets

pub mod collections;
pub mod entity;
pub mod filters;
pub mod page;
