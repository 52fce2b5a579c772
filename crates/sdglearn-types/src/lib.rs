//! Shared domain types for the sdglearn platform.
//!
//! This crate contains the core domain types used across sdglearn:
//! SDG, Module, Section (and its payload union), progress records, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod module;
pub mod progress;
pub mod sdg;
pub mod section;
