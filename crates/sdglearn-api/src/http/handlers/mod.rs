//! HTTP request handlers for the REST API.

pub mod auth;
pub mod module;
pub mod progress;
pub mod sdg;
pub mod section;
pub mod stats;
