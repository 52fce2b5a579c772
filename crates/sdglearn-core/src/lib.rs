//! Business logic and repository trait definitions for sdglearn.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the content services built on top of them, and the two
//! pure algorithms of the platform: the builder's reorder operation and the
//! progress-unlock gate. It depends only on `sdglearn-types` -- never on
//! `sdglearn-infra` or any database/IO crate.

pub mod ordering;
pub mod repository;
pub mod service;
pub mod unlock;
