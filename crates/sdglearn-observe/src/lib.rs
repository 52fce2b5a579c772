//! Observability setup for sdglearn.

pub mod tracing_setup;
