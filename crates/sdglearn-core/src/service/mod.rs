//! Content and progress services.
//!
//! Services are generic over the repository traits so the core crate stays
//! free of storage concerns; sdglearn-api pins them to the SQLite
//! implementations.

pub mod module;
pub mod progress;
pub mod sdg;
pub mod section;
