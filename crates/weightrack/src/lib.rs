//! Top-level facade crate for weightrack.
//!
//! Re-exports the core types and the service library so users can depend on a single crate.

pub mod core {
    pub use weightrack_core::*;
}

pub mod service {
    pub use weightrack_service::*;
}
