//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside individual handlers,
//! currently request tracing.

pub mod trace;

pub use trace::Trace;
