//! Request middleware.
//!
//! Purpose: attach a per-request trace identifier to the task, the log span
//! and the response headers.

pub mod trace;

pub use trace::Trace;
