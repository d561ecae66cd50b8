//! Address book service library.
//!
//! Hexagonal layout: [`domain`] owns entities, services and ports;
//! [`inbound`] adapts HTTP onto the driving ports; [`outbound`] implements
//! the driven ports over PostgreSQL, Redis and in-process fallbacks.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use domain::TraceId;
pub use middleware::Trace;
