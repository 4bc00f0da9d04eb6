//! Core types shared across keycmp facilities
//!
//! - **Correlation types**: RequestId, RequestContext
//! - **Schema constants**: canonical field keys and event names used by the
//!   logging facility and the error facility

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId};
