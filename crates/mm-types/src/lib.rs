//! Core types for the multimode graph.
//!
//! Attribute values, node and edge records, kind signatures, stats/snapshot DTOs and the graph
//! error type. Graph logic lives in `mm-graph`.

mod attr;
mod error;
mod record;

pub use attr::*;
pub use error::*;
pub use record::*;
