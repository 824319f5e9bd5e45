//! Input/output collaborators around the core pipeline.
//!
//! - CSV dataset loading (`ingest`)
//! - merged dataset export (`export`)
//! - trend JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;
