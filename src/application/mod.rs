//! Application Layer - Use cases
//!
//! Wires ports together into the screening pipeline.

pub mod pipeline;

pub use pipeline::{PipelineConfig, PipelineError, ScreenOutcome, ScreenPipeline};
