//! Screen-space subsurface scattering as a CPU image-space effect.
//!
//! Given a [`ScatteringProfile`] and the per-frame G-buffer planes
//! ([`FrameInputs`]), [`ScatteringEngine`] runs a separable, depth-aware
//! diffusion-profile blur over the diffuse lighting and composites the
//! result back with distance fade. One synchronous call per frame, pixels
//! processed in parallel, no allocation after the first frame.

pub mod buffer;
pub mod config;
pub mod errors;
pub mod jitter;
pub mod kernel;
pub mod render_graph;
pub mod utils;

pub use crate::buffer::{ColorBuffer, ScalarBuffer};
pub use crate::config::{DebugPass, SampleQuality, SamplingResolution, ScatteringProfile};
pub use crate::errors::EngineError;
pub use crate::render_graph::{FrameInputs, ScatteringEngine};
