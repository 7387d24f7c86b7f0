//! Inference gateway client — turns image bytes into free-form model text.

pub mod vision;

pub use vision::{InferenceClient, VisionBackend, ANALYSIS_PROMPT};
