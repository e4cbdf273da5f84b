//! # Prompt Templates
//!
//! Instruction prompts sent to the image-analysis provider.

pub mod analysis;

pub use analysis::IMAGE_ANALYSIS_PROMPT;
