//! Utility modules for the cue sheet editor

pub mod text;

// Re-export commonly used types
pub use text::*;
