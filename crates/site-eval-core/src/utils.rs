//! Utility functions for rule implementations.

pub mod patterns;
pub mod text;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use patterns::compile;
#[doc(inline)]
pub use text::{format_bytes, line_at_offset, truncate_snippet};
