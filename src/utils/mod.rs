//! Utility modules
//!
//! - Axes: evenly spaced sweep axes
//! - Display: number formatting with "N/A" for undefined values

pub mod axes;
pub mod display;

// Re-export commonly used helpers
pub use axes::linspace;
pub use display::{format_money, format_value, NOT_AVAILABLE};
