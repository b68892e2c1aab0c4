//! Data models for the newsdesk backend.
//!
//! Field names serialize in camelCase to match the front-end Article interface.

mod article;
mod category;
mod community;
mod draft;
mod session;
mod stats;

pub use article::*;
pub use category::*;
pub use community::*;
pub use draft::*;
pub use session::*;
pub use stats::*;

/// Round to one decimal place, the precision used for ratings and scores.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
