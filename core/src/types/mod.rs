//! Core value types
//!
//! - [`DvhSample`]: a single (volume, dose) point
//! - [`SortOrder`]: direction of a volume sort
//! - [`VolumeUnit`]: how a dose-at-volume query interprets its volume
//! - [`BoundedVec`]: fixed-capacity sequence that drops overflowing appends

mod bounded;
mod sample;

pub use bounded::BoundedVec;
pub use sample::{DvhSample, SortOrder, VolumeUnit};
