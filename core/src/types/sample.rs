use serde::{Deserialize, Serialize};
use std::fmt;

/// A single (volume, dose) point of a dose-volume histogram
///
/// Values are stored as given; physical validity (non-negative volume,
/// non-negative dose) is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DvhSample {
    pub volume: f64,
    pub dose: f64,
}

impl DvhSample {
    /// Creates a new DvhSample
    pub fn new(volume: f64, dose: f64) -> Self {
        Self { volume, dose }
    }
}

impl From<(f64, f64)> for DvhSample {
    fn from((volume, dose): (f64, f64)) -> Self {
        Self { volume, dose }
    }
}

impl From<DvhSample> for (f64, f64) {
    fn from(sample: DvhSample) -> Self {
        (sample.volume, sample.dose)
    }
}

impl fmt::Display for DvhSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.volume, self.dose)
    }
}

/// Direction of a volume sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Returns whether this is ascending order
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Ascending)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "ascending"),
            SortOrder::Descending => write!(f, "descending"),
        }
    }
}

/// Unit of the volume passed to a dose-at-volume query
///
/// `Sampled` looks the value up directly against the stored sample volumes.
/// `Absolute` first converts it to a percentage of the histogram's reference
/// volume and then performs the `Sampled` lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    #[default]
    Sampled,
    Absolute,
}

impl VolumeUnit {
    /// Maps the `is_absolute` flag used by record formats onto a unit
    pub fn from_absolute_flag(is_absolute: bool) -> Self {
        if is_absolute {
            VolumeUnit::Absolute
        } else {
            VolumeUnit::Sampled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_display() {
        assert_eq!(DvhSample::new(10.0, 5.5).to_string(), "10, 5.5");
    }

    #[test]
    fn test_sample_tuple_conversions() {
        let s: DvhSample = (20.0, 2.0).into();
        assert_eq!(s, DvhSample::new(20.0, 2.0));
        let t: (f64, f64) = s.into();
        assert_eq!(t, (20.0, 2.0));
    }

    #[test]
    fn test_sort_order_default() {
        assert_eq!(SortOrder::default(), SortOrder::Ascending);
        assert!(!SortOrder::Descending.is_ascending());
    }

    #[test]
    fn test_volume_unit_flag() {
        assert_eq!(VolumeUnit::from_absolute_flag(true), VolumeUnit::Absolute);
        assert_eq!(VolumeUnit::from_absolute_flag(false), VolumeUnit::Sampled);
        assert_eq!(VolumeUnit::default(), VolumeUnit::Sampled);
    }
}
