//! Dose-volume histogram table
//!
//! A [`DoseVolumeHistogram`] holds the (volume, dose) samples of one
//! structure and answers the two inverse lookups used for plan evaluation:
//! - [`DoseVolumeHistogram::dose_at_volume`] (Dx)
//! - [`DoseVolumeHistogram::volume_at_dose`] (Vx)

mod interpolate;
mod metric;

pub use metric::{DvhMetric, MetricResult};

use crate::error::{DvhError, Result};
use crate::types::{DvhSample, SortOrder, VolumeUnit};
use log::{debug, warn};
use serde::Serialize;
use std::fmt;

/// Dose-volume histogram of a single structure
///
/// Samples are kept in insertion order until [`sort`](Self::sort) is called.
/// Queries sort the table ascending when it is unsorted. A table sorted
/// descending is queried as-is, so only exact matches are found there.
///
/// # Example
///
/// ```
/// use rtdvh_core::{DoseVolumeHistogram, VolumeUnit};
///
/// let mut dvh = DoseVolumeHistogram::new("PTV").with_reference_volume(200.0);
/// dvh.add(100.0, 50.0);
/// dvh.add(50.0, 70.0);
/// dvh.add(20.0, 90.0);
///
/// assert_eq!(dvh.dose_at_volume(75.0, VolumeUnit::Sampled), Some(60.0));
/// assert_eq!(dvh.volume_at_dose(80.0), Some(35.0));
/// assert!(dvh.is_sorted());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DoseVolumeHistogram {
    name: String,
    reference_volume: f64,
    samples: Vec<DvhSample>,
    #[serde(skip)]
    sorted: Option<SortOrder>,
}

impl DoseVolumeHistogram {
    /// Creates an empty histogram
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: set the reference volume
    pub fn with_reference_volume(mut self, reference_volume: f64) -> Self {
        self.reference_volume = reference_volume;
        self
    }

    /// Builder: set the structure name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Total volume of the structure
    ///
    /// Only used to convert absolute volumes to percentages; never derived
    /// from the samples.
    pub fn reference_volume(&self) -> f64 {
        self.reference_volume
    }

    pub fn set_reference_volume(&mut self, reference_volume: f64) {
        self.reference_volume = reference_volume;
    }

    /// Appends a sample and marks the table unsorted
    pub fn add(&mut self, volume: f64, dose: f64) {
        self.sorted = None;
        self.samples.push(DvhSample::new(volume, dose));
    }

    /// Sorts the samples by volume
    ///
    /// The sort is stable: samples with equal volume keep their insertion
    /// order.
    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Ascending => self
                .samples
                .sort_by(|a, b| a.volume.total_cmp(&b.volume)),
            SortOrder::Descending => self
                .samples
                .sort_by(|a, b| b.volume.total_cmp(&a.volume)),
        }
        debug!(
            "Sorted {} samples of '{}' {}",
            self.samples.len(),
            self.name,
            order
        );
        self.sorted = Some(order);
    }

    /// Returns true if the samples are sorted in either direction
    pub fn is_sorted(&self) -> bool {
        self.sorted.is_some()
    }

    /// Direction of the last sort, or `None` if modified since
    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sorted
    }

    /// Returns the sample at `index` in the current order
    ///
    /// # Errors
    ///
    /// Returns [`DvhError::IndexOutOfRange`] if `index >= size()`.
    pub fn get(&self, index: usize) -> Result<DvhSample> {
        self.samples
            .get(index)
            .copied()
            .ok_or(DvhError::IndexOutOfRange {
                index,
                size: self.samples.len(),
            })
    }

    /// Volume of the sample at `index`
    pub fn volume_at(&self, index: usize) -> Result<f64> {
        self.get(index).map(|s| s.volume)
    }

    /// Dose of the sample at `index`
    pub fn dose_at(&self, index: usize) -> Result<f64> {
        self.get(index).map(|s| s.dose)
    }

    pub fn size(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[DvhSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DvhSample> {
        self.samples.iter()
    }

    /// Interpolated dose at `volume`
    ///
    /// With [`VolumeUnit::Sampled`] the value is looked up directly against
    /// the stored sample volumes. With [`VolumeUnit::Absolute`] it is first
    /// converted to `volume / reference_volume * 100` and then looked up the
    /// same way.
    ///
    /// Returns `None` when the volume lies outside the sampled range, when
    /// fewer than two samples exist and there is no exact match, or when an
    /// absolute conversion is requested with a zero reference volume. Use
    /// [`checked_dose_at_volume`](Self::checked_dose_at_volume) to tell the
    /// last case apart.
    pub fn dose_at_volume(&mut self, volume: f64, unit: VolumeUnit) -> Option<f64> {
        match self.checked_dose_at_volume(volume, unit) {
            Ok(dose) => dose,
            Err(e) => {
                warn!(
                    "Cannot compute dose at volume {} for '{}': {}",
                    volume, self.name, e
                );
                None
            }
        }
    }

    /// Interpolated dose at `volume`, reporting an unusable reference volume
    ///
    /// # Errors
    ///
    /// Returns [`DvhError::InvalidReferenceVolume`] for a
    /// [`VolumeUnit::Absolute`] query when the reference volume is zero or
    /// not finite.
    pub fn checked_dose_at_volume(
        &mut self,
        volume: f64,
        unit: VolumeUnit,
    ) -> Result<Option<f64>> {
        match unit {
            VolumeUnit::Sampled => {
                self.ensure_sorted();
                Ok(interpolate::dose_at_volume(&self.samples, volume))
            }
            VolumeUnit::Absolute => {
                if self.reference_volume == 0.0 || !self.reference_volume.is_finite() {
                    return Err(DvhError::InvalidReferenceVolume(self.reference_volume));
                }
                let relative = volume / self.reference_volume * 100.0;
                self.checked_dose_at_volume(relative, VolumeUnit::Sampled)
            }
        }
    }

    /// Interpolated volume receiving `dose`
    ///
    /// Returns `None` when the dose lies outside the sampled range or when
    /// fewer than two samples exist and there is no exact match.
    pub fn volume_at_dose(&mut self, dose: f64) -> Option<f64> {
        self.ensure_sorted();
        interpolate::volume_at_dose(&self.samples, dose)
    }

    fn ensure_sorted(&mut self) {
        if self.sorted.is_none() {
            self.sort(SortOrder::Ascending);
        }
    }
}

impl Extend<DvhSample> for DoseVolumeHistogram {
    fn extend<I: IntoIterator<Item = DvhSample>>(&mut self, iter: I) {
        self.sorted = None;
        self.samples.extend(iter);
    }
}

impl FromIterator<DvhSample> for DoseVolumeHistogram {
    fn from_iter<I: IntoIterator<Item = DvhSample>>(iter: I) -> Self {
        let mut dvh = Self::default();
        dvh.extend(iter);
        dvh
    }
}

impl<'a> IntoIterator for &'a DoseVolumeHistogram {
    type Item = &'a DvhSample;
    type IntoIter = std::slice::Iter<'a, DvhSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl fmt::Display for DoseVolumeHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:   {}", self.name)?;
        writeln!(f, "Volume: {}", self.reference_volume)?;
        match self.sorted {
            Some(order) => writeln!(f, "Sorted: {}", order)?,
            None => writeln!(f, "Sorted: no")?,
        }
        writeln!(f, "Data:")?;
        writeln!(f, "{:>12} {:>12}", "Volume", "Dose")?;
        for sample in &self.samples {
            writeln!(f, "{:>12} {:>12}", sample.volume, sample.dose)?;
        }
        Ok(())
    }
}
