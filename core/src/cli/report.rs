use crate::dvh::{DoseVolumeHistogram, MetricResult};
use std::fmt;

/// Text report formatter for one structure's metrics
pub struct TextReport<'a> {
    histogram: &'a DoseVolumeHistogram,
    results: &'a [MetricResult],
    show_samples: bool,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(histogram: &'a DoseVolumeHistogram, results: &'a [MetricResult]) -> Self {
        Self {
            histogram,
            results,
            show_samples: false,
        }
    }

    /// Builder: include the sample table
    pub fn with_samples(mut self, show: bool) -> Self {
        self.show_samples = show;
        self
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("Structure: {}", self.histogram.name());
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(
            f,
            "Reference Volume: {}",
            self.histogram.reference_volume()
        )?;
        writeln!(f, "Samples:          {}", self.histogram.size())?;

        if !self.results.is_empty() {
            writeln!(f)?;
            writeln!(f, "Metrics")?;
            writeln!(f, "-------")?;
            for result in self.results {
                match result.value {
                    Some(value) => writeln!(f, "{:<10} {}", result.metric.to_string(), value)?,
                    None => writeln!(f, "{:<10} not found", result.metric.to_string())?,
                }
            }
        }

        if self.show_samples {
            writeln!(f)?;
            writeln!(f, "{:>12} {:>12}", "Volume", "Dose")?;
            for sample in self.histogram {
                writeln!(f, "{:>12} {:>12}", sample.volume, sample.dose)?;
            }
        }

        Ok(())
    }
}
