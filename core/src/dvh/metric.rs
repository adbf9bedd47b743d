use super::DoseVolumeHistogram;
use crate::error::DvhError;
use crate::types::VolumeUnit;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Clinical DVH metric in Dx / Vx shorthand
///
/// Accepted forms (case-insensitive):
/// - `D95`, `D95%`: dose at sampled volume 95
/// - `D2cc`: dose at absolute volume 2, converted via the reference volume
/// - `V20`, `V20Gy`: volume receiving dose 20
///
/// # Example
///
/// ```
/// use rtdvh_core::{DvhMetric, VolumeUnit};
///
/// let metric: DvhMetric = "D2cc".parse().unwrap();
/// assert_eq!(metric, DvhMetric::Dose { volume: 2.0, unit: VolumeUnit::Absolute });
/// assert_eq!("v20gy".parse::<DvhMetric>().unwrap().to_string(), "V20");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DvhMetric {
    /// Dx: dose at a volume
    Dose { volume: f64, unit: VolumeUnit },
    /// Vx: volume at a dose
    Volume { dose: f64 },
}

impl DvhMetric {
    /// Parses a metric from its shorthand
    ///
    /// # Errors
    ///
    /// Returns [`DvhError::InvalidMetric`] if the string is not a recognised
    /// Dx or Vx form.
    pub fn parse(s: &str) -> Result<Self, DvhError> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"(?i)^\s*([dv])\s*(\d+(?:\.\d*)?|\.\d+)\s*(%|cc|gy)?\s*$")
                .expect("Failed to compile regex")
        });

        let invalid = || DvhError::InvalidMetric(format!("'{}'", s));
        let caps = re.captures(s).ok_or_else(invalid)?;
        let value: f64 = caps[2].parse().map_err(|_| invalid())?;
        let suffix = caps.get(3).map(|m| m.as_str().to_ascii_lowercase());

        match (caps[1].to_ascii_uppercase().as_str(), suffix.as_deref()) {
            ("D", None | Some("%")) => Ok(DvhMetric::Dose {
                volume: value,
                unit: VolumeUnit::Sampled,
            }),
            ("D", Some("cc")) => Ok(DvhMetric::Dose {
                volume: value,
                unit: VolumeUnit::Absolute,
            }),
            ("V", None | Some("gy")) => Ok(DvhMetric::Volume { dose: value }),
            _ => Err(invalid()),
        }
    }

    /// Evaluates the metric, sorting the histogram if needed
    pub fn evaluate(&self, dvh: &mut DoseVolumeHistogram) -> Option<f64> {
        match *self {
            DvhMetric::Dose { volume, unit } => dvh.dose_at_volume(volume, unit),
            DvhMetric::Volume { dose } => dvh.volume_at_dose(dose),
        }
    }
}

impl FromStr for DvhMetric {
    type Err = DvhError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DvhMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DvhMetric::Dose {
                volume,
                unit: VolumeUnit::Sampled,
            } => write!(f, "D{}", volume),
            DvhMetric::Dose {
                volume,
                unit: VolumeUnit::Absolute,
            } => write!(f, "D{}cc", volume),
            DvhMetric::Volume { dose } => write!(f, "V{}", dose),
        }
    }
}

impl Serialize for DvhMetric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A metric paired with its evaluated value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub metric: DvhMetric,
    /// `None` when the metric falls outside the sampled range
    pub value: Option<f64>,
}

impl DoseVolumeHistogram {
    /// Evaluates every metric in order
    pub fn evaluate_all(&mut self, metrics: &[DvhMetric]) -> Vec<MetricResult> {
        metrics
            .iter()
            .map(|metric| MetricResult {
                metric: *metric,
                value: metric.evaluate(self),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("D95", DvhMetric::Dose { volume: 95.0, unit: VolumeUnit::Sampled })]
    #[case("d95%", DvhMetric::Dose { volume: 95.0, unit: VolumeUnit::Sampled })]
    #[case(" D 0.5 ", DvhMetric::Dose { volume: 0.5, unit: VolumeUnit::Sampled })]
    #[case("D2cc", DvhMetric::Dose { volume: 2.0, unit: VolumeUnit::Absolute })]
    #[case("D2CC", DvhMetric::Dose { volume: 2.0, unit: VolumeUnit::Absolute })]
    #[case("V20", DvhMetric::Volume { dose: 20.0 })]
    #[case("v47.5Gy", DvhMetric::Volume { dose: 47.5 })]
    #[case("V.5", DvhMetric::Volume { dose: 0.5 })]
    fn test_parse_valid(#[case] input: &str, #[case] expected: DvhMetric) {
        assert_eq!(DvhMetric::parse(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("D")]
    #[case("X20")]
    #[case("D20Gy")]
    #[case("V20cc")]
    #[case("V20%")]
    #[case("D-5")]
    #[case("D20 30")]
    fn test_parse_invalid(#[case] input: &str) {
        let err = DvhMetric::parse(input).unwrap_err();
        assert!(matches!(err, DvhError::InvalidMetric(_)));
    }

    #[test]
    fn test_display_canonical() {
        assert_eq!("d95%".parse::<DvhMetric>().unwrap().to_string(), "D95");
        assert_eq!("D0.5cc".parse::<DvhMetric>().unwrap().to_string(), "D0.5cc");
        assert_eq!("V20Gy".parse::<DvhMetric>().unwrap().to_string(), "V20");
    }

    #[test]
    fn test_evaluate_all() {
        let mut dvh = DoseVolumeHistogram::new("Lung").with_reference_volume(100.0);
        dvh.add(100.0, 50.0);
        dvh.add(90.0, 60.0);
        dvh.add(80.0, 70.0);

        let metrics = vec![
            DvhMetric::parse("D95").unwrap(),
            DvhMetric::parse("D90cc").unwrap(),
            DvhMetric::parse("V55").unwrap(),
            DvhMetric::parse("V10").unwrap(),
        ];
        let results = dvh.evaluate_all(&metrics);

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].value, Some(55.0));
        assert_eq!(results[1].value, Some(60.0));
        assert_eq!(results[2].value, Some(95.0));
        assert_eq!(results[3].value, None);
    }

    #[test]
    fn test_metric_serializes_as_string() {
        let result = MetricResult {
            metric: DvhMetric::Volume { dose: 20.0 },
            value: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"metric":"V20","value":null}"#);
    }
}
