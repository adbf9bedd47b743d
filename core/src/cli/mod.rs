pub mod report;

use crate::dvh::DvhMetric;
use crate::types::SortOrder;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for rtdvh
#[derive(Parser, Debug)]
#[command(name = "rtdvh")]
#[command(about = "Dose-volume histogram metric evaluation tool")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON file with one or more DVH records
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Metric to evaluate, e.g. D95, D2cc, V20Gy (repeatable)
    #[arg(short, long = "metric", value_name = "METRIC")]
    pub metrics: Vec<DvhMetric>,

    /// Order of the printed sample table
    #[arg(short, long, default_value = "asc")]
    pub sort: SortArg,

    /// Print the sample table of each structure
    #[arg(long)]
    pub samples: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Sample table ordering
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Ascending volume
    Asc,
    /// Descending volume
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortOrder::Ascending,
            SortArg::Desc => SortOrder::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VolumeUnit;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["rtdvh", "plan.json"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("plan.json"));
        assert!(cli.metrics.is_empty());
        assert!(matches!(cli.format, OutputFormat::Text));
        assert_eq!(SortOrder::from(cli.sort), SortOrder::Ascending);
        assert!(!cli.samples);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_metrics() {
        let cli = Cli::try_parse_from([
            "rtdvh", "plan.json", "-m", "D95", "--metric", "D2cc", "-m", "V20Gy", "-f", "json",
            "--sort", "desc",
        ])
        .unwrap();
        assert_eq!(
            cli.metrics,
            vec![
                DvhMetric::Dose {
                    volume: 95.0,
                    unit: VolumeUnit::Sampled
                },
                DvhMetric::Dose {
                    volume: 2.0,
                    unit: VolumeUnit::Absolute
                },
                DvhMetric::Volume { dose: 20.0 },
            ]
        );
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(SortOrder::from(cli.sort), SortOrder::Descending);
    }

    #[test]
    fn test_parse_rejects_bad_metric() {
        assert!(Cli::try_parse_from(["rtdvh", "plan.json", "-m", "X9"]).is_err());
    }
}
