use clap::Parser;
use log::{error, info};
use rtdvh_core::cli::report::TextReport;
use rtdvh_core::cli::{Cli, OutputFormat};
use rtdvh_core::{read_json, DoseVolumeHistogram, MetricResult, SortOrder};
use serde::Serialize;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let histograms = match read_json(&cli.file) {
        Ok(histograms) => histograms,
        Err(e) => {
            error!("Failed to load {}: {}", cli.file.display(), e);
            eprintln!("Error: Failed to load {}: {}", cli.file.display(), e);
            process::exit(1);
        }
    };

    if histograms.is_empty() {
        eprintln!("Error: No DVH records found in {}", cli.file.display());
        process::exit(1);
    }

    info!("Loaded {} structures", histograms.len());

    let sort_order: SortOrder = cli.sort.into();
    let evaluated: Vec<(DoseVolumeHistogram, Vec<MetricResult>)> = histograms
        .into_iter()
        .map(|mut histogram| {
            let results = histogram.evaluate_all(&cli.metrics);
            histogram.sort(sort_order);
            (histogram, results)
        })
        .collect();

    match cli.format {
        OutputFormat::Text => {
            for (histogram, results) in &evaluated {
                let report = TextReport::new(histogram, results).with_samples(cli.samples);
                println!("{}", report);
            }
        }
        OutputFormat::Json => match output_json(&evaluated, cli.samples) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize to JSON: {}", e);
                eprintln!("Error: Failed to serialize to JSON: {}", e);
                process::exit(1);
            }
        },
    }
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn output_json(
    evaluated: &[(DoseVolumeHistogram, Vec<MetricResult>)],
    include_samples: bool,
) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    struct StructureJson<'a> {
        name: &'a str,
        reference_volume: f64,
        size: usize,
        metrics: &'a [MetricResult],
        #[serde(skip_serializing_if = "Option::is_none")]
        samples: Option<&'a [rtdvh_core::DvhSample]>,
    }

    let structures: Vec<StructureJson<'_>> = evaluated
        .iter()
        .map(|(histogram, results)| StructureJson {
            name: histogram.name(),
            reference_volume: histogram.reference_volume(),
            size: histogram.size(),
            metrics: results,
            samples: include_samples.then(|| histogram.samples()),
        })
        .collect();

    serde_json::to_string_pretty(&structures)
}
