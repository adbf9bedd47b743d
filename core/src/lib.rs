pub mod cli;
pub mod dvh;
pub mod error;
pub mod record;
pub mod types;

pub use dvh::{DoseVolumeHistogram, DvhMetric, MetricResult};
pub use error::{DvhError, Result};
pub use record::{parse_json_str, parse_json_value, read_json, DvhRecord, SampleRecord};
pub use types::*;
