pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod record;
pub mod sample;

pub use config::Config;
pub use error::{PipelineError, Severity};
pub use output::OutputSummary;
pub use pipeline::{run, RunReport};
pub use record::BookRecord;
