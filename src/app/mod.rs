pub mod bootstrap;
pub mod cli;

pub use bootstrap::{generate_report, record_source, run};
pub use cli::Cli;
