//! WOM exporter.
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub use self::{
    cli_opt::CliOpt,
    config::ExportConfig,
    error::{ExportError, Warning, Width},
    export::{ExportReport, Exporter},
};

mod cli_opt;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod scene_file;
pub mod wom;
