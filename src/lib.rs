pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod qc;
pub mod report;
pub mod sequence_processor;
pub(crate) mod utils;

pub use error::{QcError, QcResult};
