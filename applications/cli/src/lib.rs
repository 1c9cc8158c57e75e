//! Gaane CLI Library
//!
//! Desktop glue for the playback libraries: configuration, a rodio decoder
//! backend, an always-granting focus arbitrator and the interactive loop.
//!
//! This library exposes the components for testing purposes.

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod focus;
pub mod runner;

pub use config::GaaneConfig;
pub use error::{CliError, Result};
