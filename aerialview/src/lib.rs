use std::io;

pub mod config;
pub mod generator;
pub mod geo;
pub mod node;
pub mod pose;
pub mod sink;

pub use config::NodeConfig;
pub use node::{AerialViewPublisher, TickOutcome};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid configuration. {0}")]
    Config(String),
    #[error("Failed to open the aerial image source. {0}")]
    GeneratorInit(#[from] image::ImageError),
    #[error("McapError. {0}")]
    Mcap(#[from] mcap::McapError),
    #[error("CDR error. {0}")]
    Cdr(#[from] cdr::Error),
    #[error("IO error. {0}")]
    Io(#[from] io::Error),
}
