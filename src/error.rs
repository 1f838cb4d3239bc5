use thiserror::Error;

#[derive(Error, Debug)]
pub enum PremlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Service(#[from] preml_common::Error),

    #[error("Failed to decode cutout image: {0}")]
    Decode(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No galaxies found near {0}")]
    NoGalaxiesFound(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PremlError>;
