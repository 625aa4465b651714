use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactdefError {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FactdefError>;
