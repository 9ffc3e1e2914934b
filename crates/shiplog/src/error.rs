use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("invalid pre-release tag")]
    InvalidPrerelease(#[from] shiplog_core::ShiplogError),

    #[error("failed to load configuration")]
    Config(#[from] shiplog_config::ConfigError),

    #[error("release failed")]
    Operation(#[from] shiplog_operations::OperationError),
}

pub type Result<T> = std::result::Result<T, CliError>;
