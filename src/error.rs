use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Column error: {0}")]
    Column(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Chart error: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, Error>;
