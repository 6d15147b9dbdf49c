use flatbit::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Console error: {0}")]
    Console(#[from] std::io::Error),
}
