use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("failed to open video: {}", .0.display())]
    VideoOpen(PathBuf),
    #[error("could not determine video length (fps={fps}, frames={frame_count})")]
    UnknownDuration { fps: f64, frame_count: u64 },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("{0}")]
    Message(String),
}

impl AppError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        AppError::Config(msg.into())
    }

    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }
}
