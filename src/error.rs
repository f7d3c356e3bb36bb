use thiserror::Error;

pub type GlobeResult<T> = Result<T, GlobeError>;

#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("topology decode failed: {0}")]
    Topology(String),

    #[error("circuits.csv line {line}: {message}")]
    Circuits { line: usize, message: String },

    #[cfg(feature = "fetch")]
    #[error("fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },
}
