use thiserror::Error;

/// Failure of a fetch cycle or of the surrounding tooling.
///
/// The first three variants are the classification every transport
/// failure lands in: the server answered with a bad status, the server
/// never answered, or something went wrong locally. Their display
/// strings are what the error line shows verbatim.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {code} - {reason}")]
    Status { code: u16, reason: String },

    #[error("network error: no response received from the server")]
    Network,

    #[error("response decoding failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected error: {0}")]
    Unexpected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// Exit codes as per RFC
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const HTTP_STATUS: i32 = 3;
    pub const NETWORK: i32 = 4;
    pub const DECODE: i32 = 5;
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Status { .. } => exit_code::HTTP_STATUS,
            Error::Network => exit_code::NETWORK,
            Error::Decode(_) => exit_code::DECODE,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}
