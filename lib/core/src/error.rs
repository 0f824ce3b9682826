use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot vectorize an empty document set")]
    EmptyInput,

    #[error("Documents produced an empty vocabulary")]
    EmptyVocabulary,

    #[error("Row index {index} out of range for {len} rows")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unknown recipe id: {0}")]
    UnknownIdentifier(u64),

    #[error("Recipe finder has not been prepared")]
    NotPrepared,

    #[error("Duplicate recipe id: {0}")]
    DuplicateIdentifier(u64),

    #[error("Recipe {id} is missing numeric feature '{feature}'")]
    MissingFeature { id: u64, feature: String },

    #[error("Invalid dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid matrix shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Channel '{channel}' failed: {source}")]
    Channel {
        channel: String,
        #[source]
        source: Box<Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Wrap an error with the name of the feature channel that produced it
    pub fn in_channel(self, channel: impl Into<String>) -> Self {
        Error::Channel {
            channel: channel.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
