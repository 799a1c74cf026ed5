use std::path::PathBuf;

/// Errors raised while loading a target or deriving verifiers.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Curve arithmetic or encoding failure.
    #[error("curve arithmetic error: {0}")]
    Domain(#[from] wei25519::Error),
    /// The password hash reduced to zero, which has no public point.
    #[error("password hash reduced to the zero scalar")]
    DegenerateScalar,
    /// No record for the requested username.
    #[error("user {0:?} not found in the user database")]
    UnknownUser(String),
    /// Reading a file failed.
    #[error("failed to read {}", .path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed `user.dat` framing or M2 message, or a value too long to
    /// encode.
    #[error("malformed user database: {0}")]
    Format(String),
    /// Stored verifier of the wrong length or encoding.
    #[error("invalid verifier: {0}")]
    Verifier(String),
    /// Bad hex on the command line.
    #[error("invalid hex string")]
    Hex(#[from] hex::FromHexError),
    /// Worker pool could not be started.
    #[error("failed to build the worker thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type with the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
