use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrammarError {
    /// Structural problem in a grammar source. `line` is 1-based.
    #[error("malformed grammar source at line {line}: {reason}")]
    MalformedSource { line: usize, reason: String },

    #[error("no earlier iteration to step back to")]
    NoHistory,

    #[error("no grammar loaded")]
    NotLoaded,

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("failed to read grammar source: {0}")]
    Io(#[from] std::io::Error),
}

impl GrammarError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedSource { line, reason: reason.into() }
    }
}

/// Rejected noise or terrain parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("octave count must be at least 1")]
    ZeroOctaves,

    #[error("{octaves} octaves exceeds the maximum of {max}")]
    TooManyOctaves { octaves: u32, max: u32 },

    #[error("persistence {0} is outside [0, 1]")]
    Persistence(f64),

    #[error("scale must be positive and finite, got {0}")]
    Scale(f64),

    #[error("output range [{low}, {high}] is empty")]
    EmptyRange { low: f64, high: f64 },

    #[error("grid dimensions must be non-zero")]
    EmptyGrid,

    #[error("invalid parameters JSON: {0}")]
    Json(#[from] serde_json::Error),
}
