use thiserror::Error;

/// Errors raised by matrix arithmetic, network construction and training.
#[derive(Debug, Error)]
pub enum NetError {
    /// Operand shapes are incompatible for `op`. Shapes are `(rows, cols)`.
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// The terminal dense layer at index `layer` carries no activation.
    #[error("no activation function found for output layer {layer}")]
    MissingActivation { layer: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetError>;

impl NetError {
    pub(crate) fn shape(op: &'static str, left: (usize, usize), right: (usize, usize)) -> NetError {
        NetError::ShapeMismatch { op, left, right }
    }
}
