use crate::math::matrix::Matrix;

/// Entry point of a network. Holds no parameters and passes its input through.
#[derive(Debug, Clone, PartialEq)]
pub struct InputLayer {
    pub size: usize,
}

impl InputLayer {
    pub fn new(size: usize) -> InputLayer {
        InputLayer { size }
    }

    /// Zero placeholder of shape `(1, size)` used to infer downstream shapes.
    pub fn build(&self) -> Matrix {
        Matrix::zeros(1, self.size)
    }

    pub fn feed_from(&self, input: &Matrix) -> Matrix {
        input.clone()
    }
}
