use crate::{
    activation::activation::ActivationFunction,
    error::{NetError, Result},
    math::matrix::Matrix,
};

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²) over every cell.
    pub fn loss(expected: &Matrix, predicted: &Matrix) -> Result<f64> {
        let diff = predicted.sub(expected)?;
        let squared = diff.hadamard(&diff)?;
        Ok(squared.sum() / squared.as_slice().len() as f64)
    }

    /// Output-layer error signal: (predicted - expected) ⊙ activator'(predicted).
    ///
    /// `predicted` must be the activated output, since the derivative is
    /// expressed in terms of it.
    pub fn delta(
        expected: &Matrix,
        predicted: &Matrix,
        activator: ActivationFunction,
    ) -> Result<Matrix> {
        if expected.shape() != predicted.shape() {
            return Err(NetError::shape("mse delta", expected.shape(), predicted.shape()));
        }
        predicted.sub(expected)?
            .hadamard(&predicted.map(|y| activator.derivative(y)))
    }
}
