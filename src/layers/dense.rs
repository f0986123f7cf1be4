use rand::Rng;

use crate::{
    math::matrix::Matrix,
    activation::activation::ActivationFunction,
    error::{NetError, Result},
};

/// Fully connected layer: `output = activator(input · weights + biases)`.
///
/// Weights and biases are allocated by [`DenseLayer::build`] once the width of
/// the previous layer is known. Until then the layer cannot feed forward.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer{
    pub size: usize,
    pub activator: Option<ActivationFunction>,
    params: Option<Parameters>,
}

#[derive(Debug, Clone, PartialEq)]
struct Parameters {
    weights: Matrix, // (input_size, size)
    biases: Matrix,  // (1, size)
}

impl DenseLayer {
    pub fn new(size: usize, activation: Option<ActivationFunction>) -> DenseLayer {
        DenseLayer {
            size,
            activator: activation,
            params: None,
        }
    }

    /// Allocates uniform `[-1, 1)` weights sized to `input.cols()` and zero
    /// biases, then returns the layer's output for `input`.
    pub fn build<R: Rng + ?Sized>(&mut self, input: &Matrix, rng: &mut R) -> Result<Matrix> {
        self.params = Some(Parameters {
            weights: Matrix::random(input.cols(), self.size, rng),
            biases: Matrix::zeros(1, self.size),
        });
        self.feed_from(input)
    }

    pub fn is_built(&self) -> bool {
        self.params.is_some()
    }

    pub fn weights(&self) -> Option<&Matrix> {
        self.params.as_ref().map(|p| &p.weights)
    }

    pub fn biases(&self) -> Option<&Matrix> {
        self.params.as_ref().map(|p| &p.biases)
    }

    pub(crate) fn parameters(&self) -> Result<(&Matrix, &Matrix)> {
        self.params.as_ref()
            .map(|p| (&p.weights, &p.biases))
            .ok_or_else(|| NetError::InvalidTopology("dense layer used before build".into()))
    }

    pub fn feed_from(&self, input: &Matrix) -> Result<Matrix> {
        let (weights, biases) = self.parameters()?;
        let z = input.dot(weights)?.add(biases)?;
        Ok(match self.activator {
            Some(f) => z.map(|x| f.function(x)),
            None => z,
        })
    }

    /// In-place step: `weights -= weights_delta`, `biases -= biases_delta`.
    ///
    /// Deltas must already be scaled by the learning rate. Both shapes are
    /// checked before either matrix is touched.
    pub fn update(&mut self, weights_delta: &Matrix, biases_delta: &Matrix) -> Result<()> {
        let params = self.params.as_mut()
            .ok_or_else(|| NetError::InvalidTopology("dense layer used before build".into()))?;
        if params.weights.shape() != weights_delta.shape() {
            return Err(NetError::shape("update weights", params.weights.shape(), weights_delta.shape()));
        }
        if params.biases.shape() != biases_delta.shape() {
            return Err(NetError::shape("update biases", params.biases.shape(), biases_delta.shape()));
        }
        params.weights.sub_assign(weights_delta)?;
        params.biases.sub_assign(biases_delta)?;
        Ok(())
    }
}
