pub mod activation;
pub mod dense;
pub mod input;

use rand::Rng;

use crate::{activation::activation::ActivationFunction, error::Result, math::matrix::Matrix};

pub use activation::ActivationLayer;
pub use dense::DenseLayer;
pub use input::InputLayer;

/// One stage of a [`Network`](crate::network::Network).
///
/// Only `Dense` owns trainable parameters; the backward pass switches on the
/// variant instead of inspecting types at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Input(InputLayer),
    Dense(DenseLayer),
    Activation(ActivationLayer),
}

impl Layer {
    pub fn input(size: usize) -> Layer {
        Layer::Input(InputLayer::new(size))
    }

    pub fn dense(size: usize, activation: Option<ActivationFunction>) -> Layer {
        Layer::Dense(DenseLayer::new(size, activation))
    }

    pub fn activation(activator: ActivationFunction) -> Layer {
        Layer::Activation(ActivationLayer::new(activator))
    }

    /// Shape-inference pass. Dense layers allocate their parameters here.
    pub fn build<R: Rng + ?Sized>(&mut self, input: &Matrix, rng: &mut R) -> Result<Matrix> {
        match self {
            Layer::Input(layer) => Ok(layer.build()),
            Layer::Dense(layer) => layer.build(input, rng),
            Layer::Activation(layer) => Ok(layer.feed_from(input)),
        }
    }

    pub fn feed_from(&self, input: &Matrix) -> Result<Matrix> {
        match self {
            Layer::Input(layer) => Ok(layer.feed_from(input)),
            Layer::Dense(layer) => layer.feed_from(input),
            Layer::Activation(layer) => Ok(layer.feed_from(input)),
        }
    }

    pub fn is_trainable(&self) -> bool {
        matches!(self, Layer::Dense(_))
    }

    pub fn has_activation(&self) -> bool {
        match self {
            Layer::Input(_) => false,
            Layer::Dense(layer) => layer.activator.is_some(),
            Layer::Activation(_) => true,
        }
    }

    pub fn as_dense(&self) -> Option<&DenseLayer> {
        match self {
            Layer::Dense(layer) => Some(layer),
            _ => None,
        }
    }

    pub(crate) fn as_dense_mut(&mut self) -> Option<&mut DenseLayer> {
        match self {
            Layer::Dense(layer) => Some(layer),
            _ => None,
        }
    }
}
