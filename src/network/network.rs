use rand::Rng;
use tracing::debug;

use crate::{
    activation::activation::ActivationFunction,
    error::{NetError, Result},
    layers::Layer,
    loss::mse::MseLoss,
    math::matrix::Matrix,
    optim::sgd::Sgd,
};

/// An ordered stack of layers whose first element is an [`Layer::Input`].
///
/// The network is shape-inferred on construction: a zero placeholder is pushed
/// through every layer so dense layers can allocate their parameters. After
/// that, parameter shapes never change.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<Layer>,
    output_size: usize,
}

impl Network {
    /// Builds a network, initializing weights from the thread-local RNG.
    pub fn new(layers: Vec<Layer>) -> Result<Network> {
        Network::with_rng(layers, &mut rand::thread_rng())
    }

    /// Builds a network, initializing weights from `rng`. A seeded RNG gives
    /// reproducible parameters.
    pub fn with_rng<R: Rng + ?Sized>(layers: Vec<Layer>, rng: &mut R) -> Result<Network> {
        validate_topology(&layers)?;
        let mut network = Network { layers, output_size: 0 };
        network.build(rng)?;
        Ok(network)
    }

    fn build<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let mut output = match &self.layers[0] {
            Layer::Input(input) => input.build(),
            _ => return Err(NetError::InvalidTopology("first layer must be an input layer".into())),
        };
        for (i, layer) in self.layers.iter_mut().enumerate().skip(1) {
            output = layer.build(&output, rng)?;
            if let Some(dense) = layer.as_dense() {
                debug!(
                    layer = i,
                    weights = ?dense.weights().map(Matrix::shape),
                    biases = ?dense.biases().map(Matrix::shape),
                    "allocated dense layer"
                );
            }
        }
        self.output_size = output.cols();
        Ok(())
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn input_size(&self) -> usize {
        match &self.layers[0] {
            Layer::Input(input) => input.size,
            _ => 0,
        }
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Runs `input` through every layer and returns each layer's output in
    /// order. Entry 0 is the input itself; the last entry is the prediction.
    pub fn feedforward(&self, input: &Matrix) -> Result<Vec<Matrix>> {
        if input.shape() != (1, self.input_size()) {
            return Err(NetError::shape("feedforward", (1, self.input_size()), input.shape()));
        }

        let mut outputs = Vec::with_capacity(self.layers.len());
        outputs.push(self.layers[0].feed_from(input)?);
        for layer in &self.layers[1..] {
            let next = layer.feed_from(&outputs[outputs.len() - 1])?;
            outputs.push(next);
        }
        Ok(outputs)
    }

    pub fn predict(&self, input: &Matrix) -> Result<Matrix> {
        let mut outputs = self.feedforward(input)?;
        outputs.pop()
            .ok_or_else(|| NetError::InvalidTopology("network has no layers".into()))
    }

    /// Mean squared error of the network's predictions over every row of `x`.
    pub fn evaluate(&self, x: &Matrix, y: &Matrix) -> Result<f64> {
        if x.rows() != y.rows() {
            return Err(NetError::shape("evaluate", x.shape(), y.shape()));
        }
        let mut predictions = Vec::with_capacity(x.rows() * self.output_size);
        for r in 0..x.rows() {
            let prediction = self.predict(&x.slice_rows(&[r])?)?;
            predictions.extend_from_slice(prediction.as_slice());
        }
        let predictions = Matrix::from_vec(x.rows(), self.output_size, predictions)?;
        MseLoss::loss(y, &predictions)
    }

    /// Trains with a default [`Sgd`] and the thread-local RNG.
    /// See [`Sgd::fit`] for the sampling scheme.
    pub fn fit(&mut self, x: &Matrix, y: &Matrix, epochs: usize, batch_size: usize) -> Result<()> {
        Sgd::default().fit(self, x, y, epochs, batch_size, &mut rand::thread_rng())
    }
}

fn validate_topology(layers: &[Layer]) -> Result<()> {
    match layers.first() {
        Some(Layer::Input(_)) => {}
        Some(_) => return Err(NetError::InvalidTopology("first layer must be an input layer".into())),
        None => return Err(NetError::InvalidTopology("network needs at least one layer".into())),
    }
    for (i, layer) in layers.iter().enumerate() {
        match layer {
            Layer::Input(_) if i > 0 => {
                return Err(NetError::InvalidTopology(format!(
                    "input layer may only appear first, found one at index {}", i
                )));
            }
            Layer::Input(input) if input.size == 0 => {
                return Err(NetError::InvalidTopology("input layer must have at least one node".into()));
            }
            Layer::Dense(dense) if dense.size == 0 => {
                return Err(NetError::InvalidTopology(format!(
                    "dense layer {} must have at least one node", i
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

/// The activation that applies to the dense layer at `index`: its own, else
/// that of a standalone activation layer directly after it, else `Identity`.
pub fn activation_of(layers: &[Layer], index: usize) -> ActivationFunction {
    if let Some(Layer::Dense(dense)) = layers.get(index) {
        if let Some(f) = dense.activator {
            return f;
        }
    }
    match layers.get(index + 1) {
        Some(Layer::Activation(next)) => next.activator,
        _ => ActivationFunction::Identity,
    }
}

/// Index of the output that holds the *activated* value of the layer at
/// `index`: the layer's own output, or the following activation layer's.
pub fn activated_output_index(layers: &[Layer], index: usize) -> usize {
    let own = layers.get(index).map(Layer::has_activation).unwrap_or(false);
    match layers.get(index + 1) {
        Some(Layer::Activation(_)) if !own => index + 1,
        _ => index,
    }
}
