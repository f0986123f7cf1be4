use rand::{seq::SliceRandom, Rng};
use tracing::{info, trace};

use crate::{
    activation::activation::ActivationFunction,
    error::{NetError, Result},
    layers::{DenseLayer, Layer},
    loss::mse::MseLoss,
    math::matrix::{Axis, Matrix},
    network::network::{activated_output_index, activation_of, Network},
};

/// Learning rate used by [`Sgd::default`] and [`Network::fit`].
pub const DEFAULT_LEARNING_RATE: f64 = 0.3;

/// Plain stochastic gradient descent with a fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Default for Sgd {
    fn default() -> Self {
        Sgd::new(DEFAULT_LEARNING_RATE)
    }
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// One backward pass for a single example.
    ///
    /// `outputs` is the full list returned by [`Network::feedforward`] for the
    /// example and `expected` its target row. The output layer is updated
    /// first; each hidden delta is then propagated through the already updated
    /// weights of the next trainable layer above it. Shapes are checked before
    /// any layer is touched, so an error leaves the network unchanged.
    pub fn backprop(&self, network: &mut Network, expected: &Matrix, outputs: &[Matrix]) -> Result<()> {
        let (output_index, activator) = resolve_output_layer(network.layers())?;
        check_outputs(network.layers(), expected, outputs)?;
        let lr = self.learning_rate;

        // Output layer: bias gradient is the column mean of the delta.
        let mut delta = MseLoss::delta(expected, &outputs[outputs.len() - 1], activator)?;
        let weights_grad = outputs[output_index - 1].transpose().dot(&delta)?;
        let biases_grad = delta.mean(Axis::Columns);
        apply_update(network, output_index, &weights_grad * lr, &biases_grad * lr)?;

        // Hidden layers: bias gradient is the raw delta.
        let mut senior = output_index;
        for i in (1..output_index).rev() {
            let layers = network.layers();
            if !layers[i].is_trainable() {
                continue;
            }
            let (senior_weights, _) = dense_at(layers, senior)?.parameters()?;
            let activator = activation_of(layers, i);
            let activated = &outputs[activated_output_index(layers, i)];

            delta = delta.dot(&senior_weights.transpose())?
                .hadamard(&activated.map(|y| activator.derivative(y)))?;
            let weights_grad = outputs[i - 1].transpose().dot(&delta)?;
            apply_update(network, i, &weights_grad * lr, &delta * lr)?;
            senior = i;
        }
        Ok(())
    }

    /// Online SGD over random subsets of the dataset.
    ///
    /// Runs `epochs + 1` passes (epochs `0..=epochs`). Each pass draws a fresh
    /// random permutation of the rows of `x`, keeps the first `batch_size`
    /// indices and performs one feedforward and one full backward update per
    /// sampled row. Gradients are never aggregated across the batch.
    pub fn fit<R: Rng + ?Sized>(
        &self,
        network: &mut Network,
        x: &Matrix,
        y: &Matrix,
        epochs: usize,
        batch_size: usize,
        rng: &mut R,
    ) -> Result<()> {
        if x.rows() != y.rows() {
            return Err(NetError::shape("fit", x.shape(), y.shape()));
        }
        if batch_size > x.rows() {
            return Err(NetError::InvalidArgument(format!(
                "batch size {} exceeds the {} available rows", batch_size, x.rows()
            )));
        }
        if x.cols() != network.input_size() {
            return Err(NetError::shape("fit inputs", (x.rows(), network.input_size()), x.shape()));
        }
        if y.cols() != network.output_size() {
            return Err(NetError::shape("fit targets", (y.rows(), network.output_size()), y.shape()));
        }
        resolve_output_layer(network.layers())?;

        info!(
            epochs,
            batch_size,
            rows = x.rows(),
            learning_rate = self.learning_rate,
            "starting training"
        );

        let mut indices: Vec<usize> = (0..x.rows()).collect();
        for epoch in 0..=epochs {
            indices.shuffle(rng);
            trace!(epoch, batch = ?&indices[..batch_size], "sampled batch");

            for &row in &indices[..batch_size] {
                let input = x.slice_rows(&[row])?;
                let expected = y.slice_rows(&[row])?;
                let outputs = network.feedforward(&input)?;
                self.backprop(network, &expected, &outputs)?;
            }
        }
        Ok(())
    }
}

/// Finds the dense layer whose parameters produce the prediction, and the
/// activation applied on top of it.
fn resolve_output_layer(layers: &[Layer]) -> Result<(usize, ActivationFunction)> {
    let last = layers.len().checked_sub(1)
        .ok_or_else(|| NetError::InvalidTopology("network has no layers".into()))?;
    match &layers[last] {
        Layer::Activation(activation) => match last.checked_sub(1).map(|i| &layers[i]) {
            Some(Layer::Dense(_)) => Ok((last - 1, activation.activator)),
            _ => Err(NetError::InvalidTopology(
                "a trailing activation layer must follow a dense layer".into(),
            )),
        },
        Layer::Dense(dense) => dense.activator
            .map(|f| (last, f))
            .ok_or(NetError::MissingActivation { layer: last }),
        Layer::Input(_) => Err(NetError::InvalidTopology(
            "output layer cannot be an input layer".into(),
        )),
    }
}

/// Verifies that `outputs` and `expected` have the shapes `layers` produce,
/// so the backward walk cannot fail halfway through.
fn check_outputs(layers: &[Layer], expected: &Matrix, outputs: &[Matrix]) -> Result<()> {
    if outputs.len() != layers.len() {
        return Err(NetError::InvalidArgument(format!(
            "expected {} layer outputs, got {}", layers.len(), outputs.len()
        )));
    }
    for (i, (layer, output)) in layers.iter().zip(outputs).enumerate() {
        let want = match layer {
            Layer::Input(input) => (1, input.size),
            Layer::Dense(dense) => {
                let (weights, _) = dense.parameters()?;
                if weights.rows() != outputs[i - 1].cols() {
                    return Err(NetError::shape("backprop input", weights.shape(), outputs[i - 1].shape()));
                }
                (1, dense.size)
            }
            Layer::Activation(_) => outputs[i - 1].shape(),
        };
        if output.shape() != want {
            return Err(NetError::shape("backprop output", want, output.shape()));
        }
    }
    let predicted = &outputs[outputs.len() - 1];
    if expected.shape() != predicted.shape() {
        return Err(NetError::shape("backprop target", predicted.shape(), expected.shape()));
    }
    Ok(())
}

fn apply_update(
    network: &mut Network,
    index: usize,
    weights_delta: Matrix,
    biases_delta: Matrix,
) -> Result<()> {
    trace!(
        layer = index,
        weights_delta = ?weights_delta.as_slice(),
        biases_delta = ?biases_delta.as_slice(),
        "applying update"
    );
    network.layers_mut()[index]
        .as_dense_mut()
        .ok_or_else(|| NetError::InvalidTopology(format!("layer {} is not trainable", index)))?
        .update(&weights_delta, &biases_delta)
}

fn dense_at(layers: &[Layer], index: usize) -> Result<&DenseLayer> {
    layers[index].as_dense()
        .ok_or_else(|| NetError::InvalidTopology(format!("layer {} is not trainable", index)))
}
