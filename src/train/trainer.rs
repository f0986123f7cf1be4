use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use crate::{
    error::Result,
    math::matrix::Matrix,
    network::network::Network,
    optim::sgd::Sgd,
    train::train_config::TrainConfig,
};

/// Trains `network` on `(inputs, targets)` as described by `config` and
/// returns the mean squared error over the whole dataset afterwards.
pub fn train_network(
    network: &mut Network,
    inputs: &Matrix,
    targets: &Matrix,
    config: &TrainConfig,
) -> Result<f64> {
    let optimizer = Sgd::new(config.learning_rate);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    optimizer.fit(network, inputs, targets, config.epochs, config.batch_size, &mut rng)?;

    let loss = network.evaluate(inputs, targets)?;
    info!(loss, epochs = config.epochs, "training finished");
    Ok(loss)
}
