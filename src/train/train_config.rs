use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::optim::sgd::DEFAULT_LEARNING_RATE;

/// Hyperparameters for a [`train_network`](crate::train::train_network) run.
///
/// # Fields
/// - `epochs`        — epoch bound; `fit` runs epochs `0..=epochs`
/// - `batch_size`    — rows sampled per epoch; must not exceed the dataset size
/// - `learning_rate` — SGD step size, defaults to `DEFAULT_LEARNING_RATE`
/// - `seed`          — fixes the sampling RNG for reproducible runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

impl TrainConfig {
    /// Creates a `TrainConfig` with the default learning rate and no seed.
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate: DEFAULT_LEARNING_RATE,
            seed: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json_str(json: &str) -> Result<TrainConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_json(path: &str) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
