pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::{Axis, Matrix};
pub use activation::activation::ActivationFunction;
pub use layers::Layer;
pub use network::network::{activation_of, Network};
pub use network::spec::{LayerSpec, NetworkSpec};
pub use loss::mse::MseLoss;
pub use optim::sgd::{Sgd, DEFAULT_LEARNING_RATE};
pub use train::{train_network, TrainConfig};
