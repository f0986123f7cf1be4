pub mod trainer;
pub mod train_config;

pub use trainer::train_network;
pub use train_config::TrainConfig;
