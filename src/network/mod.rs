pub mod network;
pub mod spec;

pub use network::{activation_of, Network};
pub use spec::{NetworkSpec, LayerSpec};
