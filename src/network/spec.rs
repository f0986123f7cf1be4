use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::layers::Layer;
use crate::network::network::Network;

/// Describes one layer in a network specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerSpec {
    /// Raw input of width `size`. Must come first.
    Input { size: usize },
    /// Fully connected layer with `nodes` outputs and an optional activation.
    Dense {
        nodes: usize,
        #[serde(default)]
        activation: Option<ActivationFunction>,
    },
    /// Standalone activation applied to the previous layer's output.
    Activation { function: ActivationFunction },
}

impl LayerSpec {
    pub fn to_layer(&self) -> Layer {
        match *self {
            LayerSpec::Input { size } => Layer::input(size),
            LayerSpec::Dense { nodes, activation } => Layer::dense(nodes, activation),
            LayerSpec::Activation { function } => Layer::activation(function),
        }
    }
}

/// A serializable description of a network architecture.
///
/// Only the topology is stored; trained parameters are never written. Build a
/// fresh [`Network`] from it with [`NetworkSpec::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name.
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        Network::with_rng(self.layers.iter().map(LayerSpec::to_layer).collect(), rng)
    }

    pub fn from_json_str(json: &str) -> Result<NetworkSpec> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn parses_tagged_layers() {
        let spec = NetworkSpec::from_json_str(r#"{
            "name": "xor",
            "layers": [
                { "type": "input", "size": 2 },
                { "type": "dense", "nodes": 4, "activation": "relu" },
                { "type": "dense", "nodes": 1 },
                { "type": "activation", "function": "sigmoid" }
            ]
        }"#).unwrap();
        assert_eq!(spec.layers[2], LayerSpec::Dense { nodes: 1, activation: None });
        let net = spec.build(&mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(net.len(), 4);
        assert_eq!(net.output_size(), 1);
    }

    #[test]
    fn unknown_activation_is_a_json_error() {
        let err = NetworkSpec::from_json_str(
            r#"{ "name": "bad", "layers": [{ "type": "activation", "function": "tanh" }] }"#,
        ).unwrap_err();
        assert!(matches!(err, crate::error::NetError::Json(_)));
    }
}
