// Thin front-end over the library: loads a network description, builds it and
// reports the parameter shapes that shape inference allocated.
//   cargo run -- network.json
// Run the XOR demo with:
//   cargo run --example xor
use mini_neural_net::{Layer, NetworkSpec};
use tracing::{error, info, Level};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        println!("mini-neural-net: a from-scratch neural network library in Rust.");
        println!("Usage: mini-neural-net <network.json>");
        println!("Run `cargo run --example xor` to see the XOR demo.");
        return;
    };

    let spec = match NetworkSpec::load_json(&path) {
        Ok(spec) => spec,
        Err(e) => {
            error!("cannot load {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let network = match spec.build(&mut rand::thread_rng()) {
        Ok(network) => network,
        Err(e) => {
            error!("cannot build {}: {}", spec.name, e);
            std::process::exit(1);
        }
    };

    info!("Built '{}': {} layers, {} -> {}", spec.name, network.len(), network.input_size(), network.output_size());
    for (i, layer) in network.layers().iter().enumerate() {
        match layer {
            Layer::Input(input) => info!("  [{}] input     size={}", i, input.size),
            Layer::Dense(dense) => info!(
                "  [{}] dense     weights={:?} biases={:?} activation={:?}",
                i,
                dense.weights().map(|w| w.shape()),
                dense.biases().map(|b| b.shape()),
                dense.activator,
            ),
            Layer::Activation(act) => info!("  [{}] activation {:?}", i, act.activator),
        }
    }
}
