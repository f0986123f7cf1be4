// JSON configuration: network specs and training hyperparameters.

use std::io::Write;

use mini_neural_net::{ActivationFunction, LayerSpec, NetError, NetworkSpec, TrainConfig};
use rand::{rngs::StdRng, SeedableRng};
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp config");
    file
}

fn sample_spec() -> NetworkSpec {
    NetworkSpec {
        name: "relu-sigmoid".into(),
        layers: vec![
            LayerSpec::Input { size: 2 },
            LayerSpec::Dense { nodes: 4, activation: Some(ActivationFunction::ReLU) },
            LayerSpec::Dense { nodes: 1, activation: Some(ActivationFunction::Sigmoid) },
        ],
    }
}

#[test]
fn spec_round_trips_through_a_file() {
    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap();
    sample_spec().save_json(path).unwrap();
    assert_eq!(NetworkSpec::load_json(path).unwrap(), sample_spec());
}

#[test]
fn spec_builds_expected_shapes() {
    let network = sample_spec().build(&mut StdRng::seed_from_u64(0)).unwrap();
    let hidden = network.layers()[1].as_dense().unwrap();
    assert_eq!(hidden.weights().unwrap().shape(), (2, 4));
    assert_eq!(network.output_size(), 1);
}

#[test]
fn spec_without_input_first_fails_to_build() {
    let spec = NetworkSpec {
        name: "headless".into(),
        layers: vec![LayerSpec::Dense { nodes: 3, activation: None }],
    };
    assert!(matches!(
        spec.build(&mut StdRng::seed_from_u64(0)),
        Err(NetError::InvalidTopology(_))
    ));
}

#[test]
fn missing_spec_file_is_an_io_error() {
    assert!(matches!(
        NetworkSpec::load_json("/definitely/not/here.json"),
        Err(NetError::Io(_))
    ));
}

#[test]
fn train_config_loads_from_file() {
    let file = write_temp_config(r#"{ "epochs": 5000, "batch_size": 4, "learning_rate": 0.1, "seed": 42 }"#);
    let config = TrainConfig::load_json(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config, TrainConfig::new(5000, 4).with_learning_rate(0.1).with_seed(42));
}

#[test]
fn malformed_train_config_is_a_json_error() {
    let file = write_temp_config(r#"{ "epochs": "many" }"#);
    assert!(matches!(
        TrainConfig::load_json(file.path().to_str().unwrap()),
        Err(NetError::Json(_))
    ));
}
