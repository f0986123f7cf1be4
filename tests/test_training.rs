// End-to-end training behaviour of the SGD optimizer.

use mini_neural_net::{
    train_network, ActivationFunction, Layer, Matrix, MseLoss, NetError, Network, Sgd, TrainConfig,
};
use rand::{rngs::StdRng, SeedableRng};

fn xor_data() -> (Matrix, Matrix) {
    let x = Matrix::from_rows(vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ]).unwrap();
    let y = Matrix::column(&[0.0, 1.0, 1.0, 0.0]).unwrap();
    (x, y)
}

fn xor_net(rng: &mut StdRng) -> Network {
    Network::with_rng(vec![
        Layer::input(2),
        Layer::dense(4, Some(ActivationFunction::Sigmoid)),
        Layer::dense(1, Some(ActivationFunction::Sigmoid)),
    ], rng).unwrap()
}

fn predict(network: &Network, a: f64, b: f64) -> f64 {
    network.predict(&Matrix::row(&[a, b]).unwrap()).unwrap().get(0, 0)
}

/// Trains XOR from `seed` and returns the network with its loss history,
/// sampled every 1000 epochs.
fn train_xor(seed: u64) -> (Network, Vec<f64>) {
    let (x, y) = xor_data();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut network = xor_net(&mut rng);
    let optimizer = Sgd::new(0.5);

    let mut history = vec![network.evaluate(&x, &y).unwrap()];
    for _ in 0..8 {
        optimizer.fit(&mut network, &x, &y, 1000, 4, &mut rng).unwrap();
        history.push(network.evaluate(&x, &y).unwrap());
    }
    (network, history)
}

#[test]
fn learns_xor() {
    // Small sigmoid nets occasionally settle in a local minimum on XOR, so a
    // handful of seeds are tried and at least one must solve it.
    let solved = (0..5).map(train_xor).find(|(_, history)| history[history.len() - 1] < 0.05);
    let (network, history) = solved.expect("no seed solved XOR");

    assert!(history[history.len() - 1] < history[0]);
    assert!(predict(&network, 0.0, 1.0) > 0.5);
    assert!(predict(&network, 1.0, 0.0) > 0.5);
    assert!(predict(&network, 0.0, 0.0) < 0.5);
    assert!(predict(&network, 1.0, 1.0) < 0.5);

    let (x, y) = xor_data();
    let mut predictions = Vec::new();
    for r in 0..4 {
        predictions.push(network.predict(&x.slice_rows(&[r]).unwrap()).unwrap().get(0, 0));
    }
    let loss = MseLoss::loss(&y, &Matrix::column(&predictions).unwrap()).unwrap();
    assert!(loss < 0.05);
}

#[test]
fn training_is_reproducible_for_a_fixed_seed() {
    let (a, history_a) = train_xor(3);
    let (b, history_b) = train_xor(3);
    assert_eq!(a, b);
    assert_eq!(history_a, history_b);
}

#[test]
fn oversized_batch_is_rejected_without_touching_parameters() {
    let (x, y) = xor_data();
    let mut rng = StdRng::seed_from_u64(0);
    let mut network = xor_net(&mut rng);
    let before = network.clone();

    for batch_size in [5, 6, 100] {
        let err = Sgd::default().fit(&mut network, &x, &y, 10, batch_size, &mut rng).unwrap_err();
        assert!(matches!(err, NetError::InvalidArgument(_)));
        assert_eq!(network, before);
    }
}

#[test]
fn target_width_must_match_output_layer() {
    let (x, _) = xor_data();
    let mut rng = StdRng::seed_from_u64(0);
    let mut network = xor_net(&mut rng);
    let wide = Matrix::zeros(4, 2);
    let err = network.fit(&x, &wide, 1, 4).unwrap_err();
    assert!(matches!(err, NetError::ShapeMismatch { .. }));
}

#[test]
fn output_dense_without_activation_fails_before_training() {
    let (x, y) = xor_data();
    let mut rng = StdRng::seed_from_u64(0);
    let mut network = Network::with_rng(vec![
        Layer::input(2),
        Layer::dense(4, Some(ActivationFunction::Sigmoid)),
        Layer::dense(1, None),
    ], &mut rng).unwrap();
    let before = network.clone();

    let err = Sgd::default().fit(&mut network, &x, &y, 5, 2, &mut rng).unwrap_err();
    assert!(matches!(err, NetError::MissingActivation { layer: 2 }));
    assert_eq!(network, before);
}

#[test]
fn standalone_activation_layers_train() {
    let (x, y) = xor_data();
    let mut rng = StdRng::seed_from_u64(21);
    let mut network = Network::with_rng(vec![
        Layer::input(2),
        Layer::dense(4, None),
        Layer::activation(ActivationFunction::Sigmoid),
        Layer::dense(1, None),
        Layer::activation(ActivationFunction::Sigmoid),
    ], &mut rng).unwrap();
    let before = network.clone();

    Sgd::default().fit(&mut network, &x, &y, 50, 4, &mut rng).unwrap();

    assert_ne!(network.layers()[1], before.layers()[1]);
    assert_ne!(network.layers()[3], before.layers()[3]);
    assert_eq!(network.layers()[1].as_dense().unwrap().weights().unwrap().shape(), (2, 4));
}

#[test]
fn zero_batch_leaves_network_unchanged() {
    let (x, y) = xor_data();
    let mut rng = StdRng::seed_from_u64(0);
    let mut network = xor_net(&mut rng);
    let before = network.clone();
    Sgd::default().fit(&mut network, &x, &y, 3, 0, &mut rng).unwrap();
    assert_eq!(network, before);
}

#[test]
fn config_driven_training_reports_final_loss() {
    let (x, y) = xor_data();
    let mut network = xor_net(&mut StdRng::seed_from_u64(1));
    let config = TrainConfig::new(200, 4).with_seed(17);
    let loss = train_network(&mut network, &x, &y, &config).unwrap();
    assert_eq!(loss, network.evaluate(&x, &y).unwrap());
}
