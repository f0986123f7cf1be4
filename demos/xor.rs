use mini_neural_net::{ActivationFunction, Layer, Matrix, Network, Sgd};
use rand::{rngs::StdRng, SeedableRng};
use tracing::Level;

fn main() -> mini_neural_net::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let mut rng = StdRng::seed_from_u64(2024);
    let mut network = Network::with_rng(vec![
        Layer::input(2),
        Layer::dense(4, Some(ActivationFunction::Sigmoid)),
        Layer::dense(1, Some(ActivationFunction::Sigmoid)),
    ], &mut rng)?;

    let inputs = Matrix::from_rows(vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ])?;
    let expected_outputs = Matrix::column(&[0.0, 1.0, 1.0, 0.0])?;

    let optimizer = Sgd::default();
    let rounds = 10;
    let epochs_per_round = 1000;

    for round in 0..rounds {
        optimizer.fit(&mut network, &inputs, &expected_outputs, epochs_per_round, 4, &mut rng)?;
        let loss = network.evaluate(&inputs, &expected_outputs)?;
        println!("Epoch {}: loss = {loss:.6}", (round + 1) * epochs_per_round);
    }

    for r in 0..inputs.rows() {
        let input = inputs.slice_rows(&[r])?;
        println!("Input: {:?} -> Output: {:.4}", input.as_slice(), network.predict(&input)?.get(0, 0));
    }
    Ok(())
}
