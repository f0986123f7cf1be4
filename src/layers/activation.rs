use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Parameter-free layer that applies `activator` to the previous output.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationLayer {
    pub activator: ActivationFunction,
}

impl ActivationLayer {
    pub fn new(activator: ActivationFunction) -> ActivationLayer {
        ActivationLayer { activator }
    }

    pub fn feed_from(&self, input: &Matrix) -> Matrix {
        input.map(|x| self.activator.function(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_shape_and_applies_function() {
        let layer = ActivationLayer::new(ActivationFunction::ReLU);
        let input = Matrix::row(&[-1.0, 0.5, 2.0]).unwrap();
        assert_eq!(layer.feed_from(&input), Matrix::row(&[0.0, 0.5, 2.0]).unwrap());
    }
}
