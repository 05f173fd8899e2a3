//! Neural controller for agents.
//!
//! A fixed three-layer perceptron (`5 → 10 → 8 → 2`, ReLU, ReLU, softmax) used purely as
//! a policy. It is never trained by gradient descent: new controllers come from random
//! initialisation or from uniform crossover of two parents followed by mutation.

use ndarray::{Array1, Array2, Zip};
use rand::Rng;

/// Layer sizes from input to output.
pub const TOPOLOGY: [usize; 4] = [5, 10, 8, 2];

/// Number of sensor inputs.
pub const INPUTS: usize = TOPOLOGY[0];

/// Number of action scores produced.
pub const OUTPUTS: usize = TOPOLOGY[3];

/// Non-linearity applied after a layer's affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// `max(0, x)`.
    Relu,
    /// Normalised exponentials, output sums to 1.
    Softmax,
}

/// A fully-connected layer.
#[derive(Debug, Clone)]
pub struct Dense {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
    /// Activation applied to the output.
    pub activation: Activation,
}

impl Dense {
    /// Creates a layer with Glorot-uniform weights and zero biases.
    pub fn new_random<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let limit = (6.0 / (input_size + output_size) as f32).sqrt();
        Self {
            weights: Array2::from_shape_fn((output_size, input_size), |_| {
                rng.random_range(-limit..=limit)
            }),
            biases: Array1::zeros(output_size),
            activation,
        }
    }

    /// Performs the forward pass.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;

        match self.activation {
            Activation::Relu => output.mapv_inplace(|v| v.max(0.0)),
            Activation::Softmax => softmax_inplace(&mut output),
        }
        output
    }

    /// Independently perturbs each parameter with probability `rate`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f32, strength: f32, rng: &mut R) {
        let mut perturb = |v: &mut f32| {
            if rng.random::<f32>() < rate {
                *v += rng.random_range(-strength..=strength);
            }
        };
        self.weights.iter_mut().for_each(&mut perturb);
        self.biases.iter_mut().for_each(&mut perturb);
    }

    /// Uniform crossover: each parameter is taken from one parent with equal odds.
    ///
    /// # Panics
    ///
    /// Panics if the parents' shapes differ.
    pub fn crossover<R: Rng + ?Sized>(parent1: &Dense, parent2: &Dense, rng: &mut R) -> Self {
        assert_eq!(
            parent1.weights.dim(),
            parent2.weights.dim(),
            "crossover of layers with different weight shapes"
        );
        assert_eq!(
            parent1.biases.dim(),
            parent2.biases.dim(),
            "crossover of layers with different bias shapes"
        );
        assert_eq!(parent1.activation, parent2.activation);

        let mut pick = |a: &f32, b: &f32| if rng.random_bool(0.5) { *a } else { *b };
        Self {
            weights: Zip::from(&parent1.weights)
                .and(&parent2.weights)
                .map_collect(&mut pick),
            biases: Zip::from(&parent1.biases)
                .and(&parent2.biases)
                .map_collect(&mut pick),
            activation: parent1.activation,
        }
    }
}

fn softmax_inplace(values: &mut Array1<f32>) {
    let max = values.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
    values.mapv_inplace(|v| (v - max).exp());
    let sum = values.sum();
    *values /= sum;
}

/// Feed-forward policy owned by exactly one agent.
#[derive(Debug, Clone)]
pub struct Controller {
    /// Ordered layers from input to output.
    pub layers: Vec<Dense>,
}

impl Controller {
    /// Creates a controller with freshly initialised weights.
    pub fn new_random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let last = TOPOLOGY.len() - 2;
        let layers = (0..TOPOLOGY.len() - 1)
            .map(|i| {
                let activation = if i == last {
                    Activation::Softmax
                } else {
                    Activation::Relu
                };
                Dense::new_random(TOPOLOGY[i], TOPOLOGY[i + 1], activation, rng)
            })
            .collect();

        Self { layers }
    }

    /// Runs the inputs through every layer.
    ///
    /// The two outputs sum to 1 and read as `[jump, no_jump]`.
    pub fn predict(&self, inputs: &[f32; INPUTS]) -> [f32; OUTPUTS] {
        let mut output = Array1::from(inputs.to_vec());
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        [output[0], output[1]]
    }

    /// Builds a child whose every parameter is copied from `self` or `partner`.
    ///
    /// Neither parent is modified and the child shares no storage with them.
    ///
    /// # Panics
    ///
    /// Panics if the two controllers do not have the same topology.
    pub fn crossover<R: Rng + ?Sized>(&self, partner: &Controller, rng: &mut R) -> Controller {
        assert_eq!(
            self.layers.len(),
            partner.layers.len(),
            "crossover of controllers with different depth"
        );
        let layers = self
            .layers
            .iter()
            .zip(&partner.layers)
            .map(|(a, b)| Dense::crossover(a, b, rng))
            .collect();

        Controller { layers }
    }

    /// Adds `U(-strength, strength)` noise to each parameter with probability `rate`.
    ///
    /// No clamping: weights may drift without bound over generations.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f32, strength: f32, rng: &mut R) {
        for layer in &mut self.layers {
            layer.mutate(rate, strength, rng);
        }
    }

    /// All weights and biases, layer by layer.
    pub fn flatten(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.parameter_count());

        for layer in &self.layers {
            flat.extend(layer.weights.iter().copied());
            flat.extend(layer.biases.iter().copied());
        }

        flat
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.weights.len() + layer.biases.len())
            .sum()
    }
}
