#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use neuroflap::simulation::brain::{Activation, Controller, TOPOLOGY};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn controller_from_seed(seed: u64) -> Controller {
    let mut rng = StdRng::seed_from_u64(seed);
    Controller::new_random(&mut rng)
}

proptest! {
    #[test]
    fn crossover_only_copies_parent_values(seed_a in any::<u64>(), seed_b in any::<u64>(), seed_mix in any::<u64>()) {
        let parent_a = controller_from_seed(seed_a);
        let parent_b = controller_from_seed(seed_b);
        let mut rng = StdRng::seed_from_u64(seed_mix);

        let child = parent_a.crossover(&parent_b, &mut rng);

        let a = parent_a.flatten();
        let b = parent_b.flatten();
        let c = child.flatten();
        prop_assert_eq!(c.len(), a.len());
        for i in 0..c.len() {
            prop_assert!(c[i] == a[i] || c[i] == b[i], "position {} is not inherited", i);
        }
    }
}

#[test]
fn test_topology_shapes() {
    let controller = controller_from_seed(1);

    assert_eq!(controller.layers.len(), TOPOLOGY.len() - 1);
    for (i, layer) in controller.layers.iter().enumerate() {
        assert_eq!(layer.weights.dim(), (TOPOLOGY[i + 1], TOPOLOGY[i]));
        assert_eq!(layer.biases.len(), TOPOLOGY[i + 1]);
        assert!(layer.biases.iter().all(|&b| b == 0.0));
    }
    assert_eq!(controller.layers[0].activation, Activation::Relu);
    assert_eq!(controller.layers[1].activation, Activation::Relu);
    assert_eq!(controller.layers[2].activation, Activation::Softmax);
    assert_eq!(controller.parameter_count(), 5 * 10 + 10 + 10 * 8 + 8 + 8 * 2 + 2);
}

#[test]
fn test_predict_is_a_distribution() {
    let controller = controller_from_seed(2);

    for inputs in [
        [360.0, 0.0, 900.0, 200.0, 450.0],
        [10.0, -10.0, 5.0, 300.0, 550.0],
        [0.0; 5],
    ] {
        let [jump, stay] = controller.predict(&inputs);
        assert!((jump + stay - 1.0).abs() < 1e-5);
        assert!((0.0..=1.0).contains(&jump));
        assert!((0.0..=1.0).contains(&stay));

        // no hidden state
        assert_eq!(controller.predict(&inputs), [jump, stay]);
    }
}

#[test]
fn test_crossover_leaves_parents_untouched() {
    let parent_a = controller_from_seed(3);
    let parent_b = controller_from_seed(4);
    let before_a = parent_a.flatten();
    let before_b = parent_b.flatten();

    let mut rng = StdRng::seed_from_u64(5);
    let mut child = parent_a.crossover(&parent_b, &mut rng);
    child.mutate(1.0, 0.5, &mut rng);

    assert_eq!(parent_a.flatten(), before_a);
    assert_eq!(parent_b.flatten(), before_b);
}

#[test]
fn test_crossover_mixes_both_parents() {
    let parent_a = controller_from_seed(6);
    let parent_b = controller_from_seed(7);
    let mut rng = StdRng::seed_from_u64(8);

    let child = parent_a.crossover(&parent_b, &mut rng).flatten();
    let a = parent_a.flatten();
    let b = parent_b.flatten();

    let from_a = child.iter().zip(&a).filter(|(c, a)| c == a).count();
    let from_b = child.iter().zip(&b).filter(|(c, b)| c == b).count();
    assert!(from_a > 0, "child inherited nothing from the first parent");
    assert!(from_b > 0, "child inherited nothing from the second parent");
}

#[test]
#[should_panic(expected = "different")]
fn test_crossover_rejects_mismatched_topology() {
    let parent_a = controller_from_seed(9);
    let mut parent_b = controller_from_seed(10);
    parent_b.layers.pop();

    let mut rng = StdRng::seed_from_u64(11);
    let _ = parent_a.crossover(&parent_b, &mut rng);
}

#[test]
fn test_mutation_rate_zero_keeps_weights() {
    let mut controller = controller_from_seed(12);
    let before = controller.flatten();

    let mut rng = StdRng::seed_from_u64(13);
    controller.mutate(0.0, 0.5, &mut rng);

    assert_eq!(controller.flatten(), before);
}

#[test]
fn test_mutation_rate_one_perturbs_every_weight() {
    let mut controller = controller_from_seed(14);
    let before = controller.flatten();

    let mut rng = StdRng::seed_from_u64(15);
    controller.mutate(1.0, 0.5, &mut rng);

    for (after, before) in controller.flatten().iter().zip(&before) {
        assert_ne!(after, before);
        assert!((after - before).abs() <= 0.5 + 1e-6);
    }
}
