#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use neuroflap::simulation::agent::Agent;
use neuroflap::simulation::brain::Controller;
use neuroflap::simulation::obstacle::Obstacle;
use neuroflap::simulation::params::Params;
use neuroflap::simulation::vector::Vector2;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A controller that always (or never) jumps, whatever it senses.
fn fixed_controller(jump: bool) -> Controller {
    let mut rng = StdRng::seed_from_u64(0);
    let mut controller = Controller::new_random(&mut rng);
    for layer in &mut controller.layers {
        layer.weights.fill(0.0);
        layer.biases.fill(0.0);
    }
    if let Some(last) = controller.layers.last_mut() {
        last.biases[if jump { 0 } else { 1 }] = 1.0;
    }
    controller
}

fn far_obstacles(params: &Params) -> Vec<Obstacle> {
    vec![Obstacle::new(10_000.0, 360.0, params)]
}

#[test]
fn test_falls_under_gravity() {
    let params = Params::default();
    let obstacles = far_obstacles(&params);
    let mut agent = Agent::new(params.spawn_point(), fixed_controller(false), &params);

    agent.update(&obstacles, &params);
    assert_eq!(agent.vel.y, 0.0);
    assert_eq!(agent.pos.y, 360.5);

    agent.update(&obstacles, &params);
    assert_eq!(agent.vel.y, 0.5);
    assert_eq!(agent.pos.y, 361.5);
    assert_eq!(agent.pos.x, params.spawn_x);
    assert_eq!(agent.score, 2);
}

#[test]
fn test_jump_gives_upward_velocity() {
    let params = Params::default();
    let obstacles = far_obstacles(&params);
    let mut agent = Agent::new(params.spawn_point(), fixed_controller(true), &params);

    agent.update(&obstacles, &params);

    assert_eq!(agent.vel.y, -params.jump_impulse);
    assert_eq!(agent.pos.y, 360.0 - params.jump_impulse + params.gravity);
    assert!(agent.tilt() < 0.0);
}

#[test]
fn test_ceiling_clamp_repositions_without_killing() {
    let params = Params::default();
    let obstacles = far_obstacles(&params);
    let mut agent = Agent::new(Vector2::new(100.0, 15.0), fixed_controller(true), &params);

    agent.update(&obstacles, &params);

    assert_eq!(agent.pos.y, params.agent_height / 2.0);
    assert!(agent.is_alive());
    assert_eq!(agent.score, 1);
}

#[test]
fn test_nearest_obstacle_ahead() {
    let params = Params::default();
    let agent = Agent::new(params.spawn_point(), fixed_controller(false), &params);
    let obstacles = vec![
        Obstacle::new(50.0, 300.0, &params),
        Obstacle::new(300.0, 400.0, &params),
        Obstacle::new(700.0, 500.0, &params),
    ];

    let nearest = agent.nearest_obstacle(&obstacles).unwrap();
    assert_eq!(nearest.pos.x, 300.0);

    let sensors = agent.sense(&obstacles).unwrap();
    assert_eq!(sensors.y, 360.0);
    assert_eq!(sensors.y_velocity, 0.0);
    assert_eq!(sensors.distance, 200.0);
    assert_eq!(sensors.gap_top, 275.0);
    assert_eq!(sensors.gap_bottom, 525.0);
    assert_eq!(sensors.to_inputs(), [360.0, 0.0, 200.0, 275.0, 525.0]);
}

#[test]
fn test_nearest_obstacle_falls_back_to_leading() {
    let params = Params::default();
    let agent = Agent::new(Vector2::new(900.0, 360.0), fixed_controller(false), &params);
    let obstacles = vec![
        Obstacle::new(50.0, 300.0, &params),
        Obstacle::new(300.0, 400.0, &params),
    ];

    assert_eq!(agent.nearest_obstacle(&obstacles).unwrap().pos.x, 50.0);
    assert!(agent.nearest_obstacle(&[]).is_none());
    assert!(!agent.wants_to_jump(&[]));
}

#[test]
fn test_collision_kills_and_freezes_score() {
    let params = Params::default();
    // gap spans 0..250, the agent sits below it
    let obstacles = vec![Obstacle::new(90.0, 125.0, &params)];
    let mut agent = Agent::new(params.spawn_point(), fixed_controller(false), &params);

    agent.update(&obstacles, &params);
    assert!(!agent.is_alive());
    assert_eq!(agent.score, 0);

    let pos = agent.pos;
    agent.update(&obstacles, &params);
    assert_eq!(agent.score, 0);
    assert_eq!(agent.pos, pos);
}

#[test]
fn test_flies_through_gap() {
    let params = Params::default();
    let obstacles = vec![Obstacle::new(90.0, 360.0, &params)];
    let mut agent = Agent::new(params.spawn_point(), fixed_controller(false), &params);

    for _ in 0..5 {
        agent.update(&obstacles, &params);
    }

    assert!(agent.is_alive());
    assert_eq!(agent.score, 5);
}

#[test]
fn test_score_saturates_at_max() {
    let params = Params::default();
    let obstacles = far_obstacles(&params);
    let mut agent = Agent::new(params.spawn_point(), fixed_controller(false), &params);
    agent.score = u32::MAX - 1;

    agent.update(&obstacles, &params);
    agent.update(&obstacles, &params);

    assert!(agent.is_alive());
    assert_eq!(agent.score, u32::MAX);
}

#[test]
fn test_tilt_is_clamped() {
    let params = Params::default();
    let mut agent = Agent::new(params.spawn_point(), fixed_controller(false), &params);

    agent.vel = Vector2::new(0.0, 40.0);
    assert_eq!(agent.tilt(), 0.5);
    agent.vel = Vector2::new(0.0, -40.0);
    assert_eq!(agent.tilt(), -0.5);
    agent.vel = Vector2::new(0.0, 5.0);
    assert_eq!(agent.tilt(), 0.25);
}
