//! # Neuroflap - neuroevolution on a side-scrolling obstacle course
//!
//! A flock of agents, each steered by a small feed-forward network, tries to fly through
//! the gaps of scrolling pipes. Networks are never trained by backpropagation: when the
//! whole flock has crashed, the next generation is bred from the dead with
//! fitness-proportional selection, uniform crossover and mutation.
//!
//! ## Core Modules
//!
//! - [`simulation::game`] - Tick loop and generational replacement entry points
//! - [`simulation::agent`] - Agent physics, sensing and collisions
//! - [`simulation::brain`] - Fixed-topology neural controller
//! - [`simulation::evolution`] - Fitness, selection and reproduction
//! - [`simulation::obstacle`] - Scrolling pipes and the collision predicate
//! - [`simulation::vector`] - 2D vector math

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agents with Verlet physics and a neural policy.
    pub mod agent;
    /// Neural controller with crossover and mutation.
    pub mod brain;
    /// Configuration errors.
    pub mod error;
    /// Generational replacement algorithm.
    pub mod evolution;
    /// Simulation state and tick loop.
    pub mod game;
    /// Per-generation statistics.
    pub mod history;
    /// Obstacles the agents must fly through.
    pub mod obstacle;
    /// Simulation parameters.
    pub mod params;
    /// 2D vector math.
    pub mod vector;
}
