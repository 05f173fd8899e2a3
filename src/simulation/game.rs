//! The running simulation: population, dead pool and obstacle window.
//!
//! One call to [`Game::update`] is one tick:
//! 1. every live agent decides, moves and collides; the ones that died move to the dead
//!    pool,
//! 2. obstacles scroll left and the leading one is replaced once it has left the screen,
//! 3. if nobody is left alive, the next generation is bred from the dead pool.
//!
//! Besides the tick there are exactly two other ways to change a running game:
//! [`Game::hard_restart`] and [`Game::manual_advance`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::agent::Agent;
use super::error::ConfigError;
use super::evolution;
use super::history::{GenerationHistory, GenerationSummary};
use super::obstacle::Obstacle;
use super::params::Params;

/// Simulation state.
#[derive(Debug)]
pub struct Game<R = StdRng> {
    params: Params,
    /// Live agents.
    agents: Vec<Agent>,
    /// Agents that died during the current generation.
    dead: Vec<Agent>,
    /// Upcoming obstacles ordered left to right.
    obstacles: Vec<Obstacle>,
    generation: u32,
    /// Ticks since the current generation started.
    ticks: u64,
    history: GenerationHistory,
    rng: R,
}

impl Game<StdRng> {
    /// Creates a game with an unseeded generator.
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        Self::with_rng(params, StdRng::from_os_rng())
    }
}

impl<R: Rng> Game<R> {
    /// Creates a game drawing every random number from `rng`.
    pub fn with_rng(params: Params, rng: R) -> Result<Self, ConfigError> {
        params.validate()?;

        let mut game = Self::empty(params, rng);
        game.populate();
        game.reset_obstacles();
        Ok(game)
    }

    /// Creates a game from a prepared population and obstacle window.
    ///
    /// `agents` may hold fewer agents than `population_size`; later generations are
    /// always bred to full size.
    pub fn from_parts(
        params: Params,
        rng: R,
        agents: Vec<Agent>,
        obstacles: Vec<Obstacle>,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        if agents.is_empty() || agents.len() > params.population_size {
            return Err(ConfigError::Invalid {
                field: "population_size",
                reason: format!(
                    "initial population of {} agents must lie in 1..={}",
                    agents.len(),
                    params.population_size
                ),
            });
        }

        let mut game = Self::empty(params, rng);
        game.agents = agents;
        game.obstacles = obstacles;
        Ok(game)
    }

    fn empty(params: Params, rng: R) -> Self {
        Self {
            agents: Vec::with_capacity(params.population_size),
            dead: Vec::with_capacity(params.population_size),
            obstacles: Vec::with_capacity(params.obstacle_count()),
            generation: 1,
            ticks: 0,
            history: GenerationHistory::new(params.history_len),
            params,
            rng,
        }
    }

    /// Advances the simulation by one tick.
    pub fn update(&mut self) {
        self.advance_agents();
        self.advance_obstacles();
        self.ticks += 1;

        if self.agents.is_empty() {
            self.next_generation();
        }
    }

    /// Throws away every agent and starts over from generation 1 with random controllers.
    pub fn hard_restart(&mut self) {
        tracing::debug!(generation = self.generation, "hard restart");

        self.agents.clear();
        self.dead.clear();
        self.history.clear();
        self.generation = 1;
        self.ticks = 0;

        self.populate();
        self.reset_obstacles();
    }

    /// Ends the current generation now, breeding from living and dead agents alike.
    pub fn manual_advance(&mut self) {
        tracing::debug!(
            generation = self.generation,
            alive = self.agents.len(),
            "manual generation advance"
        );

        self.dead.append(&mut self.agents);
        self.next_generation();
    }

    fn advance_agents(&mut self) {
        for agent in &mut self.agents {
            agent.update(&self.obstacles, &self.params);
        }

        let (alive, dead): (Vec<Agent>, Vec<Agent>) = std::mem::take(&mut self.agents)
            .into_iter()
            .partition(Agent::is_alive);
        self.agents = alive;
        self.dead.extend(dead);
    }

    fn advance_obstacles(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.update();
        }

        if self.obstacles.first().is_some_and(Obstacle::is_off_screen) {
            self.obstacles.remove(0);

            let x = self.obstacles.last().map_or(self.params.world_width, |last| {
                last.pos.x + self.params.obstacle_spacing
            });
            let obstacle = Obstacle::new_random(x, &self.params, &mut self.rng);
            tracing::debug!(x, gap_center = obstacle.pos.y, "obstacle recycled");
            self.obstacles.push(obstacle);
        }
    }

    /// Breeds a new population from the dead pool and drops the pool.
    fn next_generation(&mut self) {
        debug_assert!(self.agents.is_empty());

        let summary = GenerationSummary::from_pool(self.generation, self.ticks, &self.dead);
        tracing::info!(
            generation = summary.generation,
            best = summary.best_score,
            mean = summary.mean_score,
            ticks = summary.ticks,
            "generation finished"
        );
        self.history.record(summary);

        self.agents = evolution::next_generation(&mut self.dead, &self.params, &mut self.rng);
        self.dead.clear();

        self.generation += 1;
        self.ticks = 0;
        self.reset_obstacles();
    }

    fn populate(&mut self) {
        self.agents = (0..self.params.population_size)
            .map(|_| Agent::new_random(&self.params, &mut self.rng))
            .collect();
    }

    fn reset_obstacles(&mut self) {
        self.obstacles = (0..self.params.obstacle_count())
            .map(|i| {
                let x = self.params.world_width + i as f32 * self.params.obstacle_spacing;
                Obstacle::new_random(x, &self.params, &mut self.rng)
            })
            .collect();
    }

    /// Parameters the game was created with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Live agents.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Agents that died in the current generation.
    pub fn dead(&self) -> &[Agent] {
        &self.dead
    }

    /// Obstacle window, left to right.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Current generation, starting at 1.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ticks since the current generation started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Summaries of finished generations.
    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    /// Best score among agents of the current generation, living or dead.
    pub fn best_score(&self) -> u32 {
        self.agents
            .iter()
            .chain(&self.dead)
            .map(|a| a.score)
            .max()
            .unwrap_or(0)
    }
}
