//! Agents ("birds") steered by their own controller.
//!
//! Motion uses position Verlet integration: velocity is never stored between ticks but
//! derived from the current and previous positions. A jump therefore works by moving
//! the previous position below the current one.

use rand::Rng;

use super::brain::{Controller, INPUTS};
use super::obstacle::{BoundingBox, Obstacle};
use super::params::Params;
use super::vector::Vector2;

/// What an agent perceives before deciding whether to jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensors {
    /// Vertical position.
    pub y: f32,
    /// Vertical velocity (negative is upwards).
    pub y_velocity: f32,
    /// Horizontal distance to the obstacle ahead.
    pub distance: f32,
    /// Upper bound of that obstacle's gap.
    pub gap_top: f32,
    /// Lower bound of that obstacle's gap.
    pub gap_bottom: f32,
}

impl Sensors {
    /// Controller input order.
    pub fn to_inputs(&self) -> [f32; INPUTS] {
        [
            self.y,
            self.y_velocity,
            self.distance,
            self.gap_top,
            self.gap_bottom,
        ]
    }
}

/// A population member.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Centre of the bounding box.
    pub pos: Vector2,
    /// Velocity computed during the last tick.
    pub vel: Vector2,
    /// Position before the last tick.
    pub prev_pos: Vector2,
    /// Bounding box width.
    pub width: f32,
    /// Bounding box height.
    pub height: f32,
    /// Cleared on the first obstacle hit.
    pub alive: bool,
    /// Ticks survived.
    pub score: u32,
    /// Share of the generation's total score, set during replacement.
    pub fitness: f32,
    /// Policy deciding when to jump.
    pub controller: Controller,
}

impl Agent {
    /// Creates a resting agent at `pos`.
    pub fn new(pos: Vector2, controller: Controller, params: &Params) -> Self {
        Self {
            pos,
            vel: Vector2::ZERO,
            prev_pos: pos,
            width: params.agent_width,
            height: params.agent_height,
            alive: true,
            score: 0,
            fitness: 0.0,
            controller,
        }
    }

    /// Creates an agent at the spawn point with a fresh random controller.
    pub fn new_random<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Self {
        Self::new(params.spawn_point(), Controller::new_random(rng), params)
    }

    /// Whether the agent is still flying.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Collision box centred on the agent.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            center: self.pos,
            width: self.width,
            height: self.height,
        }
    }

    /// Sprite rotation in radians for the current vertical velocity.
    pub fn tilt(&self) -> f32 {
        (self.vel.y / 10.0).clamp(-1.0, 1.0) * 0.5
    }

    /// Advances the agent by one tick.
    ///
    /// Decides, moves, resolves collisions and, if it survived, scores a point.
    pub fn update(&mut self, obstacles: &[Obstacle], params: &Params) {
        if !self.alive {
            return;
        }

        self.think(obstacles, params);
        self.integrate(params);
        self.check_collisions(obstacles, params);

        if self.alive {
            self.score = self.score.saturating_add(1);
        }
    }

    /// The closest obstacle still ahead of the agent.
    ///
    /// Falls back to the leading obstacle when none is ahead.
    pub fn nearest_obstacle<'a>(&self, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
        obstacles
            .iter()
            .filter(|o| o.pos.x > self.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .or_else(|| obstacles.first())
    }

    /// Reads the sensors against the obstacle window.
    pub fn sense(&self, obstacles: &[Obstacle]) -> Option<Sensors> {
        let obstacle = self.nearest_obstacle(obstacles)?;
        Some(Sensors {
            y: self.pos.y,
            y_velocity: self.vel.y,
            distance: obstacle.pos.x - self.pos.x,
            gap_top: obstacle.gap_top(),
            gap_bottom: obstacle.gap_bottom(),
        })
    }

    /// Asks the controller whether to jump.
    ///
    /// Returns `false` when there is nothing to react to.
    pub fn wants_to_jump(&self, obstacles: &[Obstacle]) -> bool {
        let Some(sensors) = self.sense(obstacles) else {
            return false;
        };
        let [jump, stay] = self.controller.predict(&sensors.to_inputs());
        jump > stay
    }

    /// Consults the controller and jumps if it says so.
    pub fn think(&mut self, obstacles: &[Obstacle], params: &Params) -> bool {
        let jumped = self.wants_to_jump(obstacles);
        if jumped {
            self.jump(params);
        }
        jumped
    }

    /// Sets up an upward velocity of `jump_impulse` for the next integration step.
    pub fn jump(&mut self, params: &Params) {
        self.prev_pos = self.pos;
        self.prev_pos += Vector2::new(0.0, params.jump_impulse);
    }

    /// Verlet step with constant gravity.
    pub fn integrate(&mut self, params: &Params) {
        self.vel = self.pos - self.prev_pos;
        self.prev_pos = self.pos;
        self.pos += self.vel;
        self.pos += Vector2::new(0.0, params.gravity);
    }

    /// Keeps the agent inside the course and kills it on the first obstacle hit.
    pub fn check_collisions(&mut self, obstacles: &[Obstacle], params: &Params) {
        let half_height = self.height / 2.0;
        if self.pos.y + half_height > params.world_height {
            self.pos.y = params.world_height - half_height;
        } else if self.pos.y - half_height < 0.0 {
            self.pos.y = half_height;
        }

        let bounds = self.bounding_box();
        if obstacles.iter().any(|o| o.check_collision(&bounds)) {
            self.alive = false;
        }
    }
}
