//! Pipe obstacles: a vertical wall with an opening, scrolling leftwards.

use rand::Rng;

use super::params::Params;
use super::vector::Vector2;

/// Axis-aligned box given by its centre and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Centre of the box.
    pub center: Vector2,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl BoundingBox {
    /// Left edge.
    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    /// Upper edge (smaller y).
    pub fn top(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    /// Lower edge (larger y).
    pub fn bottom(&self) -> f32 {
        self.center.y + self.height / 2.0
    }
}

/// A pipe with a gap agents have to fly through.
///
/// `pos.x` is the left edge of the body, `pos.y` the vertical centre of the gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge and gap centre.
    pub pos: Vector2,
    /// Body width.
    pub width: f32,
    /// Vertical size of the gap.
    pub gap: f32,
    /// Distance travelled leftwards per tick.
    pub speed: f32,
}

impl Obstacle {
    /// Creates an obstacle at `x` with a gap centred at `gap_center`.
    pub fn new(x: f32, gap_center: f32, params: &Params) -> Self {
        Self {
            pos: Vector2::new(x, gap_center),
            width: params.obstacle_width,
            gap: params.obstacle_gap,
            speed: params.obstacle_speed,
        }
    }

    /// Creates an obstacle at `x` with a gap centre drawn uniformly from the free band.
    pub fn new_random<R: Rng + ?Sized>(x: f32, params: &Params, rng: &mut R) -> Self {
        let (low, high) = params.gap_center_range();
        Self::new(x, rng.random_range(low..high), params)
    }

    /// Moves the obstacle one tick to the left.
    pub fn update(&mut self) {
        self.pos.x -= self.speed;
    }

    /// Upper bound of the gap.
    pub fn gap_top(&self) -> f32 {
        self.pos.y - self.gap / 2.0
    }

    /// Lower bound of the gap.
    pub fn gap_bottom(&self) -> f32 {
        self.pos.y + self.gap / 2.0
    }

    /// Right edge of the body.
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Whether the obstacle has fully left the viewport on the left.
    pub fn is_off_screen(&self) -> bool {
        self.right_edge() < 0.0
    }

    /// Whether `bounds` overlaps the solid part of the obstacle.
    pub fn check_collision(&self, bounds: &BoundingBox) -> bool {
        let overlaps_horizontally =
            bounds.right() > self.pos.x && bounds.left() < self.right_edge();
        let outside_gap = bounds.bottom() > self.gap_bottom() || bounds.top() < self.gap_top();

        overlaps_horizontally && outside_gap
    }
}
