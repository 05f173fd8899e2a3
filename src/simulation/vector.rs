//! Two-dimensional vector math for positions and velocities.
//!
//! Mutating operations work in place and return `&mut Self` so calls can be chained,
//! e.g. `v.add_vector(w).scale_scalar(2.0)`. Operations that need to produce a second
//! vector ([`Vector2::orthogonal`], [`Vector2::copy`]) return a new value.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Unit in which an angle is given or returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    /// Degrees (the default).
    #[default]
    Degrees,
    /// Radians.
    Radians,
}

/// Direction of a rotation in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    /// Clockwise (the default).
    #[default]
    Clockwise,
    /// Counter-clockwise.
    CounterClockwise,
}

/// A 2D point or direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component (grows downwards in screen space).
    pub y: f32,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new vector.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Overwrites both components.
    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Copies both components from `other`.
    pub fn set_vector(&mut self, other: Vector2) -> &mut Self {
        self.set(other.x, other.y)
    }

    /// Adds `s` to both components.
    pub fn add_scalar(&mut self, s: f32) -> &mut Self {
        self.x += s;
        self.y += s;
        self
    }

    /// Component-wise addition.
    pub fn add_vector(&mut self, other: Vector2) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    /// Subtracts `s` from both components.
    pub fn sub_scalar(&mut self, s: f32) -> &mut Self {
        self.x -= s;
        self.y -= s;
        self
    }

    /// Component-wise subtraction.
    pub fn sub_vector(&mut self, other: Vector2) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    /// Multiplies both components by `f`.
    pub fn scale_scalar(&mut self, f: f32) -> &mut Self {
        self.x *= f;
        self.y *= f;
        self
    }

    /// Component-wise multiplication.
    pub fn scale_vector(&mut self, other: Vector2) -> &mut Self {
        self.x *= other.x;
        self.y *= other.y;
        self
    }

    /// Divides both components by `d`.
    ///
    /// A zero or non-finite divisor is reported and the vector is left unchanged.
    pub fn div_scalar(&mut self, d: f32) -> &mut Self {
        if !d.is_finite() {
            tracing::warn!(divisor = d, "vector division by a non-finite number ignored");
            return self;
        }
        if d == 0.0 {
            tracing::warn!("vector division by zero ignored");
            return self;
        }
        self.x /= d;
        self.y /= d;
        self
    }

    /// Component-wise division.
    ///
    /// If either component of `other` is zero or non-finite the division is reported and
    /// the vector is left unchanged.
    pub fn div_vector(&mut self, other: Vector2) -> &mut Self {
        if !other.x.is_finite() || !other.y.is_finite() {
            tracing::warn!(?other, "vector division by a non-finite vector ignored");
            return self;
        }
        if other.x == 0.0 || other.y == 0.0 {
            tracing::warn!(?other, "vector division by zero ignored");
            return self;
        }
        self.x /= other.x;
        self.y /= other.y;
        self
    }

    /// Squared length.
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Length.
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Caps the length at 1.
    ///
    /// Vectors that are already no longer than 1 are left as they are, so this is not a
    /// unit normalisation for short vectors.
    pub fn normalize(&mut self) -> &mut Self {
        let length = self.magnitude();
        if length > 1.0 {
            self.scale_scalar(1.0 / length);
        }
        self
    }

    /// `normalize` followed by scaling with `m`.
    ///
    /// Inherits the capping behaviour of [`Vector2::normalize`]: a vector shorter than 1
    /// ends up with length `m * |v|`.
    pub fn set_magnitude(&mut self, m: f32) -> &mut Self {
        self.normalize().scale_scalar(m)
    }

    /// Dot product.
    pub fn dot(&self, other: Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Vector2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Flips the direction.
    pub fn negate(&mut self) -> &mut Self {
        self.x = -self.x;
        self.y = -self.y;
        self
    }

    /// Angle between the vector and the positive x axis.
    pub fn angle(&self, unit: AngleUnit) -> f32 {
        let radians = self.y.atan2(self.x);
        match unit {
            AngleUnit::Radians => radians,
            AngleUnit::Degrees => radians.to_degrees(),
        }
    }

    /// Points the vector at `angle`, keeping its length.
    ///
    /// Components are rounded to four decimals.
    pub fn set_angle(&mut self, angle: f32, unit: AngleUnit, winding: Winding) -> &mut Self {
        let a = signed_radians(angle, unit, winding);
        let mag = self.magnitude();
        self.x = round4(a.cos() * mag);
        self.y = round4(a.sin() * mag);
        self
    }

    /// Rotates the vector by `angle`.
    ///
    /// Components are rounded to four decimals.
    pub fn rotate(&mut self, angle: f32, unit: AngleUnit, winding: Winding) -> &mut Self {
        let a = signed_radians(angle, unit, winding);
        let (sin, cos) = a.sin_cos();
        let x = self.x * cos - self.y * sin;
        let y = self.x * sin + self.y * cos;
        self.x = round4(x);
        self.y = round4(y);
        self
    }

    /// Angle from this vector to `other`.
    pub fn angle_between(&self, other: Vector2, unit: AngleUnit) -> f32 {
        let radians = other.y.atan2(other.x) - self.y.atan2(self.x);
        match unit {
            AngleUnit::Radians => radians,
            AngleUnit::Degrees => radians.to_degrees(),
        }
    }

    /// Reflects the vector about `normal`.
    ///
    /// `normal` is normalised in place as a side effect.
    pub fn reflect(&mut self, normal: &mut Vector2) -> &mut Self {
        normal.normalize();
        let mut offset = *normal;
        offset.scale_scalar(2.0 * self.dot(*normal));
        self.sub_vector(offset)
    }

    /// Returns a vector perpendicular to this one.
    pub fn orthogonal(&self, winding: Winding) -> Vector2 {
        match winding {
            Winding::Clockwise => Vector2::new(self.y, -self.x),
            Winding::CounterClockwise => Vector2::new(-self.y, self.x),
        }
    }

    /// Exact component equality.
    #[allow(clippy::float_cmp)]
    pub fn equals(&self, other: Vector2) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Returns an independent copy.
    pub fn copy(&self) -> Vector2 {
        *self
    }
}

fn signed_radians(angle: f32, unit: AngleUnit, winding: Winding) -> f32 {
    let radians = match unit {
        AngleUnit::Degrees => angle.to_radians(),
        AngleUnit::Radians => angle,
    };
    match winding {
        Winding::Clockwise => -radians,
        Winding::CounterClockwise => radians,
    }
}

/// Rounds to four decimals; `-0.0` becomes `0.0`.
fn round4(value: f32) -> f32 {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // adding positive zero turns -0.0 into 0.0
    rounded + 0.0
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(mut self, rhs: Vector2) -> Vector2 {
        self.add_vector(rhs);
        self
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(mut self, rhs: Vector2) -> Vector2 {
        self.sub_vector(rhs);
        self
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.add_vector(rhs);
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.sub_vector(rhs);
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(mut self) -> Vector2 {
        self.negate();
        self
    }
}
