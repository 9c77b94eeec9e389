//! 2D transform component: position, rotation, non-uniform scale.
//!
//! Rotation is a single angle in radians using a clockwise-right screen
//! convention: angle 0 has `forward = (1, 0)`, and `right` is the clockwise
//! perpendicular `(sin, -cos)`. The angle is stored unnormalized; callers
//! that care about a canonical range wrap it themselves.

use crate::math::Vec2;

/// Position, rotation and scale in 2D space.
///
/// A pure value type, copied freely. Mutators return `&mut Self` so calls
/// can be chained; `transform_point`/`inverse_transform_point` are exact
/// inverses of each other for any nonzero scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    /// Rotation angle in radians, unnormalized.
    pub rotation: f32,
    /// Per-axis scale; (1, 1) is no scaling, negative values mirror.
    pub scale: Vec2,
}

impl Transform2D {
    #[inline]
    pub const fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    #[inline]
    pub fn from_position(x: f32, y: f32) -> Self {
        Self::new(Vec2::new(x, y), 0.0, Vec2::ONE)
    }

    #[inline]
    pub fn from_rotation(radians: f32) -> Self {
        Self::new(Vec2::ZERO, radians, Vec2::ONE)
    }

    #[inline]
    pub fn from_rotation_degrees(degrees: f32) -> Self {
        Self::from_rotation(degrees.to_radians())
    }

    #[inline]
    pub fn from_scale(sx: f32, sy: f32) -> Self {
        Self::new(Vec2::ZERO, 0.0, Vec2::new(sx, sy))
    }

    #[inline]
    pub fn from_scale_uniform(s: f32) -> Self {
        Self::from_scale(s, s)
    }

    #[inline]
    pub fn from_position_rotation(x: f32, y: f32, radians: f32) -> Self {
        Self::new(Vec2::new(x, y), radians, Vec2::ONE)
    }

    /// Creates a transform at `pos` whose forward direction points at `target`.
    #[inline]
    pub fn look_at(pos: Vec2, target: Vec2) -> Self {
        let direction = target - pos;
        Self::new(pos, direction.y.atan2(direction.x), Vec2::ONE)
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Adds a world-space offset to the position.
    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.position += Vec2::new(dx, dy);
        self
    }

    /// Adds a local-space offset: the offset is rotated by the current
    /// rotation before being applied, so `dx` moves along [`forward`](Self::forward)
    /// and `dy` along [`left`](Self::left).
    #[inline]
    pub fn translate_local(&mut self, dx: f32, dy: f32) -> &mut Self {
        let (sin, cos) = self.rotation.sin_cos();
        self.position += Vec2::new(dx * cos - dy * sin, dx * sin + dy * cos);
        self
    }

    #[inline]
    pub fn set_position(&mut self, x: f32, y: f32) -> &mut Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Adds raw radians to the rotation.
    #[inline]
    pub fn rotate(&mut self, radians: f32) -> &mut Self {
        self.rotation += radians;
        self
    }

    #[inline]
    pub fn rotate_degrees(&mut self, degrees: f32) -> &mut Self {
        self.rotate(degrees.to_radians())
    }

    #[inline]
    pub fn set_rotation(&mut self, radians: f32) -> &mut Self {
        self.rotation = radians;
        self
    }

    #[inline]
    pub fn set_rotation_degrees(&mut self, degrees: f32) -> &mut Self {
        self.set_rotation(degrees.to_radians())
    }

    /// Recomputes rotation so forward points at `target`; position is untouched.
    #[inline]
    pub fn look_at_target(&mut self, target: Vec2) -> &mut Self {
        let direction = target - self.position;
        self.rotation = direction.y.atan2(direction.x);
        self
    }

    #[inline]
    pub fn set_scale(&mut self, sx: f32, sy: f32) -> &mut Self {
        self.scale = Vec2::new(sx, sy);
        self
    }

    #[inline]
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.set_scale(s, s)
    }

    /// Multiplies the current scale component-wise.
    #[inline]
    pub fn scale_by(&mut self, fx: f32, fy: f32) -> &mut Self {
        self.scale = Vec2::new(self.scale.x * fx, self.scale.y * fy);
        self
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation.to_degrees()
    }

    /// Unit vector the transform is facing: `(cos θ, sin θ)`.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        let (sin, cos) = self.rotation.sin_cos();
        Vec2::new(cos, sin)
    }

    /// Clockwise perpendicular of forward: `(sin θ, -cos θ)`.
    #[inline]
    pub fn right(&self) -> Vec2 {
        let (sin, cos) = self.rotation.sin_cos();
        Vec2::new(sin, -cos)
    }

    #[inline]
    pub fn backward(&self) -> Vec2 {
        -self.forward()
    }

    #[inline]
    pub fn left(&self) -> Vec2 {
        -self.right()
    }

    /// Maps a local-space point to world space: scale, then rotate, then
    /// translate.
    #[inline]
    pub fn transform_point(&self, local: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation.sin_cos();
        let scaled = Vec2::new(local.x * self.scale.x, local.y * self.scale.y);
        Vec2::new(
            scaled.x * cos - scaled.y * sin,
            scaled.x * sin + scaled.y * cos,
        ) + self.position
    }

    /// Exact algebraic inverse of [`transform_point`](Self::transform_point):
    /// untranslate, unrotate, unscale. Requires nonzero scale on both axes.
    #[inline]
    pub fn inverse_transform_point(&self, world: Vec2) -> Vec2 {
        let translated = world - self.position;
        let (sin, cos) = self.rotation.sin_cos();
        let rotated = Vec2::new(
            translated.x * cos + translated.y * sin,
            -translated.x * sin + translated.y * cos,
        );
        Vec2::new(rotated.x / self.scale.x, rotated.y / self.scale.y)
    }

    /// Rotates a local-space direction into world space; translation and
    /// scale do not apply to directions.
    #[inline]
    pub fn transform_direction(&self, direction: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation.sin_cos();
        Vec2::new(
            direction.x * cos - direction.y * sin,
            direction.x * sin + direction.y * cos,
        )
    }

    /// Rotates a world-space direction back into local space.
    #[inline]
    pub fn inverse_transform_direction(&self, direction: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation.sin_cos();
        Vec2::new(
            direction.x * cos + direction.y * sin,
            -direction.x * sin + direction.y * cos,
        )
    }

    /// Component-wise linear interpolation of position, rotation and scale.
    ///
    /// Rotation interpolates the raw angle values; there is no shortest-path
    /// wrapping.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation + (other.rotation - self.rotation) * t,
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

impl Default for Transform2D {
    /// Identity: origin, no rotation, unit scale.
    #[inline]
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0, Vec2::ONE)
    }
}
