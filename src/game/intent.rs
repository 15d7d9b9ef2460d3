use bevy::prelude::*;

/// Movement intent: written in Update from input actions, consumed in FixedUpdate.
///
/// `x` maps to world X, `y` maps to world Z. The value is stored as received,
/// so analog input outside the unit circle is passed through unchanged.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent(pub Vec2);

impl MoveIntent {
    /// Last received value wins.
    pub fn set(&mut self, value: Vec2) {
        self.0 = value;
    }

    pub fn clear(&mut self) {
        self.0 = Vec2::ZERO;
    }

    pub fn is_idle(&self) -> bool {
        self.0 == Vec2::ZERO
    }

    /// World-space displacement for one tick of `dt` seconds. Y is always zero.
    pub fn displacement(&self, speed: f32, dt: f32) -> Vec3 {
        Vec3::new(self.0.x, 0.0, self.0.y) * speed * dt
    }
}
