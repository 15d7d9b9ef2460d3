use bevy::prelude::*;

/// Kinematic rigid body. Position is owned by the physics step; gameplay code
/// only requests moves through [`RigidBody::move_position`].
#[derive(Component, Debug, Clone, Default)]
#[require(Transform)]
pub struct RigidBody {
    position: Vec3,
    pending: Option<Vec3>,
}

impl RigidBody {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            pending: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Request a move to `target` on the next physics step. Last request wins.
    pub fn move_position(&mut self, target: Vec3) {
        debug_assert!(target.is_finite(), "move target must be finite");
        self.pending = Some(target);
    }

    /// Apply the pending move. Returns true if the body changed position.
    pub fn step(&mut self) -> bool {
        match self.pending.take() {
            Some(target) if target != self.position => {
                self.position = target;
                true
            }
            _ => false,
        }
    }
}

/// Seed newly added bodies from their spawn transform. The transform is
/// authoritative at spawn; a move requested before seeding is kept.
pub fn init_bodies(mut query: Query<(&mut RigidBody, &Transform), Added<RigidBody>>) {
    for (mut body, transform) in &mut query {
        body.position = transform.translation;
    }
}

/// PhysicsSet: resolve all pending moves for this tick.
pub fn step_bodies(mut query: Query<(Entity, &mut RigidBody)>, mut tick: Local<u32>) {
    *tick = tick.wrapping_add(1);
    let log_this_tick = *tick % 50 == 0;

    for (entity, mut body) in &mut query {
        if body.step() && log_this_tick {
            let p = body.position;
            debug!("[Body] {entity} at ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
        }
    }
}

/// Copy physics positions into render transforms.
pub fn sync_transforms(mut query: Query<(&RigidBody, &mut Transform), Changed<RigidBody>>) {
    for (body, mut transform) in &mut query {
        transform.translation = body.position;
    }
}
