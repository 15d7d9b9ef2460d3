use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::config::tuning::Tuning;
use crate::game::{
    controller,
    input::{self, ActionMap, MoveAction, MoveActionState, MoveBindings},
    physics,
};

// ── SystemSets (strict FixedUpdate ordering) ────────────────────────

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FixedMoveSet {
    ControllerSet,
    PhysicsSet,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<MoveAction>();
        app.init_resource::<ActionMap>();
        app.init_resource::<MoveActionState>();
        app.init_resource::<MoveBindings>();

        app.configure_sets(
            FixedUpdate,
            (FixedMoveSet::ControllerSet, FixedMoveSet::PhysicsSet).chain(),
        );

        app.add_systems(
            FixedUpdate,
            controller::apply_movement.in_set(FixedMoveSet::ControllerSet),
        );
        app.add_systems(
            FixedUpdate,
            physics::step_bodies.in_set(FixedMoveSet::PhysicsSet),
        );

        // ── Input (Update): lifecycle → sample → route ──────────────────
        app.add_systems(
            Update,
            (
                controller::sync_action_map,
                input::sample_move_action,
                controller::on_move_action,
            )
                .chain(),
        );

        app.add_systems(PreUpdate, physics::init_bodies);
        app.add_systems(
            PostUpdate,
            physics::sync_transforms.before(TransformSystems::Propagate),
        );

        // ── Always-on ───────────────────────────────────────────────────
        app.add_systems(
            Update,
            (tuning_reload_input, apply_tuning.run_if(resource_changed::<Tuning>)).chain(),
        );
    }
}

fn tuning_reload_input(keyboard: Res<ButtonInput<KeyCode>>, mut tuning: ResMut<Tuning>) {
    if keyboard.just_pressed(KeyCode::F5) {
        tuning.reload();
    }
}

/// Push tuning values into the fixed clock and every controller.
fn apply_tuning(
    tuning: Res<Tuning>,
    mut fixed: ResMut<Time<Fixed>>,
    mut query: Query<&mut controller::PlayerMovement>,
) {
    fixed.set_timestep_seconds(tuning.dt as f64);
    for mut movement in &mut query {
        movement.move_speed = tuning.move_speed;
    }
}
