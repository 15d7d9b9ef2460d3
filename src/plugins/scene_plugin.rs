use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::controller::{ControllerDisabled, PlayerMovement};
use crate::game::physics::RigidBody;

/// Marker for the player-controlled body.
#[derive(Component)]
pub struct Player;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene);
        app.add_systems(Update, toggle_player_controller);
    }
}

fn setup_scene(
    mut commands: Commands,
    tuning: Res<Tuning>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 12.0, 14.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let ground = tuning.ground_size.max(1.0);
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ground, ground))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
    ));

    let size = tuning.player_size.max(0.1);
    let spawn = Vec3::new(0.0, size * 0.5, 0.0);
    commands.spawn((
        Player,
        Mesh3d(meshes.add(Cuboid::new(size, size, size))),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.6, 1.0))),
        Transform::from_translation(spawn),
        RigidBody::at(spawn),
        PlayerMovement::from_tuning(&tuning),
    ));

    info!("Scene ready: player speed {:.2} u/s, tick {:.4}s", tuning.move_speed, tuning.dt);
}

/// Tab enables/disables the player's movement controller.
fn toggle_player_controller(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<(Entity, Has<ControllerDisabled>), With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::Tab) {
        return;
    }
    for (entity, disabled) in &query {
        if disabled {
            commands.entity(entity).remove::<ControllerDisabled>();
            info!("Player controller enabled");
        } else {
            commands.entity(entity).insert(ControllerDisabled);
            info!("Player controller disabled");
        }
    }
}
