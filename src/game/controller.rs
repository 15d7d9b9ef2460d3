use bevy::prelude::*;

use super::input::{ActionMap, MoveAction};
use super::intent::MoveIntent;
use super::physics::RigidBody;
use crate::config::tuning::Tuning;

/// Moves the attached rigid body by the current intent once per fixed tick.
#[derive(Component, Debug, Clone)]
#[require(MoveIntent, RigidBody)]
pub struct PlayerMovement {
    pub move_speed: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self { move_speed: 5.0 }
    }
}

impl PlayerMovement {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            move_speed: tuning.move_speed,
        }
    }
}

/// Marker: controller is disabled. It stops listening and stops moving,
/// and keeps its intent for when it is enabled again.
#[derive(Component, Debug, Default)]
pub struct ControllerDisabled;

/// Route "Move" transitions into every enabled controller's intent.
pub fn on_move_action(
    mut actions: MessageReader<MoveAction>,
    mut query: Query<&mut MoveIntent, (With<PlayerMovement>, Without<ControllerDisabled>)>,
) {
    for action in actions.read() {
        for mut intent in &mut query {
            match *action {
                MoveAction::Performed { value } => intent.set(value),
                MoveAction::Canceled => intent.clear(),
            }
        }
    }
}

/// Keep the action map enabled exactly while some controller is enabled.
pub fn sync_action_map(
    mut map: ResMut<ActionMap>,
    query: Query<(), (With<PlayerMovement>, Without<ControllerDisabled>)>,
) {
    let wanted = !query.is_empty();
    if map.enabled != wanted {
        map.enabled = wanted;
        info!("[Input] Move action map {}", if wanted { "enabled" } else { "disabled" });
    }
}

/// ControllerSet: turn intent into a move request on the body.
pub fn apply_movement(
    tuning: Res<Tuning>,
    mut query: Query<
        (Entity, &PlayerMovement, &MoveIntent, &mut RigidBody),
        Without<ControllerDisabled>,
    >,
) {
    let dt = tuning.dt;
    for (entity, movement, intent, mut body) in &mut query {
        if intent.is_idle() {
            continue;
        }
        let displacement = intent.displacement(movement.move_speed, dt);
        let target = body.position() + displacement;
        if !target.is_finite() {
            warn!("[Move] {entity} target overflowed (speed {}), move skipped", movement.move_speed);
            continue;
        }
        body.move_position(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::physics;

    fn tick_app() -> App {
        let tuning = Tuning::default();
        let mut app = App::new();
        app.add_message::<MoveAction>()
            .insert_resource(tuning)
            .init_resource::<ActionMap>()
            .add_systems(Update, (sync_action_map, on_move_action))
            .add_systems(
                FixedUpdate,
                (apply_movement, physics::step_bodies).chain(),
            );
        app
    }

    fn fixed_tick(app: &mut App) {
        app.world_mut().run_schedule(FixedUpdate);
    }

    fn position(app: &App, entity: Entity) -> Vec3 {
        app.world().get::<RigidBody>(entity).unwrap().position()
    }

    #[test]
    fn requires_intent_and_body() {
        let mut world = World::new();
        let entity = world.spawn(PlayerMovement::default()).id();
        assert!(world.get::<MoveIntent>(entity).is_some());
        assert!(world.get::<RigidBody>(entity).is_some());
        assert!(world.get::<Transform>(entity).is_some());
    }

    #[test]
    fn moves_one_displacement_per_tick() {
        let mut app = tick_app();
        let entity = app
            .world_mut()
            .spawn((
                PlayerMovement { move_speed: 5.0 },
                MoveIntent(Vec2::new(1.0, 2.0)),
                RigidBody::at(Vec3::new(0.0, 1.0, 0.0)),
            ))
            .id();

        fixed_tick(&mut app);
        let p = position(&app, entity);
        assert!((p.x - 0.1).abs() < 1e-6);
        assert_eq!(p.y, 1.0);
        assert!((p.z - 0.2).abs() < 1e-6);

        fixed_tick(&mut app);
        let p = position(&app, entity);
        assert!((p.x - 0.2).abs() < 1e-6);
        assert!((p.z - 0.4).abs() < 1e-6);
    }

    #[test]
    fn overflowing_target_leaves_body_in_place() {
        let mut app = tick_app();
        let entity = app
            .world_mut()
            .spawn((
                PlayerMovement { move_speed: f32::MAX },
                MoveIntent(Vec2::new(f32::MAX, 0.0)),
                RigidBody::at(Vec3::new(2.0, 0.0, 2.0)),
            ))
            .id();

        fixed_tick(&mut app);
        assert_eq!(position(&app, entity), Vec3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn performed_then_canceled_drives_intent() {
        let mut app = tick_app();
        let entity = app.world_mut().spawn(PlayerMovement::default()).id();

        app.world_mut()
            .write_message(MoveAction::Performed { value: Vec2::new(-0.5, 0.25) });
        app.update();
        assert_eq!(
            app.world().get::<MoveIntent>(entity).unwrap().0,
            Vec2::new(-0.5, 0.25)
        );
        assert!(app.world().resource::<ActionMap>().enabled);

        app.world_mut().write_message(MoveAction::Canceled);
        app.update();
        assert!(app.world().get::<MoveIntent>(entity).unwrap().is_idle());

        fixed_tick(&mut app);
        assert_eq!(position(&app, entity), Vec3::ZERO);
    }

    #[test]
    fn last_performed_value_wins() {
        let mut app = tick_app();
        let entity = app.world_mut().spawn(PlayerMovement::default()).id();

        app.world_mut()
            .write_message(MoveAction::Performed { value: Vec2::X });
        app.world_mut()
            .write_message(MoveAction::Performed { value: Vec2::NEG_Y });
        app.update();
        assert_eq!(app.world().get::<MoveIntent>(entity).unwrap().0, Vec2::NEG_Y);
    }

    #[test]
    fn disabled_controller_ignores_input_and_stays_put() {
        let mut app = tick_app();
        let entity = app
            .world_mut()
            .spawn((
                PlayerMovement::default(),
                MoveIntent(Vec2::X),
                ControllerDisabled,
            ))
            .id();

        app.world_mut().write_message(MoveAction::Canceled);
        app.update();
        assert_eq!(app.world().get::<MoveIntent>(entity).unwrap().0, Vec2::X);
        assert!(!app.world().resource::<ActionMap>().enabled);

        fixed_tick(&mut app);
        assert_eq!(position(&app, entity), Vec3::ZERO);

        app.world_mut().entity_mut(entity).remove::<ControllerDisabled>();
        app.update();
        assert!(app.world().resource::<ActionMap>().enabled);
        fixed_tick(&mut app);
        assert!(position(&app, entity).x > 0.0);
    }
}
