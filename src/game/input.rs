use bevy::prelude::*;

use crate::config::tuning::Tuning;

/// Phase change of the "Move" action.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum MoveAction {
    /// The action produced a new non-zero value.
    Performed { value: Vec2 },
    /// The action returned to rest.
    Canceled,
}

/// Keyboard bindings for the "Move" 2D vector composite.
#[derive(Resource, Debug, Clone)]
pub struct MoveBindings {
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
}

impl Default for MoveBindings {
    fn default() -> Self {
        Self {
            up: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            down: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
        }
    }
}

impl MoveBindings {
    pub fn read(&self, keyboard: &ButtonInput<KeyCode>, normalize: bool) -> Vec2 {
        composite_from_keys(
            keyboard.any_pressed(self.up.iter().copied()),
            keyboard.any_pressed(self.down.iter().copied()),
            keyboard.any_pressed(self.left.iter().copied()),
            keyboard.any_pressed(self.right.iter().copied()),
            normalize,
        )
    }
}

/// Combine four directional buttons into a 2D vector. Opposing buttons cancel.
pub fn composite_from_keys(up: bool, down: bool, left: bool, right: bool, normalize: bool) -> Vec2 {
    let axis = |neg: bool, pos: bool| pos as i8 as f32 - neg as i8 as f32;
    let v = Vec2::new(axis(left, right), axis(down, up));
    if normalize { v.normalize_or_zero() } else { v }
}

/// Radial deadzone: values inside the radius read as zero, others pass through.
pub fn apply_deadzone(v: Vec2, deadzone: f32) -> Vec2 {
    if v.length() <= deadzone.max(0.0) { Vec2::ZERO } else { v }
}

/// Whether the "Move" action map is listening.
#[derive(Resource, Debug, Default)]
pub struct ActionMap {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionPhase {
    #[default]
    Waiting,
    Performed,
}

/// Tracks the "Move" action between samples and turns raw values into
/// performed/canceled transitions.
#[derive(Resource, Debug, Default)]
pub struct MoveActionState {
    phase: ActionPhase,
    last: Vec2,
}

impl MoveActionState {
    pub fn phase(&self) -> ActionPhase {
        self.phase
    }

    pub fn sample(&mut self, value: Vec2) -> Option<MoveAction> {
        if value != Vec2::ZERO {
            if self.phase == ActionPhase::Performed && value == self.last {
                return None;
            }
            self.phase = ActionPhase::Performed;
            self.last = value;
            Some(MoveAction::Performed { value })
        } else if self.phase == ActionPhase::Performed {
            self.reset();
            Some(MoveAction::Canceled)
        } else {
            None
        }
    }

    /// Drop back to waiting without emitting anything.
    pub fn reset(&mut self) {
        self.phase = ActionPhase::Waiting;
        self.last = Vec2::ZERO;
    }
}

/// Sample keyboard and gamepad once per frame and emit "Move" transitions.
/// Keyboard wins over the stick when both are active.
pub fn sample_move_action(
    tuning: Res<Tuning>,
    map: Res<ActionMap>,
    bindings: Res<MoveBindings>,
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    gamepads: Query<&Gamepad>,
    mut state: ResMut<MoveActionState>,
    mut actions: MessageWriter<MoveAction>,
) {
    if !map.enabled {
        if state.phase() != ActionPhase::Waiting {
            state.reset();
        }
        return;
    }

    let keys = keyboard
        .map(|k| bindings.read(&k, tuning.normalize_keyboard))
        .unwrap_or(Vec2::ZERO);
    let value = if keys != Vec2::ZERO {
        keys
    } else {
        gamepads
            .iter()
            .next()
            .map(|pad| apply_deadzone(pad.left_stick(), tuning.stick_deadzone))
            .unwrap_or(Vec2::ZERO)
    };

    if let Some(action) = state.sample(value) {
        actions.write(action);
    }
}
