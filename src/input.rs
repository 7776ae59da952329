use std::collections::HashSet;

use glam::Vec2;
use winit::keyboard::KeyCode;

/// Discrete transition of a button action.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionEdge {
    Started,
    Performed,
    Canceled,
}

/// Already-decoded input handed to the player.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputEvent {
    Move(Vec2),
    Look(Vec2),
    Jump(ActionEdge),
    Sprint(ActionEdge),
    Crouch(ActionEdge),
    Dash(ActionEdge),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Action {
    Jump,
    Sprint,
    Crouch,
    Dash,
}

fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Space => Some(Action::Jump),
        KeyCode::ShiftLeft => Some(Action::Sprint),
        KeyCode::ControlLeft | KeyCode::KeyC => Some(Action::Crouch),
        KeyCode::KeyQ => Some(Action::Dash),
        _ => None,
    }
}

fn event_for(action: Action, edge: ActionEdge) -> InputEvent {
    match action {
        Action::Jump => InputEvent::Jump(edge),
        Action::Sprint => InputEvent::Sprint(edge),
        Action::Crouch => InputEvent::Crouch(edge),
        Action::Dash => InputEvent::Dash(edge),
    }
}

/// Keyboard and mouse binding that turns raw device state into
/// [`InputEvent`]s, drained once per frame.
pub struct InputState {
    pressed_keys: HashSet<KeyCode>,
    mouse_delta: Vec2,
    pending: Vec<InputEvent>,
    last_move: Vec2,
    looking: bool,
    pub cursor_grabbed: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            mouse_delta: Vec2::ZERO,
            pending: Vec::new(),
            last_move: Vec2::ZERO,
            looking: false,
            cursor_grabbed: true,
        }
    }

    pub fn handle_key_press(&mut self, key: KeyCode) {
        let Some(action) = action_for(key) else {
            self.pressed_keys.insert(key);
            return;
        };
        // Key repeat and a second key bound to a held action are not edges.
        let was_held = self.action_held(action);
        if self.pressed_keys.insert(key) && !was_held {
            self.pending.push(event_for(action, ActionEdge::Started));
        }
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        if !self.pressed_keys.remove(&key) {
            return;
        }
        if let Some(action) = action_for(key)
            && !self.action_held(action)
        {
            self.pending.push(event_for(action, ActionEdge::Canceled));
        }
    }

    fn action_held(&self, action: Action) -> bool {
        self.pressed_keys
            .iter()
            .any(|&key| action_for(key) == Some(action))
    }

    pub fn handle_mouse_move(&mut self, dx: f32, dy: f32) {
        if !self.cursor_grabbed {
            return;
        }
        // Screen y grows downward; look y grows upward.
        self.mouse_delta += Vec2::new(dx, -dy);
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Current WASD vector, clamped to unit length.
    pub fn move_vector(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.is_pressed(KeyCode::KeyW) {
            v.y += 1.0;
        }
        if self.is_pressed(KeyCode::KeyS) {
            v.y -= 1.0;
        }
        if self.is_pressed(KeyCode::KeyD) {
            v.x += 1.0;
        }
        if self.is_pressed(KeyCode::KeyA) {
            v.x -= 1.0;
        }
        v.clamp_length_max(1.0)
    }

    /// Returns the events gathered since the last call, in arrival order,
    /// followed by the frame's move vector (if it changed) and look delta.
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        let mut events = std::mem::take(&mut self.pending);

        let move_vector = self.move_vector();
        if move_vector != self.last_move {
            self.last_move = move_vector;
            events.push(InputEvent::Move(move_vector));
        }

        let look = std::mem::take(&mut self.mouse_delta);
        if look != Vec2::ZERO {
            self.looking = true;
            events.push(InputEvent::Look(look));
        } else if self.looking {
            self.looking = false;
            events.push(InputEvent::Look(Vec2::ZERO));
        }

        events
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release_emit_edges() {
        let mut input = InputState::new();
        input.handle_key_press(KeyCode::Space);
        input.handle_key_release(KeyCode::Space);
        assert_eq!(
            input.drain_events(),
            vec![
                InputEvent::Jump(ActionEdge::Started),
                InputEvent::Jump(ActionEdge::Canceled)
            ]
        );
    }

    #[test]
    fn test_key_repeat_is_not_a_new_edge() {
        let mut input = InputState::new();
        input.handle_key_press(KeyCode::KeyQ);
        input.handle_key_press(KeyCode::KeyQ);
        assert_eq!(input.drain_events(), vec![InputEvent::Dash(ActionEdge::Started)]);
    }

    #[test]
    fn test_two_crouch_keys_make_one_hold() {
        let mut input = InputState::new();
        input.handle_key_press(KeyCode::ControlLeft);
        input.handle_key_press(KeyCode::KeyC);
        assert_eq!(input.drain_events(), vec![InputEvent::Crouch(ActionEdge::Started)]);

        input.handle_key_release(KeyCode::ControlLeft);
        assert!(input.drain_events().is_empty());

        input.handle_key_release(KeyCode::KeyC);
        assert_eq!(input.drain_events(), vec![InputEvent::Crouch(ActionEdge::Canceled)]);
    }

    #[test]
    fn test_move_vector_sent_only_on_change() {
        let mut input = InputState::new();
        input.handle_key_press(KeyCode::KeyW);
        assert_eq!(input.drain_events(), vec![InputEvent::Move(Vec2::new(0.0, 1.0))]);
        assert!(input.drain_events().is_empty());

        input.handle_key_release(KeyCode::KeyW);
        assert_eq!(input.drain_events(), vec![InputEvent::Move(Vec2::ZERO)]);
    }

    #[test]
    fn test_diagonal_is_unit_length() {
        let mut input = InputState::new();
        input.handle_key_press(KeyCode::KeyW);
        input.handle_key_press(KeyCode::KeyD);
        assert!((input.move_vector().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_delta_accumulates_then_settles_to_zero() {
        let mut input = InputState::new();
        input.handle_mouse_move(2.0, 1.0);
        input.handle_mouse_move(3.0, 1.0);
        assert_eq!(input.drain_events(), vec![InputEvent::Look(Vec2::new(5.0, -2.0))]);
        assert_eq!(input.drain_events(), vec![InputEvent::Look(Vec2::ZERO)]);
        assert!(input.drain_events().is_empty());
    }

    #[test]
    fn test_mouse_ignored_without_cursor_grab() {
        let mut input = InputState::new();
        input.cursor_grabbed = false;
        input.handle_mouse_move(10.0, 10.0);
        assert!(input.drain_events().is_empty());
    }
}
