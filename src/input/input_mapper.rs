//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to game actions like Pause, Interact, Choose, etc.
//! Movement keys (WASD, arrows) are NOT mapped here - they go directly to MovementController.

use moneymaze_core::Choice;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not movement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Engage pointer and movement (click when released)
    Engage,
    /// Pause the session (Escape while running)
    Pause,
    /// Resume the session (Escape while paused)
    Resume,
    /// Open the decision at an armed checkpoint (E or Space)
    Interact,
    /// Answer the current decision (1/Y good, 2/N bad)
    Choose(Choice),
    /// Start the level again (R key)
    Restart,
}

/// Maps raw input events to semantic actions
///
/// Movement keys (WASD, arrows) are NOT mapped here - they go directly
/// to the MovementController. This mapper handles "special" keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` for movement keys
    pub fn map_keyboard(key: KeyCode, state: ElementState, paused: bool) -> Option<GameAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => {
                if paused {
                    Some(GameAction::Resume)
                } else {
                    Some(GameAction::Pause)
                }
            }
            KeyCode::KeyE | KeyCode::Space => Some(GameAction::Interact),
            KeyCode::Digit1 | KeyCode::KeyY => Some(GameAction::Choose(Choice::Good)),
            KeyCode::Digit2 | KeyCode::KeyN => Some(GameAction::Choose(Choice::Bad)),
            KeyCode::KeyR => Some(GameAction::Restart),
            _ => None, // Movement keys handled by controller
        }
    }

    /// Map mouse button to an action
    ///
    /// Returns `Some(Engage)` for left click when not engaged
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        engaged: bool,
    ) -> Option<GameAction> {
        if button == MouseButton::Left && state == ElementState::Pressed && !engaged {
            Some(GameAction::Engage)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_pauses_when_running() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, false);
        assert_eq!(action, Some(GameAction::Pause));
    }

    #[test]
    fn test_escape_resumes_when_paused() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, true);
        assert_eq!(action, Some(GameAction::Resume));
    }

    #[test]
    fn test_movement_keys_not_mapped() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD, KeyCode::ArrowUp] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed, false);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::KeyE, ElementState::Released, false);
        assert_eq!(action, None);
    }

    #[test]
    fn test_interact_keys() {
        for key in [KeyCode::KeyE, KeyCode::Space] {
            assert_eq!(
                InputMapper::map_keyboard(key, ElementState::Pressed, false),
                Some(GameAction::Interact)
            );
        }
    }

    #[test]
    fn test_choice_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Digit1, ElementState::Pressed, false),
            Some(GameAction::Choose(Choice::Good))
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyN, ElementState::Pressed, false),
            Some(GameAction::Choose(Choice::Bad))
        );
    }

    #[test]
    fn test_click_to_engage() {
        let action = InputMapper::map_mouse_button(MouseButton::Left, ElementState::Pressed, false);
        assert_eq!(action, Some(GameAction::Engage));
    }

    #[test]
    fn test_click_when_engaged_no_action() {
        let action = InputMapper::map_mouse_button(MouseButton::Left, ElementState::Pressed, true);
        assert_eq!(action, None);
    }
}
