use std::collections::HashSet;

use crate::coords::Vec2;

use super::types::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

/// Current pointer state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<Vec2>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an event. Returns `true` when a button changed state (a press
    /// of a held button or a release of a free one is not a change).
    pub fn apply_event(&mut self, ev: &InputEvent) -> bool {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck buttons when focus changes mid-press.
                    self.buttons_down.clear();
                }
                false
            }

            InputEvent::PointerMoved(PointerMoveEvent { pos }) => {
                self.pointer_pos = Some(*pos);
                false
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
                false
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, pos }) => {
                self.pointer_pos = Some(*pos);
                match state {
                    MouseButtonState::Pressed => self.buttons_down.insert(*button),
                    MouseButtonState::Released => self.buttons_down.remove(button),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_buttons_and_position() {
        let mut s = InputState::default();
        assert!(s.apply_event(&InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, 3.0, 4.0)));
        assert!(!s.apply_event(&InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, 3.0, 4.0)));
        assert!(s.buttons_down.contains(&MouseButton::Left));
        assert_eq!(s.pointer_pos, Some(Vec2::new(3.0, 4.0)));

        assert!(s.apply_event(&InputEvent::button(MouseButton::Left, MouseButtonState::Released, 5.0, 4.0)));
        assert!(!s.buttons_down.contains(&MouseButton::Left));
    }

    #[test]
    fn focus_loss_clears_buttons() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::Focused(true));
        s.apply_event(&InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, 0.0, 0.0));
        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.focused);
        assert!(s.buttons_down.is_empty());
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::pointer_moved(1.0, 1.0));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }
}
