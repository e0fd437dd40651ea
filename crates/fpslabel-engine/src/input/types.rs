use crate::coords::Vec2;

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub pos: Vec2,
}

/// Pointer button event.
///
/// Carries the pointer position so consumers need not track it themselves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub pos: Vec2,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    #[inline]
    pub fn pointer_moved(x: f32, y: f32) -> Self {
        InputEvent::PointerMoved(PointerMoveEvent { pos: Vec2::new(x, y) })
    }

    #[inline]
    pub fn button(button: MouseButton, state: MouseButtonState, x: f32, y: f32) -> Self {
        InputEvent::PointerButton(PointerButtonEvent { button, state, pos: Vec2::new(x, y) })
    }
}
