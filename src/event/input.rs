//! Per-frame input snapshot and keyboard types.
//!
//! [`FrameInput`] is what the event manager consumes each frame: a pointer
//! position, primary-button transitions, and the keys pressed since the last
//! frame. It can be filled directly or accumulated from crossterm events, one
//! terminal cell per logical pixel.

use crossterm::event as ct;

use crate::geometry::{Point, Size};

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

/// Held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false };

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

impl From<ct::KeyModifiers> for Modifiers {
    fn from(m: ct::KeyModifiers) -> Self {
        Self {
            shift: m.contains(ct::KeyModifiers::SHIFT),
            ctrl: m.contains(ct::KeyModifiers::CONTROL),
            alt: m.contains(ct::KeyModifiers::ALT),
        }
    }
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key press without modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Convert a crossterm key event. Releases and unsupported keys yield `None`.
    pub fn from_crossterm(event: &ct::KeyEvent) -> Option<Self> {
        if event.kind == ct::KeyEventKind::Release {
            return None;
        }
        let key = match event.code {
            ct::KeyCode::Char(c) => Key::Char(c),
            ct::KeyCode::Enter => Key::Enter,
            ct::KeyCode::Esc => Key::Escape,
            ct::KeyCode::Tab => Key::Tab,
            ct::KeyCode::BackTab => Key::BackTab,
            ct::KeyCode::Backspace => Key::Backspace,
            ct::KeyCode::Delete => Key::Delete,
            ct::KeyCode::Left => Key::Left,
            ct::KeyCode::Right => Key::Right,
            ct::KeyCode::Up => Key::Up,
            ct::KeyCode::Down => Key::Down,
            ct::KeyCode::Home => Key::Home,
            ct::KeyCode::End => Key::End,
            ct::KeyCode::PageUp => Key::PageUp,
            ct::KeyCode::PageDown => Key::PageDown,
            ct::KeyCode::F(n) => Key::F(n),
            _ => return None,
        };
        Some(Self::new(key, event.modifiers.into()))
    }
}

// ---------------------------------------------------------------------------
// FrameInput
// ---------------------------------------------------------------------------

/// Input sampled for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Current pointer position.
    pub pointer: Point,
    /// The primary button went down this frame.
    pub button_pressed: bool,
    /// The primary button went up this frame.
    pub button_released: bool,
    /// Keys pressed this frame, in order.
    pub keys: Vec<KeyEvent>,
    /// New viewport size, if the window was resized.
    pub resize: Option<Size>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input with the pointer at `(x, y)` and no transitions.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            pointer: Point::new(x, y),
            ..Self::default()
        }
    }

    /// Mark a primary-button press (builder).
    pub fn pressed(mut self) -> Self {
        self.button_pressed = true;
        self
    }

    /// Mark a primary-button release (builder).
    pub fn released(mut self) -> Self {
        self.button_released = true;
        self
    }

    /// Append a key press (builder).
    pub fn with_key(mut self, key: KeyEvent) -> Self {
        self.keys.push(key);
        self
    }

    /// Fold one crossterm event into this frame's input.
    ///
    /// Only the left button drives press/release; other buttons just move the pointer.
    pub fn push(&mut self, event: &ct::Event) {
        match event {
            ct::Event::Key(key) => {
                if let Some(key) = KeyEvent::from_crossterm(key) {
                    self.keys.push(key);
                }
            }
            ct::Event::Mouse(mouse) => {
                self.pointer = Point::new(mouse.column as f64, mouse.row as f64);
                match mouse.kind {
                    ct::MouseEventKind::Down(ct::MouseButton::Left) => self.button_pressed = true,
                    ct::MouseEventKind::Up(ct::MouseButton::Left) => self.button_released = true,
                    _ => {}
                }
            }
            ct::Event::Resize(width, height) => {
                self.resize = Some(Size::new(*width as f64, *height as f64));
            }
            _ => {}
        }
    }

    /// Accumulate a batch of crossterm events, starting from `pointer`.
    pub fn from_events<'a>(pointer: Point, events: impl IntoIterator<Item = &'a ct::Event>) -> Self {
        let mut input = Self {
            pointer,
            ..Self::default()
        };
        for event in events {
            input.push(event);
        }
        input
    }

    /// Drop per-frame transitions, keeping the pointer for the next frame.
    pub fn next_frame(&mut self) {
        self.button_pressed = false;
        self.button_released = false;
        self.keys.clear();
        self.resize = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: ct::MouseEventKind, column: u16, row: u16) -> ct::Event {
        ct::Event::Mouse(ct::MouseEvent {
            kind,
            column,
            row,
            modifiers: ct::KeyModifiers::NONE,
        })
    }

    #[test]
    fn modifiers_from_crossterm() {
        let mods: Modifiers = (ct::KeyModifiers::CONTROL | ct::KeyModifiers::SHIFT).into();
        assert!(mods.ctrl && mods.shift && !mods.alt);
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn key_conversion() {
        let event = ct::KeyEvent::new(ct::KeyCode::Tab, ct::KeyModifiers::NONE);
        assert_eq!(KeyEvent::from_crossterm(&event), Some(KeyEvent::plain(Key::Tab)));

        let unsupported = ct::KeyEvent::new(ct::KeyCode::CapsLock, ct::KeyModifiers::NONE);
        assert_eq!(KeyEvent::from_crossterm(&unsupported), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let event = ct::KeyEvent::new_with_kind(
            ct::KeyCode::Char('a'),
            ct::KeyModifiers::NONE,
            ct::KeyEventKind::Release,
        );
        assert_eq!(KeyEvent::from_crossterm(&event), None);
    }

    #[test]
    fn accumulates_mouse_and_keys() {
        let events = [
            mouse(ct::MouseEventKind::Moved, 3, 4),
            mouse(ct::MouseEventKind::Down(ct::MouseButton::Left), 5, 6),
            ct::Event::Key(ct::KeyEvent::new(ct::KeyCode::Char('x'), ct::KeyModifiers::ALT)),
            ct::Event::Resize(80, 24),
        ];
        let input = FrameInput::from_events(Point::ORIGIN, &events);
        assert_eq!(input.pointer, Point::new(5.0, 6.0));
        assert!(input.button_pressed);
        assert!(!input.button_released);
        assert_eq!(input.keys.len(), 1);
        assert!(input.keys[0].modifiers.alt);
        assert_eq!(input.resize, Some(Size::new(80.0, 24.0)));
    }

    #[test]
    fn right_button_only_moves() {
        let mut input = FrameInput::new();
        input.push(&mouse(ct::MouseEventKind::Down(ct::MouseButton::Right), 9, 9));
        assert!(!input.button_pressed);
        assert_eq!(input.pointer, Point::new(9.0, 9.0));
    }

    #[test]
    fn next_frame_keeps_pointer() {
        let mut input = FrameInput::at(1.0, 2.0).pressed().with_key(KeyEvent::plain(Key::Enter));
        input.next_frame();
        assert_eq!(input, FrameInput::at(1.0, 2.0));
    }
}
