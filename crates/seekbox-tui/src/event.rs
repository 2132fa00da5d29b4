//! Semantic application events — crossterm events mapped to a small
//! vocabulary so widgets and the app shell never match on crossterm types.
//!
//! The search input always has focus, so every printable character is typed
//! literally; commands live on control keys.
//!
//! | Key(s)                   | Event                     |
//! |--------------------------|---------------------------|
//! | `Ctrl+c`                 | `Quit`                    |
//! | printable char           | `Char(c)`                 |
//! | `Backspace`              | `Backspace`               |
//! | `↑` / `Ctrl+p`           | `Up`                      |
//! | `↓` / `Ctrl+n`           | `Down`                    |
//! | `Enter`                  | `Enter`                   |
//! | `Esc`                    | `Escape`                  |
//! | `Tab`                    | `Focus(Keyboard)`         |
//! | terminal focus gained    | `Focus(Pointer)`          |
//! | terminal focus lost      | `Blur`                    |
//! | `Ctrl+w`                 | `RemoveLastChip`          |
//! | `Ctrl+x`                 | `ClearAll`                |
//! | terminal resize          | `Resize(w, h)`            |

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use seekbox_core::controller::FocusCause;

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// A printable character appended to the search input.
    Char(char),
    Backspace,
    /// Move the dropdown highlight up.
    Up,
    /// Move the dropdown highlight down.
    Down,
    /// Select the highlighted result.
    Enter,
    /// Close the dropdown without selecting.
    Escape,
    /// The input (re)gained focus.
    Focus(FocusCause),
    /// Focus left the control, the terminal analogue of a click outside.
    Blur,
    /// Multi mode: drop the most recently added chip.
    RemoveLastChip,
    /// Clear the whole selection.
    ClearAll,
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for events with no meaning to the app (mouse, key
/// release, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::FocusGained => Some(AppEvent::Focus(FocusCause::Pointer)),
        Event::FocusLost => Some(AppEvent::Blur),
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('w') if key.modifiers == Mod::CONTROL => Some(AppEvent::RemoveLastChip),
        Char('x') if key.modifiers == Mod::CONTROL => Some(AppEvent::ClearAll),
        Char('p') if key.modifiers == Mod::CONTROL => Some(AppEvent::Up),
        Char('n') if key.modifiers == Mod::CONTROL => Some(AppEvent::Down),

        Up => Some(AppEvent::Up),
        Down => Some(AppEvent::Down),
        Tab if key.modifiers == Mod::NONE => Some(AppEvent::Focus(FocusCause::Keyboard)),

        // Shifted characters arrive with SHIFT set on most terminals
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace => Some(AppEvent::Backspace),
        Enter => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> Event {
        key(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(to_app_event(ctrl('c')), Some(AppEvent::Quit));
    }

    #[test]
    fn letters_are_typed_literally() {
        for ch in ['q', 'j', 'k', '/', '?', ' '] {
            assert_eq!(to_app_event(press(KeyCode::Char(ch))), Some(AppEvent::Char(ch)));
        }
        assert_eq!(
            to_app_event(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(AppEvent::Char('A'))
        );
    }

    #[test]
    fn dropdown_navigation() {
        assert_eq!(to_app_event(press(KeyCode::Up)), Some(AppEvent::Up));
        assert_eq!(to_app_event(press(KeyCode::Down)), Some(AppEvent::Down));
        assert_eq!(to_app_event(ctrl('p')), Some(AppEvent::Up));
        assert_eq!(to_app_event(ctrl('n')), Some(AppEvent::Down));
        assert_eq!(to_app_event(press(KeyCode::Enter)), Some(AppEvent::Enter));
        assert_eq!(to_app_event(press(KeyCode::Esc)), Some(AppEvent::Escape));
    }

    #[test]
    fn selection_commands() {
        assert_eq!(to_app_event(ctrl('w')), Some(AppEvent::RemoveLastChip));
        assert_eq!(to_app_event(ctrl('x')), Some(AppEvent::ClearAll));
    }

    #[test]
    fn focus_events() {
        assert_eq!(
            to_app_event(press(KeyCode::Tab)),
            Some(AppEvent::Focus(FocusCause::Keyboard))
        );
        assert_eq!(
            to_app_event(Event::FocusGained),
            Some(AppEvent::Focus(FocusCause::Pointer))
        );
        assert_eq!(to_app_event(Event::FocusLost), Some(AppEvent::Blur));
    }

    #[test]
    fn resize_event() {
        assert_eq!(to_app_event(Event::Resize(120, 40)), Some(AppEvent::Resize(120, 40)));
    }

    #[test]
    fn key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(to_app_event(release), None);
    }

    #[test]
    fn unbound_key_returns_none() {
        assert_eq!(to_app_event(press(KeyCode::F(5))), None);
        assert_eq!(to_app_event(ctrl('z')), None);
    }
}
