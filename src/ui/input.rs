//! Keyboard input mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use archsecure::domain::navigator::NavInput;

/// What a key press means in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Nav(NavInput),
    /// Ctrl+C: end the session from any level
    Interrupt,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn key_to_input(key: KeyEvent) -> Option<MenuKey> {
    if is_ctrl_c(&key) {
        return Some(MenuKey::Interrupt);
    }
    let input = match key.code {
        KeyCode::Up | KeyCode::Char('k') => NavInput::Up,
        KeyCode::Down | KeyCode::Char('j') => NavInput::Down,
        KeyCode::Enter | KeyCode::Tab | KeyCode::Char(' ') => NavInput::Select,
        KeyCode::Char('q') | KeyCode::Esc => NavInput::Cancel,
        KeyCode::Char('n') => NavInput::Clear,
        _ => return None,
    };
    Some(MenuKey::Nav(input))
}

/// Keys that cancel a run in progress
pub fn is_cancel_key(key: KeyEvent) -> bool {
    is_ctrl_c(&key) || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_vim_keys_move() {
        assert_eq!(key_to_input(key(KeyCode::Up)), Some(MenuKey::Nav(NavInput::Up)));
        assert_eq!(
            key_to_input(key(KeyCode::Char('j'))),
            Some(MenuKey::Nav(NavInput::Down))
        );
    }

    #[test]
    fn enter_tab_and_space_select() {
        for code in [KeyCode::Enter, KeyCode::Tab, KeyCode::Char(' ')] {
            assert_eq!(key_to_input(key(code)), Some(MenuKey::Nav(NavInput::Select)));
        }
    }

    #[test]
    fn quit_keys_cancel() {
        assert_eq!(
            key_to_input(key(KeyCode::Esc)),
            Some(MenuKey::Nav(NavInput::Cancel))
        );
        assert_eq!(
            key_to_input(key(KeyCode::Char('q'))),
            Some(MenuKey::Nav(NavInput::Cancel))
        );
    }

    #[test]
    fn ctrl_c_interrupts_but_plain_c_is_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_input(ctrl_c), Some(MenuKey::Interrupt));
        assert_eq!(key_to_input(key(KeyCode::Char('c'))), None);
        assert!(is_cancel_key(ctrl_c));
        assert!(!is_cancel_key(key(KeyCode::Enter)));
    }

    #[test]
    fn n_clears_level() {
        assert_eq!(
            key_to_input(key(KeyCode::Char('n'))),
            Some(MenuKey::Nav(NavInput::Clear))
        );
    }
}
