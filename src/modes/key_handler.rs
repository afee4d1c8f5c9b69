use gtk::gdk::{self, ModifierType};

use crate::modes::key_action::KeyAction;
use crate::view_state::{NavDirection, SentenceStep};

/// Map a key press to an action
pub fn handle_key(keyval: gdk::Key, modifiers: ModifierType) -> KeyAction {
    let ctrl = modifiers.contains(ModifierType::CONTROL_MASK);

    if ctrl {
        return match keyval {
            gdk::Key::o | gdk::Key::O => KeyAction::OpenFile,
            gdk::Key::w | gdk::Key::W => KeyAction::CloseFile,
            gdk::Key::plus | gdk::Key::equal | gdk::Key::KP_Add => KeyAction::ZoomIn,
            gdk::Key::minus | gdk::Key::KP_Subtract => KeyAction::ZoomOut,
            gdk::Key::_0 | gdk::Key::KP_0 => KeyAction::FitWidth,
            _ => KeyAction::None,
        };
    }

    match keyval {
        gdk::Key::Left => KeyAction::TurnPage(NavDirection::Previous),
        gdk::Key::Right => KeyAction::TurnPage(NavDirection::Next),
        gdk::Key::Down => KeyAction::MoveSentence(SentenceStep::Forward),
        gdk::Key::Up => KeyAction::MoveSentence(SentenceStep::Backward),
        gdk::Key::plus | gdk::Key::equal | gdk::Key::KP_Add => KeyAction::ZoomIn,
        gdk::Key::minus | gdk::Key::KP_Subtract => KeyAction::ZoomOut,
        gdk::Key::F11 => KeyAction::ToggleFullscreen,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows() {
        let none = ModifierType::empty();
        assert_eq!(
            handle_key(gdk::Key::Left, none),
            KeyAction::TurnPage(NavDirection::Previous)
        );
        assert_eq!(
            handle_key(gdk::Key::Right, none),
            KeyAction::TurnPage(NavDirection::Next)
        );
        assert_eq!(
            handle_key(gdk::Key::Down, none),
            KeyAction::MoveSentence(SentenceStep::Forward)
        );
        assert_eq!(
            handle_key(gdk::Key::Up, none),
            KeyAction::MoveSentence(SentenceStep::Backward)
        );
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let ctrl = ModifierType::CONTROL_MASK;
        assert_eq!(handle_key(gdk::Key::o, ctrl), KeyAction::OpenFile);
        assert_eq!(handle_key(gdk::Key::w, ctrl), KeyAction::CloseFile);
        assert_eq!(handle_key(gdk::Key::_0, ctrl), KeyAction::FitWidth);
        assert_eq!(handle_key(gdk::Key::Down, ctrl), KeyAction::None);
    }

    #[test]
    fn test_zoom_and_fullscreen() {
        let none = ModifierType::empty();
        assert_eq!(handle_key(gdk::Key::plus, none), KeyAction::ZoomIn);
        assert_eq!(handle_key(gdk::Key::equal, none), KeyAction::ZoomIn);
        assert_eq!(handle_key(gdk::Key::minus, none), KeyAction::ZoomOut);
        assert_eq!(handle_key(gdk::Key::F11, none), KeyAction::ToggleFullscreen);
    }

    #[test]
    fn test_unbound_keys_propagate() {
        let action = handle_key(gdk::Key::a, ModifierType::empty());
        assert_eq!(action, KeyAction::None);
        assert!(!action.is_handled());
        assert!(handle_key(gdk::Key::F11, ModifierType::empty()).is_handled());
    }

    #[test]
    fn test_zoom_keys_need_a_document() {
        let none = ModifierType::empty();
        assert!(handle_key(gdk::Key::plus, none).needs_document());
        assert!(handle_key(gdk::Key::minus, none).needs_document());
        assert!(handle_key(gdk::Key::_0, ModifierType::CONTROL_MASK).needs_document());
        assert!(!handle_key(gdk::Key::o, ModifierType::CONTROL_MASK).needs_document());
    }
}
