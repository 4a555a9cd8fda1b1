//! Translation of winit keyboard state into portable key codes.

use winit::keyboard::{Key, KeyLocation, ModifiersState, NamedKey};

use crate::core::data::event::Modifiers;
use crate::core::keys::{
    KEY_ALT, KEY_BACKSPACE, KEY_COMMAND, KEY_CONTROL, KEY_DELETE, KEY_DOWN, KEY_END, KEY_ESCAPE,
    KEY_F1, KEY_HOME, KEY_INSERT, KEY_KEYPAD_ENTER, KEY_LEFT, KEY_PAGE_DOWN, KEY_PAGE_UP,
    KEY_RETURN, KEY_RIGHT, KEY_SHIFT, KEY_SPACE, KEY_TAB, KEY_UP,
};

#[must_use]
pub fn modifiers_from(state: ModifiersState) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, state.shift_key());
    modifiers.set(Modifiers::CONTROL, state.control_key());
    modifiers.set(Modifiers::ALT, state.alt_key());
    modifiers
}

/// Letters come out upper-case, the way a raw keyboard reports them.
/// `None` for keys without a portable code.
#[must_use]
pub fn key_code(key: &Key, location: KeyLocation) -> Option<i32> {
    match key {
        Key::Character(text) => {
            let ch = text.chars().next()?;
            u32::from(ch.to_ascii_uppercase()).try_into().ok()
        }
        Key::Named(NamedKey::Enter) if location == KeyLocation::Numpad => Some(KEY_KEYPAD_ENTER),
        Key::Named(named) => named_key_code(*named),
        _ => None,
    }
}

fn named_key_code(named: NamedKey) -> Option<i32> {
    let code = match named {
        NamedKey::Enter => KEY_RETURN,
        NamedKey::Tab => KEY_TAB,
        NamedKey::Backspace => KEY_BACKSPACE,
        NamedKey::Escape => KEY_ESCAPE,
        NamedKey::Space => KEY_SPACE,
        NamedKey::Delete => KEY_DELETE,
        NamedKey::ArrowLeft => KEY_LEFT,
        NamedKey::ArrowUp => KEY_UP,
        NamedKey::ArrowRight => KEY_RIGHT,
        NamedKey::ArrowDown => KEY_DOWN,
        NamedKey::Home => KEY_HOME,
        NamedKey::End => KEY_END,
        NamedKey::PageUp => KEY_PAGE_UP,
        NamedKey::PageDown => KEY_PAGE_DOWN,
        NamedKey::Insert => KEY_INSERT,
        NamedKey::Shift => KEY_SHIFT,
        NamedKey::Control => KEY_CONTROL,
        NamedKey::Alt => KEY_ALT,
        NamedKey::Super => KEY_COMMAND,
        NamedKey::F1 => KEY_F1,
        NamedKey::F2 => KEY_F1 + 1,
        NamedKey::F3 => KEY_F1 + 2,
        NamedKey::F4 => KEY_F1 + 3,
        NamedKey::F5 => KEY_F1 + 4,
        NamedKey::F6 => KEY_F1 + 5,
        NamedKey::F7 => KEY_F1 + 6,
        NamedKey::F8 => KEY_F1 + 7,
        NamedKey::F9 => KEY_F1 + 8,
        NamedKey::F10 => KEY_F1 + 9,
        NamedKey::F11 => KEY_F1 + 10,
        NamedKey::F12 => KEY_F1 + 11,
        _ => return None,
    };
    Some(code)
}
