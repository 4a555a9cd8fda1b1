//! Portable key codes.
//!
//! Printable keys use their ASCII code. Named keys live above `KEY_BASE` so
//! they never collide with characters.

use crate::core::data::event::Modifiers;

pub const KEY_BACKSPACE: i32 = 8;
pub const KEY_TAB: i32 = 9;
pub const KEY_RETURN: i32 = 13;
pub const KEY_ESCAPE: i32 = 27;
pub const KEY_SPACE: i32 = 32;
pub const KEY_DELETE: i32 = 127;

pub const KEY_BASE: i32 = 1 << 24;
pub const KEY_LEFT: i32 = KEY_BASE + 1;
pub const KEY_UP: i32 = KEY_BASE + 2;
pub const KEY_RIGHT: i32 = KEY_BASE + 3;
pub const KEY_DOWN: i32 = KEY_BASE + 4;
pub const KEY_HOME: i32 = KEY_BASE + 5;
pub const KEY_END: i32 = KEY_BASE + 6;
pub const KEY_PAGE_UP: i32 = KEY_BASE + 7;
pub const KEY_PAGE_DOWN: i32 = KEY_BASE + 8;
pub const KEY_INSERT: i32 = KEY_BASE + 9;
pub const KEY_SHIFT: i32 = KEY_BASE + 16;
pub const KEY_CONTROL: i32 = KEY_BASE + 17;
pub const KEY_ALT: i32 = KEY_BASE + 18;
pub const KEY_COMMAND: i32 = KEY_BASE + 19;
pub const KEY_KEYPAD_ENTER: i32 = KEY_BASE + 32;
/// `KEY_F1 + n - 1` is function key `n`.
pub const KEY_F1: i32 = KEY_BASE + 64;

#[must_use]
pub fn is_modifier_key(key: i32) -> bool {
    matches!(key, KEY_SHIFT | KEY_CONTROL | KEY_ALT | KEY_COMMAND)
}

/// Maps a raw backend key code to the code user code sees.
///
/// Letters are lower-cased unless Shift is held, keypad enter reads as
/// return, and on macOS the Control and Command keys trade places.
#[must_use]
pub fn normalize_key(key: i32, modifiers: Modifiers) -> i32 {
    normalize_key_with(key, modifiers, cfg!(target_os = "macos"))
}

#[must_use]
pub fn normalize_key_with(key: i32, modifiers: Modifiers, swap_control_command: bool) -> i32 {
    match key {
        KEY_KEYPAD_ENTER => KEY_RETURN,
        KEY_CONTROL if swap_control_command => KEY_COMMAND,
        KEY_COMMAND if swap_control_command => KEY_CONTROL,
        k if (i32::from(b'A')..=i32::from(b'Z')).contains(&k)
            && !modifiers.contains(Modifiers::SHIFT) =>
        {
            k + i32::from(b'a' - b'A')
        }
        k => k,
    }
}
