//! Native key identifier translation tables
//!
//! The native toolkit enumerates keys as consecutive small integers. Two
//! parallel tables map that enumeration onto the generic scancode and
//! keycode spaces; slots the toolkit defines but the generic side cannot
//! express hold the unknown sentinels. Table order follows the toolkit's
//! key enumeration and must not be reordered.

use super::Keycode as K;
use super::Scancode as S;
use super::{Keycode, Scancode};

/// A key identifier as reported by the native toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeKey(pub u8);

/// Number of native key identifiers covered by the translation tables
pub const NATIVE_KEY_RANGE: usize = 106;

/// Keycode for each native key identifier
///
/// `Keycode::Unknown` marks toolkit keys with no symbolic mapping.
pub const KEYCODE_MAP: [Keycode; NATIVE_KEY_RANGE] = [
    K::Unknown,
    // editing and navigation keys
    K::Escape,
    K::Tab,
    K::Backspace,
    K::Return,
    K::Insert,
    K::Delete,
    K::PrintScreen,
    K::SysRq,
    K::Home,
    K::End,
    K::Left,
    K::Up,
    K::Right,
    K::Down,
    K::PageUp,
    K::PageDown,
    // modifier and lock keys
    K::LeftShift,
    K::RightShift,
    K::LeftCtrl,
    K::LeftAlt,
    K::CapsLock,
    K::NumLock,
    K::ScrollLock,
    // function keys
    K::F1,
    K::F2,
    K::F3,
    K::F4,
    K::F5,
    K::F6,
    K::F7,
    K::F8,
    K::F9,
    K::F10,
    K::F11,
    K::F12,
    // space and the shifted symbol row
    K::Char(' '),
    K::Char('!'),
    K::Char('"'),
    K::Char('#'),
    K::Char('$'),
    K::Char('%'),
    K::Char('&'),
    K::Char('\''),
    K::Char('('),
    K::Char(')'),
    K::Char('*'),
    K::Char('+'),
    K::Char(','),
    K::Char('-'),
    K::Char('.'),
    K::Char('/'),
    // digit row
    K::Char('0'),
    K::Char('1'),
    K::Char('2'),
    K::Char('3'),
    K::Char('4'),
    K::Char('5'),
    K::Char('6'),
    K::Char('7'),
    K::Char('8'),
    K::Char('9'),
    K::Char(':'),
    K::Char(';'),
    K::Char('<'),
    K::Char('='),
    K::Char('>'),
    K::Char('?'),
    K::Char('@'),
    // letter keys
    K::Char('a'),
    K::Char('b'),
    K::Char('c'),
    K::Char('d'),
    K::Char('e'),
    K::Char('f'),
    K::Char('g'),
    K::Char('h'),
    K::Char('i'),
    K::Char('j'),
    K::Char('k'),
    K::Char('l'),
    K::Char('m'),
    K::Char('n'),
    K::Char('o'),
    K::Char('p'),
    K::Char('q'),
    K::Char('r'),
    K::Char('s'),
    K::Char('t'),
    K::Char('u'),
    K::Char('v'),
    K::Char('w'),
    K::Char('x'),
    K::Char('y'),
    K::Char('z'),
    // brackets and remaining symbol keys
    K::Char('['),
    K::Char(']'),
    K::Char('\\'),
    K::Unknown, // circumflex key, unmapped
    K::Char('_'),
    K::Char('{'),
    K::Char('}'),
    K::Char('|'),
    K::Char('`'),
    K::Char('`'), // tilde key reuses the backquote code
    K::Unknown,   // trailing invalid slot
];

/// Scancode for each native key identifier
///
/// `Scancode::Unknown` marks keys with no physical-key identity of their
/// own (shifted symbols).
pub const SCANCODE_MAP: [Scancode; NATIVE_KEY_RANGE] = [
    S::Unknown,
    // editing and navigation keys
    S::Escape,
    S::Tab,
    S::Backspace,
    S::Return,
    S::Insert,
    S::Delete,
    S::PrintScreen,
    S::SysRq,
    S::Home,
    S::End,
    S::Left,
    S::Up,
    S::Right,
    S::Down,
    S::PageUp,
    S::PageDown,
    // modifier and lock keys
    S::LeftShift,
    S::RightShift,
    S::LeftCtrl,
    S::LeftAlt,
    S::CapsLock,
    S::NumLock,
    S::ScrollLock,
    // function keys
    S::F1,
    S::F2,
    S::F3,
    S::F4,
    S::F5,
    S::F6,
    S::F7,
    S::F8,
    S::F9,
    S::F10,
    S::F11,
    S::F12,
    // space and the shifted symbol row
    S::Space,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Comma,
    S::Minus,
    S::Period,
    S::Slash,
    // digit row
    S::Num0,
    S::Num1,
    S::Num2,
    S::Num3,
    S::Num4,
    S::Num5,
    S::Num6,
    S::Num7,
    S::Num8,
    S::Num9,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Equals,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    // letter keys
    S::A,
    S::B,
    S::C,
    S::D,
    S::E,
    S::F,
    S::G,
    S::H,
    S::I,
    S::J,
    S::K,
    S::L,
    S::M,
    S::N,
    S::O,
    S::P,
    S::Q,
    S::R,
    S::S,
    S::T,
    S::U,
    S::V,
    S::W,
    S::X,
    S::Y,
    S::Z,
    // brackets and remaining symbol keys
    S::LeftBracket,
    S::RightBracket,
    S::Backslash,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
    S::Unknown,
];

/// Translate a native key identifier into its scancode/keycode pair
///
/// Total over all inputs: identifiers outside the table range yield the
/// unknown sentinels rather than indexing out of bounds.
pub fn translate(key: NativeKey) -> (Scancode, Keycode) {
    let index = key.0 as usize;
    if index >= NATIVE_KEY_RANGE {
        return (Scancode::Unknown, Keycode::Unknown);
    }
    (SCANCODE_MAP[index], KEYCODE_MAP[index])
}

/// Build the scancode-indexed layout map
///
/// Walks the parallel tables and records, for every native key with a
/// physical identity, which keycode that key produces. Native keys without
/// a scancode are skipped, so their keycodes stay reachable only through
/// key events.
pub fn scancode_keymap() -> [Keycode; Scancode::COUNT] {
    let mut map = [Keycode::Unknown; Scancode::COUNT];
    for index in 0..NATIVE_KEY_RANGE {
        let scancode = SCANCODE_MAP[index];
        if scancode != Scancode::Unknown {
            map[scancode.index()] = KEYCODE_MAP[index];
        }
    }
    map
}
