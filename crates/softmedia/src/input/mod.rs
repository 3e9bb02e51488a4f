//! Input types and native key translation
//!
//! The native toolkit reports keys as consecutive small-integer
//! identifiers. The [`keymap`] module owns the fixed tables translating
//! those identifiers into the generic scancode/keycode pair carried on key
//! events.

pub mod keymap;

pub use keymap::{scancode_keymap, translate, NativeKey, NATIVE_KEY_RANGE};

use bitflags::bitflags;

/// A generic, layout-independent identifier for a physical key
///
/// Keys the toolkit reports that have no physical-key identity of their own
/// (shifted symbols) translate to [`Scancode::Unknown`] while still
/// carrying a real [`Keycode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scancode {
    /// No physical key identity
    Unknown,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Return key
    Return,
    /// Insert key
    Insert,
    /// Delete key
    Delete,
    /// Print Screen key
    PrintScreen,
    /// SysRq key
    SysRq,
    /// Home key
    Home,
    /// End key
    End,
    /// Left arrow
    Left,
    /// Up arrow
    Up,
    /// Right arrow
    Right,
    /// Down arrow
    Down,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
    /// Left Shift key
    LeftShift,
    /// Right Shift key
    RightShift,
    /// Left Control key
    LeftCtrl,
    /// Left Alt key
    LeftAlt,
    /// Caps Lock key
    CapsLock,
    /// Num Lock key
    NumLock,
    /// Scroll Lock key
    ScrollLock,
    /// F1 key
    F1,
    /// F2 key
    F2,
    /// F3 key
    F3,
    /// F4 key
    F4,
    /// F5 key
    F5,
    /// F6 key
    F6,
    /// F7 key
    F7,
    /// F8 key
    F8,
    /// F9 key
    F9,
    /// F10 key
    F10,
    /// F11 key
    F11,
    /// F12 key
    F12,
    /// Space bar
    Space,
    /// Comma key
    Comma,
    /// Minus key
    Minus,
    /// Period key
    Period,
    /// Slash key
    Slash,
    /// Digit 0
    Num0,
    /// Digit 1
    Num1,
    /// Digit 2
    Num2,
    /// Digit 3
    Num3,
    /// Digit 4
    Num4,
    /// Digit 5
    Num5,
    /// Digit 6
    Num6,
    /// Digit 7
    Num7,
    /// Digit 8
    Num8,
    /// Digit 9
    Num9,
    /// Equals key
    Equals,
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Left bracket key
    LeftBracket,
    /// Right bracket key
    RightBracket,
    /// Backslash key
    Backslash,
}

impl Scancode {
    /// Number of scancode values, for scancode-indexed arrays
    pub const COUNT: usize = 81;

    /// Stable index of this scancode, in `0..Self::COUNT`
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A generic, layout-dependent symbolic identifier for a key's effect
///
/// Printable keys carry their character directly (lowercase for letters);
/// editing, navigation, modifier, and function keys have named variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keycode {
    /// No symbolic meaning assigned
    Unknown,
    /// A printable character, lowercase for letters
    Char(char),
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Return key
    Return,
    /// Insert key
    Insert,
    /// Delete key
    Delete,
    /// Print Screen key
    PrintScreen,
    /// SysRq key
    SysRq,
    /// Home key
    Home,
    /// End key
    End,
    /// Left arrow
    Left,
    /// Up arrow
    Up,
    /// Right arrow
    Right,
    /// Down arrow
    Down,
    /// Page Up key
    PageUp,
    /// Page Down key
    PageDown,
    /// Left Shift key
    LeftShift,
    /// Right Shift key
    RightShift,
    /// Left Control key
    LeftCtrl,
    /// Left Alt key
    LeftAlt,
    /// Caps Lock key
    CapsLock,
    /// Num Lock key
    NumLock,
    /// Scroll Lock key
    ScrollLock,
    /// F1 key
    F1,
    /// F2 key
    F2,
    /// F3 key
    F3,
    /// F4 key
    F4,
    /// F5 key
    F5,
    /// F6 key
    F6,
    /// F7 key
    F7,
    /// F8 key
    F8,
    /// F9 key
    F9,
    /// F10 key
    F10,
    /// F11 key
    F11,
    /// F12 key
    F12,
}

bitflags! {
    /// Modifier key state carried on key events
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either Shift key
        const SHIFT = 1 << 0;
        /// Either Control key
        const CTRL = 1 << 1;
        /// Either Alt key
        const ALT = 1 << 2;
        /// The Super (logo) key
        const SUPER = 1 << 3;
    }
}

/// Translated key identity delivered with key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySym {
    /// Physical key, [`Scancode::Unknown`] when the native key has none
    pub scancode: Scancode,
    /// Symbolic key, [`Keycode::Unknown`] when unassigned
    pub keycode: Keycode,
    /// Modifier state at the time of the event
    pub modifiers: Modifiers,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
