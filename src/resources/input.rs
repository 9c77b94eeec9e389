//! Per-frame input sampling with edge detection.
//!
//! The backend delivers a level snapshot (which keys and buttons are down
//! right now, where the mouse is) once per frame. [`FrameInput`] keeps the
//! previous frame's snapshot next to the current one and derives the edges
//! from the diff, so `just_pressed`/`just_released` answers are stable for
//! the whole frame no matter how often they are queried.

use fixedbitset::FixedBitSet;

use crate::math::Vec2;

/// Bit capacity for key codes. GLFW codes top out at 346.
const KEY_CAPACITY: usize = 512;
/// Bit capacity for mouse buttons.
const BUTTON_CAPACITY: usize = 8;

/// Keyboard key identifiers, numbered with the GLFW key-code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    PageUp = 266,
    PageDown = 267,
    Home = 268,
    End = 269,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
}

impl Key {
    #[inline]
    pub const fn code(self) -> usize {
        self as usize
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
    Button4 = 3,
    Button5 = 4,
}

impl MouseButton {
    #[inline]
    pub const fn code(self) -> usize {
        self as usize
    }
}

/// Raw level state of every input channel at one instant.
///
/// Filled by the window backend during event polling; the core never
/// mutates it outside [`FrameInput::begin_frame`].
#[derive(Debug, Clone)]
pub struct InputSnapshot {
    keys: FixedBitSet,
    buttons: FixedBitSet,
    mouse_position: Vec2,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            keys: FixedBitSet::with_capacity(KEY_CAPACITY),
            buttons: FixedBitSet::with_capacity(BUTTON_CAPACITY),
            mouse_position: Vec2::ZERO,
        }
    }
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set_key(&mut self, key: Key, down: bool) {
        self.keys.set(key.code(), down);
    }

    #[inline]
    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        self.buttons.set(button.code(), down);
    }

    #[inline]
    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys.contains(key.code())
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(button.code())
    }

    #[inline]
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Releases every key and button and recenters the mouse at the origin.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.buttons.clear();
        self.mouse_position = Vec2::ZERO;
    }

    /// Overwrites this snapshot with `other`, reusing allocations.
    pub fn copy_from(&mut self, other: &InputSnapshot) {
        self.keys.clone_from(&other.keys);
        self.buttons.clone_from(&other.buttons);
        self.mouse_position = other.mouse_position;
    }
}

/// Double-buffered input sampler.
///
/// Holds the previous and current frame snapshots; levels read the current
/// one, edges diff the two. [`begin_frame`](Self::begin_frame) is the only
/// operation that advances state, so edge queries cannot consume an edge.
#[derive(Debug, Default)]
pub struct FrameInput {
    previous: InputSnapshot,
    current: InputSnapshot,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotates the buffers at the frame boundary: the current snapshot
    /// becomes the previous one, and `snapshot` becomes current.
    pub fn begin_frame(&mut self, snapshot: &InputSnapshot) {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.copy_from(snapshot);
    }

    /// Level query: the key is down this frame.
    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.current.key_down(key)
    }

    /// Edge query: down this frame, up the frame before.
    #[inline]
    pub fn key_just_pressed(&self, key: Key) -> bool {
        self.current.key_down(key) && !self.previous.key_down(key)
    }

    /// Edge query: up this frame, down the frame before.
    #[inline]
    pub fn key_just_released(&self, key: Key) -> bool {
        !self.current.key_down(key) && self.previous.key_down(key)
    }

    #[inline]
    pub fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.current.button_down(button)
    }

    #[inline]
    pub fn mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.current.button_down(button) && !self.previous.button_down(button)
    }

    #[inline]
    pub fn mouse_button_just_released(&self, button: MouseButton) -> bool {
        !self.current.button_down(button) && self.previous.button_down(button)
    }

    #[inline]
    pub fn mouse_position(&self) -> Vec2 {
        self.current.mouse_position()
    }

    /// Mouse movement since the previous frame.
    #[inline]
    pub fn mouse_delta(&self) -> Vec2 {
        self.current.mouse_position() - self.previous.mouse_position()
    }
}
