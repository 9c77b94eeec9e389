//! The boundary between the core and its window/renderer/loader collaborators.
//!
//! A [`Context`](crate::context::Context) owns exactly one [`Backend`]
//! object, constructed explicitly by the host and torn down with the
//! context. There is no process-global backend state, so multiple contexts
//! (e.g. in tests) are well-defined.
//!
//! [`HeadlessBackend`] is the in-crate implementation: no window, no GPU,
//! fixed timestep, scripted input. Windowed/GPU backends live in separate
//! crates and implement the same trait.

use rustc_hash::FxHashSet;

use crate::math::{Color, Vec2};
use crate::resources::input::{InputSnapshot, Key, MouseButton};
use crate::resources::texturestore::TextureHandle;

/// Window, renderer and texture-loader services consumed by a context.
///
/// `poll_frame` is the single point in a frame that may block (event pump,
/// vsync wait); every other method must return promptly.
pub trait Backend {
    /// Pumps events, overwrites `snapshot` with the current input levels and
    /// returns the wall-clock seconds since the previous poll.
    fn poll_frame(&mut self, snapshot: &mut InputSnapshot) -> f32;

    /// Whether the host asked the loop to stop (window close button, etc.).
    fn should_close(&self) -> bool;

    fn set_should_close(&mut self, close: bool);

    /// Opens the frame's draw target, cleared to `clear`.
    fn begin_frame(&mut self, clear: Color);

    /// Submits one textured draw. Returns `false` if the backend could not
    /// accept it; the submission is never partially applied.
    #[allow(clippy::too_many_arguments)]
    fn submit_sprite(
        &mut self,
        texture: TextureHandle,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rotation: f32,
        color: Color,
    ) -> bool;

    /// Submits one untextured colored quad.
    fn submit_quad(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) -> bool;

    /// Presents the finished frame.
    fn present(&mut self);

    /// Loads a texture and returns its opaque handle, or
    /// [`TextureHandle::INVALID`] on failure.
    fn load_texture(&mut self, path: &str) -> TextureHandle;

    /// Releases a texture previously returned by
    /// [`load_texture`](Self::load_texture). The context guarantees each
    /// handle is freed at most once.
    fn free_texture(&mut self, handle: TextureHandle);

    /// Releases everything the backend still holds. Called once, from
    /// context destroy.
    fn shutdown(&mut self);
}

/// Deterministic backend with no window or GPU.
///
/// Every `poll_frame` returns the same fixed delta and the input state last
/// scripted through [`press_key`](Self::press_key) and friends. Draw
/// submissions are counted instead of rasterized. Used by the test suites
/// and the demo binary.
#[derive(Debug)]
pub struct HeadlessBackend {
    fixed_delta: f32,
    pending: InputSnapshot,
    close_requested: bool,
    next_texture: u64,
    live_textures: FxHashSet<u64>,
    last_clear: Color,
    sprites_submitted: u64,
    quads_submitted: u64,
    frames_presented: u64,
}

impl HeadlessBackend {
    /// Creates a backend whose every frame lasts `fixed_delta` seconds.
    pub fn new(fixed_delta: f32) -> Self {
        Self {
            fixed_delta,
            pending: InputSnapshot::new(),
            close_requested: false,
            next_texture: 1,
            live_textures: FxHashSet::default(),
            last_clear: Color::BLACK,
            sprites_submitted: 0,
            quads_submitted: 0,
            frames_presented: 0,
        }
    }

    // =========================================================================
    // Input scripting
    // =========================================================================

    /// Marks a key as held from the next `poll_frame` on.
    pub fn press_key(&mut self, key: Key) {
        self.pending.set_key(key, true);
    }

    pub fn release_key(&mut self, key: Key) {
        self.pending.set_key(key, false);
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.pending.set_button(button, true);
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.pending.set_button(button, false);
    }

    pub fn move_mouse(&mut self, position: Vec2) {
        self.pending.set_mouse_position(position);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn sprites_submitted(&self) -> u64 {
        self.sprites_submitted
    }

    pub fn quads_submitted(&self) -> u64 {
        self.quads_submitted
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn live_texture_count(&self) -> usize {
        self.live_textures.len()
    }

    pub fn last_clear(&self) -> Color {
        self.last_clear
    }
}

impl Backend for HeadlessBackend {
    fn poll_frame(&mut self, snapshot: &mut InputSnapshot) -> f32 {
        snapshot.copy_from(&self.pending);
        self.fixed_delta
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn set_should_close(&mut self, close: bool) {
        self.close_requested = close;
    }

    fn begin_frame(&mut self, clear: Color) {
        self.last_clear = clear;
    }

    fn submit_sprite(
        &mut self,
        _texture: TextureHandle,
        _x: f32,
        _y: f32,
        _width: f32,
        _height: f32,
        _rotation: f32,
        _color: Color,
    ) -> bool {
        self.sprites_submitted += 1;
        true
    }

    fn submit_quad(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, _color: Color) -> bool {
        self.quads_submitted += 1;
        true
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }

    fn load_texture(&mut self, path: &str) -> TextureHandle {
        if path.is_empty() {
            log::warn!("headless texture load with empty path");
            return TextureHandle::INVALID;
        }
        let handle = TextureHandle::from_bits(self.next_texture);
        self.next_texture += 1;
        self.live_textures.insert(handle.to_bits());
        log::debug!("headless texture {:?} loaded from {}", handle, path);
        handle
    }

    fn free_texture(&mut self, handle: TextureHandle) {
        self.live_textures.remove(&handle.to_bits());
    }

    fn shutdown(&mut self) {
        self.live_textures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_delta_every_poll() {
        let mut backend = HeadlessBackend::new(0.25);
        let mut snap = InputSnapshot::new();
        assert_eq!(backend.poll_frame(&mut snap), 0.25);
        assert_eq!(backend.poll_frame(&mut snap), 0.25);
    }

    #[test]
    fn test_scripted_keys_reach_snapshot() {
        let mut backend = HeadlessBackend::new(0.1);
        backend.press_key(Key::Space);
        let mut snap = InputSnapshot::new();
        backend.poll_frame(&mut snap);
        assert!(snap.key_down(Key::Space));

        backend.release_key(Key::Space);
        backend.poll_frame(&mut snap);
        assert!(!snap.key_down(Key::Space));
    }

    #[test]
    fn test_texture_handles_are_sequential_and_tracked() {
        let mut backend = HeadlessBackend::new(0.1);
        let a = backend.load_texture("a.png");
        let b = backend.load_texture("b.png");
        assert_ne!(a, b);
        assert_eq!(backend.live_texture_count(), 2);

        backend.free_texture(a);
        assert_eq!(backend.live_texture_count(), 1);
    }

    #[test]
    fn test_empty_path_fails_load() {
        let mut backend = HeadlessBackend::new(0.1);
        assert!(backend.load_texture("").is_invalid());
        assert_eq!(backend.live_texture_count(), 0);
    }

    #[test]
    fn test_submission_counters() {
        let mut backend = HeadlessBackend::new(0.1);
        let tex = backend.load_texture("a.png");
        assert!(backend.submit_sprite(tex, 0.0, 0.0, 8.0, 8.0, 0.0, Color::WHITE));
        assert!(backend.submit_quad(0.0, 0.0, 8.0, 8.0, Color::RED));
        backend.present();
        assert_eq!(backend.sprites_submitted(), 1);
        assert_eq!(backend.quads_submitted(), 1);
        assert_eq!(backend.frames_presented(), 1);
    }
}
