//! The engine context: aggregate root of the core.
//!
//! A [`Context`] owns the entity liveness table, the frame clock, the input
//! sampler, the live-texture registry and the backend object. It is the
//! single synchronization point of the frame loop:
//!
//! 1. `begin_frame`: poll events, compute delta time, advance input edges
//! 2. game logic: entity/component mutation, draw calls, collision queries
//! 3. `end_frame`: present
//!
//! A context must be driven by exactly one thread. Nothing here locks;
//! sharing a context across threads is not supported and would require an
//! explicit synchronization layer on top.
//!
//! Destruction is idempotent and hooked into `Drop`, so a context acquired
//! in a scope is released on every exit path, including panics and early
//! returns.

use crate::backend::Backend;
use crate::entity::{EntityAllocator, EntityId};
use crate::math::{Color, Vec2};
use crate::resources::frameclock::FrameClock;
use crate::resources::input::{FrameInput, InputSnapshot, Key, MouseButton};
use crate::resources::texturestore::{TextureHandle, TextureStore};

/// An isolated engine instance with its own entities, textures and frame
/// state.
pub struct Context<B: Backend> {
    backend: B,
    entities: EntityAllocator,
    clock: FrameClock,
    input: FrameInput,
    textures: TextureStore,
    snapshot: InputSnapshot,
    clear_color: Color,
    valid: bool,
}

impl<B: Backend> Context<B> {
    /// Creates a context around an explicitly constructed backend.
    ///
    /// The backend is owned by the context from here on and torn down with
    /// it.
    pub fn create(backend: B) -> Self {
        log::debug!("context created");
        Self {
            backend,
            entities: EntityAllocator::new(),
            clock: FrameClock::new(),
            input: FrameInput::new(),
            textures: TextureStore::new(),
            snapshot: InputSnapshot::new(),
            clear_color: Color::BLACK,
            valid: true,
        }
    }

    /// Releases every owned resource exactly once.
    ///
    /// Safe to call repeatedly; the second and later calls are no-ops.
    /// After destroy, every operation on the context fails cleanly.
    pub fn destroy(&mut self) {
        if !self.valid {
            return;
        }
        for handle in self.textures.drain_all() {
            self.backend.free_texture(handle);
        }
        self.backend.shutdown();
        self.valid = false;
        log::debug!("context destroyed");
    }

    /// False once [`destroy`](Self::destroy) has run, even though the value
    /// itself is still reachable.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    // =========================================================================
    // Frame bracket
    // =========================================================================

    /// Starts a frame: polls the backend (the one call per frame that may
    /// block), rotates the input edge buffers and advances the clock.
    ///
    /// Returns the wall-clock seconds since the previous `begin_frame`, or
    /// 0.0 on a destroyed context.
    pub fn begin_frame(&mut self) -> f32 {
        if !self.valid {
            log::warn!("begin_frame on destroyed context");
            return 0.0;
        }
        let delta = self.backend.poll_frame(&mut self.snapshot);
        self.input.begin_frame(&self.snapshot);
        self.clock.advance(delta);
        self.backend.begin_frame(self.clear_color);
        delta
    }

    /// Finishes the frame and presents it.
    pub fn end_frame(&mut self) {
        if !self.valid {
            return;
        }
        self.backend.present();
    }

    /// Whether the host asked the loop to stop. Destroyed contexts always
    /// report true.
    pub fn should_close(&self) -> bool {
        !self.valid || self.backend.should_close()
    }

    /// Flags the loop to stop after the current frame.
    pub fn request_close(&mut self) {
        if self.valid {
            self.backend.set_should_close(true);
        }
    }

    /// Background color the next frame is cleared to.
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Spawns a new entity. Returns [`EntityId::INVALID`] on a destroyed
    /// context or on index exhaustion.
    pub fn spawn(&mut self) -> EntityId {
        if !self.valid {
            return EntityId::INVALID;
        }
        self.entities.spawn()
    }

    /// Spawns up to `count` entities in allocation order.
    pub fn spawn_batch(&mut self, count: u32) -> Vec<EntityId> {
        if !self.valid {
            return Vec::new();
        }
        self.entities.spawn_batch(count)
    }

    /// Despawns an entity. Stale, foreign and INVALID handles are no-ops
    /// returning false.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.valid && self.entities.despawn(id)
    }

    /// Despawns each handle independently; returns how many actually
    /// transitioned from live to dead.
    pub fn despawn_batch(&mut self, ids: &[EntityId]) -> u32 {
        if !self.valid {
            return 0;
        }
        self.entities.despawn_batch(ids)
    }

    #[inline]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.valid && self.entities.is_alive(id)
    }

    /// Number of live entities.
    #[inline]
    pub fn entity_count(&self) -> u32 {
        if !self.valid {
            return 0;
        }
        self.entities.count()
    }

    // =========================================================================
    // Textures
    // =========================================================================

    /// Loads a texture through the backend and registers the handle as live.
    ///
    /// Returns [`TextureHandle::INVALID`] if the context is destroyed or the
    /// backend fails the load.
    pub fn load_texture(&mut self, path: &str) -> TextureHandle {
        if !self.valid {
            return TextureHandle::INVALID;
        }
        let handle = self.backend.load_texture(path);
        if handle.is_invalid() {
            log::warn!("texture load failed: {}", path);
            return TextureHandle::INVALID;
        }
        self.textures.register(handle, path);
        handle
    }

    /// Releases a texture exactly once. The second call for the same handle
    /// is a no-op returning false, and so is any stale or INVALID handle.
    pub fn destroy_texture(&mut self, handle: TextureHandle) -> bool {
        if !self.valid {
            return false;
        }
        if !self.textures.release(handle) {
            return false;
        }
        self.backend.free_texture(handle);
        true
    }

    #[inline]
    pub fn is_texture_valid(&self, handle: TextureHandle) -> bool {
        self.valid && self.textures.contains(handle)
    }

    /// Number of live textures.
    #[inline]
    pub fn texture_count(&self) -> usize {
        if !self.valid {
            return 0;
        }
        self.textures.len()
    }

    // =========================================================================
    // Immediate-mode drawing
    // =========================================================================

    /// Submits one textured draw for this frame only.
    ///
    /// Fails (returns false, submits nothing) on a destroyed context or a
    /// handle that is not currently live.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_sprite(
        &mut self,
        texture: TextureHandle,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rotation: f32,
        color: Color,
    ) -> bool {
        if !self.valid {
            return false;
        }
        if !self.textures.contains(texture) {
            log::warn!("draw_sprite with stale texture {:?}", texture);
            return false;
        }
        self.backend
            .submit_sprite(texture, x, y, width, height, rotation, color)
    }

    /// Submits one colored quad for this frame only.
    pub fn draw_quad(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) -> bool {
        if !self.valid {
            return false;
        }
        self.backend.submit_quad(x, y, width, height, color)
    }

    // =========================================================================
    // Input & time queries
    // =========================================================================

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.input.key_pressed(key)
    }

    #[inline]
    pub fn key_just_pressed(&self, key: Key) -> bool {
        self.input.key_just_pressed(key)
    }

    #[inline]
    pub fn key_just_released(&self, key: Key) -> bool {
        self.input.key_just_released(key)
    }

    #[inline]
    pub fn mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.input.mouse_button_pressed(button)
    }

    #[inline]
    pub fn mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.input.mouse_button_just_pressed(button)
    }

    #[inline]
    pub fn mouse_button_just_released(&self, button: MouseButton) -> bool {
        self.input.mouse_button_just_released(button)
    }

    #[inline]
    pub fn mouse_position(&self) -> Vec2 {
        self.input.mouse_position()
    }

    /// Scaled seconds the current frame advanced the clock by.
    #[inline]
    pub fn delta_time(&self) -> f32 {
        self.clock.delta
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.clock.time_scale = scale;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn input(&self) -> &FrameInput {
        &self.input
    }

    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend access, mainly for scripting headless input in tests
    /// and demos.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: Backend> Drop for Context<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}
