//! Opaque texture handles and the registry of live ones.
//!
//! Handles are minted by the backend's loader; the core treats them as
//! opaque and only tracks which ones are currently live so draw calls can
//! reject stale handles and context destroy can release everything exactly
//! once.

use std::fmt;

use rustc_hash::FxHashMap;

/// An opaque 64-bit texture handle.
///
/// The all-ones bit pattern is the [`INVALID`](Self::INVALID) sentinel,
/// returned by failed loads and never registered as live.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u64);

impl TextureHandle {
    /// Sentinel for "no texture"; never valid in a draw call.
    pub const INVALID: TextureHandle = TextureHandle(u64::MAX);

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == u64::MAX
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            write!(f, "TextureHandle(INVALID)")
        } else {
            write!(f, "TextureHandle({})", self.0)
        }
    }
}

/// Registry of live texture handles owned by a context.
#[derive(Debug, Default)]
pub struct TextureStore {
    map: FxHashMap<TextureHandle, String>,
}

impl TextureStore {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly loaded handle. INVALID handles are rejected.
    pub fn register(&mut self, handle: TextureHandle, path: &str) {
        if handle.is_invalid() {
            return;
        }
        self.map.insert(handle, path.to_string());
    }

    /// Removes a handle from the live set.
    ///
    /// Returns `false` if the handle was not live, so releasing twice is a
    /// no-op.
    pub fn release(&mut self, handle: TextureHandle) -> bool {
        self.map.remove(&handle).is_some()
    }

    #[inline]
    pub fn contains(&self, handle: TextureHandle) -> bool {
        self.map.contains_key(&handle)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Empties the registry, yielding every handle that was live.
    pub fn drain_all(&mut self) -> Vec<TextureHandle> {
        self.map.drain().map(|(handle, _)| handle).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_is_never_registered() {
        let mut store = TextureStore::new();
        store.register(TextureHandle::INVALID, "nope.png");
        assert!(store.is_empty());
        assert!(!store.contains(TextureHandle::INVALID));
    }

    #[test]
    fn test_release_twice_is_noop() {
        let mut store = TextureStore::new();
        let h = TextureHandle::from_bits(1);
        store.register(h, "player.png");
        assert!(store.release(h));
        assert!(!store.release(h));
    }

    #[test]
    fn test_drain_all() {
        let mut store = TextureStore::new();
        store.register(TextureHandle::from_bits(1), "a.png");
        store.register(TextureHandle::from_bits(2), "b.png");
        let drained = store.drain_all();
        assert_eq!(drained.len(), 2);
        assert!(store.is_empty());
    }
}
