//! Entity identity: packed generational handles and the liveness table.
//!
//! An [`EntityId`] is an opaque 64-bit handle packing a 32-bit slot index and
//! a 32-bit generation. The [`EntityAllocator`] is the single source of truth
//! for "is this handle still valid": despawning a slot bumps its generation,
//! so handles from a previous occupancy of the slot stop matching and are
//! detected as stale in O(1).

use std::fmt;

/// An opaque generational entity handle.
///
/// Two handles are equal iff both index and generation match. The all-ones
/// bit pattern is the [`INVALID`](Self::INVALID) sentinel and never compares
/// equal to a live handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Sentinel returned by failed spawns; never alive.
    pub const INVALID: EntityId = EntityId(u64::MAX);

    #[inline]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    /// Slot index portion of the handle.
    #[inline]
    pub const fn index(self) -> u32 {
        (self.0 & 0xFFFF_FFFF) as u32
    }

    /// Generation portion of the handle.
    #[inline]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Raw packed representation, for storage or FFI-style transport.
    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Reconstructs a handle from [`to_bits`](Self::to_bits) output.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == u64::MAX
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            write!(f, "EntityId(INVALID)")
        } else {
            write!(
                f,
                "EntityId(index={}, gen={})",
                self.index(),
                self.generation()
            )
        }
    }
}

/// One slot of the liveness table.
#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    alive: bool,
}

/// Allocates unique, time-unambiguous entity handles with free-list reuse.
///
/// Fresh slots start at generation 0. Despawning bumps the slot generation,
/// so a reused slot hands out a handle that differs from every handle its
/// previous occupants carried. A slot whose generation counter reaches
/// `u32::MAX` is retired instead of wrapping; the index space (2^32 slots)
/// is treated as effectively inexhaustible, and running out of it is a
/// design-scale violation rather than a runtime condition.
///
/// Not thread-safe; owned by a single-threaded [`Context`](crate::context::Context).
#[derive(Debug, Default)]
pub struct EntityAllocator {
    slots: Vec<Slot>,
    free: Vec<u32>,
    alive_count: u32,
}

impl EntityAllocator {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            alive_count: 0,
        }
    }

    /// Allocates a fresh handle, reusing a despawned slot when one is free.
    ///
    /// Returns [`EntityId::INVALID`] only when the 32-bit index space is
    /// exhausted.
    pub fn spawn(&mut self) -> EntityId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.alive = true;
            self.alive_count += 1;
            return EntityId::new(index, slot.generation);
        }

        // Index u32::MAX is reserved so a live handle can never collide
        // with the INVALID bit pattern.
        if self.slots.len() >= u32::MAX as usize {
            log::error!("entity index space exhausted; spawn returns INVALID");
            return EntityId::INVALID;
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            alive: true,
        });
        self.alive_count += 1;
        EntityId::new(index, 0)
    }

    /// Equivalent to `count` sequential spawns; the returned handles are in
    /// allocation order and may be non-contiguous. Returns fewer than
    /// `count` only on index exhaustion.
    pub fn spawn_batch(&mut self, count: u32) -> Vec<EntityId> {
        let mut spawned = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let id = self.spawn();
            if id.is_invalid() {
                break;
            }
            spawned.push(id);
        }
        spawned
    }

    /// Marks the slot dead and bumps its generation iff `id` matches the
    /// slot's current generation.
    ///
    /// Returns `false` for `INVALID`, unknown indices and stale generations,
    /// so despawning the same handle twice is a safe no-op.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        if id.is_invalid() {
            return false;
        }

        let Some(slot) = self.slots.get_mut(id.index() as usize) else {
            return false;
        };

        if !slot.alive || slot.generation != id.generation() {
            return false;
        }

        slot.alive = false;
        self.alive_count -= 1;

        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                self.free.push(id.index());
            }
            // Generation counter saturated: retire the slot rather than
            // wrapping into a generation older handles may still carry.
            None => {
                log::warn!("entity slot {} retired after generation overflow", id.index());
            }
        }

        true
    }

    /// Applies [`despawn`](Self::despawn) to each handle independently.
    ///
    /// Returns the number of handles actually transitioned from live to
    /// dead; duplicates and stale handles do not count.
    pub fn despawn_batch(&mut self, ids: &[EntityId]) -> u32 {
        let mut despawned = 0;
        for &id in ids {
            if self.despawn(id) {
                despawned += 1;
            }
        }
        despawned
    }

    /// O(1) liveness check: in-bounds, slot live, generation matches.
    #[inline]
    pub fn is_alive(&self, id: EntityId) -> bool {
        if id.is_invalid() {
            return false;
        }
        self.slots
            .get(id.index() as usize)
            .is_some_and(|slot| slot.alive && slot.generation == id.generation())
    }

    /// Number of currently live entities.
    #[inline]
    pub fn count(&self) -> u32 {
        self.alive_count
    }

    /// High-water mark of allocated slots, live or not.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
