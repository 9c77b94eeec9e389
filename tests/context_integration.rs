//! Context integration tests for entity lifecycle, handle reuse and texture
//! ownership.

use ember2d::backend::HeadlessBackend;
use ember2d::context::Context;
use ember2d::entity::EntityId;
use ember2d::math::Color;

fn make_context() -> Context<HeadlessBackend> {
    Context::create(HeadlessBackend::new(1.0 / 60.0))
}

#[test]
fn spawn_then_despawn_in_any_order_drains_to_zero() {
    let mut ctx = make_context();
    let ids = ctx.spawn_batch(20);
    assert_eq!(ids.len(), 20);
    assert_eq!(ctx.entity_count(), 20);

    // Despawn back-to-front, then assert nothing is left alive.
    for id in ids.iter().rev() {
        assert!(ctx.despawn(*id));
    }
    assert_eq!(ctx.entity_count(), 0);
    for id in ids {
        assert!(!ctx.is_alive(id));
    }
}

#[test]
fn despawn_twice_succeeds_then_noops() {
    let mut ctx = make_context();
    let id = ctx.spawn();
    assert!(ctx.despawn(id));
    assert!(!ctx.despawn(id));
}

#[test]
fn reused_slot_differs_by_generation() {
    let mut ctx = make_context();
    let first = ctx.spawn();
    ctx.despawn(first);
    let second = ctx.spawn();

    assert_eq!(second.index(), first.index());
    assert_ne!(second, first);
    assert!(ctx.is_alive(second));
    assert!(!ctx.is_alive(first));
}

#[test]
fn spawn_ten_despawn_five_spawn_three() {
    let mut ctx = make_context();
    let original = ctx.spawn_batch(10);
    assert_eq!(ctx.entity_count(), 10);

    let removed = ctx.despawn_batch(&original[..5]);
    assert_eq!(removed, 5);
    assert_eq!(ctx.entity_count(), 5);

    let fresh = ctx.spawn_batch(3);
    assert_eq!(fresh.len(), 3);
    assert_eq!(ctx.entity_count(), 8);

    // The fresh handles reuse despawned slots but must not collide with any
    // handle that is still valid, nor with the stale originals.
    for id in &fresh {
        assert!(ctx.is_alive(*id));
        assert!(!original.contains(id));
    }
    for id in &original[..5] {
        assert!(!ctx.is_alive(*id));
    }
    for id in &original[5..] {
        assert!(ctx.is_alive(*id));
    }
}

#[test]
fn despawn_batch_ignores_duplicates_and_stale_handles() {
    let mut ctx = make_context();
    let ids = ctx.spawn_batch(3);
    let batch = [ids[0], ids[0], ids[1], EntityId::INVALID, ids[2]];
    assert_eq!(ctx.despawn_batch(&batch), 3);
    assert_eq!(ctx.despawn_batch(&batch), 0);
}

#[test]
fn foreign_handles_are_rejected() {
    let mut ctx_a = make_context();
    let mut ctx_b = make_context();

    let a0 = ctx_a.spawn();
    let _b0 = ctx_b.spawn();
    let b1 = ctx_b.spawn();

    // ctx_a has one slot; a handle with index 1 is unknown to it.
    assert!(!ctx_a.is_alive(b1));
    assert!(!ctx_a.despawn(b1));
    assert_eq!(ctx_a.entity_count(), 1);
    assert!(ctx_a.is_alive(a0));
}

#[test]
fn destroyed_context_fails_everything_cleanly() {
    let mut ctx = make_context();
    let id = ctx.spawn();
    let tex = ctx.load_texture("a.png");

    ctx.destroy();
    assert!(!ctx.is_valid());

    assert!(ctx.spawn().is_invalid());
    assert!(!ctx.despawn(id));
    assert_eq!(ctx.entity_count(), 0);
    assert!(!ctx.is_texture_valid(tex));
    assert!(!ctx.draw_sprite(tex, 0.0, 0.0, 8.0, 8.0, 0.0, Color::WHITE));
    assert_eq!(ctx.begin_frame(), 0.0);

    // Second destroy is a no-op, not a fault.
    ctx.destroy();
}

#[test]
fn texture_lifecycle_is_exactly_once() {
    let mut ctx = make_context();
    let tex = ctx.load_texture("sprites/player.png");
    assert!(ctx.is_texture_valid(tex));
    assert_eq!(ctx.texture_count(), 1);

    assert!(ctx.destroy_texture(tex));
    assert!(!ctx.destroy_texture(tex));
    assert_eq!(ctx.texture_count(), 0);
    assert_eq!(ctx.backend().live_texture_count(), 0);
}

#[test]
fn context_destroy_frees_remaining_textures() {
    let mut ctx = make_context();
    ctx.load_texture("a.png");
    ctx.load_texture("b.png");
    let freed_early = ctx.load_texture("c.png");
    ctx.destroy_texture(freed_early);

    ctx.destroy();
    // All three backend-side textures are gone, none freed twice.
    assert_eq!(ctx.backend().live_texture_count(), 0);
}

#[test]
fn contexts_are_isolated() {
    let mut ctx_a = make_context();
    let mut ctx_b = make_context();

    ctx_a.spawn_batch(4);
    ctx_b.spawn();
    assert_eq!(ctx_a.entity_count(), 4);
    assert_eq!(ctx_b.entity_count(), 1);

    ctx_a.destroy();
    assert_eq!(ctx_b.entity_count(), 1);
    assert!(ctx_b.is_valid());
}
