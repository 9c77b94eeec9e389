//! Frame-loop integration tests: edge detection across frame boundaries,
//! delta-time accounting and immediate-mode draw submission.

use ember2d::backend::HeadlessBackend;
use ember2d::context::Context;
use ember2d::math::{Color, Vec2};
use ember2d::resources::input::{Key, MouseButton};

const EPSILON: f32 = 1e-6;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_context(fixed_delta: f32) -> Context<HeadlessBackend> {
    Context::create(HeadlessBackend::new(fixed_delta))
}

#[test]
fn key_held_three_frames_then_released() {
    let mut ctx = make_context(1.0 / 60.0);

    ctx.backend_mut().press_key(Key::Space);

    // Frame 1: press edge fires.
    ctx.begin_frame();
    assert!(ctx.key_pressed(Key::Space));
    assert!(ctx.key_just_pressed(Key::Space));
    assert!(!ctx.key_just_released(Key::Space));
    ctx.end_frame();

    // Frames 2 and 3: level stays, edge is gone.
    for _ in 0..2 {
        ctx.begin_frame();
        assert!(ctx.key_pressed(Key::Space));
        assert!(!ctx.key_just_pressed(Key::Space));
        assert!(!ctx.key_just_released(Key::Space));
        ctx.end_frame();
    }

    // Frame 4: release edge fires exactly once.
    ctx.backend_mut().release_key(Key::Space);
    ctx.begin_frame();
    assert!(!ctx.key_pressed(Key::Space));
    assert!(ctx.key_just_released(Key::Space));
    ctx.end_frame();

    ctx.begin_frame();
    assert!(!ctx.key_just_released(Key::Space));
    ctx.end_frame();
}

#[test]
fn edge_queries_do_not_consume_edges() {
    let mut ctx = make_context(1.0 / 60.0);
    ctx.backend_mut().press_key(Key::Enter);
    ctx.begin_frame();
    for _ in 0..5 {
        assert!(ctx.key_just_pressed(Key::Enter));
    }
}

#[test]
fn mouse_buttons_and_position() {
    let mut ctx = make_context(1.0 / 60.0);

    ctx.backend_mut().press_button(MouseButton::Left);
    ctx.backend_mut().move_mouse(Vec2::new(320.0, 240.0));
    ctx.begin_frame();
    assert!(ctx.mouse_button_pressed(MouseButton::Left));
    assert!(ctx.mouse_button_just_pressed(MouseButton::Left));
    assert_eq!(ctx.mouse_position(), Vec2::new(320.0, 240.0));

    ctx.backend_mut().release_button(MouseButton::Left);
    ctx.begin_frame();
    assert!(ctx.mouse_button_just_released(MouseButton::Left));
}

#[test]
fn begin_frame_returns_fixed_delta_and_accumulates() {
    let mut ctx = make_context(0.25);
    for _ in 0..4 {
        let dt = ctx.begin_frame();
        assert!(approx_eq(dt, 0.25));
        ctx.end_frame();
    }
    assert_eq!(ctx.frame_count(), 4);
    assert!(approx_eq(ctx.elapsed(), 1.0));
    assert!(approx_eq(ctx.delta_time(), 0.25));
}

#[test]
fn time_scale_slows_the_clock_not_the_wall_delta() {
    let mut ctx = make_context(0.5);
    ctx.set_time_scale(0.5);

    let dt = ctx.begin_frame();
    // The frame bracket reports the wall delta; the clock scales it.
    assert!(approx_eq(dt, 0.5));
    assert!(approx_eq(ctx.delta_time(), 0.25));
    ctx.begin_frame();
    assert!(approx_eq(ctx.elapsed(), 0.5));
}

#[test]
fn draws_are_submitted_per_frame_with_no_retained_list() {
    let mut ctx = make_context(1.0 / 60.0);
    let tex = ctx.load_texture("a.png");

    for frame in 1..=3u64 {
        ctx.begin_frame();
        assert!(ctx.draw_sprite(tex, 10.0, 10.0, 8.0, 8.0, 0.0, Color::WHITE));
        assert!(ctx.draw_quad(0.0, 0.0, 4.0, 4.0, Color::RED));
        ctx.end_frame();

        // One submission per call per frame; nothing accumulates between
        // frames on its own.
        assert_eq!(ctx.backend().sprites_submitted(), frame);
        assert_eq!(ctx.backend().quads_submitted(), frame);
        assert_eq!(ctx.backend().frames_presented(), frame);
    }
}

#[test]
fn failed_draws_submit_nothing() {
    let mut ctx = make_context(1.0 / 60.0);
    let tex = ctx.load_texture("a.png");
    ctx.destroy_texture(tex);

    ctx.begin_frame();
    assert!(!ctx.draw_sprite(tex, 0.0, 0.0, 8.0, 8.0, 0.0, Color::WHITE));
    ctx.end_frame();
    assert_eq!(ctx.backend().sprites_submitted(), 0);
}

#[test]
fn close_request_ends_the_loop() {
    let mut ctx = make_context(1.0 / 60.0);
    let mut frames = 0;
    while !ctx.should_close() {
        ctx.begin_frame();
        frames += 1;
        if frames == 5 {
            ctx.request_close();
        }
        ctx.end_frame();
    }
    assert_eq!(frames, 5);
    assert_eq!(ctx.frame_count(), 5);
}

#[test]
fn headless_loop_end_to_end() {
    let mut ctx = make_context(1.0 / 120.0);
    ctx.set_clear_color(Color::from_hex(0x336699));
    let tex = ctx.load_texture("player.png");
    let ids = ctx.spawn_batch(8);

    ctx.backend_mut().press_key(Key::D);
    let mut x = 0.0;
    for _ in 0..120 {
        let dt = ctx.begin_frame();
        if ctx.key_pressed(Key::D) {
            x += 60.0 * dt;
        }
        for _ in &ids {
            ctx.draw_sprite(tex, x, 32.0, 16.0, 16.0, 0.0, Color::WHITE);
        }
        ctx.end_frame();
    }

    // 120 accumulated f32 additions; allow for rounding drift.
    assert!((ctx.elapsed() - 1.0).abs() < 1e-3);
    assert!((x - 60.0).abs() < 1e-3);
    assert_eq!(ctx.backend().sprites_submitted(), 8 * 120);
    assert_eq!(ctx.entity_count(), 8);
    assert_eq!(ctx.backend().last_clear(), Color::from_hex(0x336699));
}
