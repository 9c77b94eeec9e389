//! Ember2D demo entry point.
//!
//! A lightweight 2D engine core:
//! - generational entity registry owned by a [`Context`]
//! - value components ([`Transform2D`], [`Sprite`])
//! - per-frame input sampling with edge detection
//! - immediate-mode draw calls and AABB collision queries
//!
//! This executable drives the core through the headless backend for a fixed
//! number of frames: it spawns a handful of moving sprites, bounces them off
//! the window bounds and reports the draw/collision totals. Windowed/GPU
//! backends are separate crates implementing [`Backend`](ember2d::backend::Backend).
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 240
//! ```

use clap::Parser;
use std::path::PathBuf;

use ember2d::backend::HeadlessBackend;
use ember2d::collision::check_aabb_overlap;
use ember2d::components::{Sprite, Transform2D};
use ember2d::context::Context;
use ember2d::entity::EntityId;
use ember2d::math::{Color, Rect, Vec2};
use ember2d::resources::EngineConfig;

/// Ember2D headless demo
#[derive(Parser)]
#[command(version, about = "Ember2D engine core, driven headless")]
struct Cli {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 240)]
    frames: u64,

    /// Number of sprites to spawn.
    #[arg(long, default_value_t = 16)]
    sprites: u32,

    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,
}

struct DemoEntity {
    id: EntityId,
    transform: Transform2D,
    sprite: Sprite,
    velocity: Vec2,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = EngineConfig::with_path(cli.config);
    config.load_from_file().ok(); // ignore errors, use defaults

    let bounds = Vec2::new(config.window_width as f32, config.window_height as f32);
    let mut ctx = Context::create(HeadlessBackend::new(config.fixed_delta));
    ctx.set_clear_color(Color::from_hex(0x66B2E5)); // sky blue

    let texture = ctx.load_texture("assets/textures/ember.png");

    // The component storage layer is the host's concern; the demo keeps a
    // flat list next to the context.
    let mut entities: Vec<DemoEntity> = (0..cli.sprites)
        .map(|_| {
            let speed = 40.0 + fastrand::f32() * 120.0;
            let angle = fastrand::f32() * std::f32::consts::TAU;
            DemoEntity {
                id: ctx.spawn(),
                transform: Transform2D::from_position(
                    fastrand::f32() * bounds.x,
                    fastrand::f32() * bounds.y,
                ),
                sprite: Sprite::new(texture).with_custom_size(16.0, 16.0),
                velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
            }
        })
        .collect();
    log::info!("spawned {} entities", ctx.entity_count());

    let mut overlap_events: u64 = 0;

    while !ctx.should_close() && ctx.frame_count() < cli.frames {
        let dt = ctx.begin_frame();

        for entity in entities.iter_mut() {
            entity
                .transform
                .translate(entity.velocity.x * dt, entity.velocity.y * dt);

            // Bounce off the window bounds.
            let pos = entity.transform.position;
            if (pos.x < 0.0 && entity.velocity.x < 0.0)
                || (pos.x > bounds.x && entity.velocity.x > 0.0)
            {
                entity.velocity.x = -entity.velocity.x;
            }
            if (pos.y < 0.0 && entity.velocity.y < 0.0)
                || (pos.y > bounds.y && entity.velocity.y > 0.0)
            {
                entity.velocity.y = -entity.velocity.y;
            }
        }

        // Count pairwise overlaps of the sprites' world rects.
        for i in 0..entities.len() {
            for j in (i + 1)..entities.len() {
                if check_aabb_overlap(world_rect(&entities[i]), world_rect(&entities[j])) {
                    overlap_events += 1;
                }
            }
        }

        for entity in &entities {
            let size = entity.sprite.custom_size().unwrap_or(Vec2::new(16.0, 16.0));
            let pos = entity.transform.position;
            ctx.draw_sprite(
                entity.sprite.texture,
                pos.x,
                pos.y,
                size.x,
                size.y,
                entity.transform.rotation,
                entity.sprite.color,
            );
        }
        ctx.draw_quad(0.0, bounds.y - 4.0, bounds.x, 4.0, Color::BLACK);

        ctx.end_frame();
    }

    // Despawn everything and verify the registry drains to zero.
    let ids: Vec<EntityId> = entities.drain(..).map(|e| e.id).collect();
    let despawned = ctx.despawn_batch(&ids);
    log::info!(
        "simulated {} frames ({:.2}s), {} sprite draws, {} overlaps, despawned {}",
        ctx.frame_count(),
        ctx.elapsed(),
        ctx.backend().sprites_submitted(),
        overlap_events,
        despawned
    );

    ctx.destroy();
}

fn world_rect(entity: &DemoEntity) -> Rect {
    let size = entity.sprite.custom_size().unwrap_or(Vec2::new(16.0, 16.0));
    let pos = entity.transform.position;
    Rect::new(pos.x, pos.y, size.x, size.y)
}
