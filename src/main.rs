//! Headless sprite animation preview tool.
//!
//! Loads animation definitions (from a JSON file or a built-in sample), plays
//! one of them on a simulated entity at a fixed tick rate, and logs every
//! displayed frame. Useful for checking frame timing of authored definitions
//! without a window or renderer.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --animations assets/animations.json --play explosion --fps 60
//! ```

mod components;
mod events;
mod resources;
mod systems;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy_ecs::prelude::*;
use clap::Parser;
use log::info;

use crate::components::animator::Animator;
use crate::components::sprite::Sprite;
use crate::events::animation::AnimationFinishedEvent;
use crate::resources::animationstore::{AnimationStore, Frame, SpriteAnimation};
use crate::resources::worldtime::WorldTime;
use crate::systems::animator::{animate, play_defaults};
use crate::systems::time::update_world_time;

/// Headless sprite animation preview
#[derive(Parser)]
#[command(version, about = "Plays a sprite animation without a renderer and logs frame changes")]
struct Cli {
    /// Path to a JSON animation definitions file. Uses a built-in sample when omitted.
    #[arg(long, value_name = "PATH")]
    animations: Option<PathBuf>,

    /// Key of the animation to play.
    #[arg(long, default_value = "demo")]
    play: String,

    /// Simulated ticks per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Stop after this many simulated seconds even if still playing.
    #[arg(long, default_value_t = 10.0)]
    max_seconds: f32,
}

fn builtin_store() -> AnimationStore {
    let mut store = AnimationStore::new();
    store.insert(
        "demo",
        SpriteAnimation::new(vec![
            Frame::new("demo_0", 0.25),
            Frame::new("demo_1", 0.25),
            Frame::new("demo_2", 0.25),
            Frame::new("demo_3", 0.25),
        ])
        .with_first_frame_at_end(),
    );
    store
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let store = match &cli.animations {
        Some(path) => match AnimationStore::load_json_file(path) {
            Ok(store) => store,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => builtin_store(),
    };
    if store.get(&cli.play).is_none() {
        eprintln!("Error: animation '{}' not found in store", cli.play);
        std::process::exit(1);
    }

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(store);

    world.spawn((
        Sprite::new("none", 16.0, 16.0),
        Animator::new().with_default(&cli.play),
    ));

    let done = Arc::new(AtomicBool::new(false));
    let done_flag = done.clone();
    world.add_observer(move |trigger: On<AnimationFinishedEvent>| {
        info!("Animation finished on entity {:?}", trigger.event().entity);
        done_flag.store(true, Ordering::SeqCst);
    });
    world.flush();

    let mut schedule = Schedule::default();
    schedule.add_systems((play_defaults, animate).chain());

    let dt = 1.0 / cli.fps;
    let mut last_key = String::new();

    while !done.load(Ordering::SeqCst) {
        update_world_time(&mut world, dt);
        schedule.run(&mut world);

        let time = *world.resource::<WorldTime>();
        let mut query = world.query::<&Sprite>();
        for sprite in query.iter(&world) {
            if sprite.tex_key != last_key {
                info!("t={:.3}s frame '{}'", time.elapsed, sprite.tex_key);
                last_key = sprite.tex_key.clone();
            }
        }

        if time.elapsed >= cli.max_seconds {
            info!("Reached {:.1}s simulated time, stopping", cli.max_seconds);
            break;
        }
    }
}
