//! Headless FX Driver
//!
//! Runs a fixed-step frame loop over one particle emitter and one splat
//! event object, and logs per-frame statistics.
//!
//! Usage:
//! - `fx_headless` runs the built-in emitter for 240 frames
//! - `fx_headless <definition.json> [frames]` loads an emitter definition
//!
//! Set `RUST_LOG=debug` (or `trace`) for per-emitter output.

use std::sync::Arc;

use anyhow::Context;
use glam::{Quat, Vec3, Vec4};
use rand::{SeedableRng, rngs::StdRng};

use ember::animation::{EventObject, EventTrigger, InstancePlayback, Sequence, TrackStore};
use ember::core::blend::EmitterFilterMode;
use ember::core::{FrameClock, NodeArena, WorldNode};
use ember::particles::{
    CameraBasis, EmitterDefinition, EmitterParams, HeadOrTail, Interval, LifecycleIntervals, ParticleEmitter,
    SimulationSettings, SplatRecord,
};

const FRAME_TIME: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 240;

fn builtin_definition() -> anyhow::Result<EmitterDefinition> {
    let lifecycle = LifecycleIntervals::new(
        0.4,
        [Interval::new(0.0, 4.0, 1), Interval::new(4.0, 8.0, 1)],
        [Interval::new(8.0, 12.0, 1), Interval::new(12.0, 16.0, 1)],
        &[
            Vec4::new(255.0, 220.0, 120.0, 255.0),
            Vec4::new(255.0, 120.0, 40.0, 200.0),
            Vec4::new(60.0, 60.0, 60.0, 0.0),
        ],
        &[8.0, 20.0, 32.0],
    )?;

    Ok(EmitterDefinition {
        name: String::from("builtin_fire"),
        lifespan: 1.5,
        lifecycle,
        columns: 4,
        rows: 4,
        tail_length: 0.2,
        model_space: false,
        xy_quad: false,
        head_or_tail: HeadOrTail::Both,
        filter_mode: EmitterFilterMode::Additive,
        texture_id: 0,
    })
}

fn blood_splat() -> SplatRecord {
    SplatRecord {
        columns: 2,
        rows: 2,
        scale: 40.0,
        lifespan: 2.0,
        decay: 3.0,
        uv_lifespan: Interval::new(0.0, 4.0, 1),
        uv_decay: Interval::new(3.0, 4.0, 1),
        colors: [
            Vec4::new(160.0, 0.0, 0.0, 255.0),
            Vec4::new(120.0, 0.0, 0.0, 200.0),
            Vec4::new(80.0, 0.0, 0.0, 0.0),
        ],
        blend_mode: EmitterFilterMode::Blend,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let definition = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            EmitterDefinition::from_json(&json).with_context(|| format!("parsing {path}"))?
        }
        None => builtin_definition()?,
    };
    let frames = match args.next() {
        Some(raw) => raw.parse::<u32>().with_context(|| format!("invalid frame count '{raw}'"))?,
        None => DEFAULT_FRAMES,
    };

    let settings = SimulationSettings {
        seed: Some(0x00E3_BE12),
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(settings.seed.unwrap_or_else(rand::random));

    let mut nodes = NodeArena::with_key();
    let emitter_node = nodes.insert(WorldNode::default());
    let camera = CameraBasis::from_rotation(Quat::from_rotation_x(-0.6));

    let params = EmitterParams {
        width: 20.0,
        length: 20.0,
        latitude: 15.0,
        speed: 120.0,
        variation: 30.0,
        gravity: 90.0,
        emission_rate: 40.0,
    };
    let mut emitter = ParticleEmitter::new(Arc::new(definition), emitter_node, settings.clone());

    // One splat per second of the "Walk" sequence.
    let sequences = vec![Sequence::new("Walk", 0, 2000)];
    let mut playback = InstancePlayback::default();
    playback.set_sequence(Some(0), &sequences);

    let splat_track = Arc::new(TrackStore::new(vec![0, 1000]));
    let event = EventObject::new("SPLxBLOD", splat_track, None)?;
    let mut trigger = EventTrigger::default();
    let mut splats = ParticleEmitter::new(
        Arc::new(blood_splat().emitter_definition()?),
        emitter_node,
        settings.clone(),
    );

    let mut clock = FrameClock::new(settings.max_frame_time);
    let mut vertices = Vec::new();

    log::info!(
        "running '{}' for {frames} frames ({:?} blend)",
        emitter.definition().name,
        emitter.blend()
    );

    for _ in 0..frames {
        let previous = clock.counter;
        clock.advance(FRAME_TIME);
        let dt = clock.dt_seconds();
        let dt_ms = clock.counter.wrapping_sub(previous);

        // Sway the emitter node so world-space particles trail behind it.
        let t = clock.counter as f32 / 1000.0;
        nodes[emitter_node] = WorldNode::from_trs(
            Vec3::ZERO,
            Vec3::new(t.sin() * 50.0, 0.0, 0.0),
            Quat::from_rotation_z(t * 0.5),
            Vec3::ONE,
        );

        playback.advance(dt_ms, &sequences);
        if trigger.poll(event.value(&playback, &sequences)) {
            let spawned = splats.emit(1, &EmitterParams::default(), &nodes, &mut rng);
            log::debug!("{:?} event '{}' fired, {spawned} splat(s)", event.kind, event.id);
        }

        let stats = emitter.update(dt, &params, &nodes, &camera, &mut rng);
        let splat_stats = splats.update(dt, &EmitterParams::default(), &nodes, &camera, &mut rng);

        vertices.clear();
        emitter.write_vertices(&mut vertices);
        splats.write_vertices(&mut vertices);

        if clock.frame_count % 60 == 0 {
            log::info!(
                "frame {:>4}: +{:<3} -{:<3} live {:<4} splats {:<2} vertices {}",
                clock.frame_count,
                stats.spawned,
                stats.expired,
                stats.live,
                splat_stats.live,
                vertices.len()
            );
        }
    }

    let retired = emitter.drain() + splats.drain();
    log::info!("done after {}ms of simulated time, retired {retired} particles", clock.counter);
    Ok(())
}
