//! Animation Tests
//!
//! Tests for:
//! - TrackStore reverse-scan sampling, window bounds and tie-breaks
//! - Clock resolution (global sequence, local sequence, no clock)
//! - InstancePlayback sequence advance and loop modes
//! - KeyframeTrack interpolation inside sequence windows
//! - Event objects, triggers, layers and attachment visibility

use std::sync::Arc;

use glam::{Quat, Vec3, Vec4};

use ember::animation::attachment::{AttachmentTransition, AttachmentVisibility};
use ember::animation::clock::{
    ClockSample, GlobalSequence, InstancePlayback, Sequence, SequenceLoopMode, resolve_clock,
};
use ember::animation::event_object::{EventObject, EventObjectKind, EventTrigger};
use ember::animation::layer::{LayerDefinition, LayerFlags};
use ember::animation::texture_animation::TextureAnimation;
use ember::animation::track_data::{TrackData, TrackValue};
use ember::animation::track_store::{StateSample, TrackStore};
use ember::animation::tracks::{InterpolationMode, KeyframeTrack};
use ember::animation::AnimatedValue;
use ember::core::blend::{BlendFactor, LayerFilterMode};
use ember::core::errors::EmberError;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn sequences() -> Vec<Sequence> {
    vec![Sequence::new("Stand", 0, 1000), Sequence::new("Walk", 1000, 2000)]
}

fn playing(sequence: usize, frame: u32) -> InstancePlayback {
    InstancePlayback {
        sequence: Some(sequence),
        frame,
        ..Default::default()
    }
}

// ============================================================================
// TrackStore: State Sampling
// ============================================================================

#[test]
fn sample_picks_most_recent_entry() {
    let store = TrackStore::new(vec![10, 20, 30]);
    assert_eq!(store.sample(25, 0, 100), StateSample::new(true, 1));
}

#[test]
fn sample_before_every_entry_falls_through() {
    // No entry is below the window start and none is <= 5,
    // so the scan exhausts the track.
    let store = TrackStore::new(vec![10, 20, 30]);
    assert_eq!(store.sample(5, 0, 100), StateSample::new(false, 0));
}

#[test]
fn sample_outside_window_is_off() {
    let store = TrackStore::new(vec![10, 20, 30]);
    for time in (0..40).chain(101..200) {
        assert_eq!(store.sample(time, 40, 100), StateSample::OFF, "time={time}");
    }
}

#[test]
fn sample_stops_at_entry_before_window_start() {
    let store = TrackStore::new(vec![10, 20, 30]);
    assert_eq!(store.sample(50, 40, 100), StateSample::new(false, 2));
}

#[test]
fn sample_window_end_is_inclusive() {
    let store = TrackStore::new(vec![10, 100]);
    assert_eq!(store.sample(100, 0, 100), StateSample::new(true, 1));
    assert_eq!(store.sample(101, 0, 100), StateSample::OFF);
}

#[test]
fn sample_unsorted_track_keeps_authoring_order() {
    let store = TrackStore::new(vec![30, 10, 20]);
    assert!(!store.is_ascending());

    // The last entry (20) is reached first in the reverse scan.
    assert_eq!(store.sample(25, 0, 100), StateSample::new(true, 2));
    // 20 > 15, then 10 <= 15.
    assert_eq!(store.sample(15, 0, 100), StateSample::new(true, 1));
    // 30 sits after both in time but before them in the array.
    assert_eq!(store.sample(35, 0, 100), StateSample::new(true, 2));
}

#[test]
fn sample_duplicate_frames_resolve_to_latest_entry() {
    let sorted = TrackStore::new(vec![10, 10, 10]);
    assert_eq!(sorted.sample(10, 0, 100), StateSample::new(true, 2));

    let unsorted = TrackStore::new(vec![10, 5, 10]);
    assert_eq!(unsorted.sample(12, 0, 100), StateSample::new(true, 2));
}

#[test]
fn sample_empty_track_is_off() {
    let store = TrackStore::default();
    assert_eq!(store.sample(10, 0, 100), StateSample::OFF);
}

// ============================================================================
// Clock Resolution
// ============================================================================

#[test]
fn global_sequence_cycles_counter() {
    let global = GlobalSequence::new(100).unwrap();
    let playback = InstancePlayback {
        counter: 250,
        ..Default::default()
    };

    let clock = resolve_clock(Some(global), &playback, &[]).unwrap();
    assert_eq!(
        clock,
        ClockSample {
            time: 50,
            start: 0,
            end: 100
        }
    );
}

#[test]
fn global_sequence_wins_over_local_playback() {
    let global = GlobalSequence::new(300).unwrap();
    let mut playback = playing(1, 1500);
    playback.counter = 310;

    let clock = resolve_clock(Some(global), &playback, &sequences()).unwrap();
    assert_eq!(clock.time, 10);
    assert_eq!(clock.end, 300);
}

#[test]
fn local_sequence_uses_its_interval() {
    let clock = resolve_clock(None, &playing(1, 1500), &sequences()).unwrap();
    assert_eq!(
        clock,
        ClockSample {
            time: 1500,
            start: 1000,
            end: 2000
        }
    );
}

#[test]
fn no_clock_without_sequence() {
    assert_eq!(resolve_clock(None, &InstancePlayback::default(), &sequences()), None);
    assert_eq!(resolve_clock(None, &playing(7, 0), &sequences()), None);
}

#[test]
fn global_sequence_deserializes_and_rejects_zero() {
    let global: GlobalSequence = serde_json::from_str("120").unwrap();
    assert_eq!(global.length(), 120);
    assert!(serde_json::from_str::<GlobalSequence>("0").is_err());
}

// ============================================================================
// InstancePlayback
// ============================================================================

#[test]
fn advance_loops_by_default() {
    let seqs = sequences();
    let mut playback = InstancePlayback::default();
    playback.set_sequence(Some(0), &seqs);
    assert_eq!(playback.frame, 0);

    playback.advance(1200, &seqs);
    assert_eq!(playback.frame, 199);
    assert_eq!(playback.counter, 1200);
    assert!(!playback.ended);
}

#[test]
fn advance_holds_non_looping_sequence() {
    let mut seqs = sequences();
    seqs[1].non_looping = true;

    let mut playback = InstancePlayback::default();
    playback.set_sequence(Some(1), &seqs);
    playback.advance(1500, &seqs);
    assert_eq!(playback.frame, 2000);
    assert!(playback.ended);

    playback.advance(100, &seqs);
    assert_eq!(playback.frame, 2000);
}

#[test]
fn advance_always_loop_overrides_flag() {
    let mut seqs = sequences();
    seqs[0].non_looping = true;

    let mut playback = InstancePlayback {
        loop_mode: SequenceLoopMode::Always,
        ..Default::default()
    };
    playback.set_sequence(Some(0), &seqs);
    playback.advance(1001, &seqs);
    assert_eq!(playback.frame, 0);
}

#[test]
fn set_unknown_sequence_stops_playback() {
    let seqs = sequences();
    let mut playback = playing(0, 10);
    playback.set_sequence(Some(9), &seqs);
    assert_eq!(playback.sequence, None);
}

// ============================================================================
// KeyframeTrack: Windowed Sampling
// ============================================================================

#[test]
fn track_linear_midpoint() {
    let track = KeyframeTrack::try_new(vec![0, 100], vec![0.0_f32, 10.0], InterpolationMode::Linear).unwrap();
    assert!(approx(track.sample_in_range(50, 0, 100).unwrap(), 5.0));
}

#[test]
fn track_dont_interp_holds_previous_key() {
    let track = KeyframeTrack::try_new(vec![0, 100], vec![0.0_f32, 10.0], InterpolationMode::DontInterp).unwrap();
    assert!(approx(track.sample_in_range(99, 0, 100).unwrap(), 0.0));
    assert!(approx(track.sample_in_range(100, 0, 100).unwrap(), 10.0));
}

#[test]
fn track_ignores_keys_outside_window() {
    let track =
        KeyframeTrack::try_new(vec![0, 100, 200], vec![0.0_f32, 10.0, 20.0], InterpolationMode::Linear).unwrap();

    // Only the key at 200 lies inside [150, 300].
    assert!(approx(track.sample_in_range(160, 150, 300).unwrap(), 20.0));
    assert!(approx(track.sample_in_range(250, 150, 300).unwrap(), 20.0));
    assert_eq!(track.sample_in_range(350, 300, 400), None);
}

#[test]
fn track_hermite_zero_tangents_midpoint() {
    let track = KeyframeTrack::with_tangents(
        vec![0, 100],
        vec![0.0_f32, 10.0],
        vec![0.0, 0.0],
        vec![0.0, 0.0],
        InterpolationMode::Hermite,
    )
    .unwrap();
    assert!(approx(track.sample_in_range(50, 0, 100).unwrap(), 5.0));
}

#[test]
fn track_bezier_midpoint() {
    let track = KeyframeTrack::with_tangents(
        vec![0, 100],
        vec![0.0_f32, 10.0],
        vec![0.0, 10.0],
        vec![0.0, 0.0],
        InterpolationMode::Bezier,
    )
    .unwrap();
    // 0 * 0.125 + 0 * 0.375 + 10 * 0.375 + 10 * 0.125
    assert!(approx(track.sample_in_range(50, 0, 100).unwrap(), 5.0));
}

#[test]
fn track_vec3_linear() {
    let track = KeyframeTrack::try_new(
        vec![0, 10],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        InterpolationMode::Linear,
    )
    .unwrap();
    let value = track.sample_in_range(5, 0, 10).unwrap();
    assert!(approx(value.x, 5.0) && approx(value.y, 10.0) && approx(value.z, 15.0));
}

#[test]
fn track_uint_never_interpolates() {
    let track = KeyframeTrack::try_new(vec![0, 100], vec![1_u32, 2], InterpolationMode::Linear).unwrap();
    assert_eq!(track.sample_in_range(99, 0, 100), Some(1));
    assert_eq!(track.sample_in_range(100, 0, 100), Some(2));
}

#[test]
fn track_variance_per_window() {
    let track = KeyframeTrack::try_new(vec![0, 100, 200], vec![1_u32, 1, 2], InterpolationMode::DontInterp).unwrap();
    assert!(!track.is_variant(0, 150));
    assert!(track.is_variant(0, 250));
    assert!(!track.is_variant(300, 400));
}

#[test]
fn track_construction_errors() {
    assert!(matches!(
        KeyframeTrack::<f32>::try_new(Vec::new(), Vec::new(), InterpolationMode::Linear),
        Err(EmberError::EmptyTrack)
    ));
    assert!(matches!(
        KeyframeTrack::with_tangents(vec![0, 1], vec![0.0_f32, 1.0], vec![0.0], vec![0.0, 0.0], InterpolationMode::Hermite),
        Err(EmberError::TrackLengthMismatch { what: "in tangents", .. })
    ));
    assert!(InterpolationMode::from_raw(4).is_err());
}

#[test]
fn track_without_tangents_degrades_to_linear() {
    let track = KeyframeTrack::try_new(vec![0, 100], vec![0.0_f32, 10.0], InterpolationMode::Hermite).unwrap();
    assert_eq!(track.interpolation(), InterpolationMode::Linear);
}

#[test]
fn track_data_dispatches_by_shape() {
    let data = TrackData::from(KeyframeTrack::try_new(vec![0, 100], vec![0.0_f32, 1.0], InterpolationMode::Linear).unwrap());
    let clock = ClockSample {
        time: 25,
        start: 0,
        end: 100,
    };
    let value = data.sample_clock(clock).and_then(TrackValue::as_float).unwrap();
    assert!(approx(value, 0.25));
    assert_eq!(data.frames(), &[0, 100]);
}

// ============================================================================
// Event Objects
// ============================================================================

#[test]
fn event_object_samples_through_clock() {
    let tracks = Arc::new(TrackStore::new(vec![100, 1200, 1800]));
    let event = EventObject::new("SPLxBLOD", Arc::clone(&tracks), None).unwrap();
    assert_eq!(event.kind, EventObjectKind::Splat);
    assert_eq!(event.id, "BLOD");

    let seqs = sequences();
    assert_eq!(event.value(&playing(1, 1500), &seqs), StateSample::new(true, 1));
    // Entry 100 lies before Walk's window.
    assert_eq!(event.value(&playing(1, 1100), &seqs), StateSample::new(false, 0));
    assert_eq!(event.value(&InstancePlayback::default(), &seqs), StateSample::OFF);
}

#[test]
fn event_object_rejects_unknown_prefix() {
    let tracks = Arc::new(TrackStore::default());
    assert!(matches!(
        EventObject::new("SNDxATCK", tracks, None),
        Err(EmberError::UnknownEventType(_))
    ));
}

#[test]
fn trigger_fires_once_per_entry() {
    let mut trigger = EventTrigger::default();
    assert!(!trigger.poll(StateSample::OFF));
    assert!(trigger.poll(StateSample::new(true, 1)));
    assert!(!trigger.poll(StateSample::new(true, 1)));
    assert!(trigger.poll(StateSample::new(true, 2)));
    assert!(!trigger.poll(StateSample::new(false, 2)));
    assert!(trigger.poll(StateSample::new(true, 2)));
}

// ============================================================================
// Layers
// ============================================================================

#[test]
fn layer_render_state_follows_filter_mode_and_flags() {
    let layer = LayerDefinition::new(
        LayerFilterMode::Blend,
        LayerFlags::TWO_SIDED | LayerFlags::NO_DEPTH_TEST,
        0,
        1.0,
        None,
        None,
        &[],
    );
    let state = layer.render_state();
    assert_eq!(state.blend, Some((BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha)));
    assert!(!state.cull_back_faces);
    assert!(!state.depth_test);
    assert!(!state.depth_mask);
    assert!(!state.alpha_test);

    let cutout = LayerDefinition::new(LayerFilterMode::Transparent, LayerFlags::empty(), 0, 1.0, None, None, &[]);
    let state = cutout.render_state();
    assert!(state.alpha_test && state.depth_mask && state.blend.is_none());
}

#[test]
fn layer_alpha_animates_within_sequence() {
    let seqs = sequences();
    let alpha = AnimatedValue::new(
        Arc::new(KeyframeTrack::try_new(vec![0, 1000], vec![0.0_f32, 1.0], InterpolationMode::Linear).unwrap()),
        None,
    );
    let slots = AnimatedValue::new(
        Arc::new(KeyframeTrack::try_new(vec![1000, 1500], vec![0_u32, 3], InterpolationMode::DontInterp).unwrap()),
        None,
    );
    let layer = LayerDefinition::new(
        LayerFilterMode::Additive,
        LayerFlags::UNSHADED,
        7,
        0.8,
        Some(alpha),
        Some(slots),
        &seqs,
    );

    assert!(approx(layer.alpha(&playing(0, 500), &seqs), 0.5));
    assert!(approx(layer.alpha(&InstancePlayback::default(), &seqs), 0.8));
    assert_eq!(layer.texture_id(&playing(1, 1600), &seqs), 3);
    assert_eq!(layer.texture_id(&InstancePlayback::default(), &seqs), 7);

    assert!(layer.variants(0).alpha);
    assert!(!layer.variants(0).slot);
    assert!(layer.variants(1).slot);
    assert!(layer.has_slot_anim());
}

#[test]
fn layer_without_texture_animation_uses_identity_transform() {
    let seqs = sequences();
    let layer = LayerDefinition::new(LayerFilterMode::Blend, LayerFlags::empty(), 0, 1.0, None, None, &seqs);
    let playback = playing(0, 500);

    assert_eq!(layer.translation(&playback, &seqs), Vec3::ZERO);
    assert_eq!(layer.rotation(&playback, &seqs), Quat::IDENTITY);
    assert_eq!(layer.scale(&playback, &seqs), Vec3::ONE);
    assert!(!layer.has_translation_anim());
    assert!(!layer.has_rotation_anim());
    assert!(!layer.has_scale_anim());
}

#[test]
fn layer_texture_animation_samples_and_flags_variants() {
    let seqs = sequences();
    let identity = Vec4::new(0.0, 0.0, 0.0, 1.0);
    let animation = TextureAnimation {
        translation: Some(AnimatedValue::new(
            Arc::new(
                KeyframeTrack::try_new(vec![0, 1000], vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)], InterpolationMode::Linear)
                    .unwrap(),
            ),
            None,
        )),
        rotation: Some(AnimatedValue::new(
            Arc::new(KeyframeTrack::try_new(vec![1000, 2000], vec![identity, identity], InterpolationMode::Linear).unwrap()),
            None,
        )),
        scale: Some(AnimatedValue::new(
            Arc::new(
                KeyframeTrack::try_new(vec![1000, 1500], vec![Vec3::ONE, Vec3::splat(2.0)], InterpolationMode::Linear)
                    .unwrap(),
            ),
            None,
        )),
    };
    let layer = LayerDefinition::new(LayerFilterMode::Additive, LayerFlags::empty(), 0, 1.0, None, None, &seqs)
        .with_texture_animation(animation, &seqs);

    let translation = layer.translation(&playing(0, 500), &seqs);
    assert!(approx(translation.x, 5.0) && approx(translation.y, 0.0));

    let scale = layer.scale(&playing(1, 1250), &seqs);
    assert!(approx(scale.x, 1.5) && approx(scale.z, 1.5));

    let rotation = layer.rotation(&playing(1, 1500), &seqs);
    assert!(approx(rotation.w, 1.0));

    // Without a clock every track falls back to identity.
    assert_eq!(layer.scale(&InstancePlayback::default(), &seqs), Vec3::ONE);

    assert!(layer.variants(0).translation);
    assert!(!layer.variants(1).translation);
    assert!(layer.variants(1).scale);
    assert!(!layer.variants(0).scale);
    assert!(layer.has_translation_anim());
    assert!(layer.has_scale_anim());
    assert!(!layer.has_rotation_anim());
}

// ============================================================================
// Attachments
// ============================================================================

#[test]
fn attachment_shows_above_threshold_and_restarts() {
    let mut visibility = AttachmentVisibility::default();
    assert_eq!(visibility.update(0.05), AttachmentTransition::Unchanged);
    assert_eq!(
        visibility.update(0.5),
        AttachmentTransition::Shown { restart_sequence: 0 }
    );
    assert_eq!(visibility.update(0.6), AttachmentTransition::Unchanged);
    assert_eq!(visibility.update(0.1), AttachmentTransition::Hidden);
    assert!(!visibility.is_visible());
}
