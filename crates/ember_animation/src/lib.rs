//! Ember Animation
//!
//! Time-keyed data of animated model entities and the samplers that read it:
//!
//! - [`clock`]: global sequences, instance playback and [`resolve_clock`]
//! - [`track_store`]: boolean state tracks sampled by reverse scan
//! - [`tracks`]: typed keyframe tracks with MDX interpolation
//! - [`event_object`], [`layer`], [`texture_animation`], [`attachment`]: the
//!   entities built on them

pub mod animated;
pub mod attachment;
pub mod clock;
pub mod event_object;
pub mod layer;
pub mod texture_animation;
pub mod track_data;
pub mod track_store;
pub mod tracks;
pub mod values;

pub use animated::AnimatedValue;
pub use attachment::{AttachmentTransition, AttachmentVisibility};
pub use clock::{
    ClockSample, Frame, GlobalSequence, InstancePlayback, Sequence, SequenceInterval, SequenceLoopMode,
    resolve_clock,
};
pub use event_object::{EventObject, EventObjectKind, EventTrigger};
pub use layer::{LayerDefinition, LayerFlags, LayerRenderState, LayerVariants};
pub use texture_animation::TextureAnimation;
pub use track_data::{TrackData, TrackValue};
pub use track_store::{StateSample, TrackStore};
pub use tracks::{InterpolationMode, KeyframeTrack};
pub use values::Interpolatable;
