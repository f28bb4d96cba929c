//! slidereel turns a list of narrated slides into a frame-accurate video composition.
//!
//! # Pipeline overview
//!
//! 1. **Prepare**: [`AssetPipeline::prepare`] synthesizes missing narration and converts
//!    inline (`data:`) media into durable references, reporting progress as it goes.
//! 2. **Compile**: [`Timeline::compile`] lays the scenes end to end as frame intervals.
//! 3. **Evaluate**: [`FrameEvaluator::eval_frame`] resolves an absolute frame to the active
//!    scene, its transition and element animation styles, its layout tree and its captions.
//!
//! Per-frame evaluation is pure and never fails on bad animation or caption data; IO lives
//! behind the async collaborator traits in [`services`].
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod captions;
pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod services;
pub mod timeline;

pub use animation::element::{element_style, element_styles, initial_style};
pub use animation::spring::{SpringConfig, interpolate, spring_progress};
pub use animation::style::{LengthUnit, Transform, VisualStyle};
pub use animation::transition::{
    DEFAULT_TRANSITION_FRAMES, TransitionParams, scene_style_at, scene_transition_style,
};
pub use assets::media::{InlineMedia, MediaKind, is_inline, measure_duration};
pub use assets::pipeline::{AssetPipeline, CancelFlag, WorkItem};
pub use assets::progress::{
    NoProgress, PrepareProgress, PrepareStatus, ProgressSink, ProgressStore,
};
pub use captions::sync::{CaptionDisplayState, CaptionWord, render_caption_state};
pub use config::{AppConfig, PlaybackConfig};
pub use foundation::core::{Fps, FrameIndex, FrameRange, Vec2};
pub use foundation::error::{SlideReelError, SlideReelResult};
pub use foundation::math::Rng64;
pub use render::frame::{EvaluatedFrame, FrameEvaluator};
pub use render::layout::{ImageFit, RenderNode, RenderTree, render_layout};
pub use scene::model::{
    AnimationKind, Easing, ElementAnimation, ElementName, Layout, LayoutContent, Project, Scene,
    Theme, ThemeOverride,
};
pub use scene::settings::{
    CaptionPosition, CaptionSettings, CaptionStyle, TransitionDirection, TransitionType,
    VideoSettings,
};
pub use services::{
    ImageGenerator, MediaStore, NarrationSynthesizer, SceneRepository, ScenePatch,
};
pub use timeline::compile::{AudioCue, Timeline, TimelineEntry};
