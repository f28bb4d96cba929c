//! Playback and process configuration.

use std::path::PathBuf;

use crate::{
    animation::transition::{DEFAULT_TRANSITION_FRAMES, TransitionParams},
    foundation::{
        core::Fps,
        error::{SlideReelError, SlideReelResult},
    },
    scene::settings::VideoSettings,
};

/// Frame rate and transition window used by the compiler and the frame evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub fps: Fps,
    pub transition_frames: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            transition_frames: DEFAULT_TRANSITION_FRAMES,
        }
    }
}

impl PlaybackConfig {
    pub fn transition_params(&self, settings: &VideoSettings) -> TransitionParams {
        TransitionParams::from_settings(settings, self.transition_frames)
    }
}

/// Process-level settings for the CLI and the default collaborators.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Root that durable media is written under and served from.
    pub public_dir: PathBuf,
    /// Narration synthesis endpoint. `None` disables synthesis.
    pub tts_url: Option<String>,
    pub tts_api_key: Option<String>,
    pub voice: String,
    pub fps: Fps,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
            tts_url: None,
            tts_api_key: None,
            voice: "alloy".to_string(),
            fps: Fps::default(),
        }
    }
}

impl AppConfig {
    /// Create config from `SLIDEREEL_*` environment variables.
    pub fn from_env() -> SlideReelResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading variables through `get`.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> SlideReelResult<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let fps = match non_empty("SLIDEREEL_FPS") {
            Some(raw) => {
                let num = raw.trim().parse::<u32>().map_err(|_| {
                    SlideReelError::validation(format!("SLIDEREEL_FPS is not an integer: '{raw}'"))
                })?;
                Fps::new(num, 1)?
            }
            None => defaults.fps,
        };

        Ok(Self {
            public_dir: non_empty("SLIDEREEL_PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            tts_url: non_empty("SLIDEREEL_TTS_URL"),
            tts_api_key: non_empty("SLIDEREEL_TTS_API_KEY"),
            voice: non_empty("SLIDEREEL_VOICE").unwrap_or(defaults.voice),
            fps,
        })
    }

    pub fn playback(&self) -> PlaybackConfig {
        PlaybackConfig {
            fps: self.fps,
            ..PlaybackConfig::default()
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
