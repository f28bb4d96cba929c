use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.public_dir, PathBuf::from("public"));
    assert_eq!(cfg.voice, "alloy");
    assert_eq!(cfg.fps, Fps { num: 30, den: 1 });
    assert!(cfg.tts_url.is_none());
    assert_eq!(cfg.playback(), PlaybackConfig::default());
}

#[test]
fn reads_overrides_and_ignores_blank_values() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("SLIDEREEL_PUBLIC_DIR", "/srv/media"),
        ("SLIDEREEL_TTS_URL", "http://localhost:9000/tts"),
        ("SLIDEREEL_TTS_API_KEY", "  "),
        ("SLIDEREEL_VOICE", "nova"),
        ("SLIDEREEL_FPS", "60"),
    ]))
    .unwrap();
    assert_eq!(cfg.public_dir, PathBuf::from("/srv/media"));
    assert_eq!(cfg.tts_url.as_deref(), Some("http://localhost:9000/tts"));
    assert!(cfg.tts_api_key.is_none());
    assert_eq!(cfg.voice, "nova");
    assert_eq!(cfg.playback().fps, Fps { num: 60, den: 1 });
    assert_eq!(cfg.playback().transition_frames, 15);
}

#[test]
fn rejects_bad_fps() {
    assert!(AppConfig::from_lookup(lookup(&[("SLIDEREEL_FPS", "fast")])).is_err());
    assert!(AppConfig::from_lookup(lookup(&[("SLIDEREEL_FPS", "0")])).is_err());
}

#[test]
fn unrelated_variables_are_ignored() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("SLIDEREEL_PROGRESS_TTL_MS", "soon"),
        ("SLIDEREEL_VOICE", "echo"),
    ]))
    .unwrap();
    assert_eq!(cfg.voice, "echo");
}
