use crate::scene::settings::{CaptionPosition, CaptionSettings, CaptionStyle};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionWord {
    pub text: String,
    /// Spoken already (or being spoken): drawn in the highlight color and heavier weight.
    pub highlighted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum CaptionDisplayState {
    Hidden,
    FullText {
        text: String,
        position: CaptionPosition,
    },
    #[serde(rename_all = "camelCase")]
    WordByWord {
        words: Vec<CaptionWord>,
        current_word_index: usize,
        highlight_color: String,
        position: CaptionPosition,
    },
    /// Every chunk is shown for the whole scene; lines are not revealed over time.
    LineByLine {
        lines: Vec<String>,
        position: CaptionPosition,
    },
}

/// Caption state `local_frame` frames into a scene lasting `scene_duration_frames`.
///
/// Word timing is a linear estimate proportional to elapsed scene time, not aligned to speech.
pub fn render_caption_state(
    narration: &str,
    settings: &CaptionSettings,
    local_frame: u64,
    scene_duration_frames: u64,
) -> CaptionDisplayState {
    let words: Vec<&str> = narration.split_whitespace().collect();
    if !settings.enabled || words.is_empty() {
        return CaptionDisplayState::Hidden;
    }
    let position = settings.position;
    match settings.style {
        CaptionStyle::FullText => CaptionDisplayState::FullText {
            text: words.join(" "),
            position,
        },
        CaptionStyle::WordByWord => {
            let current = current_word_index(words.len(), local_frame, scene_duration_frames);
            CaptionDisplayState::WordByWord {
                words: words
                    .iter()
                    .enumerate()
                    .map(|(i, w)| CaptionWord {
                        text: (*w).to_string(),
                        highlighted: i <= current,
                    })
                    .collect(),
                current_word_index: current,
                highlight_color: settings.highlight_color.clone(),
                position,
            }
        }
        CaptionStyle::LineByLine => CaptionDisplayState::LineByLine {
            lines: chunk_lines(&words, settings.max_lines),
            position,
        },
    }
}

/// `floor(local / duration * total_words)`, clamped to a valid index.
pub fn current_word_index(total_words: usize, local_frame: u64, scene_duration_frames: u64) -> usize {
    if total_words == 0 {
        return 0;
    }
    let duration = scene_duration_frames.max(1) as f64;
    let raw = ((local_frame as f64 / duration) * total_words as f64).floor();
    (raw.max(0.0) as usize).min(total_words - 1)
}

/// Splits `words` into exactly `max_lines` chunks of `ceil(len / max_lines)` words.
/// Trailing chunks may be short or empty.
pub fn chunk_lines(words: &[&str], max_lines: u32) -> Vec<String> {
    let lines = max_lines.max(1) as usize;
    let per_line = words.len().div_ceil(lines).max(1);
    (0..lines)
        .map(|i| {
            let start = (i * per_line).min(words.len());
            let end = ((i + 1) * per_line).min(words.len());
            words[start..end].join(" ")
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/captions/sync.rs"]
mod tests;
