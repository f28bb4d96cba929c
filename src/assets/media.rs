use base64::Engine as _;

use crate::foundation::{
    error::{SlideReelError, SlideReelResult},
    math::content_hash,
};

/// Byte rate assumed when narration audio cannot be decoded.
pub const HEURISTIC_BYTES_PER_SEC: f64 = 16_000.0;
/// Lower bound for heuristic narration durations.
pub const MIN_ESTIMATED_SECS: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Images,
}

impl MediaKind {
    /// Directory under the public root that media of this kind is written to.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Images => "images",
        }
    }
}

/// True for `data:` URLs, i.e. media embedded in the reference itself.
pub fn is_inline(reference: &str) -> bool {
    reference
        .trim_start()
        .get(..5)
        .is_some_and(|p| p.eq_ignore_ascii_case("data:"))
}

/// Decoded inline media.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineMedia {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

fn split_data_url(url: &str) -> SlideReelResult<(&str, &str)> {
    let trimmed = url.trim();
    if !is_inline(trimmed) {
        return Err(SlideReelError::validation("not a data: URL"));
    }
    let (header, payload) = trimmed[5..]
        .split_once(',')
        .ok_or_else(|| SlideReelError::validation("data: URL has no ',' separator"))?;
    let mut parts = header.split(';');
    let mime = parts.next().unwrap_or_default().trim();
    if !parts.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(SlideReelError::validation(
            "only base64 data: URLs are supported",
        ));
    }
    if !mime.is_empty() && !mime.contains('/') {
        return Err(SlideReelError::validation(format!(
            "data: URL has malformed mime type '{mime}'"
        )));
    }
    Ok((mime, payload))
}

/// Checks the `data:<mime>;base64,` header without decoding the payload.
pub fn validate_data_url(url: &str) -> SlideReelResult<()> {
    split_data_url(url).map(|_| ())
}

impl InlineMedia {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn parse_data_url(url: &str) -> SlideReelResult<Self> {
        let (mime, payload) = split_data_url(url)?;
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| SlideReelError::validation(format!("invalid base64 payload: {e}")))?;
        let mime_type = if mime.is_empty() {
            "application/octet-stream"
        } else {
            mime
        };
        Ok(Self::new(mime_type.to_ascii_lowercase(), bytes))
    }

    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    pub fn extension(&self) -> &'static str {
        let essence = self
            .mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        match essence {
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/wav" | "audio/wave" | "audio/x-wav" => "wav",
            "audio/ogg" | "audio/opus" => "ogg",
            "audio/webm" => "webm",
            "audio/aac" => "aac",
            "audio/mp4" | "audio/x-m4a" => "m4a",
            "audio/flac" => "flac",
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/svg+xml" => "svg",
            _ => "bin",
        }
    }

    /// `{sceneId}-{contentHash}.{ext}`; identical media for a scene always maps to one file.
    pub fn durable_filename(&self, scene_id: &str) -> String {
        let safe: String = scene_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!(
            "{safe}-{:016x}.{}",
            content_hash(&self.bytes),
            self.extension()
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DurationMethod {
    Decoded,
    Probed,
    Estimated,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MeasuredDuration {
    pub secs: f64,
    pub method: DurationMethod,
}

/// Duration of a PCM WAV payload, `None` when `bytes` is not a readable WAV.
pub fn wav_duration_secs(bytes: &[u8]) -> Option<f64> {
    let reader = hound::WavReader::new(std::io::Cursor::new(bytes)).ok()?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return None;
    }
    // Streamed WAVs may carry a placeholder data size; trust the bytes we hold.
    let frame_bytes = u64::from(spec.channels) * u64::from(spec.bits_per_sample).div_ceil(8);
    let held = (bytes.len() as u64).checked_div(frame_bytes).unwrap_or(0);
    let frames = u64::from(reader.duration()).min(held);
    Some(frames as f64 / f64::from(spec.sample_rate))
}

pub fn estimate_duration_secs(byte_len: usize) -> f64 {
    (byte_len as f64 / HEURISTIC_BYTES_PER_SEC).max(MIN_ESTIMATED_SECS)
}

/// Measures playback length, decoding when possible and estimating from size otherwise.
pub async fn measure_duration(media: &InlineMedia) -> MeasuredDuration {
    if let Some(secs) = wav_duration_secs(&media.bytes).filter(|s| *s > 0.0) {
        return MeasuredDuration {
            secs,
            method: DurationMethod::Decoded,
        };
    }
    match probe_duration_secs(&media.bytes).await {
        Ok(secs) if secs > 0.0 => {
            return MeasuredDuration {
                secs,
                method: DurationMethod::Probed,
            };
        }
        Ok(_) => {}
        Err(e) => tracing::debug!(error = %e, "duration probe unavailable, estimating"),
    }
    MeasuredDuration {
        secs: estimate_duration_secs(media.bytes.len()),
        method: DurationMethod::Estimated,
    }
}

#[cfg(feature = "media-ffmpeg")]
async fn probe_duration_secs(bytes: &[u8]) -> SlideReelResult<f64> {
    use std::process::Stdio;

    use tokio::io::AsyncWriteExt as _;

    let mut child = tokio::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
            "-i",
            "pipe:0",
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| SlideReelError::evaluation(format!("failed to run ffprobe: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        let payload = bytes.to_vec();
        tokio::spawn(async move {
            // ffprobe may close stdin once it has seen enough of the stream.
            let _ = stdin.write_all(&payload).await;
        });
    }
    let out = child
        .wait_with_output()
        .await
        .map_err(|e| SlideReelError::evaluation(format!("ffprobe did not finish: {e}")))?;
    if !out.status.success() {
        return Err(SlideReelError::evaluation(format!(
            "ffprobe failed: {}",
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    String::from_utf8_lossy(&out.stdout)
        .trim()
        .parse::<f64>()
        .map_err(|e| SlideReelError::evaluation(format!("ffprobe duration parse failed: {e}")))
}

#[cfg(not(feature = "media-ffmpeg"))]
async fn probe_duration_secs(_bytes: &[u8]) -> SlideReelResult<f64> {
    Err(SlideReelError::evaluation(
        "probing non-WAV audio requires the 'media-ffmpeg' feature",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
