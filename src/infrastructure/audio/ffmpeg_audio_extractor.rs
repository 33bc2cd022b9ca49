use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioExtractionError, AudioExtractor};
use crate::domain::SpeedFactor;

const ATEMPO_MIN: f32 = 0.5;
const ATEMPO_MAX: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
        }
    }

    fn codec_args(&self) -> &'static [&'static str] {
        match self {
            AudioFormat::Mp3 => &["-codec:a", "libmp3lame", "-q:a", "4"],
            AudioFormat::Wav => &["-codec:a", "pcm_s16le"],
        }
    }
}

impl TryFrom<&str> for AudioFormat {
    type Error = AudioExtractionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            other => Err(AudioExtractionError::ExtractionFailed(format!(
                "unsupported audio format: {other}. Expected: mp3 or wav"
            ))),
        }
    }
}

/// Audio extraction through the `ffmpeg` command line tool.
pub struct FfmpegAudioExtractor {
    binary: PathBuf,
    format: AudioFormat,
}

impl FfmpegAudioExtractor {
    pub fn new(binary: impl Into<PathBuf>, format: AudioFormat) -> Self {
        Self {
            binary: binary.into(),
            format,
        }
    }

    fn build_args(&self, media_path: &Path, output: &Path, speed_factor: SpeedFactor) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-y".into(),
            "-i".into(),
            media_path.display().to_string(),
            "-vn".into(),
            "-ac".into(),
            "1".into(),
            "-ar".into(),
            "16000".into(),
        ];

        if let Some(filter) = atempo_filter_chain(speed_factor) {
            args.push("-filter:a".into());
            args.push(filter);
        }

        args.extend(self.format.codec_args().iter().map(|a| a.to_string()));
        args.push(output.display().to_string());
        args
    }
}

/// The `atempo` filter graph for a playback-rate change, or `None` at 1.0.
///
/// A single `atempo` only accepts factors in `[0.5, 2.0]`, so larger changes
/// are split into a chain whose product is the requested factor.
pub fn atempo_filter_chain(speed_factor: SpeedFactor) -> Option<String> {
    if speed_factor.is_identity() {
        return None;
    }

    let mut remaining = speed_factor.value();
    let mut stages: Vec<f32> = Vec::new();

    while remaining > ATEMPO_MAX {
        stages.push(ATEMPO_MAX);
        remaining /= ATEMPO_MAX;
    }
    while remaining < ATEMPO_MIN {
        stages.push(ATEMPO_MIN);
        remaining /= ATEMPO_MIN;
    }
    stages.push(remaining);

    Some(
        stages
            .iter()
            .map(|factor| format!("atempo={factor}"))
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Verifies that `binary` runs and returns its version banner.
pub async fn check_ffmpeg_binary(binary: &Path) -> Result<String, AudioExtractionError> {
    let output = Command::new(binary)
        .arg("-version")
        .output()
        .await
        .map_err(|e| AudioExtractionError::ToolUnavailable(format!("{}: {e}", binary.display())))?;

    if !output.status.success() {
        return Err(AudioExtractionError::ToolUnavailable(format!(
            "{} -version exited with {}",
            binary.display(),
            output.status
        )));
    }

    let banner = String::from_utf8_lossy(&output.stdout);
    Ok(banner.lines().next().unwrap_or_default().to_string())
}

#[async_trait]
impl AudioExtractor for FfmpegAudioExtractor {
    #[tracing::instrument(
        skip(self, work_dir, speed_factor),
        fields(speed_factor = %speed_factor, format = self.format.extension())
    )]
    async fn extract_audio(
        &self,
        media_path: &Path,
        work_dir: &Path,
        speed_factor: SpeedFactor,
    ) -> Result<PathBuf, AudioExtractionError> {
        let output_path = work_dir.join(format!("audio.{}", self.format.extension()));
        let args = self.build_args(media_path, &output_path, speed_factor);

        tracing::debug!(args = ?args, "Running ffmpeg");

        let output = Command::new(&self.binary)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AudioExtractionError::ToolUnavailable(format!(
                    "{}: {e}",
                    self.binary.display()
                )),
                _ => AudioExtractionError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("does not contain any stream")
                || stderr.contains("matches no streams")
            {
                return Err(AudioExtractionError::NoAudioTrack);
            }
            let tail: Vec<&str> = stderr.lines().rev().take(5).collect();
            return Err(AudioExtractionError::ExtractionFailed(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                tail.into_iter().rev().collect::<Vec<_>>().join(" | ")
            )));
        }

        let metadata = tokio::fs::metadata(&output_path).await?;
        if metadata.len() == 0 {
            return Err(AudioExtractionError::NoAudioTrack);
        }

        tracing::info!(bytes = metadata.len(), "Audio track extracted");

        Ok(output_path)
    }
}
