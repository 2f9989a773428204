use std::io::Write;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::warn;

use rucsearch_core::LookupError;

/// Narrow capability boundary around the OCR engine so the pipeline can be
/// tested without spawning a process.
#[async_trait]
pub trait CaptchaReader: Send + Sync {
    /// Reads a captcha image and returns the 4-character candidate text.
    async fn recognize(&self, image: &[u8]) -> Result<String, LookupError>;
}

/// Shells out to tesseract in single-line mode with an uppercase-only
/// whitelist, the way the registry's captchas are drawn.
pub struct TesseractReader {
    binary: String,
}

impl TesseractReader {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Whether the OCR binary can be spawned at all. Used as a startup
    /// check; recognition still fails per-operation if it lies.
    pub async fn available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .map(|out| out.status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl CaptchaReader for TesseractReader {
    async fn recognize(&self, image: &[u8]) -> Result<String, LookupError> {
        // Unique random name, collision-free across concurrent operations.
        let mut file =
            NamedTempFile::new().map_err(|e| LookupError::Unexpected(e.to_string()))?;
        file.write_all(image)
            .map_err(|e| LookupError::Unexpected(e.to_string()))?;

        let output = Command::new(&self.binary)
            .arg(file.path())
            .arg("stdout")
            .args(["--psm", "7"])
            .args(["-c", "tessedit_char_whitelist=ABCDEFGHIJKLMNOPQRSTUVWXYZ"])
            .output()
            .await
            .map_err(|e| LookupError::Unexpected(e.to_string()))?;

        if !output.status.success() {
            retain_for_diagnosis(file);
            return Err(LookupError::CaptchaInvalid);
        }

        let candidate = candidate_from_stdout(&output.stdout);
        if candidate.is_empty() {
            retain_for_diagnosis(file);
            return Err(LookupError::CaptchaInvalid);
        }

        // The temp file is deleted on drop, i.e. only when recognition
        // produced something.
        Ok(candidate)
    }
}

/// Failed attempts leave the image behind so the engine invocation can be
/// replayed by hand.
fn retain_for_diagnosis(file: NamedTempFile) {
    match file.keep() {
        Ok((_, path)) => {
            warn!(image = %path.display(), "captcha recognition failed, image retained")
        }
        Err(e) => warn!(error = %e, "captcha recognition failed, image not retained"),
    }
}

/// Exactly the first four characters of the engine's stdout.
fn candidate_from_stdout(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout).chars().take(4).collect()
}
