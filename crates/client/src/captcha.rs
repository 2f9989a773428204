use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use rucsearch_core::LookupError;

use crate::ocr::CaptchaReader;
use crate::session::Session;

static CAPTCHA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{4}$").unwrap());

/// The registry's captchas are always four uppercase letters.
pub fn is_valid_captcha(text: &str) -> bool {
    CAPTCHA_RE.is_match(text)
}

/// Fetches the captcha image over the session and runs it through the
/// reader. One attempt; a misread fails the whole operation.
pub async fn solve(session: &Session, reader: &dyn CaptchaReader) -> Result<String, LookupError> {
    let image = session.fetch_captcha_image().await?;
    let text = reader.recognize(&image).await?;
    if !is_valid_captcha(&text) {
        debug!(candidate = %text, "captcha candidate rejected");
        return Err(LookupError::CaptchaInvalid);
    }
    debug!(captcha = %text, "captcha recognized");
    Ok(text)
}
