use thiserror::Error;

/// Everything that can go wrong during a lookup, collapsed to the few
/// conditions a caller can actually act on.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The query failed classification (not a DNI, RUC or plausible name).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The classified kind is not valid for the requested operation.
    #[error("unsupported input for this operation: {0}")]
    UnsupportedInput(String),

    /// OCR produced unusable or empty text. Distinct so callers can decide
    /// whether to re-invoke the operation.
    #[error("captcha could not be recognized")]
    CaptchaInvalid,

    /// The registry itself rendered an error banner; text passed through.
    #[error("registry reported: {0}")]
    Site(String),

    /// Network failure, unparseable HTML, anything not otherwise classified.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl LookupError {
    /// True for errors the end user can correct themselves. The HTTP
    /// front-end maps these to 400, everything else to 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LookupError::InvalidInput(_) | LookupError::UnsupportedInput(_)
        )
    }
}
