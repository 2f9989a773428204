pub mod captcha;
pub mod ocr;
pub mod request;
pub mod session;

use std::sync::Arc;

use tracing::info;

use rucsearch_core::{config::RegistryConfig, DetailRecord, LookupError, Query, QueryKind, ResultSet};

use crate::ocr::CaptchaReader;
use crate::session::Session;

/// The lookup pipeline: classify, establish a session, solve the captcha,
/// submit the form, parse the response. Each operation is sequential and
/// gets its own session; concurrent operations share nothing but `self`.
pub struct SunatClient {
    config: RegistryConfig,
    reader: Arc<dyn CaptchaReader>,
}

impl SunatClient {
    pub fn new(config: RegistryConfig, reader: Arc<dyn CaptchaReader>) -> Self {
        Self { config, reader }
    }

    /// Looks up taxpayers by DNI or name. A RUC names exactly one
    /// taxpayer, so it is answered from the detail page and wrapped into
    /// the same result shape instead of being bounced back to the caller.
    pub async fn search(&self, raw: &str) -> Result<ResultSet, LookupError> {
        let query = Query::classify(raw);
        match query.kind() {
            QueryKind::Invalid => Err(LookupError::UnsupportedInput(raw.to_string())),
            QueryKind::Ruc => self.detail(raw).await.map(ResultSet::from),
            QueryKind::Dni | QueryKind::Name => {
                let html = self.submit_query(&query).await?;
                rucsearch_parser::parse_search_page(&html)
            }
        }
    }

    /// Fetches the detail page for one RUC.
    pub async fn detail(&self, ruc: &str) -> Result<DetailRecord, LookupError> {
        let query = Query::classify(ruc);
        if query.kind() != QueryKind::Ruc {
            return Err(LookupError::InvalidInput(ruc.to_string()));
        }
        let html = self.submit_query(&query).await?;
        rucsearch_parser::parse_detail_page(&html)
    }

    async fn submit_query(&self, query: &Query) -> Result<String, LookupError> {
        let session = Session::establish(&self.config).await?;
        let token = session.fetch_token().await?;
        let code = captcha::solve(&session, self.reader.as_ref()).await?;
        let payload = request::form_payload(query, &code, &token)?;
        info!(kind = ?query.kind(), "submitting lookup");
        request::submit(&session, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedReader(&'static str);

    #[async_trait]
    impl CaptchaReader for FixedReader {
        async fn recognize(&self, _image: &[u8]) -> Result<String, LookupError> {
            Ok(self.0.to_string())
        }
    }

    fn client() -> SunatClient {
        SunatClient::new(RegistryConfig::default(), Arc::new(FixedReader("HJKM")))
    }

    #[tokio::test]
    async fn search_rejects_invalid_input_before_any_network_io() {
        let err = client().search("x 1").await.unwrap_err();
        assert!(matches!(err, LookupError::UnsupportedInput(_)));
    }

    #[tokio::test]
    async fn detail_rejects_non_ruc_before_any_network_io() {
        for input in ["53140230", "MICROSOFT PERU", "10441233909", ""] {
            let err = client().detail(input).await.unwrap_err();
            assert!(matches!(err, LookupError::InvalidInput(_)), "input {:?}", input);
        }
    }
}
