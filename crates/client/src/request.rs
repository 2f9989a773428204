use rucsearch_core::{LookupError, Query, QueryKind};

use crate::session::Session;

/// Builds the URL-encoded form for one classified query. Field names are
/// the registry's own form contract.
pub fn form_payload(
    query: &Query,
    captcha: &str,
    token: &str,
) -> Result<Vec<(String, String)>, LookupError> {
    let mut data: Vec<(String, String)> = vec![
        ("contexto".into(), "ti-it".into()),
        ("codigo".into(), captcha.into()),
        ("numRnd".into(), token.into()),
    ];

    match query.kind() {
        QueryKind::Dni => {
            data.push(("accion".into(), "consPorTipdoc".into()));
            data.push(("nrodoc".into(), query.raw().into()));
            data.push(("tipdoc".into(), "1".into()));
        }
        QueryKind::Name => {
            data.push(("accion".into(), "consPorRazonSoc".into()));
            data.push(("razSoc".into(), query.raw().into()));
        }
        QueryKind::Ruc => {
            data.push(("accion".into(), "consPorRuc".into()));
            data.push(("nroRuc".into(), query.raw().into()));
        }
        QueryKind::Invalid => {
            return Err(LookupError::UnsupportedInput(query.raw().into()));
        }
    }

    Ok(data)
}

/// Submits the form over the established session and returns the raw HTML
/// body. Network failure here is terminal; nothing is retried.
pub async fn submit(
    session: &Session,
    payload: &[(String, String)],
) -> Result<String, LookupError> {
    session
        .client()
        .post(&session.config().search_url)
        .form(payload)
        .send()
        .await
        .map_err(|e| LookupError::Unexpected(e.to_string()))?
        .text()
        .await
        .map_err(|e| LookupError::Unexpected(e.to_string()))
}
