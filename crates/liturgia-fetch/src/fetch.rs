use crate::error::FetchError;
use liturgia_model::{LiturgyDocument, LiturgyPage};
use std::time::{Duration, Instant};

pub const DEFAULT_URL: &str = "https://liturgia.up.railway.app/v2/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where and how to fetch the liturgy document.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub url: String,
    /// Total time allowed for connecting, sending and reading the body.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: "liturgia/0.1 (daily liturgy reader)".to_string(),
        }
    }
}

impl FetchConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetch the liturgy document with a single GET.
///
/// Non-2xx responses become [`FetchError::Http`]; transport failures are
/// classified by [`FetchError::from_reqwest`]. A body that is not JSON of
/// the document's shape is [`FetchError::Unexpected`].
pub async fn fetch(config: &FetchConfig) -> Result<LiturgyDocument, FetchError> {
    let started = Instant::now();
    tracing::info!(url = %config.url, timeout_secs = config.timeout.as_secs_f64(), "Fetching liturgy");

    let result = fetch_inner(config).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => tracing::info!(url = %config.url, elapsed_ms, "Received liturgy document"),
        Err(e) => tracing::warn!(url = %config.url, elapsed_ms, error = %e, "Liturgy fetch failed"),
    }
    result
}

async fn fetch_inner(config: &FetchConfig) -> Result<LiturgyDocument, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()
        .map_err(|e| FetchError::unexpected(format!("failed to build HTTP client: {e}")))?;

    let response = client
        .get(&config.url)
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;

    let status = response.status();
    tracing::debug!(status = status.as_u16(), "Response status");
    if !status.is_success() {
        return Err(FetchError::Http { status: status.as_u16() });
    }

    let body = response.bytes().await.map_err(FetchError::from_reqwest)?;
    tracing::debug!(bytes = body.len(), "Received body");

    serde_json::from_slice(&body)
        .map_err(|e| FetchError::unexpected(format!("invalid liturgy JSON: {e}")))
}

/// Fetch the document and normalize it into a page.
///
/// This is the whole pipeline for one render cycle.
pub async fn fetch_and_normalize(config: &FetchConfig) -> Result<LiturgyPage, FetchError> {
    let doc = fetch(config).await?;
    let page = LiturgyPage::from_document(&doc)?;
    tracing::info!(
        date = %page.date,
        day = %page.liturgical_day,
        blocks = page.blocks.len(),
        "Normalized liturgy"
    );
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use liturgia_model::SectionKind;
    use mockito::Server;

    const BODY: &str = r#"{
        "data": "16/10/2026",
        "liturgia": "Sexta-feira da 28ª Semana do Tempo Comum",
        "cor": "Verde",
        "leituras": {
            "primeiraLeitura": [{ "referencia": "Ef 1,11-14", "titulo": "Leitura da Carta aos Efésios", "texto": "Irmãos..." }],
            "salmo": [{ "referencia": "Sl 32", "refrao": "Feliz o povo", "texto": "Ó justos..." }],
            "segundaLeitura": [],
            "evangelho": [{ "referencia": "Lc 12,1-7", "titulo": "Proclamação do Evangelho", "texto": "Naquele tempo..." }]
        }
    }"#;

    fn config_for(url: String) -> FetchConfig {
        FetchConfig::default()
            .with_url(url)
            .with_timeout(Duration::from_millis(500))
    }

    #[tokio::test]
    async fn test_fetch_and_normalize_ok() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let page = fetch_and_normalize(&config_for(format!("{}/v2/", server.url())))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.date, "16/10/2026");
        assert_eq!(page.blocks.len(), 3);
        assert_eq!(page.blocks[1].section, SectionKind::Psalm);
        assert_eq!(page.blocks[1].heading, "Feliz o povo");
    }

    #[tokio::test]
    async fn test_http_status_is_preserved() {
        let mut server = Server::new_async().await;
        for status in [404, 503] {
            let path = format!("/status/{status}");
            let _mock = server
                .mock("GET", path.as_str())
                .with_status(status)
                .create_async()
                .await;

            let err = fetch(&config_for(format!("{}{path}", server.url())))
                .await
                .unwrap_err();
            match err {
                FetchError::Http { status: got } => assert_eq!(got, status as u16),
                other => panic!("expected HTTP error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold connections without ever answering.
        let holder = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = FetchConfig::default()
            .with_url(format!("http://{addr}/v2/"))
            .with_timeout(Duration::from_millis(200));
        let err = fetch(&config).await.unwrap_err();
        holder.abort();

        assert!(matches!(err, FetchError::Timeout), "got {err:?}");
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let err = fetch(&config_for(format!("http://{addr}/v2/"))).await.unwrap_err();
        assert!(matches!(err, FetchError::Connection), "got {err:?}");
    }

    #[tokio::test]
    async fn test_dns_failure_is_connection() {
        // `.invalid` never resolves; default timeout leaves room for a slow resolver
        let config = FetchConfig::default().with_url("http://no-such-host.invalid/v2/");
        let err = fetch(&config).await.unwrap_err();
        assert!(matches!(err, FetchError::Connection), "got {err:?}");
    }

    #[tokio::test]
    async fn test_invalid_json_is_unexpected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let err = fetch(&config_for(format!("{}/v2/", server.url()))).await.unwrap_err();
        match err {
            FetchError::Unexpected { message } => assert!(message.contains("invalid liturgy JSON")),
            other => panic!("expected unexpected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/")
            .with_status(200)
            .with_body(
                r#"{ "data": "16/10/2026", "liturgia": "x", "cor": "Verde",
                     "leituras": { "evangelho": [{ "referencia": "Lc 12,1-7", "texto": "..." }] } }"#,
            )
            .create_async()
            .await;

        let err = fetch_and_normalize(&config_for(format!("{}/v2/", server.url())))
            .await
            .unwrap_err();
        match err {
            FetchError::Malformed(m) => assert_eq!(m.missing_field, "leituras.evangelho[0].titulo"),
            other => panic!("expected malformed document, got {other:?}"),
        }
    }
}
