use std::sync::Arc;

use reqwest::Response;
use serde_json::Value;

use crate::error::Result;
use crate::linkedin::evasion::Evasion;
use crate::linkedin::session::LinkedInSession;

/// Which base URL a request path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// The Voyager API root.
    Api,
    /// The public site root.
    Site,
}

/// Thin request layer over the session. No retries: transport and decode failures
/// are returned to the caller as-is.
pub struct RequestGateway {
    session: LinkedInSession,
    evasion: Arc<dyn Evasion>,
}

impl RequestGateway {
    pub fn new(session: LinkedInSession, evasion: impl Evasion + 'static) -> Self {
        Self {
            session,
            evasion: Arc::new(evasion),
        }
    }

    pub fn session(&self) -> &LinkedInSession {
        &self.session
    }

    pub fn url(&self, base: Base, uri: &str) -> String {
        let root = match base {
            Base::Api => self.session.api_base_url(),
            Base::Site => self.session.site_base_url(),
        };
        format!("{}{}", root, uri)
    }

    pub async fn fetch(&self, uri: &str, query: &[(&str, String)]) -> Result<Value> {
        self.fetch_from(Base::Api, uri, query).await
    }

    pub async fn fetch_from(
        &self,
        base: Base,
        uri: &str,
        query: &[(&str, String)],
    ) -> Result<Value> {
        self.evasion.evade().await;

        let url = self.url(base, uri);
        tracing::debug!("GET {}", url);

        let response = self.session.get(&url).query(query).send().await?;
        decode(response).await
    }

    pub async fn post(&self, uri: &str, body: Option<&Value>) -> Result<Value> {
        self.post_to(Base::Api, uri, body).await
    }

    pub async fn post_to(&self, base: Base, uri: &str, body: Option<&Value>) -> Result<Value> {
        self.evasion.evade().await;

        let url = self.url(base, uri);
        tracing::debug!("POST {}", url);

        let mut request = self.session.post(&url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        decode(response).await
    }
}

// Failures are reported inside the JSON body, so the HTTP status is only logged.
async fn decode(response: Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        tracing::debug!("Upstream answered {}", status);
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
