use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{header, Client, RequestBuilder};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://www.linkedin.com/voyager/api";
pub const DEFAULT_SITE_BASE_URL: &str = "https://www.linkedin.com";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const AUTH_USER_AGENT: &str = "LIAuthLibrary:3.2.4 com.linkedin.LinkedIn:8.8.1 iPhone:8.3";
const SESSION_COOKIE: &str = "JSESSIONID";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub api_base_url: String,
    pub site_base_url: String,
    pub proxy: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            site_base_url: DEFAULT_SITE_BASE_URL.to_string(),
            proxy: None,
        }
    }
}

/// Authenticated HTTP session: one reqwest client sharing a cookie jar.
///
/// Every request carries a `csrf-token` header mirroring the `JSESSIONID` cookie,
/// which the Voyager API requires alongside the cookie itself.
pub struct LinkedInSession {
    client: Client,
    jar: Arc<Jar>,
    api_base_url: String,
    site_base_url: String,
    api_url: Url,
    site_url: Url,
}

impl LinkedInSession {
    pub fn new(config: SessionConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(BROWSER_USER_AGENT),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-AU,en-GB;q=0.9,en-US;q=0.8,en;q=0.7"),
        );
        headers.insert("x-li-lang", header::HeaderValue::from_static("en_US"));
        headers.insert(
            "x-restli-protocol-version",
            header::HeaderValue::from_static("2.0.0"),
        );

        let jar = Arc::new(Jar::default());
        let mut builder = Client::builder()
            .default_headers(headers)
            .cookie_provider(jar.clone());

        if let Some(ref proxy) = config.proxy {
            tracing::info!("Routing requests through proxy {}", proxy);
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }

        let api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        let site_base_url = config.site_base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client: builder.build()?,
            jar,
            api_url: Url::parse(&api_base_url)?,
            site_url: Url::parse(&site_base_url)?,
            api_base_url,
            site_base_url,
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn site_base_url(&self) -> &str {
        &self.site_base_url
    }

    /// Seeds the jar from a `name=value; name=value` string. An expired cookie set
    /// will only surface later, as failed API calls.
    pub fn set_session_cookies(&self, cookies: &str) {
        let mut count = 0;
        for cookie in cookies.split(';').map(str::trim).filter(|c| c.contains('=')) {
            self.jar.add_cookie_str(cookie, &self.site_url);
            if self.api_url.host_str() != self.site_url.host_str() {
                self.jar.add_cookie_str(cookie, &self.api_url);
            }
            count += 1;
        }
        tracing::debug!("Loaded {} session cookies", count);
    }

    /// Username/password login against `/uas/authenticate`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        let auth_url = format!("{}/uas/authenticate", self.site_base_url);
        tracing::info!("Authenticating as {}", username);

        // The first request only exists to obtain a JSESSIONID cookie.
        self.client
            .get(&auth_url)
            .header("X-Li-User-Agent", AUTH_USER_AGENT)
            .header("X-User-Language", "en")
            .header("X-User-Locale", "en_US")
            .send()
            .await?;

        let session_id = self.csrf_token().ok_or_else(|| {
            Error::Authentication("server did not issue a JSESSIONID cookie".to_string())
        })?;

        let response = self
            .client
            .post(&auth_url)
            .header("X-Li-User-Agent", AUTH_USER_AGENT)
            .header("X-User-Language", "en")
            .header("X-User-Locale", "en_US")
            .form(&[
                ("session_key", username),
                ("session_password", password),
                ("JSESSIONID", session_id.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        match body.get("login_result").and_then(Value::as_str) {
            Some("PASS") => {
                tracing::info!("Authenticated successfully");
                Ok(())
            }
            Some("CHALLENGE") => Err(Error::Challenge),
            Some(other) => Err(Error::Authentication(other.to_string())),
            None => Err(Error::Authentication(format!(
                "no login_result in response ({})",
                status
            ))),
        }
    }

    /// Value of the `JSESSIONID` cookie with its surrounding quotes removed.
    pub fn csrf_token(&self) -> Option<String> {
        let cookies = self.jar.cookies(&self.site_url)?;
        let cookies = cookies.to_str().ok()?;

        cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.trim_matches('"').to_string())
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.with_csrf(self.client.get(url))
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.with_csrf(self.client.post(url))
    }

    fn with_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        match self.csrf_token() {
            Some(token) => request.header("csrf-token", token),
            None => request,
        }
    }
}
