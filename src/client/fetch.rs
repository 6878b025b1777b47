use crate::client::session::SessionStore;
use crate::utils::error::{ImdbError, Result};
use reqwest::{Client, Method, Response, StatusCode};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

#[derive(Debug, Clone)]
pub struct RequestParams {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl RequestParams {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }
}

/// Issues cookie-authenticated requests against the imdb origin.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    endpoint: String,
}

impl Fetcher {
    pub fn new(session: &SessionStore, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .cookie_provider(session.jar())
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ImdbError::configuration(format!("failure creating http client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: session.origin().as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Sends one request. 200 and 404 come back as a response so the caller
    /// decides what absence means; everything else is an error.
    pub async fn fetch(&self, params: RequestParams) -> Result<Response> {
        let url = format!("{}{}", self.endpoint, params.path);
        tracing::debug!("Making imdb request: {} {}", params.method, url);

        let mut request = self.client.request(params.method.clone(), &url);
        if let Some(body) = &params.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        tracing::debug!("imdb response status: {} for {}", response.status(), url);

        classify(response.status(), &params.method, &url)?;
        Ok(response)
    }
}

pub fn classify(status: StatusCode, method: &Method, url: &str) -> Result<()> {
    match status {
        StatusCode::OK | StatusCode::NOT_FOUND => Ok(()),
        StatusCode::FORBIDDEN => Err(ImdbError::AuthorizationError {
            method: method.to_string(),
            url: url.to_string(),
        }),
        other => Err(ImdbError::UnexpectedStatusError {
            method: method.to_string(),
            url: url.to_string(),
            status: other.as_u16(),
        }),
    }
}
