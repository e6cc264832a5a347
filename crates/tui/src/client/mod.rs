use api_types::ErrorResponse;
use engine::{LoadError, RowSource};
use reqwest::Url;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

#[derive(Debug)]
pub enum ClientError {
    /// Non-2xx answer, carrying the server's own message.
    Server(String),
    Transport(reqwest::Error),
}

impl ClientError {
    /// Message shown to the user when the initial fetch fails.
    pub fn message(&self) -> String {
        match self {
            Self::Server(message) => message.clone(),
            Self::Transport(err) => format!("Server unreachable: {err}"),
        }
    }
}

/// HTTP loader of the initial rows.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::BaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Returns the raw JSON body of `GET {base_url}/debts`.
    pub async fn debts(&self) -> std::result::Result<String, ClientError> {
        let endpoint = self
            .base_url
            .join("debts")
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.text().await.map_err(ClientError::Transport);
        }

        let status = res.status();
        let message = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());
        tracing::warn!(%status, "debts request failed: {message}");
        Err(ClientError::Server(message))
    }
}

/// Reads the initial rows from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for FileSource {
    async fn fetch(&self) -> std::result::Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| LoadError::new(format!("cannot read {}: {err}", self.path)))
    }
}

impl RowSource for Client {
    async fn fetch(&self) -> std::result::Result<String, LoadError> {
        self.debts()
            .await
            .map_err(|err| LoadError::new(err.message()))
    }
}

/// The loader picked by the configuration.
#[derive(Debug, Clone)]
pub enum Source {
    Http(Client),
    File(FileSource),
}

impl Source {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match &config.data_file {
            Some(path) => Ok(Self::File(FileSource::new(path.as_str()))),
            None => Ok(Self::Http(Client::new(&config.base_url)?)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Http(client) => client.base_url.to_string(),
            Self::File(file) => file.path.clone(),
        }
    }
}

impl RowSource for Source {
    async fn fetch(&self) -> std::result::Result<String, LoadError> {
        match self {
            Self::Http(client) => client.fetch().await,
            Self::File(file) => file.fetch().await,
        }
    }
}
