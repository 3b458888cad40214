use crate::api::manager::DownloadManager;
use crate::core::error::ClientError;
use crate::models::torrent::Torrent;
use async_trait::async_trait;
use reqwest::header::REFERER;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

const LOGIN_PATH: &str = "/api/v2/auth/login";
const TORRENTS_INFO_PATH: &str = "/api/v2/torrents/info";
const PAUSE_PATH: &str = "/api/v2/torrents/pause";
const RESUME_PATH: &str = "/api/v2/torrents/resume";
const REANNOUNCE_PATH: &str = "/api/v2/torrents/reannounce";
// qBittorrent 5 renamed pause/resume to stop/start
const STOP_PATH: &str = "/api/v2/torrents/stop";
const START_PATH: &str = "/api/v2/torrents/start";

/// qBittorrent Web API v2 client with a cookie-backed session
pub struct QbitClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl QbitClient {
    pub fn new(host: &str, username: String, password: String) -> Result<Self, ClientError> {
        let base_url = normalize_host(host)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            username,
            password,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a form and return the response body, mapping non-2xx to `Status`
    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .header(REFERER, &self.base_url)
            .form(form)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                endpoint: path.to_string(),
                source,
            })?;

        let status = response.status();
        if path == LOGIN_PATH && status == StatusCode::FORBIDDEN {
            // qBittorrent answers 403 once the client IP is banned for failed logins
            return Err(ClientError::AuthFailed);
        }
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| ClientError::Http {
            endpoint: path.to_string(),
            source,
        })
    }

    async fn command(&self, path: &str, hash: &str) -> Result<(), ClientError> {
        debug!(endpoint = path, hash = hash, "Sending torrent command");
        self.post_form(path, &[("hashes", hash)]).await.map(|_| ())
    }

    /// Send a command, retrying on `fallback` when the manager does not know `path`
    async fn command_with_fallback(
        &self,
        path: &str,
        fallback: &str,
        hash: &str,
    ) -> Result<(), ClientError> {
        match self.command(path, hash).await {
            Err(ClientError::Status { status: 404, .. }) => self.command(fallback, hash).await,
            other => other,
        }
    }
}

#[async_trait]
impl DownloadManager for QbitClient {
    async fn login(&self) -> Result<(), ClientError> {
        let body = self
            .post_form(
                LOGIN_PATH,
                &[
                    ("username", self.username.as_str()),
                    ("password", self.password.as_str()),
                ],
            )
            .await?;

        if body.trim() == "Ok." {
            Ok(())
        } else {
            Err(ClientError::AuthFailed)
        }
    }

    async fn list_torrents(&self) -> Result<Vec<Torrent>, ClientError> {
        let response = self
            .client
            .get(self.url(TORRENTS_INFO_PATH))
            .header(REFERER, &self.base_url)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                endpoint: TORRENTS_INFO_PATH.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                endpoint: TORRENTS_INFO_PATH.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .json::<Vec<Torrent>>()
            .await
            .map_err(|source| ClientError::Http {
                endpoint: TORRENTS_INFO_PATH.to_string(),
                source,
            })
    }

    async fn pause(&self, hash: &str) -> Result<(), ClientError> {
        self.command_with_fallback(PAUSE_PATH, STOP_PATH, hash).await
    }

    async fn resume(&self, hash: &str) -> Result<(), ClientError> {
        self.command_with_fallback(RESUME_PATH, START_PATH, hash).await
    }

    async fn reannounce(&self, hash: &str) -> Result<(), ClientError> {
        self.command(REANNOUNCE_PATH, hash).await
    }
}

/// Accept `host:port`, `http://host:port` or `https://host/prefix/`
pub fn normalize_host(host: &str) -> Result<String, ClientError> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(ClientError::InvalidHost("host must not be empty".to_string()));
    }

    if host.starts_with("http://") || host.starts_with("https://") {
        Ok(host.to_string())
    } else if host.contains("://") {
        Err(ClientError::InvalidHost(format!("unsupported scheme in '{}'", host)))
    } else {
        Ok(format!("http://{}", host))
    }
}
