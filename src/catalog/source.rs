//! Catalog Source
//!
//! Port to the catalog origin and its HTTP implementation. The origin wraps
//! every payload in `{ "errcode": 0, "errmsg": "...", "data": ... }`; a non-zero
//! `errcode` is reported as an origin error.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::{Category, InterfaceDetail, InterfacePage};
use crate::config::Config;
use crate::error::{CatalogError, Result};

/// Operations the catalog origin provides.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_interfaces(&self, project_id: u64, page: u32, limit: u32)
        -> Result<InterfacePage>;

    async fn interface_detail(&self, id: u64) -> Result<InterfaceDetail>;

    async fn list_categories(&self, project_id: u64) -> Result<Vec<Category>>;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    errcode: i64,
    #[serde(default)]
    errmsg: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl Envelope {
    fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if self.errcode != 0 {
            return Err(CatalogError::Origin {
                code: self.errcode,
                message: self.errmsg,
            });
        }

        serde_json::from_value(self.data).map_err(|err| CatalogError::Transport {
            message: format!("invalid response payload: {}", err),
            timed_out: false,
        })
    }
}

// == HTTP Catalog Source ==
/// Catalog origin reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCatalogSource {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.origin_base_url.clone(),
            config.origin_token.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Requesting catalog origin");

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.query(&[("token", token)]);
        }

        let envelope: Envelope = request.send().await?.error_for_status()?.json().await?;
        envelope.into_data()
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn list_interfaces(
        &self,
        project_id: u64,
        page: u32,
        limit: u32,
    ) -> Result<InterfacePage> {
        self.get(
            "/api/interface/list",
            &[
                ("project_id", project_id.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn interface_detail(&self, id: u64) -> Result<InterfaceDetail> {
        self.get("/api/interface/get", &[("id", id.to_string())])
            .await
    }

    async fn list_categories(&self, project_id: u64) -> Result<Vec<Category>> {
        self.get(
            "/api/interface/getCatMenu",
            &[("project_id", project_id.to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success() {
        let envelope: Envelope = serde_json::from_value(json!({
            "errcode": 0,
            "errmsg": "ok",
            "data": [{"_id": 1, "name": "Users"}]
        }))
        .unwrap();

        let categories: Vec<Category> = envelope.into_data().unwrap();
        assert_eq!(categories[0].name, "Users");
    }

    #[test]
    fn test_envelope_origin_error() {
        let envelope: Envelope = serde_json::from_value(json!({
            "errcode": 40011,
            "errmsg": "token invalid",
            "data": null
        }))
        .unwrap();

        let err = envelope.into_data::<InterfaceDetail>().unwrap_err();
        assert_eq!(
            err,
            CatalogError::Origin {
                code: 40011,
                message: "token invalid".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_bad_payload() {
        let envelope: Envelope = serde_json::from_value(json!({
            "errcode": 0,
            "data": "not an object"
        }))
        .unwrap();

        let err = envelope.into_data::<InterfaceDetail>().unwrap_err();
        assert!(matches!(err, CatalogError::Transport { timed_out: false, .. }));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let source =
            HttpCatalogSource::new("http://catalog.local/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(source.base_url, "http://catalog.local");
    }
}
