use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info};

use crate::traits::{FetchError, TabSource};

pub const DEFAULT_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

/// How much of an error body is kept for the log.
const ERROR_BODY_PREVIEW: usize = 200;

/// Reads tabs of a published Google spreadsheet through its CSV export.
pub struct GoogleSheetsSource {
    client: Client,
    sheet_id: String,
    base_url: String,
}

impl GoogleSheetsSource {
    pub fn new(sheet_id: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            sheet_id: sheet_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Points the source at another export host (`WITB_BASE_URL`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// CSV export URL for one tab.
    pub fn tab_url(&self, tab: &str) -> Result<Url, FetchError> {
        let endpoint = format!("{}/{}/gviz/tq", self.base_url, self.sheet_id);
        Url::parse_with_params(&endpoint, &[("tqx", "out:csv"), ("sheet", tab)])
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", endpoint, e)))
    }
}

#[async_trait]
impl TabSource for GoogleSheetsSource {
    fn source_id(&self) -> &str {
        &self.sheet_id
    }

    async fn fetch_tab(&self, tab: &str) -> Result<String, FetchError> {
        let url = self.tab_url(tab)?;
        info!(tab = %tab, url = %url, "Fetch URL");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(tab = %tab, status = status.as_u16(), bytes = body.len(), "Fetch response");

        if !status.is_success() {
            return Err(FetchError::Status {
                tab: tab.to_string(),
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_PREVIEW).collect(),
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_url_encodes_sheet_name() {
        let source = GoogleSheetsSource::new("abc123", None).unwrap();
        let url = source.tab_url("witb wedges&more").unwrap();

        assert_eq!(url.host_str(), Some("docs.google.com"));
        assert_eq!(url.path(), "/spreadsheets/d/abc123/gviz/tq");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("tqx".to_string(), "out:csv".to_string()),
                ("sheet".to_string(), "witb wedges&more".to_string()),
            ]
        );
    }

    #[test]
    fn test_custom_base_url() {
        let source = GoogleSheetsSource::new("id", Some(Duration::from_secs(5)))
            .unwrap()
            .with_base_url("http://127.0.0.1:9000/sheets/");
        let url = source.tab_url("player_stats").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/sheets/id/gviz/tq?tqx=out%3Acsv&sheet=player_stats"
        );
        assert_eq!(source.source_id(), "id");
    }
}
