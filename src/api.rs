// API client module: a small blocking HTTP client for the Translator
// `/detect` route. Responses are handed back as raw JSON so callers see
// exactly what the provider returned.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::blocking::{Client, Request};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::config::Config;

pub const API_VERSION: &str = "3.0";

/// One element of the request body: `{"text": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
}

impl TextItem {
    pub fn new(text: impl Into<String>) -> Self {
        TextItem { text: text.into() }
    }
}

/// Anything able to run a language detection request. The HTTP client is
/// the real implementation; tests plug in fakes.
pub trait Detector {
    fn detect(&self, items: &[TextItem]) -> Result<Value>;
}

/// Blocking client holding the reqwest client, the configuration and the
/// trace id sent with every request of this process.
pub struct DetectorClient {
    client: Client,
    config: Config,
    trace_id: Uuid,
}

impl DetectorClient {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let trace_id = Uuid::new_v4();
        debug!("X-ClientTraceId for this session: {}", trace_id);
        Ok(DetectorClient {
            client,
            config,
            trace_id,
        })
    }

    pub fn trace_id(&self) -> Uuid {
        self.trace_id
    }

    /// Build the POST request for `items` without sending it.
    pub fn build_request(&self, items: &[TextItem]) -> Result<Request> {
        self.client
            .post(self.config.detect_url())
            .query(&[("api-version", API_VERSION)])
            .header("Ocp-Apim-Subscription-Key", &self.config.subscription_key)
            .header("Ocp-Apim-Subscription-Region", &self.config.region)
            .header(CONTENT_TYPE, "application/json")
            .header("X-ClientTraceId", self.trace_id.to_string())
            .json(items)
            .build()
            .context("Failed to build detect request")
    }
}

impl Detector for DetectorClient {
    fn detect(&self, items: &[TextItem]) -> Result<Value> {
        let request = self.build_request(items)?;
        debug!("POST {} ({} items)", request.url(), items.len());

        let res = self
            .client
            .execute(request)
            .context("Failed to send detect request")?;
        let status = res.status();
        if !status.is_success() {
            warn!("Detect request answered with status {}", status);
        }
        let txt = res.text().context("Failed to read detect response body")?;
        serde_json::from_str(&txt)
            .with_context(|| format!("Detect response is not valid JSON ({}): {}", status, txt))
    }
}

/// Send a single paragraph and return the provider's JSON untouched.
pub fn detect_one_paragraph<D: Detector + ?Sized>(detector: &D, input_txt: &str) -> Result<Value> {
    detector.detect(&[TextItem::new(input_txt)])
}
