//! Client for the Azure Document Intelligence "prebuilt-layout" model.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use pdfindex::{AnalysisResult, DocumentAnalyzer, Error, Result};
use reqwest::StatusCode;
use serde_json::Value;

const MODEL_ID: &str = "prebuilt-layout";
const DEFAULT_API_VERSION: &str = "2023-07-31";
const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_HEADER: &str = "operation-location";

/// Analyzes documents by URL with the layout model, polling until done.
pub struct AzureLayoutAnalyzer {
    endpoint: String,
    key: String,
    api_version: String,
    poll_interval: Duration,
    max_polls: u32,
    show_progress: bool,
    runtime: tokio::runtime::Runtime,
}

impl AzureLayoutAnalyzer {
    /// Create an analyzer for the given resource endpoint and key.
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            key: key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            poll_interval: Duration::from_secs(1),
            max_polls: 120,
            show_progress: true,
            runtime,
        })
    }

    /// Set the time between status polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set how many polls to make before giving up.
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls.max(1);
        self
    }

    /// Enable or disable the progress spinner.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={}",
            self.endpoint, MODEL_ID, self.api_version
        )
    }

    async fn analyze_async(&self, source: &str) -> Result<AnalysisResult> {
        let client = reqwest::Client::new();

        let response = client
            .post(self.analyze_url())
            .header(KEY_HEADER, &self.key)
            .json(&serde_json::json!({ "urlSource": source }))
            .send()
            .await
            .map_err(|e| Error::Analysis(format!("Failed to submit document: {}", e)))?;

        if response.status() != StatusCode::ACCEPTED {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Analysis(format!(
                "Analyze request returned {}: {}",
                status, body
            )));
        }

        let operation = response
            .headers()
            .get(OPERATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| Error::Analysis("Response has no Operation-Location header".into()))?;
        log::debug!("Analysis operation: {}", operation);

        let spinner = self.spinner();
        let outcome = self.poll(&client, &operation, &spinner).await;
        spinner.finish_and_clear();
        outcome
    }

    async fn poll(
        &self,
        client: &reqwest::Client,
        operation: &str,
        spinner: &ProgressBar,
    ) -> Result<AnalysisResult> {
        for attempt in 1..=self.max_polls {
            tokio::time::sleep(self.poll_interval).await;

            let response = client
                .get(operation)
                .header(KEY_HEADER, &self.key)
                .send()
                .await
                .map_err(|e| Error::Analysis(format!("Failed to poll operation: {}", e)))?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Analysis(format!(
                    "Operation poll returned {}: {}",
                    status, body
                )));
            }

            let body: Value = response
                .json()
                .await
                .map_err(|e| Error::Analysis(format!("Failed to parse poll response: {}", e)))?;

            match body["status"].as_str() {
                Some("succeeded") => return AnalysisResult::from_value(body),
                Some("failed") => {
                    let message = body["error"]["message"]
                        .as_str()
                        .unwrap_or("no error message");
                    return Err(Error::Analysis(format!("Analysis failed: {}", message)));
                }
                Some(status) => {
                    spinner.set_message(format!("Analyzing ({}, poll {})", status, attempt));
                }
                None => {
                    return Err(Error::Analysis(
                        "Poll response has no status field".into(),
                    ));
                }
            }
        }

        Err(Error::Analysis(format!(
            "Analysis did not finish after {} polls",
            self.max_polls
        )))
    }

    fn spinner(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Analyzing...");
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }
}

impl DocumentAnalyzer for AzureLayoutAnalyzer {
    fn name(&self) -> &str {
        MODEL_ID
    }

    fn analyze(&self, source: &str) -> Result<AnalysisResult> {
        self.runtime.block_on(self.analyze_async(source))
    }
}
