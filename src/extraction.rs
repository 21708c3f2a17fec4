//! # Recipe Extraction Client
//!
//! Client for the external document-extraction service: a recipe document
//! goes out as a base64 payload, `{ servings, cuisine, ingredients[] }` comes
//! back. The service response is decoded defensively: missing or malformed
//! fields degrade to defaults instead of failing.
//!
//! Transient failures are retried with exponential backoff and random jitter.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{info, warn};
use rand::Rng;
use reqwest::Client;
use serde_json::{json, Value};

use crate::recipe_model::{Ingredient, Recipe};

/// Placeholder ingredient for extractions that found nothing usable
const EMPTY_EXTRACTION_PLACEHOLDER: &str = "Add ingredients manually";

/// Retry configuration for extraction calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first failure
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
    /// Timeout for one request in seconds
    pub request_timeout_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_retry_delay_ms: 1000,
            max_retry_delay_ms: 10000,
            request_timeout_secs: 30,
        }
    }
}

/// HTTP client for the extraction service
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    client: Client,
    endpoint: String,
    retry: RetryConfig,
}

/// A structured recipe as returned by the extraction service
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRecipe {
    pub servings: u32,
    pub cuisine: String,
    pub ingredients: Vec<Ingredient>,
}

impl ExtractedRecipe {
    /// Decode a service response value, defaulting anything missing or
    /// malformed: servings 4, cuisine "Other", a non-array ingredients field
    /// is an empty list.
    pub fn from_value(value: &Value) -> Self {
        let servings = value
            .get("servings")
            .and_then(Value::as_u64)
            .map(|s| s as u32)
            .unwrap_or(4);

        let cuisine = value
            .get("cuisine")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("Other")
            .to_string();

        let ingredients = value
            .get("ingredients")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(ingredient_from_value).collect())
            .unwrap_or_default();

        Self {
            servings,
            cuisine,
            ingredients,
        }
    }
}

/// Decode one ingredient object; entries without a usable name are dropped
fn ingredient_from_value(value: &Value) -> Option<Ingredient> {
    let name = string_field(value, "name");
    if name.trim().is_empty() {
        return None;
    }
    Some(Ingredient {
        amount: string_field(value, "amount"),
        unit: string_field(value, "unit"),
        name: name.trim().to_string(),
    })
}

/// A field as a string, tolerating JSON numbers where strings were expected
fn string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

impl ExtractionClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_retry(endpoint, RetryConfig::default())
    }

    pub fn with_retry(endpoint: &str, retry: RetryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(retry.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            retry,
        })
    }

    /// Send a document to the extraction service and decode the response
    pub async fn extract(&self, document: &[u8]) -> Result<ExtractedRecipe> {
        let payload = json!({ "base64Data": BASE64.encode(document) });

        let mut attempt = 0;
        loop {
            match self.try_extract(&payload).await {
                Ok(extracted) => {
                    info!(
                        "Extraction succeeded: {} ingredients, {} servings",
                        extracted.ingredients.len(),
                        extracted.servings
                    );
                    return Ok(extracted);
                }
                Err(err) if attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry_delay(attempt);
                    warn!(
                        "Extraction attempt {} failed: {}. Retrying in {}ms",
                        attempt,
                        err,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    return Err(err).context("Extraction service failed after retries");
                }
            }
        }
    }

    async fn try_extract(&self, payload: &Value) -> Result<ExtractedRecipe> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .context("Failed to reach extraction service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(anyhow!("Extraction service returned {}: {}", status, body));
        }

        let value: Value = response
            .json()
            .await
            .context("Extraction response was not valid JSON")?;
        Ok(ExtractedRecipe::from_value(&value))
    }

    /// Exponential backoff with random jitter, capped at the configured max
    fn retry_delay(&self, attempt: u32) -> Duration {
        let exponential = self
            .retry
            .base_retry_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        let capped = exponential.min(self.retry.max_retry_delay_ms);
        let jitter = rand::thread_rng().gen_range(0..=capped / 4);
        Duration::from_millis(capped + jitter)
    }
}

/// Build a library recipe from an extraction result. The file stem names the
/// recipe, the extracted values seed the base scaling pair, and an empty
/// extraction leaves a single placeholder ingredient to edit.
pub fn recipe_from_extraction(file_name: &str, extracted: &ExtractedRecipe) -> Recipe {
    let name = std::path::Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
        .to_string();

    let ingredients = if extracted.ingredients.is_empty() {
        vec![Ingredient::new("1", "", EMPTY_EXTRACTION_PLACEHOLDER)]
    } else {
        extracted.ingredients.clone()
    };

    Recipe::new(0, &name, &extracted.cuisine, extracted.servings).with_ingredients(ingredients)
}
