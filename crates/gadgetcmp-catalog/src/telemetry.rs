//! Best-effort usage tracking.
//!
//! Events are posted on a detached task and every failure is logged at
//! `debug` and dropped; tracking never blocks or fails the caller.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tokio::task::JoinHandle;

use gadgetcmp_core::Category;

use crate::features::FeatureId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryEvent {
    View,
    FeatureClick,
    CompareAdd,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPayload {
    pub event: TelemetryEvent,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<FeatureId>,
    pub ts: DateTime<Utc>,
}

/// Fire-and-forget event sink. A client built without a URL is a no-op.
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    client: Client,
    url: Option<String>,
}

impl TelemetryClient {
    #[must_use]
    pub fn new(url: Option<String>, timeout_secs: u64, user_agent: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|e| {
                tracing::debug!(error = %e, "telemetry client fell back to defaults");
                Client::new()
            });
        let url = url.filter(|u| !u.trim().is_empty());
        Self { client, url }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            client: Client::new(),
            url: None,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    pub fn track_view(&self, category: Category, product_id: &str) -> Option<JoinHandle<()>> {
        self.track(TelemetryPayload {
            event: TelemetryEvent::View,
            category,
            product_id: Some(product_id.to_owned()),
            feature_id: None,
            ts: Utc::now(),
        })
    }

    pub fn track_feature_click(
        &self,
        category: Category,
        feature: FeatureId,
    ) -> Option<JoinHandle<()>> {
        self.track(TelemetryPayload {
            event: TelemetryEvent::FeatureClick,
            category,
            product_id: None,
            feature_id: Some(feature),
            ts: Utc::now(),
        })
    }

    pub fn track_compare_add(
        &self,
        category: Category,
        product_id: &str,
    ) -> Option<JoinHandle<()>> {
        self.track(TelemetryPayload {
            event: TelemetryEvent::CompareAdd,
            category,
            product_id: Some(product_id.to_owned()),
            feature_id: None,
            ts: Utc::now(),
        })
    }

    /// Posts `payload` on a detached task. Returns the task handle, or `None`
    /// when tracking is disabled or no tokio runtime is running. Callers are
    /// free to drop the handle.
    pub fn track(&self, payload: TelemetryPayload) -> Option<JoinHandle<()>> {
        let url = self.url.clone()?;
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(event = ?payload.event, "no runtime; telemetry dropped");
            return None;
        };
        let client = self.client.clone();

        Some(runtime.spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(resp) if resp.status().is_success() => {}
                Ok(resp) => {
                    tracing::debug!(
                        status = %resp.status(),
                        event = ?payload.event,
                        "telemetry rejected"
                    );
                }
                Err(e) => {
                    tracing::debug!(error = %e, event = ?payload.event, "telemetry failed");
                }
            }
        }))
    }
}
