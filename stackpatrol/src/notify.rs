//! Outbound summary delivery.

use crate::errors::{PatrolError, PatrolResult};
use tracing::info;

/// POST the summary to `webhook_url` as a `{"text": ...}` JSON body.
/// Exactly one call per run; the caller treats a failure as best-effort and
/// logs it rather than aborting, since delivery happens after all work is
/// already done.
pub async fn send_report(webhook_url: &str, text: &str) -> PatrolResult<()> {
    info!("delivering run summary");

    let client = reqwest::Client::new();
    let response = client
        .post(webhook_url)
        .json(&serde_json::json!({ "text": text }))
        .send()
        .await
        .map_err(|e| PatrolError::Notify(e.to_string()))?;

    response
        .error_for_status()
        .map_err(|e| PatrolError::Notify(e.to_string()))?;

    Ok(())
}
