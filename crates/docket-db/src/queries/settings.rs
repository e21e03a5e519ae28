//! Application settings stored outside the case snapshot.

use crate::client::{get_json, put_json, DbPool, DbResult};

/// Key holding the configured webhook endpoint.
pub const WEBHOOK_URL_KEY: &str = "zapier-webhook-url";

/// Read the configured webhook URL. An empty stored value counts as unset.
pub fn get_webhook_url(pool: &DbPool) -> DbResult<Option<String>> {
    let url: Option<String> = get_json(pool, WEBHOOK_URL_KEY)?;
    Ok(url.filter(|u| !u.trim().is_empty()))
}

/// Store the webhook URL. An empty URL clears the setting.
pub fn set_webhook_url(pool: &DbPool, url: &str) -> DbResult<()> {
    let url = url.trim();
    if url.is_empty() {
        pool.remove(WEBHOOK_URL_KEY)
    } else {
        put_json(pool, WEBHOOK_URL_KEY, url)
    }
}
