//! HTTP client for the remote calendar service.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use campuscal_core::audit::{AuditAction, AuditLogEntry, AuditSink};
use campuscal_core::error::{CampusCalError, CampusCalResult};
use campuscal_core::event::Event;
use campuscal_core::profile::Profile;

const PRIMARY_EVENTS_PATH: &str = "/api/calendar/scheduledevents/";
const FALLBACK_EVENTS_PATH: &str = "/api/calendar/events/";

/// Bearer-token client for the endpoints the calendar service exposes.
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Listing responses are either a bare array or wrapped in `results`.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventListing {
    Plain(Vec<Event>),
    Paginated { results: Vec<Event> },
}

impl EventListing {
    fn into_events(self) -> Vec<Event> {
        match self {
            EventListing::Plain(events) => events,
            EventListing::Paginated { results } => results,
        }
    }
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        RemoteClient {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.http.post(format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Full event listing: primary endpoint first, then the legacy path for
    /// older deployments.
    pub async fn list_events(&self) -> CampusCalResult<Vec<Event>> {
        match self.fetch_events(PRIMARY_EVENTS_PATH).await {
            Ok(events) => Ok(events),
            Err(err) => {
                debug!(%err, "primary listing failed, trying fallback endpoint");
                self.fetch_events(FALLBACK_EVENTS_PATH).await
            }
        }
    }

    async fn fetch_events(&self, path: &str) -> CampusCalResult<Vec<Event>> {
        let resp = self.get(path).send().await.map_err(transport_err)?;
        let resp = check_status(resp).await?;
        let listing: EventListing = resp.json().await.map_err(transport_err)?;
        Ok(listing.into_events())
    }

    /// GET /users/my-profile/
    pub async fn fetch_profile(&self) -> CampusCalResult<Profile> {
        let resp = self
            .get("/users/my-profile/")
            .send()
            .await
            .map_err(transport_err)?;
        let resp = check_status(resp).await?;
        resp.json().await.map_err(transport_err)
    }

    /// Date-bounded CSV export. Both bounds are required and must be
    /// ordered; validation happens before any request goes out.
    pub async fn export_events(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> CampusCalResult<Vec<u8>> {
        let (start, end) = validate_export_bounds(start, end)?;

        let path = format!("/api/calendar/export/?start={start}&end={end}");
        let resp = self.get(&path).send().await.map_err(transport_err)?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CampusCalError::Export { status, body });
        }
        Ok(resp.bytes().await.map_err(transport_err)?.to_vec())
    }
}

/// Export requires both bounds, in order.
pub fn validate_export_bounds(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> CampusCalResult<(NaiveDate, NaiveDate)> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(CampusCalError::Validation(
            "export requires both --start and --end (YYYY-MM-DD)".to_string(),
        ));
    };
    if end < start {
        return Err(CampusCalError::Validation(format!(
            "export end {end} is before start {start}"
        )));
    }
    Ok((start, end))
}

#[async_trait]
impl AuditSink for RemoteClient {
    /// POST /api/calendar/audit/log/
    async fn record(&self, action: AuditAction, event_id: i64) -> CampusCalResult<()> {
        let resp = self
            .post("/api/calendar/audit/log/")
            .json(&json!({ "action": action, "event_id": event_id }))
            .send()
            .await
            .map_err(transport_err)?;
        check_status(resp).await?;
        Ok(())
    }

    /// GET /api/calendar/audit/logs/
    async fn list(&self) -> CampusCalResult<Vec<AuditLogEntry>> {
        let resp = self
            .get("/api/calendar/audit/logs/")
            .send()
            .await
            .map_err(transport_err)?;
        let resp = check_status(resp).await?;
        resp.json().await.map_err(transport_err)
    }
}

fn transport_err(err: reqwest::Error) -> CampusCalError {
    CampusCalError::Remote(err.to_string())
}

/// Non-success responses surface status code and body text.
async fn check_status(resp: reqwest::Response) -> CampusCalResult<reqwest::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(CampusCalError::Network { status, body })
}
