//! Google Calendar provider with Gmail auto-reply management

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono_tz::Tz;
use leavesync_core::CalendarProvider;
use leavesync_domain::{
    auto_reply_message, parse_zone, CalendarEvent, GoogleConfig, LeaveRecord, LeaveSyncError,
    Result,
};
use reqwest::{Method, RequestBuilder};
use tracing::{debug, info, instrument};
use url::Url;

use super::types::{EventBody, EventsPage, VacationSettings};
use crate::http::HttpClient;
use crate::integrations::auth::AccessTokenProvider;

const PROVIDER_NAME: &str = "google";

/// Mirrors leave records into Google Calendar and keeps the Gmail vacation
/// responder in step with them.
pub struct GoogleCalendarProvider {
    calendar_api_base: Url,
    gmail_api_base: Url,
    http_client: HttpClient,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl GoogleCalendarProvider {
    pub fn new(config: &GoogleConfig, tokens: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Self::with_http_client(config, tokens, http_client)
    }

    pub fn with_http_client(
        config: &GoogleConfig,
        tokens: Arc<dyn AccessTokenProvider>,
        http_client: HttpClient,
    ) -> Result<Self> {
        Ok(Self {
            calendar_api_base: parse_base(&config.calendar_api_base)?,
            gmail_api_base: parse_base(&config.gmail_api_base)?,
            http_client,
            tokens,
        })
    }

    /// `{calendar}/calendars/{owner}/events[/{event_id}]`
    fn events_url(&self, owner: &str, event_id: Option<&str>) -> Result<Url> {
        let mut segments = vec!["calendars", owner, "events"];
        segments.extend(event_id);
        join_segments(&self.calendar_api_base, &segments)
    }

    /// `{gmail}/users/{owner}/settings/vacation`
    fn vacation_url(&self, owner: &str) -> Result<Url> {
        join_segments(&self.gmail_api_base, &["users", owner, "settings", "vacation"])
    }

    async fn authorized(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let token = self.tokens.access_token().await?;
        Ok(self.http_client.request(method, url).bearer_auth(token))
    }

    async fn auto_reply(&self, owner: &str) -> Result<VacationSettings> {
        let request = self.authorized(Method::GET, self.vacation_url(owner)?).await?;
        self.http_client.send_json(request).await
    }

    async fn set_auto_reply(&self, owner: &str, settings: &VacationSettings) -> Result<()> {
        let request = self.authorized(Method::PUT, self.vacation_url(owner)?).await?.json(settings);
        self.http_client.send_checked(request).await?;
        Ok(())
    }

    async fn enable_auto_reply(&self, record: &LeaveRecord) -> Result<()> {
        let settings = VacationSettings {
            enable_auto_reply: true,
            response_body_html: Some(auto_reply_message(record)),
            start_time: Some(record.start_date.timestamp_millis()),
            end_time: Some(record.end_date.timestamp_millis()),
        };
        debug!(external_code = %record.external_code, "enabling auto-reply");
        self.set_auto_reply(calendar_owner(record), &settings).await
    }

    async fn list_events(&self, window: &LeaveRecord) -> Result<Vec<CalendarEvent>> {
        let owner = calendar_owner(window);
        let url = self.events_url(owner, None)?;
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("timeMin", window.start_date.to_rfc3339()),
                ("timeMax", window.end_date.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ];
            query.extend(page_token.take().map(|token| ("pageToken", token)));

            let request = self.authorized(Method::GET, url.clone()).await?.query(&query);
            let page: EventsPage = self.http_client.send_json(request).await?;
            let calendar_zone: Tz =
                page.time_zone.as_deref().and_then(parse_zone).unwrap_or(window.zone());

            events.extend(
                page.items
                    .into_iter()
                    .filter(|event| !event.is_out_of_office_block() && !event.is_cancelled())
                    .filter_map(|event| event.into_calendar_event(calendar_zone)),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(events)
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    #[instrument(skip(self, record), fields(external_code = %record.external_code))]
    async fn create(&self, record: &LeaveRecord) -> Result<()> {
        let owner = calendar_owner(record);
        let request = self
            .authorized(Method::POST, self.events_url(owner, None)?)
            .await?
            .json(&EventBody::out_of_office(record));
        self.http_client.send_checked(request).await?;
        info!(owner, "out-of-office event created");

        let current = self.auto_reply(owner).await?;
        if !current.enable_auto_reply || starts_no_later_than(record, &current) {
            self.enable_auto_reply(record).await?;
        }
        Ok(())
    }

    #[instrument(skip(self, record), fields(external_code = %record.external_code))]
    async fn update(&self, record: &LeaveRecord) -> Result<()> {
        let owner = calendar_owner(record);
        let request = self
            .authorized(Method::PUT, self.events_url(owner, Some(&record.external_code))?)
            .await?
            .json(&EventBody::out_of_office(record));
        self.http_client.send_checked(request).await?;
        info!(owner, "out-of-office event updated");

        let current = self.auto_reply(owner).await?;
        if starts_no_later_than(record, &current) {
            self.enable_auto_reply(record).await?;
        }
        Ok(())
    }

    #[instrument(skip(self, record), fields(external_code = %record.external_code))]
    async fn cancel(&self, record: &LeaveRecord) -> Result<()> {
        let owner = calendar_owner(record);
        let request = self
            .authorized(Method::DELETE, self.events_url(owner, Some(&record.external_code))?)
            .await?;
        self.http_client.send_checked(request).await?;
        info!(owner, "out-of-office event deleted");

        let current = self.auto_reply(owner).await?;
        if set_for_window(record, &current) {
            debug!("disabling auto-reply");
            self.set_auto_reply(owner, &VacationSettings::default()).await?;
        }
        Ok(())
    }

    #[instrument(skip(self, windows), fields(windows = windows.len()))]
    async fn get_conflicting(&self, windows: &[LeaveRecord]) -> Result<Vec<CalendarEvent>> {
        let mut events = Vec::new();
        for window in windows {
            events.extend(self.list_events(window).await?);
        }
        Ok(events)
    }
}

/// Calendar and mailbox of the record's owner.
fn calendar_owner(record: &LeaveRecord) -> &str {
    record.user.email.as_deref().filter(|email| !email.is_empty()).unwrap_or(&record.user_id)
}

/// An auto-reply without a start, or starting at/after the leave, gets replaced.
fn starts_no_later_than(record: &LeaveRecord, current: &VacationSettings) -> bool {
    current.start_time.map_or(true, |start| record.start_date.timestamp_millis() <= start)
}

/// Enabled auto-reply matching the leave window to the second.
fn set_for_window(record: &LeaveRecord, current: &VacationSettings) -> bool {
    let (Some(start), Some(end)) = (current.start_time, current.end_time) else {
        return false;
    };
    current.enable_auto_reply
        && start == record.start_date.timestamp() * 1000
        && end == record.end_date.timestamp() * 1000
}

fn parse_base(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| LeaveSyncError::Config(format!("Invalid Google API base '{raw}': {e}")))
}

fn join_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| LeaveSyncError::Config(format!("Google API base cannot be a base URL: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
