//! Domain constants

/// Name of the notification key carrying the leave record identifier.
pub const EXTERNAL_CODE_KEY: &str = "externalCode";

/// Subject used for the out-of-office event created in user calendars.
pub const OUT_OF_OFFICE_SUMMARY: &str = "Out of office";

/// Default leave window cache time-to-live (30 minutes).
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 1800;

/// Default leave window cache capacity, counted in user entries.
pub const DEFAULT_CACHE_MAX_CAPACITY: u64 = 10;

/// Default HTTP request timeout for outbound integrations.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Default attempts (initial try + retries) for outbound integrations.
pub const DEFAULT_HTTP_MAX_ATTEMPTS: usize = 3;

/// Default bind address of the HTTP service.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Google Calendar REST base URL.
pub const DEFAULT_GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Gmail REST base URL.
pub const DEFAULT_GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1";
