//! SuccessFactors OData client for EmployeeTime records.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use leavesync_core::LeaveRecordService;
use leavesync_domain::{
    LeaveRecord, LeaveSyncError, LeaveWindowList, Result, SuccessFactorsConfig,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::types::{EmployeeTimeDto, ODataEnvelope, ODataResults};
use crate::http::HttpClient;

const EMPLOYEE_TIME_SELECT: &str = "externalCode,approvalStatus,comment,createdDateTime,\
lastModifiedDateTime,startDate,endDate,timeType,userId,\
userIdNav/firstName,userIdNav/lastName,userIdNav/email,userIdNav/timeZone,\
userIdNav/empInfo/jobInfoNav/managerUserNav/userId,\
userIdNav/empInfo/jobInfoNav/managerUserNav/firstName,\
userIdNav/empInfo/jobInfoNav/managerUserNav/lastName,\
userIdNav/empInfo/jobInfoNav/managerUserNav/email,\
userIdNav/empInfo/jobInfoNav/timezone";

const EMPLOYEE_TIME_EXPAND: &str = "userIdNav/empInfo/jobInfoNav/managerUserNav";

/// Upcoming windows fetched per user.
const LATEST_WINDOW_LIMIT: &str = "5";

/// Read-only client over the `EmployeeTime` entity set.
pub struct SuccessFactorsClient {
    base_url: String,
    username: String,
    password: String,
    http_client: HttpClient,
}

impl SuccessFactorsClient {
    /// Build a client with its own HTTP stack from configuration.
    pub fn new(config: &SuccessFactorsConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .max_attempts(config.max_attempts)
            .build()?;

        Ok(Self::with_http_client(config, http_client))
    }

    /// Reuse an existing HTTP client (tests tune retries and backoff).
    pub fn with_http_client(config: &SuccessFactorsConfig, http_client: HttpClient) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            http_client,
        }
    }

    async fn get_odata<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self
            .http_client
            .request(Method::GET, url)
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query);

        let response = self.http_client.send_checked(request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| LeaveSyncError::Network(format!("Failed to read OData body: {e}")))?;
        debug!(%url, bytes = body.len(), "received OData payload");

        serde_json::from_str::<ODataEnvelope<T>>(&body)
            .map(|envelope| envelope.d)
            .map_err(|e| LeaveSyncError::InvalidInput(format!("Malformed EmployeeTime payload: {e}")))
    }
}

#[async_trait]
impl LeaveRecordService for SuccessFactorsClient {
    #[instrument(skip(self), fields(provider = "successfactors"))]
    async fn get_by_id(&self, external_code: &str) -> Result<LeaveRecord> {
        let url = format!("{}/EmployeeTime('{}')", self.base_url, odata_literal(external_code));
        let query = [
            ("$select", EMPLOYEE_TIME_SELECT.to_string()),
            ("$expand", EMPLOYEE_TIME_EXPAND.to_string()),
            ("$format", "json".to_string()),
        ];

        let dto: EmployeeTimeDto = self.get_odata(&url, &query).await.map_err(|e| match e {
            LeaveSyncError::NotFound(_) => {
                LeaveSyncError::NotFound(format!("EmployeeTime('{external_code}')"))
            }
            other => other,
        })?;

        Ok(LeaveRecord::from_source(dto.into_source()))
    }

    #[instrument(skip(self), fields(provider = "successfactors"))]
    async fn get_latest_for_user(&self, user_id: &str) -> Result<Option<LeaveWindowList>> {
        let url = format!("{}/EmployeeTime", self.base_url);
        let query = [
            ("$select", EMPLOYEE_TIME_SELECT.to_string()),
            ("$expand", EMPLOYEE_TIME_EXPAND.to_string()),
            ("$filter", upcoming_filter(user_id, Utc::now())),
            ("$orderby", "startDate desc".to_string()),
            ("$top", LATEST_WINDOW_LIMIT.to_string()),
            ("$format", "json".to_string()),
        ];

        let page: ODataResults<EmployeeTimeDto> = self.get_odata(&url, &query).await?;
        if page.results.is_empty() {
            return Ok(None);
        }

        let windows: LeaveWindowList = page
            .results
            .into_iter()
            .map(|dto| LeaveRecord::from_source(dto.into_source()))
            .collect();
        debug!(user_id, windows = windows.len(), "loaded upcoming leave windows");

        Ok(Some(windows))
    }
}

/// Approved windows of `user_id` that have not ended at `now`.
fn upcoming_filter(user_id: &str, now: DateTime<Utc>) -> String {
    format!(
        "userId eq '{}' and approvalStatus eq 'APPROVED' and endDate gt datetime'{}'",
        odata_literal(user_id),
        now.format("%Y-%m-%dT%H:%M:%S")
    )
}

/// Quote-escape a value embedded in an OData string literal.
fn odata_literal(value: &str) -> String {
    value.replace('\'', "''")
}
