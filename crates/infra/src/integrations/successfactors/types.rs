//! OData payloads returned by the EmployeeTime entity set.

use chrono::{DateTime, FixedOffset};
use leavesync_domain::{ApprovalStatus, LeaveRecordSource, UserRef};
use serde::Deserialize;

use super::dates;

/// `{"d": ...}` wrapper of every OData v2 JSON answer.
#[derive(Debug, Deserialize)]
pub struct ODataEnvelope<T> {
    pub d: T,
}

/// Collection body (`d.results`).
#[derive(Debug, Deserialize)]
pub struct ODataResults<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for ODataResults<T> {
    fn default() -> Self {
        Self { results: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeTimeDto {
    pub external_code: String,
    pub user_id: String,
    #[serde(deserialize_with = "dates::deserialize")]
    pub start_date: DateTime<FixedOffset>,
    #[serde(deserialize_with = "dates::deserialize")]
    pub end_date: DateTime<FixedOffset>,
    #[serde(deserialize_with = "dates::deserialize")]
    pub created_date_time: DateTime<FixedOffset>,
    #[serde(deserialize_with = "dates::deserialize")]
    pub last_modified_date_time: DateTime<FixedOffset>,
    pub approval_status: ApprovalStatus,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub time_type: Option<String>,
    #[serde(default)]
    pub user_id_nav: Option<UserNavDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNavDto {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub emp_info: Option<EmpInfoDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpInfoDto {
    #[serde(default)]
    pub job_info_nav: Option<ODataResults<JobInfoDto>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfoDto {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub manager_user_nav: Option<UserNavDto>,
}

impl UserNavDto {
    /// Only the first job info entry counts.
    fn primary_job(&self) -> Option<&JobInfoDto> {
        self.emp_info.as_ref()?.job_info_nav.as_ref()?.results.first()
    }

    fn into_user_ref(self, user_id: String) -> UserRef {
        let job = self.primary_job();
        let job_time_zone = job.and_then(|j| j.timezone.clone());
        let manager = job
            .and_then(|j| j.manager_user_nav.as_ref())
            .map(|m| Box::new(m.to_manager_ref()));

        UserRef {
            user_id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            time_zone: self.time_zone,
            job_time_zone,
            manager,
        }
    }

    fn to_manager_ref(&self) -> UserRef {
        UserRef {
            user_id: self.user_id.clone().unwrap_or_default(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            time_zone: self.time_zone.clone(),
            job_time_zone: None,
            manager: None,
        }
    }
}

impl EmployeeTimeDto {
    pub fn into_source(self) -> LeaveRecordSource {
        let user_id = self.user_id;
        let user = self
            .user_id_nav
            .unwrap_or_default()
            .into_user_ref(user_id.clone());

        LeaveRecordSource {
            external_code: self.external_code,
            user_id,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: self.created_date_time,
            last_modified_at: self.last_modified_date_time,
            approval_status: self.approval_status,
            comment: self.comment.filter(|c| !c.is_empty()),
            time_type: self.time_type,
            user,
        }
    }
}
