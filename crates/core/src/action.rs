//! Classification of leave records into calendar actions.

use leavesync_domain::{Action, ApprovalStatus, LeaveRecord};

/// Decide what a record means for downstream calendars.
///
/// Cancellation wins over timestamps. Otherwise a record modified after its
/// creation (millisecond precision) is an update, anything else a create.
pub fn resolve(record: &LeaveRecord) -> Action {
    if record.approval_status == ApprovalStatus::Cancelled {
        return Action::Cancel;
    }

    let elapsed = record.last_modified_at.timestamp_millis() - record.created_at.timestamp_millis();
    if elapsed > 0 {
        Action::Update
    } else {
        Action::Create
    }
}

/// `record` with its action assigned by [`resolve`].
pub fn classify(record: LeaveRecord) -> LeaveRecord {
    let action = resolve(&record);
    record.with_action(action)
}
