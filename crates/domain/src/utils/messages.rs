//! Auto-reply text sent while an employee is on leave.

use crate::types::LeaveRecord;

/// HTML body for the vacation responder of `record`'s owner.
///
/// Dates are the local calendar dates of the leave window. The manager
/// sentence is left out when no manager is known.
pub fn auto_reply_message(record: &LeaveRecord) -> String {
    let mut message = format!(
        "<p>Dear Sender,</p><p>Please note that I will be on leave from {} to {}. \
         During this time, I will have limited access to my email.</p>",
        record.start_date.date_naive(),
        record.end_date.date_naive(),
    );

    if let Some(manager) = record.user.manager.as_deref() {
        let name = manager.display_name();
        if !name.is_empty() {
            message.push_str(&format!(
                "<p>For any urgent issue please contact my manager {name}.</p>"
            ));
        }
    }

    message.push_str("Regards,<br>");
    message.push_str(&record.user.display_name());
    message
}
