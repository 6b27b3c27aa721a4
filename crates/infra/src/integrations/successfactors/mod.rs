//! SAP SuccessFactors integration
//!
//! Reads EmployeeTime records over OData v2 and maps them onto
//! [`LeaveRecord`](leavesync_domain::LeaveRecord)s.

pub mod client;
pub mod dates;
pub mod types;

pub use client::SuccessFactorsClient;
