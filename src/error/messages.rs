//! Client-facing error message bodies.
//!
//! These strings are served verbatim as plain-text error bodies and are part
//! of the wire contract with existing clients. Do not reword them.

pub const MALFORMED_REQUEST: &str = "malformed request";
pub const INVALID_CRON_EXPRESSION: &str = "Cron expression invalid";
pub const INVALID_EMAIL_ID: &str = "Provided invalid Email ID";
pub const INVALID_TAG: &str = "Tag(s) are missing";
pub const NON_EXISTENT_PROC: &str = "proc name non existent";
pub const DUPLICATE_JOB_NAME_ARGS: &str =
    "provided duplicate combination of job name and args for scheduling";
pub const SCHEDULE_NOT_FOUND: &str = "scheduled job not found";
pub const JOB_NOT_FOUND: &str = "job not found";
pub const SERVER_ERROR: &str = "Something went wrong";
