//! Request and response wire types.
//!
//! Field names are the wire contract; existing clients depend on them.

mod execution;
mod schedule;

pub use execution::{ExecuteJobRequest, ExecuteJobResponse, LogsQuery};
pub use schedule::{CreateScheduleRequest, ScheduleResponse};
