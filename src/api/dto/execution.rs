//! Execution wire types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::services::{ExecutionReceipt, ExecutionRequest};

#[derive(Debug, Deserialize)]
pub struct ExecuteJobRequest {
    pub name: String,
    #[serde(default)]
    pub args: HashMap<String, String>,
}

impl ExecuteJobRequest {
    pub fn into_execution_request(self, submitted_by: String) -> ExecutionRequest {
        ExecutionRequest {
            job_name: self.name,
            args: self.args,
            submitted_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExecuteJobResponse {
    pub name: String,
    pub execution_name: String,
}

impl From<ExecutionReceipt> for ExecuteJobResponse {
    fn from(receipt: ExecutionReceipt) -> Self {
        Self {
            name: receipt.job_name,
            execution_name: receipt.execution_name,
        }
    }
}

/// Query parameters for the log relay endpoint.
#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub name: String,
}
