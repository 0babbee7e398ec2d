use serde::{Deserialize, Serialize};

/// Canonical execution status, resolved on demand from cluster state and
/// never cached. Resolution is total: every cluster response maps to exactly
/// one of these five values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    #[serde(rename = "SUCCEEDED")]
    Succeeded,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "WAITING")]
    Waiting,
    /// The status query to the cluster itself failed.
    #[serde(rename = "JOB_EXECUTION_STATUS_FETCH_ERROR")]
    StatusFetchError,
    /// The cluster answered, but with state that maps to no definitive
    /// outcome (conflicting or partial unit states).
    #[serde(rename = "NO_DEFINITIVE_JOB_EXECUTION_STATUS_FOUND")]
    NoDefinitiveStatus,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Succeeded => "SUCCEEDED",
            ExecutionStatus::Failed => "FAILED",
            ExecutionStatus::Waiting => "WAITING",
            ExecutionStatus::StatusFetchError => "JOB_EXECUTION_STATUS_FETCH_ERROR",
            ExecutionStatus::NoDefinitiveStatus => "NO_DEFINITIVE_JOB_EXECUTION_STATUS_FOUND",
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_the_wire_contract() {
        let cases = [
            (ExecutionStatus::Succeeded, "\"SUCCEEDED\""),
            (ExecutionStatus::Failed, "\"FAILED\""),
            (ExecutionStatus::Waiting, "\"WAITING\""),
            (
                ExecutionStatus::StatusFetchError,
                "\"JOB_EXECUTION_STATUS_FETCH_ERROR\"",
            ),
            (
                ExecutionStatus::NoDefinitiveStatus,
                "\"NO_DEFINITIVE_JOB_EXECUTION_STATUS_FOUND\"",
            ),
        ];
        for (status, expected) in cases {
            assert_eq!(serde_json::to_string(&status).unwrap(), expected);
            assert_eq!(format!("\"{status}\""), expected);
        }
    }
}
