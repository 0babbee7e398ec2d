//! Kubernetes REST implementation of the cluster client.
//!
//! Talks to the API server directly over HTTPS: `batch/v1` Jobs for
//! submission and state, `core/v1` pod logs (with `follow=true`) for
//! streaming. Jobs run with `backoffLimit: 0` and `restartPolicy: Never`
//! so one submission maps to one execution attempt.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use rand::Rng;
use serde::Deserialize;
use serde_json::json;

use crate::cluster::{ClusterClient, JobState, JobSubmission, LogStream};
use crate::config::ClusterConfig;
use crate::error::{AppError, AppResult};

const EXECUTION_SUFFIX_LEN: usize = 8;
const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

// Kubernetes object names are DNS labels, capped at 63 characters.
const MAX_NAME_LEN: usize = 63;

pub struct KubernetesClient {
    http: reqwest::Client,
    base_url: String,
    namespace: String,
    token: Option<String>,
    job_ttl_seconds: u32,
    log_stream_timeout: u64,
}

impl KubernetesClient {
    pub fn new(config: &ClusterConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(10))
            .use_rustls_tls()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AppError::Configuration {
                key: "cluster".to_string(),
                source: anyhow::Error::from(e),
            })?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            namespace: config.namespace.clone(),
            token: config.token.clone(),
            job_ttl_seconds: config.job_ttl_seconds,
            log_stream_timeout: config.log_stream_timeout,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn jobs_path(&self) -> String {
        format!("/apis/batch/v1/namespaces/{}/jobs", self.namespace)
    }

    fn cluster_error(operation: &str, source: impl Into<anyhow::Error>) -> AppError {
        AppError::Cluster {
            operation: operation.to_string(),
            source: source.into(),
        }
    }
}

/// Derives a unique execution name from the job name: lowercase job name
/// plus a random suffix, truncated to the Kubernetes name limit. A job name
/// with no label-safe characters falls back to a fixed prefix, keeping the
/// result a valid DNS label.
pub fn generate_execution_name(job_name: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..EXECUTION_SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();

    let max_prefix = MAX_NAME_LEN - EXECUTION_SUFFIX_LEN - 1;
    let filtered: String = job_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(max_prefix)
        .collect();

    let prefix = match filtered.trim_matches('-') {
        "" => "job",
        trimmed => trimmed,
    };
    format!("{prefix}-{suffix}")
}

#[derive(Debug, Default, Deserialize)]
struct JobStatusFragment {
    #[serde(default)]
    active: i32,
    #[serde(default)]
    succeeded: i32,
    #[serde(default)]
    failed: i32,
    #[serde(default)]
    conditions: Vec<JobCondition>,
}

#[derive(Debug, Deserialize)]
struct JobCondition {
    #[serde(rename = "type")]
    condition_type: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct JobResource {
    #[serde(default)]
    status: Option<JobStatusFragment>,
}

#[derive(Debug, Deserialize)]
struct PodList {
    #[serde(default)]
    items: Vec<PodResource>,
}

#[derive(Debug, Deserialize)]
struct PodResource {
    metadata: PodMetadata,
}

#[derive(Debug, Deserialize)]
struct PodMetadata {
    name: String,
}

fn job_state_from(status: &JobStatusFragment) -> JobState {
    let condition_true = |name: &str| {
        status
            .conditions
            .iter()
            .any(|c| c.condition_type == name && c.status == "True")
    };

    JobState {
        active: status.active,
        succeeded: status.succeeded,
        failed: status.failed,
        complete: condition_true("Complete"),
        failed_condition: condition_true("Failed"),
    }
}

#[async_trait]
impl ClusterClient for KubernetesClient {
    async fn submit_job(&self, submission: JobSubmission) -> AppResult<String> {
        let operation = "submit job";
        let execution_name = generate_execution_name(&submission.job_name);

        let env: Vec<_> = submission
            .env
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect();

        let manifest = json!({
            "apiVersion": "batch/v1",
            "kind": "Job",
            "metadata": {
                "name": execution_name,
                "labels": {
                    "app": "dispatchd",
                    "dispatchd/job-name": submission.job_name,
                },
            },
            "spec": {
                "ttlSecondsAfterFinished": self.job_ttl_seconds,
                "backoffLimit": 0,
                "activeDeadlineSeconds": null,
                "template": {
                    "metadata": {
                        "labels": { "app": "dispatchd" },
                    },
                    "spec": {
                        "restartPolicy": "Never",
                        "containers": [{
                            "name": execution_name,
                            "image": submission.image_name,
                            "env": env,
                        }],
                    },
                },
            },
        });

        let response = self
            .request(reqwest::Method::POST, &self.jobs_path())
            .json(&manifest)
            .send()
            .await
            .map_err(|e| Self::cluster_error(operation, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Self::cluster_error(
                operation,
                anyhow::anyhow!("cluster rejected job: {status}: {body}"),
            ));
        }

        tracing::info!(
            job_name = %submission.job_name,
            execution_name = %execution_name,
            "job submitted to cluster"
        );
        Ok(execution_name)
    }

    async fn job_state(&self, execution_name: &str) -> AppResult<JobState> {
        let operation = "fetch job state";
        let path = format!("{}/{}", self.jobs_path(), execution_name);

        let response = self
            .request(reqwest::Method::GET, &path)
            .send()
            .await
            .map_err(|e| Self::cluster_error(operation, e))?;

        if !response.status().is_success() {
            return Err(Self::cluster_error(
                operation,
                anyhow::anyhow!("cluster returned {}", response.status()),
            ));
        }

        let job: JobResource = response
            .json()
            .await
            .map_err(|e| Self::cluster_error(operation, e))?;

        Ok(job_state_from(&job.status.unwrap_or_default()))
    }

    async fn stream_logs(&self, execution_name: &str) -> AppResult<LogStream> {
        let operation = "stream logs";

        // Resolve the execution's pod first so an unknown execution fails
        // before any bytes are streamed.
        let pods_path = format!(
            "/api/v1/namespaces/{}/pods?labelSelector=job-name%3D{}",
            self.namespace, execution_name
        );
        let response = self
            .request(reqwest::Method::GET, &pods_path)
            .send()
            .await
            .map_err(|e| Self::cluster_error(operation, e))?;

        if !response.status().is_success() {
            return Err(Self::cluster_error(
                operation,
                anyhow::anyhow!("pod lookup returned {}", response.status()),
            ));
        }

        let pods: PodList = response
            .json()
            .await
            .map_err(|e| Self::cluster_error(operation, e))?;

        let Some(pod) = pods.items.first() else {
            return Err(AppError::ExecutionNotFound {
                name: execution_name.to_string(),
            });
        };

        let log_path = format!(
            "/api/v1/namespaces/{}/pods/{}/log?follow=true",
            self.namespace, pod.metadata.name
        );
        let response = self
            .request(reqwest::Method::GET, &log_path)
            // Long-lived follow: replace the client default with the
            // configured streaming deadline.
            .timeout(Duration::from_secs(self.log_stream_timeout))
            .send()
            .await
            .map_err(|e| Self::cluster_error(operation, e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::ExecutionNotFound {
                name: execution_name.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::cluster_error(
                operation,
                anyhow::anyhow!("log request returned {}", response.status()),
            ));
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| Self::cluster_error("read log chunk", e)));
        Ok(stream.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(active: i32, succeeded: i32, failed: i32, conditions: &[(&str, &str)]) -> JobStatusFragment {
        JobStatusFragment {
            active,
            succeeded,
            failed,
            conditions: conditions
                .iter()
                .map(|(t, s)| JobCondition {
                    condition_type: t.to_string(),
                    status: s.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn complete_condition_is_detected() {
        let state = job_state_from(&fragment(0, 1, 0, &[("Complete", "True")]));
        assert!(state.complete);
        assert!(!state.failed_condition);
    }

    #[test]
    fn failed_condition_is_detected() {
        let state = job_state_from(&fragment(0, 0, 1, &[("Failed", "True")]));
        assert!(state.failed_condition);
    }

    #[test]
    fn false_conditions_do_not_count() {
        let state = job_state_from(&fragment(1, 0, 0, &[("Complete", "False")]));
        assert!(!state.complete);
        assert_eq!(state.active, 1);
    }

    #[test]
    fn missing_status_yields_default_state() {
        let job: JobResource = serde_json::from_value(serde_json::json!({
            "metadata": { "name": "report-abc123" }
        }))
        .unwrap();
        let state = job_state_from(&job.status.unwrap_or_default());
        assert_eq!(state, JobState::default());
    }

    #[test]
    fn execution_names_are_unique_and_label_safe() {
        let first = generate_execution_name("Run-Report");
        let second = generate_execution_name("Run-Report");
        assert_ne!(first, second);
        assert!(first.starts_with("run-report-"));
        assert!(first.len() <= MAX_NAME_LEN);
        assert!(
            first
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        );
    }

    #[test]
    fn long_job_names_are_truncated() {
        let name = generate_execution_name(&"x".repeat(200));
        assert!(name.len() <= MAX_NAME_LEN);
    }

    #[test]
    fn label_unsafe_job_names_get_a_fixed_prefix() {
        for job_name in ["@#!$", "日本語", "---", ""] {
            let name = generate_execution_name(job_name);
            assert!(name.starts_with("job-"), "name {name:?} for {job_name:?}");
            assert_eq!(name.len(), "job-".len() + EXECUTION_SUFFIX_LEN);
        }
    }
}
