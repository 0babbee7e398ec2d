//! Log streamer: live relay of execution logs.

use std::sync::Arc;

use crate::cluster::{ClusterClient, LogStream};
use crate::error::AppResult;

/// Relays the cluster's log byte stream to the caller without buffering the
/// whole body. Backpressure and cancellation both flow through the stream
/// itself: a slow consumer throttles the upstream read, and dropping the
/// stream (client disconnect) releases the upstream handle.
#[derive(Clone)]
pub struct LogStreamerService {
    cluster: Arc<dyn ClusterClient>,
}

impl LogStreamerService {
    pub fn new(cluster: Arc<dyn ClusterClient>) -> Self {
        Self { cluster }
    }

    /// Opens the log stream for a named execution. Unknown executions fail
    /// here, before any bytes flow.
    pub async fn stream(&self, execution_name: &str) -> AppResult<LogStream> {
        let stream = self.cluster.stream_logs(execution_name).await?;
        tracing::info!(execution_name = %execution_name, "log stream opened");
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::testkit::FakeClusterClient;
    use futures::StreamExt;
    use std::time::Duration;

    #[tokio::test]
    async fn unknown_execution_fails_before_streaming() {
        let cluster = Arc::new(FakeClusterClient::default());
        let service = LogStreamerService::new(cluster);

        let error = service
            .stream("no-such-execution")
            .await
            .err()
            .expect("expected an error");
        assert!(matches!(error, AppError::ExecutionNotFound { .. }));
    }

    #[tokio::test]
    async fn relays_log_bytes_in_order() {
        let cluster = Arc::new(FakeClusterClient::with_logs(
            "run-report-abc123",
            vec!["line one\n", "line two\n"],
        ));
        let service = LogStreamerService::new(cluster);

        let mut stream = service.stream("run-report-abc123").await.unwrap();
        let first = stream.next().await.unwrap().unwrap();
        let second = stream.next().await.unwrap().unwrap();

        assert_eq!(&first[..], b"line one\n");
        assert_eq!(&second[..], b"line two\n");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn dropping_the_stream_releases_the_upstream_handle() {
        let cluster = Arc::new(FakeClusterClient::with_logs(
            "run-report-abc123",
            vec!["line one\n"],
        ));
        let service = LogStreamerService::new(cluster.clone());

        let stream = service.stream("run-report-abc123").await.unwrap();
        assert!(cluster.stream_open());

        drop(stream);
        // The guard is dropped synchronously with the stream.
        tokio::time::timeout(Duration::from_millis(100), async {
            while cluster.stream_open() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("upstream handle must be released on drop");
    }
}
