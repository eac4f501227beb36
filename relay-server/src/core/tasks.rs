//! Background task management
//!
//! Central registry for background tasks: registration, panic capture and
//! graceful shutdown.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct RegisteredTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// Background task registry
///
/// Tasks watch the shared [`CancellationToken`] and exit when it fires;
/// [`BackgroundTasks::shutdown`] cancels the token and joins every task.
pub struct BackgroundTasks {
    tasks: Vec<RegisteredTask>,
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token tasks should select on to observe shutdown
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Register and start a background task
    ///
    /// The future is wrapped to capture panics: a panicking task logs an
    /// error instead of taking the process down.
    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let wrapped_future = async move {
            let result: Result<(), Box<dyn std::any::Any + Send>> =
                AssertUnwindSafe(future).catch_unwind().await;
            if let Err(panic_info) = result {
                let panic_msg: String = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                tracing::error!(
                    task = %name,
                    panic = %panic_msg,
                    "Background task panicked! This is a bug that should be reported."
                );
            }
        };

        let handle = tokio::spawn(wrapped_future);
        tracing::debug!(task = %name, "Registered background task");
        self.tasks.push(RegisteredTask { name, handle });
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Log a one-line summary of the registered tasks
    pub fn log_summary(&self) {
        let names: Vec<&str> = self.tasks.iter().map(|t| t.name).collect();
        tracing::info!(
            "Background tasks registered: {} ({})",
            self.tasks.len(),
            names.join(", ")
        );
    }

    /// Graceful shutdown: cancel every task and wait for completion
    pub async fn shutdown(self) {
        tracing::info!("Shutting down {} background tasks...", self.tasks.len());

        self.shutdown.cancel();

        for task in self.tasks {
            match task.handle.await {
                Ok(()) => {
                    tracing::debug!(task = %task.name, "Task completed");
                }
                Err(e) if e.is_cancelled() => {
                    tracing::debug!(task = %task.name, "Task cancelled");
                }
                Err(e) => {
                    tracing::error!(task = %task.name, error = ?e, "Task panicked");
                }
            }
        }

        tracing::info!("All background tasks stopped");
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_cancels_and_joins_tasks() {
        let mut tasks = BackgroundTasks::new();
        let token = tasks.shutdown_token();
        let (done_tx, done_rx) = tokio::sync::oneshot::channel();

        tasks.spawn("waiter", async move {
            token.cancelled().await;
            let _ = done_tx.send(());
        });

        assert_eq!(tasks.len(), 1);
        tasks.shutdown().await;
        done_rx.await.unwrap();
    }

    #[tokio::test]
    async fn test_panicking_task_is_contained() {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn("bomb", async {
            panic!("boom");
        });

        // Join must not propagate the panic
        tasks.shutdown().await;
    }
}
