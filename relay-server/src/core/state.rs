use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::config::{Config, EncoderKind};
use crate::core::error::RelayResult;
use crate::core::tasks::BackgroundTasks;
use crate::jobs::PrintJobService;
use crate::receipt::ReceiptRenderer;
use crate::store::{JobStore, RedbJobStore, StoreUnavailable};
use crate::telemetry::{ErrorTelemetry, TracingTelemetry};
use star_markup::{CputilEncoder, DocumentEncoder, PassthroughEncoder};

/// Server state - shared handles behind every request
///
/// Cloning is shallow; all heavyweight members sit behind `Arc`.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | Immutable configuration |
/// | store | Shared job store (redb in deployment) |
/// | print_jobs | Poll / fetch / acknowledge service |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: Arc<dyn JobStore>,
    pub print_jobs: PrintJobService,
    started_at: Instant,
}

impl ServerState {
    /// Assemble state from pre-built collaborators
    ///
    /// Deployment goes through [`ServerState::initialize`]; tests inject
    /// in-memory stores and deterministic encoders here.
    pub fn new(
        config: Config,
        store: Arc<dyn JobStore>,
        encoder: Arc<dyn DocumentEncoder>,
        telemetry: Arc<dyn ErrorTelemetry>,
    ) -> Self {
        let renderer = ReceiptRenderer::new(config.receipt_width);
        let print_jobs = PrintJobService::new(store.clone(), encoder, renderer, telemetry);

        Self {
            config,
            store,
            print_jobs,
            started_at: Instant::now(),
        }
    }

    /// Initialize state for deployment: open the store and wire the
    /// configured encoder
    pub fn initialize(config: &Config) -> RelayResult<Self> {
        let store: Arc<dyn JobStore> = Arc::new(
            RedbJobStore::open(&config.store_path).map_err(StoreUnavailable::from)?,
        );

        let encoder: Arc<dyn DocumentEncoder> = match config.encoder {
            EncoderKind::Cputil => Arc::new(CputilEncoder::new(
                config.cputil_path.clone(),
                config.printer_model,
            )),
            EncoderKind::Passthrough => Arc::new(PassthroughEncoder::new()),
        };

        let telemetry: Arc<dyn ErrorTelemetry> = Arc::new(TracingTelemetry::new());

        Ok(Self::new(config.clone(), store, encoder, telemetry))
    }

    /// Register background tasks; call before serving requests
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let store = self.store.clone();
        let interval = Duration::from_secs(self.config.job_purge_interval_secs.max(1));
        let token = tasks.shutdown_token();

        tasks.spawn("job_purge", async move {
            let mut ticker = tokio::time::interval(interval);
            // The immediate first tick; sweeps start one interval in
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        match store.purge_expired().await {
                            Ok(0) => {}
                            Ok(purged) => {
                                tracing::info!(purged, "Purged expired print jobs");
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "Expired-job purge failed");
                            }
                        }
                    }
                }
            }
        });
    }

    /// Seconds since this state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
