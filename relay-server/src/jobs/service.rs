//! Print job lifecycle service - poll, fetch, acknowledge

use crate::core::error::RelayResult;
use crate::jobs::query::find_pending;
use crate::jobs::token::PrintToken;
use crate::jobs::types::{JobRecord, PrinterIdentity};
use crate::receipt::ReceiptRenderer;
use crate::store::JobStore;
use crate::telemetry::ErrorTelemetry;
use star_markup::{ContentType, DocumentEncoder};
use std::sync::Arc;

/// Result of one poll: the token naming every job offered to the printer
#[derive(Debug, Clone)]
pub struct PollOutcome {
    /// Opaque client-held cursor; round-trips through the printer verbatim
    pub token: String,
    pub has_work: bool,
}

/// Rendered and encoded receipt batch ready for delivery
#[derive(Debug, Clone)]
pub struct FetchPayload {
    pub bytes: Vec<u8>,
    pub media_type: ContentType,
}

/// Print job lifecycle service
///
/// Responsibilities:
/// - Poll: find a printer's pending jobs and issue a job token
/// - Fetch: resolve a token back to records, render and encode receipts
/// - Acknowledge: delete printed jobs
///
/// Every failed operation is reported to telemetry exactly once before it
/// reaches the caller.
#[derive(Clone)]
pub struct PrintJobService {
    store: Arc<dyn JobStore>,
    encoder: Arc<dyn DocumentEncoder>,
    renderer: ReceiptRenderer,
    telemetry: Arc<dyn ErrorTelemetry>,
}

impl PrintJobService {
    pub fn new(
        store: Arc<dyn JobStore>,
        encoder: Arc<dyn DocumentEncoder>,
        renderer: ReceiptRenderer,
        telemetry: Arc<dyn ErrorTelemetry>,
    ) -> Self {
        Self {
            store,
            encoder,
            renderer,
            telemetry,
        }
    }

    /// Media type the encoder will produce on fetch
    pub fn media_type(&self) -> ContentType {
        self.encoder.media_type()
    }

    /// Offer the printer its pending jobs as a token
    pub async fn poll(&self, printer: &PrinterIdentity) -> RelayResult<PollOutcome> {
        let result = self.poll_inner(printer).await;
        self.capture(result)
    }

    async fn poll_inner(&self, printer: &PrinterIdentity) -> RelayResult<PollOutcome> {
        let pending = find_pending(self.store.as_ref(), printer).await?;
        let token = PrintToken::new(pending);

        Ok(PollOutcome {
            token: token.encode(),
            // Advertised regardless of queue depth; the token alone decides
            // what prints. Deployed printer firmware expects this flag set.
            has_work: true,
        })
    }

    /// Render and encode the receipts named by `token`
    ///
    /// Jobs deleted since the poll are silently dropped from the batch;
    /// fetching the same token twice produces the same payload for jobs
    /// still present.
    pub async fn fetch(&self, token: &str) -> RelayResult<FetchPayload> {
        let result = self.fetch_inner(token).await;
        self.capture(result)
    }

    async fn fetch_inner(&self, token: &str) -> RelayResult<FetchPayload> {
        let token = PrintToken::parse(token)?;

        let mut records = Vec::new();
        for key in token.keys() {
            let Some(raw) = self.store.get(key.as_str()).await? else {
                continue;
            };
            match serde_json::from_str::<JobRecord>(&raw) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!("Skipping malformed job record at {}: {}", key, err);
                }
            }
        }

        let markup = self.renderer.render(&records);
        let bytes = self.encoder.encode(&markup).await?;

        Ok(FetchPayload {
            bytes,
            media_type: self.encoder.media_type(),
        })
    }

    /// Delete every job named by `token`
    ///
    /// The first failing delete aborts the pass; jobs not yet deleted stay
    /// pending and will be offered again on the next poll.
    pub async fn acknowledge(&self, token: &str) -> RelayResult<()> {
        let result = self.acknowledge_inner(token).await;
        self.capture(result)
    }

    async fn acknowledge_inner(&self, token: &str) -> RelayResult<()> {
        let token = PrintToken::parse(token)?;

        for key in token.keys() {
            self.store.delete(key.as_str()).await?;
        }

        Ok(())
    }

    fn capture<T>(&self, result: RelayResult<T>) -> RelayResult<T> {
        if let Err(err) = &result {
            self.telemetry.capture(err);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RelayError;
    use crate::store::{MemoryJobStore, ScanPage, StoreResult, StoreUnavailable};
    use async_trait::async_trait;
    use star_markup::PassthroughEncoder;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingTelemetry {
        captured: Mutex<Vec<String>>,
    }

    impl RecordingTelemetry {
        fn count(&self) -> usize {
            self.captured.lock().unwrap().len()
        }
    }

    impl ErrorTelemetry for RecordingTelemetry {
        fn capture(&self, error: &RelayError) {
            self.captured.lock().unwrap().push(error.to_string());
        }
    }

    /// Delegates to a real store but fails deletes of one key
    struct FailingDeleteStore {
        inner: MemoryJobStore,
        fail_key: String,
    }

    #[async_trait]
    impl JobStore for FailingDeleteStore {
        async fn scan_page(
            &self,
            prefix: &str,
            cursor: u64,
            count: usize,
        ) -> StoreResult<ScanPage> {
            self.inner.scan_page(prefix, cursor, count).await
        }

        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn put(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
            self.inner.put(key, value, ttl).await
        }

        async fn delete(&self, key: &str) -> StoreResult<()> {
            if key == self.fail_key {
                return Err(StoreUnavailable::new("injected delete failure"));
            }
            self.inner.delete(key).await
        }

        async fn purge_expired(&self) -> StoreResult<usize> {
            self.inner.purge_expired().await
        }
    }

    fn order_json(first_name: &str, order_number: u32) -> String {
        serde_json::json!({
            "placementTime": "01/15 10:58 AM",
            "guestFirstName": first_name,
            "guestLastName": "Khan",
            "guestPhone": "(555) 010-0000",
            "orderNumber": order_number,
            "isASAP": false,
            "estimatedCompletionTime": "11:30 AM",
            "orderType": "PICKUP",
            "orderItems": [{
                "quantity": 1,
                "food": {"name": "House Salad"},
                "total": 9.0
            }],
            "subTotal": 9.0,
            "tax": 0.79,
            "tip": 1.5,
            "total": 11.29
        })
        .to_string()
    }

    fn record(status: &str, first_name: &str, order_number: u32) -> String {
        serde_json::json!({
            "status": status,
            "order": order_json(first_name, order_number),
        })
        .to_string()
    }

    fn service_over(store: Arc<dyn JobStore>) -> (PrintJobService, Arc<RecordingTelemetry>) {
        let telemetry = Arc::new(RecordingTelemetry::default());
        let service = PrintJobService::new(
            store,
            Arc::new(PassthroughEncoder::new()),
            ReceiptRenderer::new(48),
            telemetry.clone(),
        );
        (service, telemetry)
    }

    #[tokio::test]
    async fn test_poll_offers_pending_jobs_and_always_signals_work() {
        let store = MemoryJobStore::new();
        store
            .put("printJob:aa:1", &record("PENDING", "Mo", 1), None)
            .await
            .unwrap();
        store
            .put("printJob:aa:2", &record("DONE", "Dana", 2), None)
            .await
            .unwrap();
        store
            .put("printJob:aa:3", &record("PENDING", "Lee", 3), None)
            .await
            .unwrap();

        let (service, telemetry) = service_over(Arc::new(store));
        let printer = PrinterIdentity::new("aa");

        let outcome = service.poll(&printer).await.unwrap();

        assert!(outcome.has_work);
        assert_eq!(outcome.token, r#"["printJob:aa:1","printJob:aa:3"]"#);
        assert_eq!(telemetry.count(), 0);
    }

    #[tokio::test]
    async fn test_poll_of_empty_queue_still_signals_work() {
        let (service, _) = service_over(Arc::new(MemoryJobStore::new()));
        let printer = PrinterIdentity::new("aa");

        let outcome = service.poll(&printer).await.unwrap();

        assert!(outcome.has_work);
        assert_eq!(outcome.token, "[]");
    }

    #[tokio::test]
    async fn test_fetch_renders_jobs_still_present() {
        let store = MemoryJobStore::new();
        store
            .put("printJob:aa:1", &record("PENDING", "Mo", 1), None)
            .await
            .unwrap();
        store
            .put("printJob:aa:2", &record("PENDING", "Dana", 2), None)
            .await
            .unwrap();

        let (service, _) = service_over(Arc::new(store.clone()));
        let printer = PrinterIdentity::new("aa");
        let outcome = service.poll(&printer).await.unwrap();

        // One job acknowledged out-of-band between poll and fetch
        store.delete("printJob:aa:2").await.unwrap();

        let payload = service.fetch(&outcome.token).await.unwrap();
        let markup = String::from_utf8(payload.bytes).unwrap();

        assert!(markup.contains("Mo K."));
        assert!(!markup.contains("Dana K."));
        assert_eq!(markup.matches("[cut: feed; partial]").count(), 1);
        assert_eq!(payload.media_type, ContentType::StarMarkup);
    }

    #[tokio::test]
    async fn test_fetch_is_repeatable_for_unchanged_jobs() {
        let store = MemoryJobStore::new();
        store
            .put("printJob:aa:1", &record("PENDING", "Mo", 1), None)
            .await
            .unwrap();

        let (service, _) = service_over(Arc::new(store));
        let token = r#"["printJob:aa:1"]"#;

        let first = service.fetch(token).await.unwrap();
        let second = service.fetch(token).await.unwrap();

        assert_eq!(first.bytes, second.bytes);
        assert!(!first.bytes.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_rejects_malformed_token_and_captures_once() {
        let (service, telemetry) = service_over(Arc::new(MemoryJobStore::new()));

        let err = service.fetch("not-json").await.unwrap_err();

        assert!(matches!(err, RelayError::BadToken(_)));
        assert_eq!(telemetry.count(), 1);
    }

    #[tokio::test]
    async fn test_acknowledge_deletes_every_named_job() {
        let store = MemoryJobStore::new();
        store
            .put("printJob:aa:1", &record("PENDING", "Mo", 1), None)
            .await
            .unwrap();
        store
            .put("printJob:aa:2", &record("PENDING", "Dana", 2), None)
            .await
            .unwrap();

        let (service, _) = service_over(Arc::new(store.clone()));
        let token = r#"["printJob:aa:1","printJob:aa:2"]"#;

        service.acknowledge(token).await.unwrap();
        assert_eq!(store.get("printJob:aa:1").await.unwrap(), None);
        assert_eq!(store.get("printJob:aa:2").await.unwrap(), None);

        // Acknowledging the same token again is a no-op
        service.acknowledge(token).await.unwrap();
    }

    #[tokio::test]
    async fn test_acknowledge_aborts_on_first_delete_failure() {
        let inner = MemoryJobStore::new();
        for suffix in ["1", "2", "3"] {
            let key = format!("printJob:aa:{suffix}");
            inner
                .put(&key, &record("PENDING", "Mo", 1), None)
                .await
                .unwrap();
        }
        let store = Arc::new(FailingDeleteStore {
            inner: inner.clone(),
            fail_key: "printJob:aa:2".to_string(),
        });

        let (service, telemetry) = service_over(store);
        let token = r#"["printJob:aa:1","printJob:aa:2","printJob:aa:3"]"#;

        let err = service.acknowledge(token).await.unwrap_err();

        assert!(matches!(err, RelayError::Store(_)));
        assert_eq!(telemetry.count(), 1);
        // Deletes before the failure landed; the rest were never attempted
        assert_eq!(inner.get("printJob:aa:1").await.unwrap(), None);
        assert!(inner.get("printJob:aa:2").await.unwrap().is_some());
        assert!(inner.get("printJob:aa:3").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_malformed_record_is_skipped_not_fatal() {
        let store = MemoryJobStore::new();
        store
            .put("printJob:aa:1", "{broken", None)
            .await
            .unwrap();
        store
            .put("printJob:aa:2", &record("PENDING", "Mo", 1), None)
            .await
            .unwrap();

        let (service, telemetry) = service_over(Arc::new(store));
        let token = r#"["printJob:aa:1","printJob:aa:2"]"#;

        let payload = service.fetch(token).await.unwrap();
        let markup = String::from_utf8(payload.bytes).unwrap();

        assert!(markup.contains("Mo K."));
        assert_eq!(telemetry.count(), 0);
    }
}
