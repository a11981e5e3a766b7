use super::batch_controller::{run_import, BatchOptions};
use super::csv_parser::{missing_columns, parse_csv};
use super::progress_tracker::ProgressTracker;
use super::reporter::{self, ImportReport, NotificationSink, TracingNotificationSink};
use super::submitter::{CatalogSubmitter, ItemSubmitter};
use crate::shared::catalog::CatalogApiClient;
use contracts::domain::a001_jewellery::columns;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_from_csv::{
    ImportFromCsv, ImportProgress, ImportResponse, ImportStartStatus,
};
use std::sync::Arc;
use uuid::Uuid;

/// Сколько часов хранить завершённые сессии
const SESSION_RETENTION_HOURS: i64 = 24;

/// Executor для UseCase импорта изделий из CSV
#[derive(Clone)]
pub struct ImportExecutor {
    catalog: Arc<CatalogApiClient>,
    pub progress_tracker: Arc<ProgressTracker>,
    notifier: Arc<dyn NotificationSink>,
    options: BatchOptions,
}

impl ImportExecutor {
    pub fn new(progress_tracker: Arc<ProgressTracker>) -> Self {
        Self {
            catalog: Arc::new(CatalogApiClient::from_config()),
            progress_tracker,
            notifier: Arc::new(TracingNotificationSink),
            options: BatchOptions::from_config(),
        }
    }

    pub fn with_parts(
        catalog: Arc<CatalogApiClient>,
        progress_tracker: Arc<ProgressTracker>,
        notifier: Arc<dyn NotificationSink>,
        options: BatchOptions,
    ) -> Self {
        Self {
            catalog,
            progress_tracker,
            notifier,
            options,
        }
    }

    /// Запустить импорт (создаёт async task и возвращает session_id).
    /// `token` - токен каталога текущего пользователя, `owner_id` - его id.
    pub fn start_import(
        &self,
        file_name: String,
        bytes: Vec<u8>,
        token: String,
        owner_id: String,
    ) -> ImportResponse {
        self.progress_tracker
            .cleanup_old_sessions(SESSION_RETENTION_HOURS);

        let session_id = Uuid::new_v4().to_string();
        self.progress_tracker
            .create_session(session_id.clone(), file_name.clone(), owner_id);

        let submitter: Arc<dyn ItemSubmitter> =
            Arc::new(CatalogSubmitter::new(self.catalog.clone(), token));
        let executor = self.clone();
        let sid = session_id.clone();

        tokio::spawn(async move {
            executor.execute_import(&sid, &bytes, submitter).await;
        });

        tracing::info!(
            "{} session {} started for file '{}'",
            ImportFromCsv::full_name(),
            session_id,
            file_name
        );

        ImportResponse {
            session_id,
            status: ImportStartStatus::Started,
            message: "Import started".to_string(),
        }
    }

    /// Получить прогресс сессии пользователя
    pub fn get_progress(&self, session_id: &str, owner_id: &str) -> Option<ImportProgress> {
        self.progress_tracker.get_progress_for(session_id, owner_id)
    }

    /// Выполнить импорт (фоновая задача). None - файл не прочитан.
    pub(crate) async fn execute_import(
        &self,
        session_id: &str,
        bytes: &[u8],
        submitter: Arc<dyn ItemSubmitter>,
    ) -> Option<ImportReport> {
        let rows = match parse_csv(bytes) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("CSV import {} failed: {}", session_id, e);
                let notification = reporter::file_error_notification(&e);
                self.notifier.notify(&notification);
                self.progress_tracker.add_error(session_id, e.to_string());
                self.progress_tracker.fail_session(session_id, notification);
                return None;
            }
        };

        let missing = missing_columns(&rows, &columns::REQUIRED);
        if !missing.is_empty() {
            let msg = format!("Missing columns: {}", missing.join(", "));
            tracing::warn!("CSV import {}: {}", session_id, msg);
            self.progress_tracker.add_error(session_id, msg);
        }

        self.progress_tracker.set_total(session_id, rows.len());
        tracing::info!("CSV import {}: {} rows to process", session_id, rows.len());

        let tracker = &self.progress_tracker;
        let state = run_import(rows, submitter, &self.options, |state, failures| {
            tracker.update_state(session_id, state);
            for failure in failures {
                tracker.add_error(
                    session_id,
                    format!("Row {}: {}", failure.row, failure.message),
                );
            }
        })
        .await;

        let report = reporter::report(&state, self.notifier.as_ref());
        self.progress_tracker.complete_session(
            session_id,
            report.outcome,
            report.notification.clone(),
        );

        tracing::info!(
            "CSV import {} finished: total={}, succeeded={}, failed={}",
            session_id,
            state.total,
            state.succeeded,
            state.failed
        );

        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_import_from_csv::batch_controller::tests::FakeCatalog;
    use crate::usecases::u501_import_from_csv::reporter::tests::RecordingSink;
    use contracts::usecases::u501_import_from_csv::{ImportOutcome, ImportStatus, Severity};

    fn executor(notifier: Arc<RecordingSink>) -> ImportExecutor {
        ImportExecutor::with_parts(
            Arc::new(CatalogApiClient::new("http://127.0.0.1:9/graphql", 5)),
            Arc::new(ProgressTracker::new()),
            notifier,
            BatchOptions::default(),
        )
    }

    fn csv_with_rows(count: usize, blank_identity_row: Option<usize>) -> String {
        let mut csv = String::from(
            "Nivoda Stock ID,Nivoda Unique SKU,Product Name,Option 1 Value,Option 2 Value,Natural Variant Price\n",
        );
        for i in 1..=count {
            if blank_identity_row == Some(i) {
                csv.push_str(&format!(",,Ring {},18KT Rose Gold,Oval,100\n", i));
            } else {
                csv.push_str(&format!(
                    "NIV-{:03},SKU-{:03},Ring {},18KT Rose Gold,Oval,100\n",
                    i, i, i
                ));
            }
        }
        csv
    }

    #[tokio::test]
    async fn test_import_with_partial_failure() {
        let sink = Arc::new(RecordingSink::default());
        let executor = executor(sink.clone());
        executor
            .progress_tracker
            .create_session("s1".to_string(), "rings.csv".to_string(), "u1".to_string());

        let catalog = Arc::new(FakeCatalog::failing(&["SKU-010"]));
        let csv = csv_with_rows(12, Some(7));
        let report = executor
            .execute_import("s1", csv.as_bytes(), catalog.clone())
            .await
            .unwrap();

        assert_eq!(
            report.outcome,
            ImportOutcome::PartialFailure {
                total: 12,
                succeeded: 10,
                failed: 2
            }
        );
        assert_eq!(catalog.calls(), 11);

        let progress = executor.get_progress("s1", "u1").unwrap();
        assert_eq!(progress.status, ImportStatus::CompletedWithErrors);
        assert_eq!(progress.state.progress_fraction, 1.0);
        assert!(progress.error_messages.iter().any(|m| m.starts_with("Row 7:")));
        assert!(progress.error_messages.iter().any(|m| m.starts_with("Row 10:")));
        // В заголовке нет части обязательных колонок
        assert!(progress
            .error_messages
            .iter()
            .any(|m| m.starts_with("Missing columns:")));

        assert!(executor.get_progress("s1", "u2").is_none());

        let received = sink.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].description, "Imported 10 items, 2 failed.");
    }

    #[tokio::test]
    async fn test_import_all_rows_succeed() {
        let sink = Arc::new(RecordingSink::default());
        let executor = executor(sink.clone());
        executor
            .progress_tracker
            .create_session("s1".to_string(), "rings.csv".to_string(), "u1".to_string());

        let csv = csv_with_rows(5, None);
        let report = executor
            .execute_import("s1", csv.as_bytes(), Arc::new(FakeCatalog::failing(&[])))
            .await
            .unwrap();

        assert!(report.outcome.is_success());
        assert_eq!(report.notification.severity, Severity::Default);
        assert_eq!(
            executor.get_progress("s1", "u1").unwrap().status,
            ImportStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_unreadable_file_runs_no_batches() {
        let sink = Arc::new(RecordingSink::default());
        let executor = executor(sink.clone());
        executor
            .progress_tracker
            .create_session("s1".to_string(), "broken.csv".to_string(), "u1".to_string());

        let catalog = Arc::new(FakeCatalog::failing(&[]));
        let report = executor
            .execute_import("s1", &[0xff, 0xfe, 0x00, 0x41], catalog.clone())
            .await;

        assert!(report.is_none());
        assert_eq!(catalog.calls(), 0);

        let progress = executor.get_progress("s1", "u1").unwrap();
        assert_eq!(progress.status, ImportStatus::Failed);
        assert!(progress.outcome.is_none());
        assert_eq!(progress.notification.unwrap().title, "Import failed");
        assert_eq!(sink.received.lock().unwrap().len(), 1);
    }
}
