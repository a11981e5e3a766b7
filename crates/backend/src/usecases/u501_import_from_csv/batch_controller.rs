use contracts::domain::a001_jewellery::RawRow;
use contracts::usecases::u501_import_from_csv::ImportBatchState;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

use super::row_mapper::{map_row, RowMappingError};
use super::submitter::{ItemSubmitter, RemoteSubmissionError};

/// Размер батча по умолчанию
pub const DEFAULT_BATCH_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub batch_size: usize,
    /// Ограничение на одну отправку; None - ждать сколько потребуется
    pub submit_timeout: Option<Duration>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            submit_timeout: None,
        }
    }
}

impl BatchOptions {
    pub fn from_config() -> Self {
        let config = &crate::shared::config::get_config().import;
        Self {
            batch_size: config.batch_size.max(1),
            submit_timeout: config.submit_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Ошибка одной строки; на соседние строки и батчи не влияет
#[derive(Debug, Error)]
pub enum RowError {
    #[error("mapping failed: {0}")]
    Mapping(#[from] RowMappingError),

    #[error("submission failed: {0}")]
    Submission(#[from] RemoteSubmissionError),

    #[error("task aborted: {0}")]
    Aborted(String),
}

/// Диагностика по упавшей строке
#[derive(Debug, Clone)]
pub struct RowFailure {
    /// Номер строки данных, с 1
    pub row: usize,
    pub message: String,
}

/// Прогнать строки через маппер и каталог батчами.
///
/// Строки батча обрабатываются конкурентно; следующий батч стартует только после того,
/// как все строки предыдущего завершились. После каждого батча `on_batch` получает
/// снимок счётчиков и ошибки этого батча.
pub async fn run_import<F>(
    rows: Vec<RawRow>,
    submitter: Arc<dyn ItemSubmitter>,
    options: &BatchOptions,
    mut on_batch: F,
) -> ImportBatchState
where
    F: FnMut(&ImportBatchState, &[RowFailure]),
{
    let mut state = ImportBatchState::new(rows.len());
    let batch_size = options.batch_size.max(1);

    let mut pending = rows.into_iter().enumerate();
    let mut batch_no = 0usize;
    loop {
        let batch: Vec<(usize, RawRow)> = pending.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }
        batch_no += 1;

        let (succeeded, failures) =
            run_batch(batch, &submitter, options.submit_timeout).await;
        state.record_batch(succeeded, failures.len());

        tracing::info!(
            "Import batch {} settled: ok={}, failed={}, progress={}/{}",
            batch_no,
            succeeded,
            failures.len(),
            state.processed(),
            state.total
        );
        on_batch(&state, &failures);
    }

    state
}

/// Один батч: все строки запускаются сразу, затем дожидаемся каждой
async fn run_batch(
    batch: Vec<(usize, RawRow)>,
    submitter: &Arc<dyn ItemSubmitter>,
    submit_timeout: Option<Duration>,
) -> (usize, Vec<RowFailure>) {
    let handles: Vec<(usize, JoinHandle<Result<String, RowError>>)> = batch
        .into_iter()
        .map(|(index, row)| {
            let submitter = Arc::clone(submitter);
            let handle = tokio::spawn(async move {
                process_row(&row, submitter.as_ref(), submit_timeout).await
            });
            (index, handle)
        })
        .collect();

    let mut succeeded = 0usize;
    let mut failures = Vec::new();

    for (index, handle) in handles {
        // Паника внутри отправки: строку считаем упавшей
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(RowError::Aborted(e.to_string())),
        };

        match result {
            Ok(id) => {
                succeeded += 1;
                tracing::debug!("Row {} imported as {}", index + 1, id);
            }
            Err(e) => {
                tracing::warn!("Row {} failed: {}", index + 1, e);
                failures.push(RowFailure {
                    row: index + 1,
                    message: e.to_string(),
                });
            }
        }
    }

    (succeeded, failures)
}

async fn process_row(
    row: &RawRow,
    submitter: &dyn ItemSubmitter,
    submit_timeout: Option<Duration>,
) -> Result<String, RowError> {
    let input = map_row(row)?;

    let id = match submit_timeout {
        Some(limit) => tokio::time::timeout(limit, submitter.submit(&input))
            .await
            .map_err(|_| RemoteSubmissionError::Timeout(limit))??,
        None => submitter.submit(&input).await?,
    };

    Ok(id)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::graphql::GraphQlError;
    use async_trait::async_trait;
    use contracts::domain::a001_jewellery::{columns, CreateJewelleryInput};
    use contracts::usecases::u501_import_from_csv::ImportOutcome;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Start(String),
        End(String),
    }

    /// Каталог-заглушка: пишет события, отклоняет заданные SKU
    #[derive(Default)]
    pub(crate) struct FakeCatalog {
        fail_skus: HashSet<String>,
        panic_skus: HashSet<String>,
        delay: Duration,
        events: Mutex<Vec<Event>>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FakeCatalog {
        pub(crate) fn failing(skus: &[&str]) -> Self {
            Self {
                fail_skus: skus.iter().map(|s| s.to_string()).collect(),
                delay: Duration::from_millis(2),
                ..Default::default()
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn panicking(mut self, skus: &[&str]) -> Self {
            self.panic_skus = skus.iter().map(|s| s.to_string()).collect();
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ItemSubmitter for FakeCatalog {
        async fn submit(
            &self,
            input: &CreateJewelleryInput,
        ) -> Result<String, RemoteSubmissionError> {
            let sku = input.jewellery.sku.clone();
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.events.lock().unwrap().push(Event::Start(sku.clone()));

            // Разная длительность, чтобы строки завершались не по порядку
            let jitter = sku.bytes().map(|b| b as u64).sum::<u64>() % 4;
            tokio::time::sleep(self.delay + Duration::from_millis(jitter)).await;

            self.events.lock().unwrap().push(Event::End(sku.clone()));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.panic_skus.contains(&sku) {
                panic!("catalog client crashed on {}", sku);
            }
            if self.fail_skus.contains(&sku) {
                return Err(GraphQlError::GraphQl(format!("duplicate sku {}", sku)).into());
            }
            Ok(format!("id-{}", sku))
        }
    }

    pub(crate) fn row(i: usize) -> RawRow {
        let sku = format!("SKU-{:03}", i);
        RawRow::from_pairs([
            (columns::STOCK_ID, format!("NIV-{:03}", i)),
            (columns::SKU, sku),
            (columns::PRODUCT_NAME, format!("Ring {}", i)),
            (columns::OPTION_1_VALUE, "14KT White Gold".to_string()),
            (columns::OPTION_2_VALUE, "Round".to_string()),
            (columns::METAL_WEIGHT, "3.5".to_string()),
            (columns::SIDE_STONES_COUNT, "12".to_string()),
            (columns::SIDE_STONES_CTTW, "0.5".to_string()),
            (columns::NATURAL_COLOUR_CLARITY, "D/VVS1".to_string()),
            (columns::NATURAL_PRICE, "59.99".to_string()),
        ])
    }

    fn batch_of(sku: &str) -> usize {
        let i: usize = sku.trim_start_matches("SKU-").parse().unwrap();
        i / 10
    }

    #[tokio::test]
    async fn test_batches_are_sequential() {
        let catalog = Arc::new(FakeCatalog::failing(&[]));
        let rows: Vec<RawRow> = (0..23).map(row).collect();
        let mut snapshots = Vec::new();

        let state = run_import(rows, catalog.clone(), &BatchOptions::default(), |s, _| {
            snapshots.push(*s)
        })
        .await;

        assert_eq!(state.total, 23);
        assert_eq!(state.succeeded, 23);
        assert_eq!(state.failed, 0);

        let processed: Vec<usize> = snapshots.iter().map(|s| s.processed()).collect();
        assert_eq!(processed, vec![10, 20, 23]);
        assert!(snapshots
            .windows(2)
            .all(|w| w[0].progress_fraction <= w[1].progress_fraction));
        assert_eq!(snapshots.last().unwrap().progress_fraction, 1.0);

        // Ни одна строка батча N+1 не стартует, пока не завершились все строки батча N
        let events = catalog.events();
        for (pos, event) in events.iter().enumerate() {
            if let Event::Start(sku) = event {
                let group = batch_of(sku);
                if group == 0 {
                    continue;
                }
                let ended_before = events[..pos]
                    .iter()
                    .filter(|e| matches!(e, Event::End(s) if batch_of(s) == group - 1))
                    .count();
                let expected = if group - 1 < 2 { 10 } else { 3 };
                assert_eq!(ended_before, expected, "row {} started too early", sku);
            }
        }

        // Внутри батча строки действительно идут параллельно
        assert_eq!(catalog.max_in_flight.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_partial_failure_scenario() {
        // 12 строк: в 7-й опечатка в заголовке SKU, 10-я отклонена каталогом
        let mut rows: Vec<RawRow> = (1..=12).map(row).collect();
        let sku = rows[6].remove(columns::SKU).unwrap();
        rows[6].insert("Nivoda Unique SKU ", sku);
        let catalog = Arc::new(FakeCatalog::failing(&["SKU-010"]));
        let mut failures = Vec::new();

        let state = run_import(rows, catalog.clone(), &BatchOptions::default(), |_, f| {
            failures.extend(f.iter().cloned())
        })
        .await;

        assert_eq!(state.total, 12);
        assert_eq!(state.succeeded, 10);
        assert_eq!(state.failed, 2);
        assert_eq!(catalog.calls(), 11);

        let rows_failed: Vec<usize> = failures.iter().map(|f| f.row).collect();
        assert_eq!(rows_failed, vec![7, 10]);
        assert!(failures[0].message.contains("Nivoda Unique SKU"));

        let outcome = ImportOutcome::classify(&state);
        assert_eq!(
            outcome,
            ImportOutcome::PartialFailure {
                total: 12,
                succeeded: 10,
                failed: 2
            }
        );
    }

    #[tokio::test]
    async fn test_all_rows_succeed() {
        let rows: Vec<RawRow> = (0..5).map(row).collect();
        let catalog = Arc::new(FakeCatalog::failing(&[]));
        let mut batches = 0;

        let state = run_import(rows, catalog, &BatchOptions::default(), |_, _| batches += 1).await;

        assert_eq!((state.total, state.succeeded, state.failed), (5, 5, 0));
        assert_eq!(batches, 1);
        assert!(ImportOutcome::classify(&state).is_success());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let catalog = Arc::new(FakeCatalog::failing(&[]));
        let mut batches = 0;
        let state = run_import(Vec::new(), catalog.clone(), &BatchOptions::default(), |_, _| {
            batches += 1
        })
        .await;
        assert_eq!(state.total, 0);
        assert_eq!(state.progress_fraction, 1.0);
        assert_eq!(batches, 0);
        assert_eq!(catalog.calls(), 0);
    }

    #[tokio::test]
    async fn test_every_submission_failing_still_completes() {
        let rows: Vec<RawRow> = (0..3).map(row).collect();
        let catalog = Arc::new(FakeCatalog::failing(&["SKU-000", "SKU-001", "SKU-002"]));
        let state = run_import(rows, catalog, &BatchOptions::default(), |_, _| {}).await;
        assert_eq!((state.succeeded, state.failed), (0, 3));
        assert!(!ImportOutcome::classify(&state).is_success());
    }

    #[tokio::test]
    async fn test_timeout_counts_as_failure() {
        let rows: Vec<RawRow> = (0..2).map(row).collect();
        let catalog = Arc::new(FakeCatalog::failing(&[]).with_delay(Duration::from_millis(300)));
        let options = BatchOptions {
            batch_size: 10,
            submit_timeout: Some(Duration::from_millis(20)),
        };
        let mut messages = Vec::new();
        let state = run_import(rows, catalog, &options, |_, f| {
            messages.extend(f.iter().map(|f| f.message.clone()))
        })
        .await;
        assert_eq!(state.failed, 2);
        assert!(messages.iter().all(|m| m.contains("timed out")));
    }

    #[tokio::test]
    async fn test_panicking_submission_does_not_abort_batch() {
        let rows: Vec<RawRow> = (0..4).map(row).collect();
        let catalog = Arc::new(FakeCatalog::failing(&[]).panicking(&["SKU-002"]));
        let mut failures = Vec::new();
        let state = run_import(rows, catalog, &BatchOptions::default(), |_, f| {
            failures.extend(f.iter().cloned())
        })
        .await;
        assert_eq!((state.succeeded, state.failed), (3, 1));
        assert_eq!(failures[0].row, 3);
    }

    #[tokio::test]
    async fn test_custom_batch_size() {
        let rows: Vec<RawRow> = (0..7).map(row).collect();
        let catalog = Arc::new(FakeCatalog::failing(&[]));
        let options = BatchOptions {
            batch_size: 3,
            submit_timeout: None,
        };
        let mut processed = Vec::new();
        run_import(rows, catalog.clone(), &options, |s, _| processed.push(s.processed())).await;
        assert_eq!(processed, vec![3, 6, 7]);
        assert!(catalog.max_in_flight.load(Ordering::SeqCst) <= 3);
    }
}
