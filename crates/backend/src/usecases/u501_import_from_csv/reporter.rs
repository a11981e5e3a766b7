use contracts::usecases::u501_import_from_csv::{
    ImportBatchState, ImportOutcome, Notification, Severity,
};

use super::csv_parser::FileParseError;

/// Куда доставляются итоговые уведомления импорта
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Уведомления в лог сервиса
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notification: &Notification) {
        match notification.severity {
            Severity::Default => {
                tracing::info!("{}: {}", notification.title, notification.description)
            }
            Severity::Destructive => {
                tracing::warn!("{}: {}", notification.title, notification.description)
            }
        }
    }
}

/// Итог импорта вместе с показанным уведомлением
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub outcome: ImportOutcome,
    pub notification: Notification,
}

pub fn notification_for(outcome: &ImportOutcome) -> Notification {
    match outcome {
        ImportOutcome::AllSucceeded { succeeded, .. } => Notification::new(
            "Import successful",
            format!("Successfully imported {} items.", succeeded),
            Severity::Default,
        ),
        ImportOutcome::PartialFailure {
            succeeded, failed, ..
        } => Notification::new(
            "Import completed with errors",
            format!("Imported {} items, {} failed.", succeeded, failed),
            Severity::Destructive,
        ),
    }
}

/// Файл не разобран: батчи не запускались
pub fn file_error_notification(error: &FileParseError) -> Notification {
    Notification::new(
        "Import failed",
        format!("Could not read the CSV file: {}", error),
        Severity::Destructive,
    )
}

/// Классифицировать финальные счётчики и отправить ровно одно уведомление
pub fn report(state: &ImportBatchState, sink: &dyn NotificationSink) -> ImportReport {
    let outcome = ImportOutcome::classify(state);
    let notification = notification_for(&outcome);
    sink.notify(&notification);
    ImportReport {
        outcome,
        notification,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub(crate) received: Mutex<Vec<Notification>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, notification: &Notification) {
            self.received.lock().unwrap().push(notification.clone());
        }
    }

    fn settled(total: usize, succeeded: usize, failed: usize) -> ImportBatchState {
        let mut state = ImportBatchState::new(total);
        state.record_batch(succeeded, failed);
        state
    }

    #[test]
    fn test_report_all_succeeded() {
        let sink = RecordingSink::default();
        let report = report(&settled(5, 5, 0), &sink);

        assert!(report.outcome.is_success());
        let received = sink.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].title, "Import successful");
        assert_eq!(received[0].description, "Successfully imported 5 items.");
        assert_eq!(received[0].severity, Severity::Default);
    }

    #[test]
    fn test_report_partial_failure() {
        let sink = RecordingSink::default();
        let report = report(&settled(12, 10, 2), &sink);

        assert_eq!(report.outcome.counts(), (12, 10, 2));
        assert_eq!(report.notification.title, "Import completed with errors");
        assert_eq!(report.notification.description, "Imported 10 items, 2 failed.");
        assert_eq!(report.notification.severity, Severity::Destructive);
        assert_eq!(sink.received.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_report_empty_file_is_success() {
        let sink = RecordingSink::default();
        let report = report(&ImportBatchState::new(0), &sink);
        assert!(report.outcome.is_success());
        assert_eq!(report.notification.description, "Successfully imported 0 items.");
    }

    #[test]
    fn test_file_error_notification() {
        let n = file_error_notification(&FileParseError::MissingHeader);
        assert_eq!(n.title, "Import failed");
        assert!(n.description.starts_with("Could not read the CSV file: "));
        assert_eq!(n.severity, Severity::Destructive);
    }
}
