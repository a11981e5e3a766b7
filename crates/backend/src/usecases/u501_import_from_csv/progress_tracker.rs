use contracts::usecases::u501_import_from_csv::{
    ImportBatchState, ImportOutcome, ImportProgress, ImportStatus, Notification,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Сколько диагностических сообщений хранить на сессию
pub const MAX_ERROR_MESSAGES: usize = 100;

/// Трекер прогресса импорта CSV (in-memory)
#[derive(Clone)]
pub struct ProgressTracker {
    sessions: Arc<RwLock<HashMap<String, ImportProgress>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn create_session(&self, session_id: String, file_name: String, owner_id: String) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(
            session_id.clone(),
            ImportProgress::new(session_id, file_name, owner_id),
        );
    }

    /// Прогресс виден только пользователю, запустившему импорт
    pub fn get_progress_for(&self, session_id: &str, owner_id: &str) -> Option<ImportProgress> {
        self.sessions
            .read()
            .unwrap()
            .get(session_id)
            .filter(|p| p.owner_id == owner_id)
            .cloned()
    }

    pub fn set_total(&self, session_id: &str, total: usize) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(p) = sessions.get_mut(session_id) {
            p.state = ImportBatchState::new(total);
            p.updated_at = chrono::Utc::now();
        }
    }

    /// Снимок счётчиков после очередного батча
    pub fn update_state(&self, session_id: &str, state: &ImportBatchState) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(p) = sessions.get_mut(session_id) {
            // Прогресс не откатывается назад
            if state.progress_fraction >= p.state.progress_fraction {
                p.state = *state;
            }
            p.updated_at = chrono::Utc::now();
        }
    }

    pub fn add_error(&self, session_id: &str, message: String) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(p) = sessions.get_mut(session_id) {
            if p.error_messages.len() < MAX_ERROR_MESSAGES {
                p.error_messages.push(message);
            }
            p.updated_at = chrono::Utc::now();
        }
    }

    /// Завершить сессию с итогом прогона
    pub fn complete_session(
        &self,
        session_id: &str,
        outcome: ImportOutcome,
        notification: Notification,
    ) {
        let status = if outcome.is_success() {
            ImportStatus::Completed
        } else {
            ImportStatus::CompletedWithErrors
        };
        self.finish(session_id, status, Some(outcome), notification);
    }

    /// Файл не удалось прочитать: батчи не запускались
    pub fn fail_session(&self, session_id: &str, notification: Notification) {
        self.finish(session_id, ImportStatus::Failed, None, notification);
    }

    fn finish(
        &self,
        session_id: &str,
        status: ImportStatus,
        outcome: Option<ImportOutcome>,
        notification: Notification,
    ) {
        let mut sessions = self.sessions.write().unwrap();
        if let Some(p) = sessions.get_mut(session_id) {
            p.status = status;
            p.outcome = outcome;
            p.notification = Some(notification);
            p.completed_at = Some(chrono::Utc::now());
            p.updated_at = chrono::Utc::now();
        }
    }

    pub fn cleanup_old_sessions(&self, max_age_hours: i64) {
        let mut sessions = self.sessions.write().unwrap();
        let now = chrono::Utc::now();
        sessions.retain(|_, p| {
            if let Some(completed_at) = p.completed_at {
                (now - completed_at).num_hours() < max_age_hours
            } else {
                true
            }
        });
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::usecases::u501_import_from_csv::Severity;

    fn tracker_with(session_id: &str) -> ProgressTracker {
        let tracker = ProgressTracker::new();
        tracker.create_session(
            session_id.to_string(),
            "rings.csv".to_string(),
            "u1".to_string(),
        );
        tracker
    }

    #[test]
    fn test_session_lifecycle() {
        let tracker = tracker_with("s1");
        tracker.set_total("s1", 12);

        let mut state = ImportBatchState::new(12);
        state.record_batch(9, 1);
        tracker.update_state("s1", &state);

        let p = tracker.get_progress_for("s1", "u1").unwrap();
        assert_eq!(p.status, ImportStatus::Running);
        assert_eq!(p.state.processed(), 10);
        assert_eq!(p.file_name, "rings.csv");

        state.record_batch(1, 1);
        let outcome = ImportOutcome::classify(&state);
        tracker.complete_session(
            "s1",
            outcome,
            Notification::new("Import completed with errors", "", Severity::Destructive),
        );

        let p = tracker.get_progress_for("s1", "u1").unwrap();
        assert_eq!(p.status, ImportStatus::CompletedWithErrors);
        assert_eq!(p.outcome, Some(outcome));
        assert!(p.completed_at.is_some());
        assert!(p.notification.is_some());
    }

    #[test]
    fn test_progress_never_goes_back() {
        let tracker = tracker_with("s1");
        tracker.set_total("s1", 20);

        let mut later = ImportBatchState::new(20);
        later.record_batch(20, 0);
        let mut earlier = ImportBatchState::new(20);
        earlier.record_batch(10, 0);

        tracker.update_state("s1", &later);
        tracker.update_state("s1", &earlier);
        assert_eq!(tracker.get_progress_for("s1", "u1").unwrap().state.processed(), 20);
    }

    #[test]
    fn test_failed_session() {
        let tracker = tracker_with("s1");
        tracker.fail_session(
            "s1",
            Notification::new("Import failed", "bad file", Severity::Destructive),
        );
        let p = tracker.get_progress_for("s1", "u1").unwrap();
        assert_eq!(p.status, ImportStatus::Failed);
        assert!(p.outcome.is_none());
    }

    #[test]
    fn test_error_messages_are_bounded() {
        let tracker = tracker_with("s1");
        for i in 0..(MAX_ERROR_MESSAGES + 25) {
            tracker.add_error("s1", format!("row {} failed", i));
        }
        assert_eq!(
            tracker.get_progress_for("s1", "u1").unwrap().error_messages.len(),
            MAX_ERROR_MESSAGES
        );
    }

    #[test]
    fn test_cleanup_keeps_running_sessions() {
        let tracker = tracker_with("running");
        tracker.create_session("done".to_string(), "a.csv".to_string(), "u1".to_string());
        tracker.fail_session(
            "done",
            Notification::new("Import failed", "", Severity::Destructive),
        );

        tracker.cleanup_old_sessions(0);

        assert!(tracker.get_progress_for("running", "u1").is_some());
        assert!(tracker.get_progress_for("done", "u1").is_none());
    }

    #[test]
    fn test_progress_hidden_from_other_users() {
        let tracker = tracker_with("s1");
        assert!(tracker.get_progress_for("s1", "u1").is_some());
        assert!(tracker.get_progress_for("s1", "u2").is_none());
        assert!(tracker.get_progress_for("missing", "u1").is_none());
    }

    #[test]
    fn test_unknown_session_is_ignored() {
        let tracker = ProgressTracker::new();
        tracker.add_error("missing", "x".to_string());
        assert!(tracker.get_progress_for("missing", "u1").is_none());
    }
}
