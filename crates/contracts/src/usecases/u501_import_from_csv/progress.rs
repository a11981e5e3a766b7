use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::outcome::{ImportOutcome, Notification};

/// Счётчики одного прогона импорта
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportBatchState {
    /// Количество строк в файле (фиксируется после парсинга)
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// processed / total, от 0.0 до 1.0
    pub progress_fraction: f64,
}

impl ImportBatchState {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
            progress_fraction: if total == 0 { 1.0 } else { 0.0 },
        }
    }

    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Учесть результаты одного батча
    pub fn record_batch(&mut self, succeeded: usize, failed: usize) {
        self.succeeded += succeeded;
        self.failed += failed;
        self.progress_fraction = if self.total == 0 {
            1.0
        } else {
            self.processed() as f64 / self.total as f64
        };
    }
}

/// Текущее состояние сессии импорта CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportProgress {
    pub session_id: String,
    pub file_name: String,
    /// Пользователь, запустивший импорт
    #[serde(skip)]
    pub owner_id: String,
    pub status: ImportStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,

    pub state: ImportBatchState,

    /// Итоговая классификация (после завершения)
    pub outcome: Option<ImportOutcome>,
    /// Уведомление для пользователя (после завершения)
    pub notification: Option<Notification>,

    /// Диагностические сообщения (ограниченный список)
    pub error_messages: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    /// Импорт запущен
    Running,
    /// Все строки импортированы
    Completed,
    /// Импорт завершен, часть строк с ошибками
    CompletedWithErrors,
    /// Файл не удалось прочитать
    Failed,
}

impl ImportProgress {
    pub fn new(session_id: String, file_name: String, owner_id: String) -> Self {
        Self {
            session_id,
            file_name,
            owner_id,
            status: ImportStatus::Running,
            started_at: Utc::now(),
            completed_at: None,
            updated_at: Utc::now(),
            state: ImportBatchState::default(),
            outcome: None,
            notification: None,
            error_messages: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_batch_updates_fraction() {
        let mut state = ImportBatchState::new(23);
        state.record_batch(9, 1);
        assert_eq!(state.processed(), 10);
        assert!((state.progress_fraction - 10.0 / 23.0).abs() < 1e-9);
        state.record_batch(10, 0);
        state.record_batch(2, 1);
        assert_eq!(state.progress_fraction, 1.0);
        assert_eq!(state.total, state.succeeded + state.failed);
    }

    #[test]
    fn test_owner_is_not_serialized() {
        let progress = ImportProgress::new("s1".into(), "rings.csv".into(), "u1".into());
        let json = serde_json::to_value(&progress).unwrap();
        assert!(json.get("owner_id").is_none());
        assert_eq!(json["status"], "running");
    }

    #[test]
    fn test_empty_file_is_complete() {
        let state = ImportBatchState::new(0);
        assert_eq!(state.progress_fraction, 1.0);
    }
}
