use serde::{Deserialize, Serialize};

use super::progress::ImportBatchState;

/// Итог прогона импорта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// failed == 0
    AllSucceeded {
        total: usize,
        succeeded: usize,
        failed: usize,
    },
    /// failed > 0, в том числе когда не прошла ни одна строка
    PartialFailure {
        total: usize,
        succeeded: usize,
        failed: usize,
    },
}

impl ImportOutcome {
    pub fn classify(state: &ImportBatchState) -> Self {
        let (total, succeeded, failed) = (state.total, state.succeeded, state.failed);
        if failed == 0 {
            ImportOutcome::AllSucceeded {
                total,
                succeeded,
                failed,
            }
        } else {
            ImportOutcome::PartialFailure {
                total,
                succeeded,
                failed,
            }
        }
    }

    /// (total, succeeded, failed)
    pub fn counts(&self) -> (usize, usize, usize) {
        match *self {
            ImportOutcome::AllSucceeded {
                total,
                succeeded,
                failed,
            }
            | ImportOutcome::PartialFailure {
                total,
                succeeded,
                failed,
            } => (total, succeeded, failed),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::AllSucceeded { .. })
    }
}

/// Важность уведомления (варианты toast в UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Default,
    Destructive,
}

/// Уведомление для пользователя
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }
}
