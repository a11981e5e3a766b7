use contracts::system::auth::UserInfo;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::auth_api_client::RemoteSession;
use super::jwt::ACCESS_TOKEN_LIFETIME_HOURS;

/// Сессия пользователя: токен удалённого каталога и профиль
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub remote_token: String,
    /// unix epoch, миллисекунды
    pub expires_at_ms: i64,
    pub user: UserInfo,
}

impl Session {
    /// Без срока (None или 0) сессия живёт столько же, сколько локальный токен
    pub fn from_remote(remote: RemoteSession) -> Self {
        let expires_at_ms = match remote.expires {
            Some(expires) if expires > 0 => expires,
            _ => {
                (chrono::Utc::now() + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS))
                    .timestamp_millis()
            }
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            remote_token: remote.token,
            expires_at_ms,
            user: remote.user.into(),
        }
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.expires_at_ms <= now_ms
    }
}

/// Хранилище сессий в памяти
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

static SESSIONS: Lazy<SessionStore> = Lazy::new(SessionStore::new);

/// Общее хранилище процесса
pub fn sessions() -> &'static SessionStore {
    &SESSIONS
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: Session) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(session.id.clone(), session);
    }

    /// Истёкшая сессия удаляется и не возвращается
    pub fn get(&self, session_id: &str) -> Option<Session> {
        self.get_at(session_id, chrono::Utc::now().timestamp_millis())
    }

    fn get_at(&self, session_id: &str, now_ms: i64) -> Option<Session> {
        let session = self.sessions.read().unwrap().get(session_id).cloned()?;
        if session.is_expired_at(now_ms) {
            tracing::info!("Session {} expired, removing", session_id);
            self.remove(session_id);
            return None;
        }
        Some(session)
    }

    pub fn remove(&self, session_id: &str) -> Option<Session> {
        self.sessions.write().unwrap().remove(session_id)
    }

    /// Удалить все истёкшие сессии; возвращает количество удалённых
    pub fn purge_expired(&self) -> usize {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now_ms));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
