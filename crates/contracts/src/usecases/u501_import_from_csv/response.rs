use serde::{Deserialize, Serialize};

/// Ответ на запрос запуска импорта CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub session_id: String,
    pub status: ImportStartStatus,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStartStatus {
    Started,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_format() {
        let response = ImportResponse {
            session_id: "s1".to_string(),
            status: ImportStartStatus::Started,
            message: "Import started".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "started");
        assert_eq!(json["session_id"], "s1");
    }
}
