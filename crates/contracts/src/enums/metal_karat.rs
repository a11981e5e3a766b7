use serde::{Deserialize, Serialize};

/// Проба металла (karat / purity marker)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetalKarat {
    #[serde(rename = "KT_9KT")]
    Kt9,
    #[serde(rename = "KT_10KT")]
    Kt10,
    #[serde(rename = "KT_12KT")]
    Kt12,
    #[serde(rename = "KT_14KT")]
    Kt14,
    #[serde(rename = "KT_18KT")]
    Kt18,
    #[serde(rename = "KT_22KT")]
    Kt22,
    /// Платина 950
    #[serde(rename = "KT_950P")]
    Platinum950,
    /// Серебро 925
    #[serde(rename = "KT_925S")]
    Silver925,
}

impl MetalKarat {
    /// Метка пробы в том виде, в каком она приходит в CSV ("14KT", "950")
    pub fn label(&self) -> &'static str {
        match self {
            MetalKarat::Kt9 => "9KT",
            MetalKarat::Kt10 => "10KT",
            MetalKarat::Kt12 => "12KT",
            MetalKarat::Kt14 => "14KT",
            MetalKarat::Kt18 => "18KT",
            MetalKarat::Kt22 => "22KT",
            MetalKarat::Platinum950 => "950",
            MetalKarat::Silver925 => "925",
        }
    }

    pub fn all() -> Vec<MetalKarat> {
        vec![
            MetalKarat::Kt9,
            MetalKarat::Kt10,
            MetalKarat::Kt12,
            MetalKarat::Kt14,
            MetalKarat::Kt18,
            MetalKarat::Kt22,
            MetalKarat::Platinum950,
            MetalKarat::Silver925,
        ]
    }

    /// Парсинг из метки; None для неизвестной метки
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "9KT" => Some(MetalKarat::Kt9),
            "10KT" => Some(MetalKarat::Kt10),
            "12KT" => Some(MetalKarat::Kt12),
            "14KT" => Some(MetalKarat::Kt14),
            "18KT" => Some(MetalKarat::Kt18),
            "22KT" => Some(MetalKarat::Kt22),
            "950" => Some(MetalKarat::Platinum950),
            "925" => Some(MetalKarat::Silver925),
            _ => None,
        }
    }
}

impl Default for MetalKarat {
    fn default() -> Self {
        MetalKarat::Kt14
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_back() {
        for karat in MetalKarat::all() {
            assert_eq!(MetalKarat::from_label(karat.label()), Some(karat));
        }
        assert_eq!(MetalKarat::from_label("99KT"), None);
    }

    #[test]
    fn test_wire_name() {
        let json = serde_json::to_string(&MetalKarat::Platinum950).unwrap();
        assert_eq!(json, "\"KT_950P\"");
    }
}
