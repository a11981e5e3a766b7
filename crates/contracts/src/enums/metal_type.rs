use serde::{Deserialize, Serialize};

/// Тип металла оправы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetalType {
    YellowGold,
    WhiteGold,
    RoseGold,
    Platinum,
}

impl MetalType {
    /// Название цвета, как оно записано в колонке "Option 1 Value"
    pub fn color_name(&self) -> &'static str {
        match self {
            MetalType::YellowGold => "Yellow",
            MetalType::WhiteGold => "White",
            MetalType::RoseGold => "Rose",
            MetalType::Platinum => "Platinum",
        }
    }

    pub fn from_color_name(color: &str) -> Option<Self> {
        match color {
            "Yellow" => Some(MetalType::YellowGold),
            "White" => Some(MetalType::WhiteGold),
            "Rose" => Some(MetalType::RoseGold),
            "Platinum" => Some(MetalType::Platinum),
            _ => None,
        }
    }
}

impl Default for MetalType {
    fn default() -> Self {
        MetalType::WhiteGold
    }
}
