use serde::{Deserialize, Serialize};

/// Вид изделия
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JewelleryType {
    Ring,
    WeddingBand,
    Bracelet,
    Earring,
    Necklace,
    Pendant,
}

/// Источник каталога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogSource {
    Nivoda,
}

/// Категория кольца. Каталог принимает только помолвочные кольца,
/// значение колонки "Ring Type" не читается.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RingType {
    EngagementRings,
}

/// Состояние закрепки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Setting {
    Finished,
    Semi,
}

/// Позиция камня в изделии
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StonePosition {
    Center,
    Side,
}
