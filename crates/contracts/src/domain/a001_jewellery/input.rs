use serde::{Deserialize, Serialize};

use crate::enums::{
    CatalogSource, JewelleryType, MetalKarat, MetalType, RingType, Setting, StonePosition,
};

/// Статус, с которым создаются импортированные изделия
pub const DEFAULT_STATUS: &str = "In Stock";
/// Тип размерной сетки колец
pub const DEFAULT_SIZE_TYPE: &str = "US_CA";
/// Тип камней боковой россыпи
pub const MELEE_PRODUCT_TYPE: &str = "MELEE";

/// Нормализованный запрос на создание изделия (GraphQL `CreateJewelleryInput`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJewelleryInput {
    pub jewellery: JewelleryInput,
    #[serde(rename = "engagement_ring", skip_serializing_if = "Option::is_none", default)]
    pub engagement_ring: Option<EngagementRingInput>,
    #[serde(default)]
    pub mounts: Vec<MountInput>,
    #[serde(default)]
    pub stones: Vec<StoneInput>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub catalog_source: Option<CatalogSource>,
}

/// Запрос на обновление изделия (GraphQL `UpdateJewelleryInput`), `jewellery.id` обязателен
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJewelleryInput {
    pub jewellery: JewelleryInput,
    #[serde(rename = "engagement_ring", skip_serializing_if = "Option::is_none", default)]
    pub engagement_ring: Option<EngagementRingInput>,
    #[serde(default)]
    pub mounts: Vec<MountInput>,
    #[serde(default)]
    pub stones: Vec<StoneInput>,
}

/// Основные поля изделия
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JewelleryInput {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub nivoda_stock_id: String,
    #[serde(default)]
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub catalog_source: Option<CatalogSource>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
    #[serde(rename = "type")]
    pub jewellery_type: JewelleryType,
    pub status: String,
    #[serde(default)]
    pub has_accent_stones: bool,
    #[serde(default)]
    pub has_side_stones: bool,
    #[serde(default)]
    pub has_melee: bool,
}

/// Параметры кольца
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementRingInput {
    pub ring_type: RingType,
    pub setting: Setting,
    pub size_type: String,
    pub metal_karat: MetalKarat,
    pub metal_type: MetalType,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub metal_quality: String,
    #[serde(default)]
    pub stone_shape: String,
    /// Цена натурального варианта, в центах
    #[serde(default)]
    pub natural_variant_price: i64,
    /// Цена лабораторного варианта, в центах
    #[serde(default)]
    pub labgrown_variant_price: i64,
}

/// Металлическая оправа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountInput {
    pub metal_type: MetalType,
    pub metal_karat: MetalKarat,
    /// Вес металла, граммы, >= 0
    pub metal_weight: f64,
}

/// Камни
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoneInput {
    pub product_type: String,
    pub stone_position: StonePosition,
    pub pieces: u32,
    pub carats: f64,
    pub color: String,
    pub clarity: String,
    pub shape: String,
    pub is_labgrown: bool,
}

impl CreateJewelleryInput {
    /// Проверка инвариантов нормализованного запроса:
    /// ровно одна оправа, не более двух камней, у каждого камня pieces > 0 и carats > 0
    pub fn check_invariants(&self) -> bool {
        let ring_detail_ok = match self.jewellery.jewellery_type {
            JewelleryType::Ring => self.engagement_ring.is_some(),
            _ => self.engagement_ring.is_none(),
        };
        ring_detail_ok
            && self.mounts.len() == 1
            && self.mounts.iter().all(|m| m.metal_weight >= 0.0)
            && self.stones.len() <= 2
            && self.stones.iter().all(|s| s.pieces > 0 && s.carats > 0.0)
    }
}
