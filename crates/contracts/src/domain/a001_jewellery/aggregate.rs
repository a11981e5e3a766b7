use serde::{Deserialize, Serialize};

/// Изделие из каталога (основные поля; вложенные сущности передаются как есть)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jewellery {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub nivoda_stock_id: Option<String>,
    #[serde(default)]
    pub catalog_source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(rename = "type", default)]
    pub jewellery_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub has_accent_stones: Option<bool>,
    #[serde(default)]
    pub has_melee: Option<bool>,
    #[serde(default)]
    pub has_side_stones: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub ring: Option<serde_json::Value>,
    #[serde(default)]
    pub mounts: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub stones: Option<Vec<serde_json::Value>>,
}

/// Ответ `getAllJewellery`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedJewellery {
    pub items: Vec<Jewellery>,
    #[serde(default)]
    pub total_count: u64,
}

/// Ответ `getFilteredRings`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredRings {
    pub items: Vec<Jewellery>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub filters: serde_json::Value,
}

/// Параметры фильтрации колец, передаются в каталог без изменений
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredRingsRequest {
    #[serde(default)]
    pub filters: Option<serde_json::Value>,
    #[serde(default)]
    pub preselected_filters: Option<serde_json::Value>,
    #[serde(default)]
    pub sort: Option<serde_json::Value>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

/// Страница списка для UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JewelleryPage {
    pub items: Vec<Jewellery>,
    pub total: u64,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl JewelleryPage {
    pub fn new(items: Vec<Jewellery>, total: u64, limit: u64, offset: u64) -> Self {
        let page_size = limit.max(1) as usize;
        let page = (offset as usize) / page_size;
        let total_pages = ((total as usize) + page_size - 1) / page_size;
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_arithmetic() {
        let page = JewelleryPage::new(Vec::new(), 101, 50, 100);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 50);
        assert_eq!(page.total_pages, 3);

        let empty = JewelleryPage::new(Vec::new(), 0, 50, 0);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.page, 0);
    }

    #[test]
    fn test_deserialize_catalog_item() {
        let json = r#"{"id":"j1","sku":"SKU-1","type":"RING","hasMelee":true,"mounts":[{"metalWeight":3.5}]}"#;
        let item: Jewellery = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "j1");
        assert_eq!(item.jewellery_type.as_deref(), Some("RING"));
        assert_eq!(item.has_melee, Some(true));
        assert_eq!(item.mounts.map(|m| m.len()), Some(1));
    }
}
