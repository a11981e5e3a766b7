use std::collections::HashMap;

/// Колонки CSV-выгрузки (формат Shopify export)
pub mod columns {
    pub const STOCK_ID: &str = "Nivoda Stock ID";
    pub const SKU: &str = "Nivoda Unique SKU";
    pub const PRODUCT_NAME: &str = "Product Name";
    pub const PRODUCT_DESCRIPTION: &str = "Product Description";
    pub const RING_TYPE: &str = "Ring Type";
    pub const OPTION_1_VALUE: &str = "Option 1 Value";
    pub const OPTION_2_VALUE: &str = "Option 2 Value";
    pub const METAL_WEIGHT: &str = "Metal Weight";
    pub const SIDE_STONES_COUNT: &str = "Number of Side Stones";
    pub const SIDE_STONES_CTTW: &str = "Total Cttw of Side Stones";
    pub const ACCENT_STONES: &str = "Accent Stones";
    pub const NATURAL_COLOUR_CLARITY: &str = "Natural Stone Colour/ Clarity";
    pub const LABGROWN_COLOUR_CLARITY: &str = "Labgrown Stone Colour/ Clarity";
    pub const NATURAL_PRICE: &str = "Natural Variant Price";
    pub const LABGROWN_PRICE: &str = "Labgrown Variant Price";
    pub const RING_STYLE: &str = "Shopify Ring Style";

    /// Минимальный набор колонок, который должен быть в заголовке файла
    pub const REQUIRED: [&str; 15] = [
        STOCK_ID,
        SKU,
        PRODUCT_NAME,
        PRODUCT_DESCRIPTION,
        RING_TYPE,
        OPTION_1_VALUE,
        OPTION_2_VALUE,
        METAL_WEIGHT,
        SIDE_STONES_COUNT,
        SIDE_STONES_CTTW,
        ACCENT_STONES,
        NATURAL_COLOUR_CLARITY,
        LABGROWN_COLOUR_CLARITY,
        NATURAL_PRICE,
        LABGROWN_PRICE,
    ];
}

/// Шаблон CSV для скачивания из диалога импорта
pub const CSV_TEMPLATE: &str = "Nivoda Stock ID,Nivoda Unique SKU,Product Name,Product Description,Ring Type,Option 1 Value,Option 2 Value,Metal Weight,Band Width,Number of Stones,Number of Side Stones,Total Cttw of Side Stones,Accent Stones,Natural Stone Colour/ Clarity,Labgrown Stone Colour/ Clarity,Natural Variant Price,Labgrown Variant Price,Shopify Ring Style,Ring Style - Tag 1,Ring Style - Tag 2,Ring Style - Tag 3,Setting Type,Band Style,Image Src,Variant front view image,Variant side view image,Variant angled view image,Variant Image,V360 url
NIV-001,SKU-001,Classic Solitaire Diamond Ring,Elegant solitaire ring with round brilliant diamond,Engagement Rings,14KT White Gold,Round,3.5,2.0,1ST,32,1.5,Yes,D/VVS1,E/VVS2,5999,3499,SOLITAIRE,Classic,Modern,,,Four Prong,Straight,,,,,
";

/// Одна строка CSV: имя колонки -> значение
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Значение колонки; None если колонки нет в строке
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Значение колонки или пустая строка
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn remove(&mut self, column: &str) -> Option<String> {
        self.fields.remove(column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
