use contracts::domain::a001_jewellery::input::{
    DEFAULT_SIZE_TYPE, DEFAULT_STATUS, MELEE_PRODUCT_TYPE,
};
use contracts::domain::a001_jewellery::{
    columns, CreateJewelleryInput, EngagementRingInput, JewelleryInput, MountInput, RawRow,
    StoneInput,
};
use contracts::enums::{
    CatalogSource, JewelleryType, MetalKarat, MetalType, RingType, Setting, StonePosition,
};
use thiserror::Error;

use crate::shared::format::format_minor_units;

/// Цвет металла, если в "Option 1 Value" меньше трёх слов
const DEFAULT_COLOR: &str = "White";

/// Строку нельзя превратить в запрос на создание изделия
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowMappingError {
    #[error("column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("row has neither stock id nor SKU")]
    MissingIdentity,
}

/// Металл из колонки "Option 1 Value", например "14KT White Gold"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetalSpec {
    pub quality: String,
    pub color: String,
}

/// Цвет и чистота камня из строки вида "D / VVS1"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoneDetails {
    pub color: String,
    pub clarity: String,
}

/// Преобразовать строку CSV в запрос createJewellery
pub fn map_row(row: &RawRow) -> Result<CreateJewelleryInput, RowMappingError> {
    for column in [columns::STOCK_ID, columns::SKU] {
        if !row.has_column(column) {
            return Err(RowMappingError::MissingColumn(column));
        }
    }

    let stock_id = row.get_or_empty(columns::STOCK_ID).trim();
    let sku = row.get_or_empty(columns::SKU).trim();
    if stock_id.is_empty() && sku.is_empty() {
        return Err(RowMappingError::MissingIdentity);
    }

    let metal = parse_metal_spec(row.get_or_empty(columns::OPTION_1_VALUE));
    let metal_karat = metal_karat_for(&metal.quality);
    let metal_type = metal_type_for(&metal.color);
    let shape = row.get_or_empty(columns::OPTION_2_VALUE).to_string();

    let side_stones = parse_count(row, columns::SIDE_STONES_COUNT);
    let side_carats = parse_non_negative(row, columns::SIDE_STONES_CTTW);
    let has_side_stones = side_stones > 0 && side_carats > 0.0;
    let has_accent_stones = row.get_or_empty(columns::ACCENT_STONES) == "Yes";

    let natural = parse_stone_details(row.get_or_empty(columns::NATURAL_COLOUR_CLARITY));
    let labgrown = parse_stone_details(row.get_or_empty(columns::LABGROWN_COLOUR_CLARITY));

    let mut stones = Vec::with_capacity(2);
    if has_side_stones {
        for (details, is_labgrown) in [(natural, false), (labgrown, true)] {
            if let Some(details) = details {
                stones.push(StoneInput {
                    product_type: MELEE_PRODUCT_TYPE.to_string(),
                    stone_position: StonePosition::Side,
                    pieces: side_stones,
                    carats: side_carats,
                    color: details.color,
                    clarity: details.clarity,
                    shape: shape.clone(),
                    is_labgrown,
                });
            }
        }
    }

    let mounts = vec![MountInput {
        metal_type,
        metal_karat,
        metal_weight: parse_non_negative(row, columns::METAL_WEIGHT),
    }];

    let engagement_ring = EngagementRingInput {
        ring_type: RingType::EngagementRings,
        setting: Setting::Finished,
        size_type: DEFAULT_SIZE_TYPE.to_string(),
        metal_karat,
        metal_type,
        style: row.get_or_empty(columns::RING_STYLE).to_string(),
        color: metal.color,
        metal_quality: metal.quality,
        stone_shape: shape,
        natural_variant_price: price_to_minor_units(row.get_or_empty(columns::NATURAL_PRICE)),
        labgrown_variant_price: price_to_minor_units(row.get_or_empty(columns::LABGROWN_PRICE)),
    };
    tracing::debug!(
        "Row {}: {} {}, natural {} / labgrown {}",
        sku,
        engagement_ring.metal_quality,
        engagement_ring.color,
        format_minor_units(engagement_ring.natural_variant_price),
        format_minor_units(engagement_ring.labgrown_variant_price)
    );

    Ok(CreateJewelleryInput {
        jewellery: JewelleryInput {
            id: None,
            nivoda_stock_id: stock_id.to_string(),
            sku: sku.to_string(),
            catalog_source: Some(CatalogSource::Nivoda),
            description: row.get_or_empty(columns::PRODUCT_NAME).to_string(),
            comments: row.get_or_empty(columns::PRODUCT_DESCRIPTION).to_string(),
            jewellery_type: JewelleryType::Ring,
            status: DEFAULT_STATUS.to_string(),
            has_accent_stones,
            has_side_stones,
            has_melee: !stones.is_empty(),
        },
        engagement_ring: Some(engagement_ring),
        mounts,
        stones,
        catalog_source: Some(CatalogSource::Nivoda),
    })
}

/// "<проба> [<цвет>] <...>": цвет берётся вторым словом, только если слов больше двух
pub fn parse_metal_spec(value: &str) -> MetalSpec {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let quality = match tokens.first() {
        Some(token) => token.to_string(),
        None => MetalKarat::default().label().to_string(),
    };
    let color = if tokens.len() > 2 {
        tokens[1].to_string()
    } else {
        DEFAULT_COLOR.to_string()
    };
    MetalSpec { quality, color }
}

/// Проба по метке; неизвестная метка -> 14KT
pub fn metal_karat_for(label: &str) -> MetalKarat {
    MetalKarat::from_label(label).unwrap_or_default()
}

/// Тип металла по цвету; неизвестный цвет -> белое золото
pub fn metal_type_for(color: &str) -> MetalType {
    MetalType::from_color_name(color).unwrap_or_default()
}

/// Пустая строка -> None (камня нет), иначе "цвет/чистота" с обрезкой пробелов
pub fn parse_stone_details(value: &str) -> Option<StoneDetails> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let mut parts = value.split('/').map(str::trim);
    let color = parts.next().unwrap_or_default().to_string();
    let clarity = parts.next().unwrap_or_default().to_string();
    Some(StoneDetails { color, clarity })
}

/// Цена в валюте -> целые центы; нечисловое значение -> 0
pub fn price_to_minor_units(value: &str) -> i64 {
    match leading_decimal(value) {
        Some(price) => (price * 100.0).round() as i64,
        None => {
            log_zeroed("price", value);
            0
        }
    }
}

fn parse_count(row: &RawRow, column: &str) -> u32 {
    let value = row.get_or_empty(column);
    match leading_integer(value) {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        Some(_) => 0,
        None => {
            log_zeroed(column, value);
            0
        }
    }
}

fn parse_non_negative(row: &RawRow, column: &str) -> f64 {
    let value = row.get_or_empty(column);
    match leading_decimal(value) {
        Some(n) if n > 0.0 => n,
        Some(_) => 0.0,
        None => {
            log_zeroed(column, value);
            0.0
        }
    }
}

fn log_zeroed(column: &str, value: &str) {
    if !value.trim().is_empty() {
        tracing::debug!("Non-numeric value '{}' in '{}' treated as 0", value, column);
    }
}

/// Целое из начала строки: "32", " 32 pcs", "1ST" -> 1
pub fn leading_integer(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// Десятичное из начала строки: "1.5", "1.5ct", ".75", "3." -> Some
pub fn leading_decimal(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let dot = end;
        end += 1;
        let mut fraction = 0;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            fraction += 1;
        }
        digits += fraction;
        if fraction == 0 {
            end = dot;
        }
    }
    if digits == 0 {
        return None;
    }
    // Экспонента ("1E+3" из Excel) учитывается, только если после неё есть цифры
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}
