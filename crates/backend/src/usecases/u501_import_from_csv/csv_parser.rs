use contracts::domain::a001_jewellery::RawRow;
use thiserror::Error;

/// Файл целиком не удалось прочитать
#[derive(Debug, Error)]
pub enum FileParseError {
    #[error("file is not valid UTF-8")]
    Encoding,

    #[error("failed to read CSV headers: {0}")]
    Headers(String),

    #[error("file has no header row")]
    MissingHeader,

    #[error("malformed CSV at record {record}: {message}")]
    Record { record: u64, message: String },
}

/// Разобрать CSV: первая строка - заголовок, пустые записи пропускаются
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RawRow>, FileParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| FileParseError::Encoding)?;
    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FileParseError::Headers(e.to_string()))?
        .clone();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(FileParseError::MissingHeader);
    }

    tracing::debug!(
        "CSV headers: {:?}",
        headers.iter().collect::<Vec<_>>()
    );

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| FileParseError::Record {
            record: e.position().map(|p| p.record()).unwrap_or_default(),
            message: e.to_string(),
        })?;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        // Лишние ячейки без заголовка отбрасываются, недостающие - отсутствуют в строке
        let row = RawRow::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .filter(|(header, _)| !header.is_empty())
                .map(|(header, value)| (header.to_string(), value.to_string())),
        );
        rows.push(row);
    }

    Ok(rows)
}

/// Колонки из обязательного набора, которых нет в заголовке файла
pub fn missing_columns(rows: &[RawRow], required: &[&str]) -> Vec<String> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    required
        .iter()
        .filter(|column| !first.has_column(column))
        .map(|column| column.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_jewellery::{columns, CSV_TEMPLATE};

    #[test]
    fn test_parse_template() {
        let rows = parse_csv(CSV_TEMPLATE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get(columns::STOCK_ID), Some("NIV-001"));
        assert_eq!(row.get(columns::OPTION_1_VALUE), Some("14KT White Gold"));
        assert_eq!(row.get(columns::NATURAL_COLOUR_CLARITY), Some("D/VVS1"));
        assert!(missing_columns(&rows, &columns::REQUIRED).is_empty());
    }

    #[test]
    fn test_skips_empty_records_and_strips_bom() {
        let text = "\u{FEFF}A,B\n1,2\n\n,\n3,4\n";
        let rows = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("A"), Some("1"));
        assert_eq!(rows[1].get("B"), Some("4"));
    }

    #[test]
    fn test_ragged_rows() {
        let text = "A,B,C\n1,2\n1,2,3,4\n";
        let rows = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("C"), None);
        assert!(!rows[0].has_column("C"));
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn test_quoted_fields() {
        let text = "Product Name,Product Description\n\"Ring, classic\",\"Says \"\"hi\"\"\"\n";
        let rows = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(rows[0].get("Product Name"), Some("Ring, classic"));
        assert_eq!(rows[0].get("Product Description"), Some("Says \"hi\""));
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes = [0x41, 0x2c, 0x42, 0x0a, 0xff, 0xfe, 0x0a];
        assert!(matches!(parse_csv(&bytes), Err(FileParseError::Encoding)));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_csv(b""), Err(FileParseError::MissingHeader)));
    }

    #[test]
    fn test_missing_columns_reported() {
        let rows = parse_csv(b"Nivoda Stock ID,Nivoda Unique SKU\nA,B\n").unwrap();
        let missing = missing_columns(&rows, &columns::REQUIRED);
        assert_eq!(missing.len(), columns::REQUIRED.len() - 2);
        assert!(missing.contains(&columns::OPTION_1_VALUE.to_string()));
    }
}
