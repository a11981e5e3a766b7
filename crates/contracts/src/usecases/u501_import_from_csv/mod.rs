pub mod outcome;
pub mod progress;
pub mod response;

pub use outcome::{ImportOutcome, Notification, Severity};
pub use progress::{ImportBatchState, ImportProgress, ImportStatus};
pub use response::{ImportResponse, ImportStartStatus};

use super::common::UseCaseMetadata;

/// UseCase u501: импорт изделий из CSV
pub struct ImportFromCsv;

impl UseCaseMetadata for ImportFromCsv {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_from_csv"
    }

    fn display_name() -> &'static str {
        "Import Jewelry Items from CSV"
    }

    fn description() -> &'static str {
        "Пакетное создание изделий каталога из CSV-выгрузки Shopify"
    }
}
