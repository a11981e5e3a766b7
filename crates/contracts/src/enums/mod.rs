pub mod jewellery_tags;
pub mod metal_karat;
pub mod metal_type;

pub use jewellery_tags::{CatalogSource, JewelleryType, RingType, Setting, StonePosition};
pub use metal_karat::MetalKarat;
pub use metal_type::MetalType;
