pub mod aggregate;
pub mod csv_row;
pub mod input;

pub use aggregate::{FilteredRings, FilteredRingsRequest, Jewellery, JewelleryPage, PaginatedJewellery};
pub use csv_row::{columns, RawRow, CSV_TEMPLATE};
pub use input::{
    CreateJewelleryInput, EngagementRingInput, JewelleryInput, MountInput, StoneInput,
    UpdateJewelleryInput,
};
