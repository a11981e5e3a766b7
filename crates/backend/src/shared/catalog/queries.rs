//! GraphQL-документы каталога

const JEWELLERY_FIELDS: &str = r#"
fragment JewelleryFields on Jewellery {
  id sku nivodaStockId catalogSource description comments type status
  hasAccentStones hasMelee hasSideStones createdAt updatedAt
}
fragment RingFields on JewelleryRing {
  id ringType category comments description ringWidth
  naturalVariantPrice labgrownVariantPrice createdAt updatedAt
  color { id value } metalType { id value } metalQuality { id value } stoneShape { id value }
}
fragment MountFields on JewelleryMount {
  id metalType metalKarat metalWeight metalColor comments
}
fragment StoneFields on JewelleryStone {
  id productType stonePosition pieces carats color clarity shape isLabgrown
}
"#;

const JEWELLERY_SELECTION: &str = r#"
  ...JewelleryFields
  ring { ...RingFields }
  mounts { ...MountFields }
  stones { ...StoneFields }
"#;

const FILTER_OPTIONS_SELECTION: &str = r#"
  styles { id value }
  primaryStyles { id value }
  stoneShapes { id value }
  metalTypes { id value }
  colors { id value }
  metalQualities { id value }
  catalogSources { value }
  settingTypes { id value }
  bandStyles { id value }
  numberOfStones { id value }
"#;

pub fn create_jewellery() -> String {
    format!(
        "{}\nmutation CreateJewellery($data: CreateJewelleryInput!) {{\n  createJewellery(data: $data) {{{}}}\n}}",
        JEWELLERY_FIELDS, JEWELLERY_SELECTION
    )
}

pub fn update_jewellery() -> String {
    format!(
        "{}\nmutation UpdateJewellery($data: UpdateJewelleryInput!) {{\n  updateJewellery(data: $data) {{{}}}\n}}",
        JEWELLERY_FIELDS, JEWELLERY_SELECTION
    )
}

pub const DELETE_JEWELLERY: &str = r#"
mutation DeleteJewellery($id: ID!) {
  deleteJewellery(id: $id)
}
"#;

pub fn get_all_jewellery() -> String {
    format!(
        "{}\nquery GetAllJewellery($ids: [ID!], $limit: Int, $offset: Int) {{\n  getAllJewellery(ids: $ids, limit: $limit, offset: $offset) {{\n    items {{{}}}\n    totalCount\n  }}\n}}",
        JEWELLERY_FIELDS, JEWELLERY_SELECTION
    )
}

pub fn get_filtered_rings() -> String {
    format!(
        "{}\nquery GetFilteredRings($filters: RingFilter, $preselectedFilters: RingFilter, $sort: SortOption, $limit: Int, $offset: Int) {{\n  getFilteredRings(filters: $filters, preselectedFilters: $preselectedFilters, sort: $sort, limit: $limit, offset: $offset) {{\n    items {{{}}}\n    totalCount\n    filters {{{}}}\n  }}\n}}",
        JEWELLERY_FIELDS, JEWELLERY_SELECTION, FILTER_OPTIONS_SELECTION
    )
}

pub fn get_one_jewellery() -> String {
    format!(
        "{}\nquery GetOneJewellery($id: ID, $sku: String) {{\n  oneJewellery(id: $id, sku: $sku) {{{}}}\n}}",
        JEWELLERY_FIELDS, JEWELLERY_SELECTION
    )
}

pub fn get_all_ring_filter_options() -> String {
    format!(
        "query GetAllRingFilterOptions {{\n  getAllRingFilterOptions {{{}}}\n}}",
        FILTER_OPTIONS_SELECTION
    )
}
