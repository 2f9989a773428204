use serde::Serialize;

/// Page size the registry uses for search results.
pub const PER_PAGE: u32 = 30;

/// One row of a search result table, in the registry's own order.
/// Fields are always present; a missing cell renders as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    pub ruc: String,
    pub name: String,
    pub location: String,
    pub status: String,
}

/// Pagination recovered from the free-text caption of a results page.
/// All zero when the caption is absent or malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub total: u32,
    pub per_page: u32,
    pub page: u32,
}

/// One taxpayer, parsed from the label/value rows of a detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub ruc: String,
    pub name: String,
    pub address: String,
    pub status: String,
    pub condition: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub dni: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub results: Vec<SummaryRecord>,
    pub meta: PageMetadata,
}

/// A RUC query resolves to a single detail page; wrap it so it still
/// satisfies the search output contract.
impl From<DetailRecord> for ResultSet {
    fn from(detail: DetailRecord) -> Self {
        ResultSet {
            results: vec![SummaryRecord {
                ruc: detail.ruc,
                name: detail.name,
                location: String::new(),
                status: detail.status,
            }],
            meta: PageMetadata {
                total: 1,
                per_page: PER_PAGE,
                page: 1,
            },
        }
    }
}
