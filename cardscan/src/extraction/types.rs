use serde::{Deserialize, Serialize};

/// Contact fields pulled out of recognised card text.
///
/// Every field is serialised, absent ones as `null`. `title`, `company` and
/// `address` are never filled by the regex extractor; they stay in the record
/// so clients see a stable shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExtractedInfo {
    pub name: Option<String>,
    pub title: Option<String>,
    pub tel: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub web: Option<String>,
}

impl ExtractedInfo {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
