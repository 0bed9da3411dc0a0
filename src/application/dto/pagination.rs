use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Offset-paginated page: the windowed items, the total row count for the
/// same filter, and whether more rows exist past this window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, offset: u32) -> Self {
        let has_more = u64::from(offset) + (items.len() as u64) < total_count;
        Self {
            items,
            total_count,
            has_more,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            has_more: self.has_more,
        }
    }
}
