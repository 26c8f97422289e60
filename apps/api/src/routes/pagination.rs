use serde::Deserialize;

pub const MAX_PAGE_SIZE: i64 = 100;

/// `?skip=&limit=` query parameters shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    MAX_PAGE_SIZE
}

impl Pagination {
    /// Clamps to `0..=MAX_PAGE_SIZE` and a non-negative offset.
    pub fn clamped(&self) -> (i64, i64) {
        (self.skip.max(0), self.limit.clamp(0, MAX_PAGE_SIZE))
    }
}
