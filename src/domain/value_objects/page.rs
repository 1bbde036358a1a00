//! One-indexed page of a listing.

/// Fixed number of entries per page.
pub const PAGE_SIZE: u64 = 20;

/// A 1-indexed page number. Values below 1 clamp to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(u64);

impl Page {
    pub fn new(number: i64) -> Self {
        Self(number.max(1) as u64)
    }

    /// Parse a raw query value; anything that is not an integer is page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<i64>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn number(&self) -> u64 {
        self.0
    }

    pub fn offset(&self) -> u64 {
        (self.0 - 1).saturating_mul(PAGE_SIZE)
    }

    pub fn limit(&self) -> u64 {
        PAGE_SIZE
    }
}

impl Default for Page {
    fn default() -> Self {
        Self(1)
    }
}
