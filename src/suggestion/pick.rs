use rand::Rng;

/// Items requested per collection page. Must match the `per_page` query
/// parameter so page/offset arithmetic lines up with what the API returns.
pub const PER_PAGE: usize = 100;

/// Where a 1-based collection index lives when the collection is read in
/// pages of [`PER_PAGE`] items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PagePosition {
    pub page: u64,     // 1-based
    pub offset: usize, // 0-based index into that page's releases
}

impl PagePosition {
    /// `None` for index 0, which names no item.
    pub fn from_index(index: u64) -> Option<Self> {
        let zero_based = index.checked_sub(1)?;
        let per_page = PER_PAGE as u64;

        Some(Self {
            page: zero_based / per_page + 1,
            offset: (zero_based % per_page) as usize,
        })
    }

    /// The 1-based collection index this position points at. Page 0 is
    /// treated as page 1.
    pub fn index(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(PER_PAGE as u64)
            .saturating_add(self.offset as u64)
            .saturating_add(1)
    }
}

/// Draw a uniformly random 1-based index in `1..=total`.
pub fn random_index<R: Rng + ?Sized>(total: u64, rng: &mut R) -> u64 {
    rng.gen_range(1..=total)
}
