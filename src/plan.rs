use compact_str::CompactString;

use crate::calendar::YearMonth;

#[rustfmt::skip]
pub const RESORTS: [&str; 3] = [
    "Arapahoe Basin",
    "Aspen Snowmass",
    "Winter Park Resort",
];

pub const MONTHS: core::ops::RangeInclusive<u8> = 1..=6;

pub const YEAR: i32 = 2021;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchPlan {
    pub resorts: Vec<CompactString>,
    pub months: Vec<YearMonth>,
}

impl WatchPlan {
    pub fn new<R>(resorts: impl IntoIterator<Item = R>, months: impl IntoIterator<Item = YearMonth>) -> Self
    where
        R: Into<CompactString>,
    {
        Self {
            resorts: resorts.into_iter().map(Into::into).collect(),
            months: months.into_iter().collect(),
        }
    }

    #[inline]
    pub fn last_month(&self) -> Option<YearMonth> {
        self.months.iter().copied().max_by_key(|m| (m.year, m.month))
    }

    pub fn cell_count(&self) -> usize {
        self.resorts.len() * self.months.iter().map(|m| usize::from(m.days())).sum::<usize>()
    }
}

impl Default for WatchPlan {
    fn default() -> Self {
        Self::new(RESORTS, MONTHS.map(|month| YearMonth::new(YEAR, month)))
    }
}
