use core::fmt;

use compact_str::CompactString;

use crate::calendar::month_name;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReservationDate {
    pub resort: CompactString,
    pub month: u8,
    pub day: u8,
    pub year: i32,
}

impl ReservationDate {
    pub fn new(resort: impl Into<CompactString>, month: u8, day: u8, year: i32) -> Self {
        Self {
            resort: resort.into(),
            month,
            day,
            year,
        }
    }
}

impl fmt::Display for ReservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}, {}",
            self.resort,
            month_name(self.month).unwrap_or("?"),
            self.day,
            self.year
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayStatus {
    Available,
    Unavailable,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    Opened(ReservationDate),
    Closed(ReservationDate),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailableDates(Vec<ReservationDate>);

impl AvailableDates {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn contains(&self, date: &ReservationDate) -> bool {
        self.0.contains(date)
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[ReservationDate] {
        &self.0
    }

    pub fn insert(&mut self, date: ReservationDate) -> bool {
        if self.contains(&date) {
            return false;
        }
        self.0.push(date);
        true
    }

    pub fn remove(&mut self, date: &ReservationDate) -> bool {
        if let Some(pos) = self.0.iter().position(|d| d == date) {
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    /// Folds one fresh observation into the set.
    ///
    /// An `Unknown` reading never changes the set: the previous belief about
    /// that date is kept until the cell can be read again.
    pub fn observe(&mut self, date: ReservationDate, status: DayStatus) -> Option<Change> {
        match status {
            DayStatus::Available if !self.contains(&date) => {
                self.0.push(date.clone());
                Some(Change::Opened(date))
            }
            DayStatus::Unavailable if self.remove(&date) => Some(Change::Closed(date)),
            _ => None,
        }
    }
}
