use core::fmt;

#[rustfmt::skip]
const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

#[inline]
pub fn month_name(month: u8) -> Option<&'static str> {
    MONTH_NAMES.get(usize::from(month).checked_sub(1)?).copied()
}

#[inline]
pub fn month_abbr(month: u8) -> Option<&'static str> {
    month_name(month).map(|name| &name[..3])
}

pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u8,
}

impl YearMonth {
    pub const fn new(year: i32, month: u8) -> Self {
        Self { year, month }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        month_name(self.month).unwrap_or("?")
    }

    #[inline]
    pub const fn days(self) -> u8 {
        days_in_month(self.year, self.month)
    }

    pub fn label(self) -> String {
        self.to_string()
    }

    pub fn day_label(self, day: u8) -> String {
        format!("{} {day:02}", month_abbr(self.month).unwrap_or("???"))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}
