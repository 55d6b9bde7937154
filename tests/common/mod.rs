#![allow(dead_code)]

use core::{cell::RefCell, time::Duration};

use compact_str::CompactString;
use ikw::{
    calendar::YearMonth,
    dates::ReservationDate,
    error::{StepError, StepResult},
    notify::{Alert, Notifier},
    plan::WatchPlan,
    site::ReservationSite,
};

pub const PASSWORD: &str = "hunter2";

fn timeout(what: String) -> StepError {
    StepError::Timeout {
        what: what.into(),
        limit: Duration::from_secs(20),
    }
}

const fn next(month: YearMonth) -> YearMonth {
    if month.month == 12 {
        YearMonth::new(month.year + 1, 1)
    } else {
        YearMonth::new(month.year, month.month + 1)
    }
}

/// In-memory stand-in for the reservation UI.
pub struct FakeSite {
    /// Month the calendar shows right after a resort is picked.
    pub opens_at: YearMonth,
    pub shown: YearMonth,
    pub resorts: Vec<&'static str>,
    pub resort: Option<CompactString>,
    pub open: Vec<ReservationDate>,
    /// Open, and rendered as today's cell.
    pub today: Option<ReservationDate>,
    pub unreadable: Vec<ReservationDate>,
    pub logged_in: bool,
    pub next_clicks: u32,
    pub reloads: u32,
}

impl FakeSite {
    pub fn new(opens_at: YearMonth) -> Self {
        Self {
            opens_at,
            shown: opens_at,
            resorts: vec!["Arapahoe Basin", "Aspen Snowmass", "Winter Park Resort"],
            resort: None,
            open: Vec::new(),
            today: None,
            unreadable: Vec::new(),
            logged_in: false,
            next_clicks: 0,
            reloads: 0,
        }
    }
}

impl ReservationSite for FakeSite {
    async fn login(&mut self, _email: &str, password: &str) -> StepResult<()> {
        if password != PASSWORD {
            return Err(timeout("\"Make a Reservation\"".to_owned()));
        }
        self.logged_in = true;
        Ok(())
    }

    async fn open_reservations(&mut self) -> StepResult<()> {
        self.reloads += 1;
        self.resort = None;
        self.shown = self.opens_at;
        Ok(())
    }

    async fn select_resort(&mut self, resort: &str) -> StepResult<()> {
        if !self.resorts.iter().any(|r| *r == resort) {
            return Err(timeout(format!("resort {resort:?}")));
        }
        self.resort = Some(resort.into());
        Ok(())
    }

    async fn month_label(&mut self) -> StepResult<String> {
        Ok(self.shown.label())
    }

    async fn next_month(&mut self) -> StepResult<()> {
        self.next_clicks += 1;
        self.shown = next(self.shown);
        Ok(())
    }

    async fn day_class(&mut self, day_label: &str) -> StepResult<String> {
        let Some(resort) = self.resort.clone() else {
            return Err(timeout(format!("day {day_label:?}")));
        };
        let shown = self.shown;
        let Some(day) = (1..=shown.days()).find(|&d| shown.day_label(d) == day_label) else {
            return Err(timeout(format!("day {day_label:?}")));
        };

        let date = ReservationDate::new(resort, shown.month, day, shown.year);
        if self.unreadable.contains(&date) {
            return Err(timeout(format!("day {day_label:?}")));
        }
        let class = if self.today.as_ref() == Some(&date) {
            "DayPicker-Day DayPicker-Day--today"
        } else if self.open.contains(&date) {
            "DayPicker-Day"
        } else {
            "DayPicker-Day DayPicker-Day--disabled"
        };
        Ok(class.to_owned())
    }
}

/// Records every alert; fails for one chosen recipient.
#[derive(Default)]
pub struct Outbox {
    pub sent: RefCell<Vec<(String, Alert)>>,
    pub fail_for: Option<&'static str>,
}

impl Notifier for Outbox {
    async fn send(&self, recipient: &str, alert: &Alert) -> anyhow::Result<()> {
        if self.fail_for == Some(recipient) {
            anyhow::bail!("relay rejected {recipient}");
        }
        self.sent.borrow_mut().push((recipient.to_owned(), alert.clone()));
        Ok(())
    }
}

pub fn recipients() -> Vec<CompactString> {
    vec!["first@example.com".into(), "second@example.com".into()]
}

/// Two resorts, January and February 2021.
pub fn small_plan() -> WatchPlan {
    WatchPlan::new(
        ["Arapahoe Basin", "Aspen Snowmass"],
        [YearMonth::new(2021, 1), YearMonth::new(2021, 2)],
    )
}

pub fn abasin_jan_5() -> ReservationDate {
    ReservationDate::new("Arapahoe Basin", 1, 5, 2021)
}

pub fn aspen_feb_14() -> ReservationDate {
    ReservationDate::new("Aspen Snowmass", 2, 14, 2021)
}
