mod chrome;

use core::time::Duration;

pub use chrome::{ChromeSite, USER_AGENTS, launch};

use crate::{dates::DayStatus, error::StepResult};

#[derive(Clone, Copy, Debug)]
pub struct Selectors {
    pub login_url: &'static str,
    pub reservations_url: &'static str,
    pub email_input: &'static str,
    pub password_input: &'static str,
    pub make_reservation: &'static str,
    // `{}` is the resort name
    pub resort_option: &'static str,
    pub continue_button: &'static str,
    pub month_label: &'static str,
    pub next_month: &'static str,
    // `{}` is the day label, e.g. `"Jan 05"`
    pub day_cell: &'static str,
    pub available_classes: [&'static str; 2],
    pub wait: Duration,
}

impl Selectors {
    #[rustfmt::skip]
    pub const IKON: Self = Self {
        login_url: "https://account.ikonpass.com/en/login",
        reservations_url: "https://account.ikonpass.com/en/myaccount/add-reservations/",
        email_input: "//input[@name=\"email\"]",
        password_input: "//input[@name=\"password\"]",
        make_reservation: "//span[text()=\"Make a Reservation\"]",
        resort_option: "//span[text()=\"{}\"]",
        continue_button: "//span[text()=\"Continue\"]",
        month_label: "//span[@class=\"sc-pckkE goPjwB\"]",
        next_month: "//i[@class=\"amp-icon icon-chevron-right\"]",
        day_cell: "//div[contains(@aria-label,\"{}\")]",
        available_classes: ["DayPicker-Day", "DayPicker-Day DayPicker-Day--today"],
        wait: Duration::from_secs(20),
    };

    #[inline]
    pub fn resort_option(&self, resort: &str) -> String {
        self.resort_option.replacen("{}", resort, 1)
    }

    #[inline]
    pub fn day_cell(&self, day_label: &str) -> String {
        self.day_cell.replacen("{}", day_label, 1)
    }

    pub fn classify(&self, class: &str) -> DayStatus {
        if self.available_classes.iter().any(|c| *c == class) {
            DayStatus::Available
        } else {
            DayStatus::Unavailable
        }
    }
}

pub trait ReservationSite {
    fn selectors(&self) -> &Selectors {
        &Selectors::IKON
    }

    async fn login(&mut self, email: &str, password: &str) -> StepResult<()>;

    async fn open_reservations(&mut self) -> StepResult<()>;

    async fn select_resort(&mut self, resort: &str) -> StepResult<()>;

    async fn month_label(&mut self) -> StepResult<String>;

    async fn next_month(&mut self) -> StepResult<()>;

    async fn day_class(&mut self, day_label: &str) -> StepResult<String>;
}
