use crate::{
    calendar::YearMonth,
    dates::DayStatus,
    error::{StepError, StepResult},
    site::ReservationSite,
};

pub const MAX_MONTH_STEPS: u32 = 36;

pub async fn login<S: ReservationSite>(site: &mut S, email: &str, password: &str) -> StepResult<()> {
    tracing::info!(target: "login", "signing in as \x1b[36m{email}\x1b[0m ...");
    site.login(email, password).await?;
    tracing::info!(target: "login", "\x1b[32msigned in\x1b[0m");
    Ok(())
}

pub async fn select_resort<S: ReservationSite>(site: &mut S, resort: &str) -> StepResult<()> {
    tracing::debug!(target: "navigate", "selecting resort {resort}");
    site.open_reservations().await?;
    site.select_resort(resort).await
}

/// Steps the calendar forward until it shows `target`, returning the number
/// of clicks it took.
///
/// The calendar can only move forward, so a target behind the displayed
/// month is never found: the walk stops with [`StepError::MonthNotReached`]
/// once `last` is on screen.
pub async fn select_month<S: ReservationSite>(
    site: &mut S,
    target: YearMonth,
    last: YearMonth,
) -> StepResult<u32> {
    let (target, last) = (target.label(), last.label());
    let mut clicks = 0;

    loop {
        let shown = site.month_label().await?;
        if shown == target {
            tracing::debug!(target: "navigate", "{target} reached after {clicks} clicks");
            return Ok(clicks);
        }
        if shown == last || clicks >= MAX_MONTH_STEPS {
            let err = StepError::MonthNotReached {
                target,
                reached: shown,
            };
            tracing::error!(target: "navigate", "\x1b[31m{err}\x1b[0m");
            return Err(err);
        }

        site.next_month().await?;
        clicks += 1;
    }
}

pub async fn read_day<S: ReservationSite>(site: &mut S, month: YearMonth, day: u8) -> DayStatus {
    let label = month.day_label(day);

    match site.day_class(&label).await {
        Ok(class) => {
            let status = site.selectors().classify(&class);
            tracing::trace!(target: "day", "{label} {}: {class:?} -> {status:?}", month.year);
            status
        }
        Err(err) => {
            tracing::warn!(target: "day", "\x1b[33m{label} {}\x1b[0m unreadable: {err}", month.year);
            DayStatus::Unknown
        }
    }
}
