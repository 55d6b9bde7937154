use compact_str::CompactString;

use crate::{
    dates::{AvailableDates, Change, DayStatus, ReservationDate},
    error::StepResult,
    navigate,
    notify::{Notifier, notify_opened},
    plan::WatchPlan,
    site::ReservationSite,
};

pub async fn traverse<S: ReservationSite>(
    site: &mut S,
    plan: &WatchPlan,
    mut on_day: impl AsyncFnMut(ReservationDate, DayStatus),
) -> StepResult<()> {
    let Some(last) = plan.last_month() else {
        return Ok(());
    };

    for resort in &plan.resorts {
        navigate::select_resort(site, resort).await?;
        for &month in &plan.months {
            navigate::select_month(site, month, last).await?;
            for day in 1..=month.days() {
                let status = navigate::read_day(site, month, day).await;
                on_day(ReservationDate::new(resort.clone(), month.month, day, month.year), status).await;
            }
        }
        tracing::debug!(target: "scan", "{resort} done");
    }

    Ok(())
}

pub async fn full_scan<S: ReservationSite>(
    site: &mut S,
    plan: &WatchPlan,
    dates: &mut AvailableDates,
) -> StepResult<usize> {
    let mut added = 0;

    traverse(site, plan, async |date: ReservationDate, status: DayStatus| {
        if status == DayStatus::Available && dates.insert(date) {
            added += 1;
        }
    })
    .await?;

    tracing::info!(
        target: "scan",
        "\x1b[32mbaseline\x1b[0m: {added} open dates out of {} cells ({} tracked)",
        plan.cell_count(),
        dates.len()
    );
    Ok(added)
}

pub async fn delta_scan<S, N>(
    site: &mut S,
    plan: &WatchPlan,
    dates: &mut AvailableDates,
    notifier: &N,
    recipients: &[CompactString],
) -> StepResult<Vec<Change>>
where
    S: ReservationSite,
    N: Notifier,
{
    let mut changes = Vec::new();

    traverse(site, plan, async |date: ReservationDate, status: DayStatus| {
        let Some(change) = dates.observe(date, status) else {
            return;
        };
        match &change {
            Change::Opened(date) => {
                tracing::info!(target: "scan", "\x1b[1;32mopened\x1b[0m {date}");
                notify_opened(notifier, recipients, date).await;
            }
            Change::Closed(date) => {
                tracing::info!(target: "scan", "\x1b[33mclosed\x1b[0m {date}");
            }
        }
        changes.push(change);
    })
    .await?;

    tracing::info!(target: "scan", "delta: {} changes ({} tracked)", changes.len(), dates.len());
    Ok(changes)
}
