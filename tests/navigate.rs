mod common;

use common::{FakeSite, PASSWORD};
use ikw::{
    calendar::YearMonth,
    dates::{DayStatus, ReservationDate},
    error::StepError,
    navigate::{self, MAX_MONTH_STEPS},
};

const JUNE: YearMonth = YearMonth::new(2021, 6);

#[tokio::test]
async fn steps_forward_to_target_month() {
    let mut site = FakeSite::new(YearMonth::new(2021, 1));

    let clicks = navigate::select_month(&mut site, JUNE, JUNE).await.unwrap();

    assert_eq!(clicks, 5);
    assert_eq!(site.next_clicks, 5);
    assert_eq!(site.shown, JUNE);
}

#[tokio::test]
async fn displayed_month_needs_no_click() {
    let mut site = FakeSite::new(YearMonth::new(2021, 3));

    let clicks = navigate::select_month(&mut site, YearMonth::new(2021, 3), JUNE)
        .await
        .unwrap();

    assert_eq!(clicks, 0);
    assert_eq!(site.next_clicks, 0);
}

#[tokio::test]
async fn earlier_month_aborts_at_last_month() {
    let mut site = FakeSite::new(YearMonth::new(2021, 3));

    let err = navigate::select_month(&mut site, YearMonth::new(2021, 1), JUNE)
        .await
        .unwrap_err();

    match err {
        StepError::MonthNotReached { target, reached } => {
            assert_eq!(target, "January 2021");
            assert_eq!(reached, "June 2021");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(site.next_clicks, 3);
}

#[tokio::test]
async fn calendar_past_last_month_is_capped() {
    let mut site = FakeSite::new(YearMonth::new(2021, 7));

    let err = navigate::select_month(&mut site, YearMonth::new(2021, 1), JUNE)
        .await
        .unwrap_err();

    assert!(matches!(err, StepError::MonthNotReached { .. }));
    assert_eq!(site.next_clicks, MAX_MONTH_STEPS);
}

#[tokio::test]
async fn day_cells_are_classified() {
    let jan = YearMonth::new(2021, 1);
    let mut site = FakeSite::new(jan);
    site.open.push(ReservationDate::new("Aspen Snowmass", 1, 5, 2021));
    site.today = Some(ReservationDate::new("Aspen Snowmass", 1, 6, 2021));
    site.unreadable.push(ReservationDate::new("Aspen Snowmass", 1, 8, 2021));
    navigate::select_resort(&mut site, "Aspen Snowmass").await.unwrap();

    assert_eq!(navigate::read_day(&mut site, jan, 5).await, DayStatus::Available);
    assert_eq!(navigate::read_day(&mut site, jan, 6).await, DayStatus::Available);
    assert_eq!(navigate::read_day(&mut site, jan, 7).await, DayStatus::Unavailable);
    assert_eq!(navigate::read_day(&mut site, jan, 8).await, DayStatus::Unknown);
}

#[tokio::test]
async fn missing_resort_is_fatal() {
    let mut site = FakeSite::new(YearMonth::new(2021, 1));

    let err = navigate::select_resort(&mut site, "Mammoth Mountain")
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(site.reloads, 1);
}

#[tokio::test]
async fn login_failure_is_fatal() {
    let mut site = FakeSite::new(YearMonth::new(2021, 1));

    let err = navigate::login(&mut site, "someone@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(err.is_timeout());
    assert!(!site.logged_in);

    navigate::login(&mut site, "someone@example.com", PASSWORD)
        .await
        .unwrap();
    assert!(site.logged_in);
}
