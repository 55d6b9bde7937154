use core::time::Duration;
use std::borrow::Cow;

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("timed out after {limit:?} waiting for {what}")]
    Timeout {
        what: Cow<'static, str>,
        limit: Duration,
    },
    #[error("failed to select month {target}: calendar stopped at {reached:?}")]
    MonthNotReached { target: String, reached: String },
    #[error(transparent)]
    Browser(#[from] anyhow::Error),
}

impl StepError {
    #[inline]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

pub type StepResult<T> = Result<T, StepError>;
