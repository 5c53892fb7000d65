//! # Cadence: when a task fires.

use std::time::Duration;

/// Timing policy requested for a task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cadence {
    /// Fire every `interval`, first firing one interval after registration.
    Every(Duration),
    /// Fire on the interval a [`ScheduleParser`](crate::ScheduleParser) derives from
    /// the expression.
    Cron(String),
    /// Fire once, `delay` after registration.
    Once(Duration),
}

impl Cadence {
    /// Kind of task this cadence produces.
    pub fn kind(&self) -> TaskKind {
        match self {
            Cadence::Every(_) => TaskKind::Recurring,
            Cadence::Cron(_) => TaskKind::CronLike,
            Cadence::Once(_) => TaskKind::OneShot,
        }
    }
}

/// Timing kind of a registered task; fixed for its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Recurring,
    CronLike,
    OneShot,
}

impl TaskKind {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskKind::Recurring => "recurring",
            TaskKind::CronLike => "cron_like",
            TaskKind::OneShot => "one_shot",
        }
    }

    /// `true` for kinds that fire more than once.
    #[inline]
    pub fn is_recurring(&self) -> bool {
        !matches!(self, TaskKind::OneShot)
    }
}
