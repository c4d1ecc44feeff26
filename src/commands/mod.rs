//! Command dispatch and handlers.

pub mod plan;
pub mod sync;

use crate::cli::{Command, ScheduleArgs};
use crate::error::MilerError;
use crate::ports::clock::Clock;
use crate::schedule::{generate_descriptors, Interval, MilestoneDescriptor};

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Plan(args) => plan::run(args),
        Command::Sync(args) => sync::run(args),
    }
}

/// Resolve the schedule flags into the desired milestone set.
///
/// The clock is only consulted when no `--date` was given.
pub(crate) fn desired_milestones(
    args: &ScheduleArgs,
    clock: &dyn Clock,
) -> Result<Vec<MilestoneDescriptor>, MilerError> {
    let interval: Interval = args.interval.parse()?;
    let reference = match args.date {
        Some(date) => date,
        None => clock.today()?,
    };
    generate_descriptors(interval, args.advance, reference)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, Utc};

    use super::*;

    /// Clock whose local date is fixed, or unavailable.
    struct FixedDate(Option<NaiveDate>);

    impl Clock for FixedDate {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }

        fn today(&self) -> Result<NaiveDate, MilerError> {
            self.0.ok_or_else(|| MilerError::Replay("no date".into()))
        }
    }

    fn args(date: Option<NaiveDate>) -> ScheduleArgs {
        ScheduleArgs { interval: "daily".into(), advance: 1, date }
    }

    #[test]
    fn clock_date_is_the_default_reference() {
        let clock = FixedDate(NaiveDate::from_ymd_opt(2024, 3, 5));
        let titles: Vec<String> =
            desired_milestones(&args(None), &clock).unwrap().into_iter().map(|d| d.title).collect();
        assert_eq!(titles, vec!["2024-03-05", "2024-03-06"]);
    }

    #[test]
    fn explicit_date_skips_the_clock() {
        let descriptors =
            desired_milestones(&args(NaiveDate::from_ymd_opt(2024, 1, 10)), &FixedDate(None))
                .unwrap();
        assert_eq!(descriptors[0].title, "2024-01-10");
    }

    #[test]
    fn unavailable_clock_date_is_an_error() {
        let err = desired_milestones(&args(None), &FixedDate(None)).unwrap_err();
        assert!(matches!(err, MilerError::Replay(_)));
    }
}
