//! `miler plan` command.

use crate::adapters::live::clock::LiveClock;
use crate::cli::ScheduleArgs;
use crate::ports::clock::Clock;
use crate::schedule::MilestoneDescriptor;

use super::desired_milestones;

/// Execute the `plan` command.
///
/// # Errors
///
/// Returns an error string if the interval is unknown or the window is out
/// of range.
pub fn run(args: &ScheduleArgs) -> Result<(), String> {
    run_with_clock(args, &LiveClock)
}

/// Execute the `plan` command against the given clock.
///
/// # Errors
///
/// Returns an error string if the descriptors cannot be generated.
pub fn run_with_clock(args: &ScheduleArgs, clock: &dyn Clock) -> Result<(), String> {
    let descriptors = desired_milestones(args, clock).map_err(|e| e.to_string())?;
    println!("{}", format_descriptors(&descriptors));
    Ok(())
}

fn format_descriptors(descriptors: &[MilestoneDescriptor]) -> String {
    if descriptors.is_empty() {
        return "No milestones in window.".to_string();
    }
    descriptors
        .iter()
        .map(|d| format!("{} ({} .. {})", d.title, d.start_date, d.due_date))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn args(interval: &str, advance: u32) -> ScheduleArgs {
        ScheduleArgs {
            interval: interval.into(),
            advance,
            date: NaiveDate::from_ymd_opt(2024, 1, 10),
        }
    }

    #[test]
    fn plan_command_runs() {
        assert!(run(&args("weekly", 14)).is_ok());
    }

    #[test]
    fn plan_rejects_unknown_interval() {
        let err = run(&args("hourly", 3)).unwrap_err();
        assert!(err.contains("invalid interval"));
    }

    #[test]
    fn formats_one_line_per_descriptor() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let output = format_descriptors(&[
            MilestoneDescriptor { title: "2024-W02".into(), start_date: day(10), due_date: day(14) },
            MilestoneDescriptor { title: "2024-W03".into(), start_date: day(15), due_date: day(15) },
        ]);
        assert_eq!(output, "2024-W02 (2024-01-10 .. 2024-01-14)\n2024-W03 (2024-01-15 .. 2024-01-15)");
    }
}
