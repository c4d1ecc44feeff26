//! Cuts an advance window into per-interval milestone buckets.
//!
//! Weeks follow ISO 8601 (Monday through Sunday, titled with the ISO
//! week-based year). Months are calendar months. Buckets at either edge of
//! the window are clipped to the window.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use super::{Interval, MilestoneDescriptor};
use crate::error::MilerError;

/// Generate the milestones covering `reference` through
/// `reference + advance_days`, inclusive.
///
/// The result is ordered by start date, titles are unique, and the buckets
/// tile the window with no gaps or overlaps.
///
/// # Errors
///
/// Returns [`MilerError::WindowOutOfRange`] if the window end is not a
/// representable date.
pub fn generate_descriptors(
    interval: Interval,
    advance_days: u32,
    reference: NaiveDate,
) -> Result<Vec<MilestoneDescriptor>, MilerError> {
    let window_end = reference
        .checked_add_days(Days::new(u64::from(advance_days)))
        .ok_or(MilerError::WindowOutOfRange { reference, advance_days })?;

    let mut descriptors = Vec::new();
    let mut cursor = reference;
    loop {
        let due_date = period_end(interval, cursor).min(window_end);
        descriptors.push(MilestoneDescriptor {
            title: period_title(interval, cursor),
            start_date: cursor,
            due_date,
        });
        match due_date.succ_opt() {
            Some(next) if due_date < window_end => cursor = next,
            _ => break,
        }
    }

    debug!(
        %interval,
        %reference,
        %window_end,
        count = descriptors.len(),
        "generated milestone descriptors"
    );
    Ok(descriptors)
}

/// Last day of the period containing `date`.
fn period_end(interval: Interval, date: NaiveDate) -> NaiveDate {
    match interval {
        Interval::Daily => date,
        Interval::Weekly => {
            let remaining = 6 - date.weekday().num_days_from_monday();
            date.checked_add_days(Days::new(u64::from(remaining))).unwrap_or(NaiveDate::MAX)
        }
        Interval::Monthly => last_day_of_month(date),
    }
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

fn period_title(interval: Interval, date: NaiveDate) -> String {
    match interval {
        Interval::Daily => date.format("%Y-%m-%d").to_string(),
        Interval::Weekly => {
            let week = date.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        Interval::Monthly => date.format("%B %Y").to_string(),
    }
}
