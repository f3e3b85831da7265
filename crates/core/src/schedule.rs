// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron schedules evaluated against wall time.
//!
//! Supports standard 5-field cron (minute granularity), extended 6-field cron
//! with a leading seconds field (second granularity), and the shortcuts
//! `@yearly`, `@annually`, `@monthly`, `@weekly`, `@daily`, `@midnight`,
//! `@hourly`.
//!
//! Day-of-week numbers follow standard cron: 0 and 7 are Sunday. When both
//! day-of-month and day-of-week are restricted, the schedule fires on days
//! matching either field.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use cron::Schedule as CronSchedule;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing or evaluating schedules
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid cron expression '{expression}': {reason}")]
    InvalidCron { expression: String, reason: String },
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Resolution at which a schedule matches wall time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Minute,
    Second,
}

/// A parsed trigger expression bound to a timezone
#[derive(Debug, Clone)]
pub struct Schedule {
    expression: String,
    timezone: Tz,
    granularity: Granularity,
    /// One schedule, or two when either day field may match
    inner: Vec<CronSchedule>,
}

impl Schedule {
    /// Parse an expression evaluated in UTC
    pub fn new(expression: impl Into<String>) -> Result<Self, ScheduleError> {
        Self::with_timezone(expression, "UTC")
    }

    /// Parse an expression evaluated in the named IANA timezone
    pub fn with_timezone(expression: impl Into<String>, timezone: &str) -> Result<Self, ScheduleError> {
        let expression = expression.into();
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| ScheduleError::InvalidTimezone(timezone.to_string()))?;
        let (inner, granularity) = parse_expression(&expression)?;

        Ok(Self {
            expression,
            timezone,
            granularity,
            inner,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Whether the trigger fires at `now`.
    ///
    /// `now` is truncated to the schedule's granularity, so a 5-field
    /// expression matches for the whole minute it names.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        let Some(slot) = self.truncate(now) else {
            return false;
        };
        let probe = slot - chrono::Duration::seconds(1);
        self.next_after(probe) == Some(slot)
    }

    /// Next fire time strictly after `after`
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let local = after.with_timezone(&self.timezone);
        self.inner
            .iter()
            .filter_map(|schedule| schedule.after(&local).next())
            .map(|dt| dt.with_timezone(&Utc))
            .min()
    }

    fn truncate(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let whole = now.with_nanosecond(0)?;
        match self.granularity {
            Granularity::Second => Some(whole),
            Granularity::Minute => whole.with_second(0),
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

fn parse_expression(expression: &str) -> Result<(Vec<CronSchedule>, Granularity), ScheduleError> {
    let invalid = |reason: String| ScheduleError::InvalidCron {
        expression: expression.to_string(),
        reason,
    };

    let trimmed = expression.trim();
    let expanded = match trimmed.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => "0 0 1 1 *",
        "@monthly" => "0 0 1 * *",
        "@weekly" => "0 0 * * SUN",
        "@daily" | "@midnight" => "0 0 * * *",
        "@hourly" => "0 * * * *",
        s if s.starts_with('@') => return Err(invalid("unknown shortcut".to_string())),
        _ => trimmed,
    };

    // Fields: sec min hour dom month dow
    let mut fields: Vec<String> = expanded.split_whitespace().map(String::from).collect();
    let granularity = match fields.len() {
        5 => {
            fields.insert(0, "0".to_string());
            Granularity::Minute
        }
        6 => Granularity::Second,
        n => return Err(invalid(format!("expected 5 or 6 fields, got {}", n))),
    };
    fields[5] = normalize_weekdays(&fields[5]).map_err(&invalid)?;

    let variants = if restricted(&fields[3]) && restricted(&fields[5]) {
        let mut by_month_day = fields.clone();
        by_month_day[5] = "*".to_string();
        let mut by_weekday = fields;
        by_weekday[3] = "*".to_string();
        vec![by_month_day, by_weekday]
    } else {
        vec![fields]
    };

    let schedules = variants
        .iter()
        .map(|fields| CronSchedule::from_str(&fields.join(" ")).map_err(|e| invalid(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((schedules, granularity))
}

fn restricted(field: &str) -> bool {
    field != "*" && field != "?"
}

const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Rewrite a standard day-of-week field (0-7, Sunday as 0 or 7) into the
/// explicit day names the `cron` crate reads unambiguously.
fn normalize_weekdays(field: &str) -> Result<String, String> {
    if !restricted(field) {
        return Ok(field.to_string());
    }

    let mut days = [false; 7];
    for item in field.split(',') {
        let (base, step) = match item.split_once('/') {
            Some((base, step)) => {
                let step = step
                    .parse::<usize>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| format!("invalid day-of-week step in '{}'", item))?;
                (base, step)
            }
            None => (item, 1),
        };
        let (start, mut end) = match base.split_once('-') {
            _ if base == "*" => (0, 6),
            Some((from, to)) => (weekday(from)?, weekday(to)?),
            None if step > 1 => (weekday(base)?, 6),
            None => {
                let day = weekday(base)?;
                (day, day)
            }
        };
        // `FRI-SUN`, `5-0`: Sunday closes the week
        if end == 0 && start > 0 {
            end = 7;
        }
        if start > end {
            return Err(format!("day-of-week range '{}' runs backwards", base));
        }
        for day in (start..=end).step_by(step) {
            days[day % 7] = true;
        }
    }

    if days.iter().all(|on| *on) {
        return Ok("*".to_string());
    }
    Ok(WEEKDAYS
        .iter()
        .zip(days)
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(","))
}

fn weekday(token: &str) -> Result<usize, String> {
    if let Ok(n) = token.parse::<usize>() {
        return if n <= 7 {
            Ok(n)
        } else {
            Err(format!("day of week {} is out of range 0-7", n))
        };
    }
    let upper = token.to_ascii_uppercase();
    WEEKDAYS
        .iter()
        .position(|name| *name == upper)
        .ok_or_else(|| format!("invalid day of week '{}'", token))
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
