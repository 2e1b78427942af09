//! # Notification Requirements
//!
//! Each tier carries a public-notice deadline and an ordered list of media
//! channels. Deadlines are written the way the regulation states them
//! (`24 hours`, `30 days`, `1 year`) and parsed into a [`Deadline`].
//!
//! Deadline arithmetic counts a year as 365 days; notices are issued
//! against wall-clock collection times, so calendar-year subtleties do not
//! apply.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use sdwa_core::{Tier, ValidationError};

/// Unit of a notification deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadlineUnit {
    Hours,
    Days,
    Years,
}

impl DeadlineUnit {
    fn label(&self, amount: u32) -> &'static str {
        match (self, amount == 1) {
            (Self::Hours, true) => "hour",
            (Self::Hours, false) => "hours",
            (Self::Days, true) => "day",
            (Self::Days, false) => "days",
            (Self::Years, true) => "year",
            (Self::Years, false) => "years",
        }
    }
}

/// A notification deadline such as `24 hours`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Deadline {
    pub amount: u32,
    pub unit: DeadlineUnit,
}

impl Deadline {
    pub fn hours(amount: u32) -> Self {
        Self { amount, unit: DeadlineUnit::Hours }
    }

    pub fn days(amount: u32) -> Self {
        Self { amount, unit: DeadlineUnit::Days }
    }

    pub fn years(amount: u32) -> Self {
        Self { amount, unit: DeadlineUnit::Years }
    }

    /// Length of the deadline window, or `None` when it does not fit a
    /// [`Duration`].
    pub fn duration(&self) -> Option<Duration> {
        let amount = i64::from(self.amount);
        match self.unit {
            DeadlineUnit::Hours => Duration::try_hours(amount),
            DeadlineUnit::Days => Duration::try_days(amount),
            DeadlineUnit::Years => amount.checked_mul(365).and_then(Duration::try_days),
        }
    }

    /// When notice is due for a violation observed at `from`. `None` when
    /// the due time falls outside the representable calendar.
    pub fn due_from(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        from.checked_add_signed(self.duration()?)
    }
}

impl std::fmt::Display for Deadline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.label(self.amount))
    }
}

impl FromStr for Deadline {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDeadline(s.to_string());
        let mut parts = s.split_whitespace();
        let amount: u32 = parts
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(invalid)?;
        let unit = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("hour" | "hours" | "hr" | "hrs") => DeadlineUnit::Hours,
            Some("day" | "days") => DeadlineUnit::Days,
            Some("year" | "years" | "yr" | "yrs") => DeadlineUnit::Years,
            _ => return Err(invalid()),
        };
        if parts.next().is_some() || amount == 0 {
            return Err(invalid());
        }
        Ok(Self { amount, unit })
    }
}

impl TryFrom<String> for Deadline {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Deadline> for String {
    fn from(d: Deadline) -> Self {
        d.to_string()
    }
}

/// Public-notice requirement for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequirement {
    pub tier: Tier,
    pub deadline: Deadline,
    /// Channels in the order they must be used.
    pub media_channels: Vec<String>,
}

impl NotificationRequirement {
    pub fn new(tier: Tier, deadline: Deadline, channels: &[&str]) -> Self {
        Self {
            tier,
            deadline,
            media_channels: channels.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// `24 hours via Public Notice, Direct Contact, Media Alert`.
    pub fn summary(&self) -> String {
        if self.media_channels.is_empty() {
            return self.deadline.to_string();
        }
        format!("{} via {}", self.deadline, self.media_channels.join(", "))
    }
}

/// Requirements keyed by tier. Serialized as a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NotificationRequirement>", into = "Vec<NotificationRequirement>")]
pub struct RequirementTable {
    entries: BTreeMap<Tier, NotificationRequirement>,
}

impl RequirementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tier: Tier) -> Option<&NotificationRequirement> {
        self.entries.get(&tier)
    }

    pub fn insert(&mut self, requirement: NotificationRequirement) -> Option<NotificationRequirement> {
        self.entries.insert(requirement.tier, requirement)
    }

    /// Requirements, most urgent tier first.
    pub fn iter(&self) -> impl Iterator<Item = &NotificationRequirement> {
        self.entries.values().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<NotificationRequirement> for RequirementTable {
    fn from_iter<I: IntoIterator<Item = NotificationRequirement>>(iter: I) -> Self {
        let mut table = Self::new();
        for r in iter {
            table.insert(r);
        }
        table
    }
}

impl From<Vec<NotificationRequirement>> for RequirementTable {
    fn from(reqs: Vec<NotificationRequirement>) -> Self {
        reqs.into_iter().collect()
    }
}

impl From<RequirementTable> for Vec<NotificationRequirement> {
    fn from(table: RequirementTable) -> Self {
        table.entries.into_values().rev().collect()
    }
}
