//! Recurrence rules and their expansion into concrete occurrences.
//!
//! A recurring event is stored once, as a base event carrying a
//! [`RecurrenceRule`]. Range queries expand it on the fly into the occurrences
//! that fall inside the window; nothing generated here is ever persisted.
//!
//! Expansion is a pure function of (event, window): each call counts
//! occurrences from the event's own `start_date`, so `max_occurrences` behaves
//! identically no matter which window is asked for or how often.

use chrono::{DateTime, Datelike, Duration, Months, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_range::DateRange;
use crate::error::{DaybookError, DaybookResult};
use crate::event::Event;

/// Ceiling on occurrences generated by one expansion when the rule itself
/// sets no `max_occurrences`, so an open-ended rule has bounded output.
const DEFAULT_MAX_OCCURRENCES: u32 = 1000;

/// Ceiling on cursor steps per expansion (about a century of daily stepping),
/// so expansion terminates even with a far-future window and no end conditions.
const MAX_CURSOR_STEPS: u32 = 36_600;

/// How often a recurring event repeats, and for how long.
///
/// Serialized with a `frequency` tag, e.g.
/// `{"frequency": "weekly", "interval": 1, "daysOfWeek": [1, 3]}`.
/// Weekday numbers on the wire are 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "frequency", rename_all = "lowercase")]
pub enum RecurrenceRule {
    /// Every `interval` days from the anchor.
    Daily {
        #[serde(default = "default_interval")]
        interval: i32,
        #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
        end_date: Option<DateTime<Utc>>,
        #[serde(rename = "maxOccurrences", default, skip_serializing_if = "Option::is_none")]
        max_occurrences: Option<u32>,
    },
    /// On `days_of_week`, in weeks that are a whole multiple of `interval`
    /// from the anchor's week. An absent or empty set means the anchor's own
    /// weekday.
    Weekly {
        #[serde(default = "default_interval")]
        interval: i32,
        #[serde(
            rename = "daysOfWeek",
            default,
            with = "weekday_numbers",
            skip_serializing_if = "Option::is_none"
        )]
        days_of_week: Option<Vec<Weekday>>,
        #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
        end_date: Option<DateTime<Utc>>,
        #[serde(rename = "maxOccurrences", default, skip_serializing_if = "Option::is_none")]
        max_occurrences: Option<u32>,
    },
    /// Every `interval` months on the anchor's day-of-month, clamped to the
    /// last day of months that are too short (Jan 31 -> Feb 29 or Feb 28).
    Monthly {
        #[serde(default = "default_interval")]
        interval: i32,
        #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
        end_date: Option<DateTime<Utc>>,
        #[serde(rename = "maxOccurrences", default, skip_serializing_if = "Option::is_none")]
        max_occurrences: Option<u32>,
    },
}

fn default_interval() -> i32 {
    1
}

impl RecurrenceRule {
    /// Step size in whole units of the frequency. Non-positive stored values
    /// are treated as 1 so the cursor always moves forward.
    fn interval(&self) -> i64 {
        let raw = match self {
            RecurrenceRule::Daily { interval, .. }
            | RecurrenceRule::Weekly { interval, .. }
            | RecurrenceRule::Monthly { interval, .. } => *interval,
        };
        i64::from(raw.max(1))
    }

    /// No occurrence starts after this instant, when set.
    fn end_date(&self) -> Option<DateTime<Utc>> {
        match self {
            RecurrenceRule::Daily { end_date, .. }
            | RecurrenceRule::Weekly { end_date, .. }
            | RecurrenceRule::Monthly { end_date, .. } => *end_date,
        }
    }

    /// Cap on occurrences over the rule's whole lifetime, seed included.
    fn max_occurrences(&self) -> Option<u32> {
        match self {
            RecurrenceRule::Daily {
                max_occurrences, ..
            }
            | RecurrenceRule::Weekly {
                max_occurrences, ..
            }
            | RecurrenceRule::Monthly {
                max_occurrences, ..
            } => *max_occurrences,
        }
    }
}

/// Serde adapter mapping `daysOfWeek` wire numbers (0 = Sunday .. 6 = Saturday)
/// to `chrono::Weekday`. Out-of-range numbers are a deserialization error.
mod weekday_numbers {
    use chrono::Weekday;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        days: &Option<Vec<Weekday>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match days {
            Some(days) => {
                serializer.collect_seq(days.iter().map(|day| day.num_days_from_sunday()))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<Weekday>>, D::Error> {
        let numbers: Option<Vec<u8>> = Option::deserialize(deserializer)?;
        numbers
            .map(|numbers| {
                numbers
                    .into_iter()
                    .map(|n| match n {
                        0 => Ok(Weekday::Sun),
                        1 => Ok(Weekday::Mon),
                        2 => Ok(Weekday::Tue),
                        3 => Ok(Weekday::Wed),
                        4 => Ok(Weekday::Thu),
                        5 => Ok(Weekday::Fri),
                        6 => Ok(Weekday::Sat),
                        other => Err(D::Error::custom(format!(
                            "weekday must be 0-6 (0 = Sunday), got {other}"
                        ))),
                    })
                    .collect()
            })
            .transpose()
    }
}

/// Expand a recurring base event into the occurrences that start inside
/// `[range_start, range_end]` (inclusive on both ends).
///
/// Occurrences are ordered by `start_date` and each carries a fresh id, the
/// parent's id, and `is_recurring_instance = true`; the base event itself is
/// not touched. Candidates that land before `range_start` still consume the
/// `max_occurrences` budget even though they are not returned, which keeps the
/// cap anchored to the rule's own timeline rather than the query window.
///
/// An event without a recurrence rule is a contract violation and returns
/// [`DaybookError::NotRecurring`]; an inverted range returns no occurrences.
pub fn expand_recurring_event(
    event: &Event,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
) -> DaybookResult<Vec<Event>> {
    let rule = event
        .recurrence
        .as_ref()
        .ok_or_else(|| DaybookError::NotRecurring(event.id.clone()))?;

    if range_start > range_end {
        return Ok(Vec::new());
    }

    let anchor = event.start_date;
    let budget = rule.max_occurrences().unwrap_or(DEFAULT_MAX_OCCURRENCES);
    let upper = match rule.end_date() {
        Some(end) => end.min(range_end),
        None => range_end,
    };

    let mut occurrences = Vec::new();
    let mut counted: u32 = 0;
    let mut months_ahead: u32 = 0;
    let mut cursor = anchor;

    for _ in 0..MAX_CURSOR_STEPS {
        if cursor > upper || counted >= budget {
            break;
        }

        if is_candidate(rule, anchor, cursor) {
            counted += 1;
            if cursor >= range_start {
                occurrences.push(occurrence_from(event, cursor));
            }
        }

        cursor = match rule {
            RecurrenceRule::Daily { .. } => cursor + Duration::days(rule.interval()),
            // Weekly walks day by day; is_candidate picks out the matching days
            RecurrenceRule::Weekly { .. } => cursor + Duration::days(1),
            // Monthly recomputes from the anchor so clamping never drifts
            RecurrenceRule::Monthly { .. } => {
                months_ahead += rule.interval() as u32;
                match anchor.checked_add_months(Months::new(months_ahead)) {
                    Some(next) => next,
                    None => break,
                }
            }
        };
    }

    Ok(occurrences)
}

/// Whether the cursor lands on an occurrence of the rule.
fn is_candidate(rule: &RecurrenceRule, anchor: DateTime<Utc>, cursor: DateTime<Utc>) -> bool {
    match rule {
        // Daily and monthly cursors only ever land on occurrence dates
        RecurrenceRule::Daily { .. } | RecurrenceRule::Monthly { .. } => true,
        RecurrenceRule::Weekly { days_of_week, .. } => {
            let weeks_from_anchor =
                (cursor.date_naive() - anchor.date_naive()).num_days() / 7;
            if weeks_from_anchor % rule.interval() != 0 {
                return false;
            }
            match days_of_week {
                Some(days) if !days.is_empty() => days.contains(&cursor.weekday()),
                _ => cursor.weekday() == anchor.weekday(),
            }
        }
    }
}

/// Materialize one occurrence of a recurring event. Every base field is
/// copied verbatim; the occurrence gets its own id and points at its parent.
fn occurrence_from(master: &Event, start: DateTime<Utc>) -> Event {
    Event {
        id: Uuid::new_v4().to_string(),
        user_id: master.user_id.clone(),
        title: master.title.clone(),
        description: master.description.clone(),
        location: master.location.clone(),
        category: master.category.clone(),
        color: master.color.clone(),
        start_date: start,
        duration: master.duration,
        recurrence: master.recurrence.clone(),
        is_recurring_instance: true,
        parent_event_id: Some(master.id.clone()),
    }
}

/// Materialized view of a user's base events inside a range: non-recurring
/// events whose start falls in the window, plus every occurrence of the
/// recurring ones, concatenated in input order.
pub fn events_in_range(events: &[Event], range: &DateRange) -> DaybookResult<Vec<Event>> {
    let mut results = Vec::new();

    for event in events.iter().filter(|e| !e.is_recurring_instance) {
        if event.recurrence.is_some() {
            results.extend(expand_recurring_event(event, range.start, range.end)?);
        } else if range.contains(event.start_date) {
            results.push(event.clone());
        }
    }

    Ok(results)
}
