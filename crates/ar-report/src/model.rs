//! Report model: metadata plus the activities to report on.
//!
//! Aggregates are derived from the activity sequence on every call; the
//! model keeps no cached totals that could drift from its activities.

use ar_common::{ActivityRecord, ValidationError, ValidationResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

/// Inclusive time window a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawRange> for DateRange {
    type Error = ValidationError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ValidationResult<Self> {
        if end < start {
            return Err(ValidationError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Totals for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total_duration: Duration,
    pub count: usize,
}

/// Derived totals over all activities of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregates {
    pub total_duration: Duration,
    pub activity_count: usize,
    /// Ordered by total duration descending, then category name ascending.
    pub per_category: Vec<CategoryTotal>,
}

/// Summary statistics shown under the category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityStatistics {
    pub activity_count: usize,
    pub total_duration: Duration,
    /// Mean duration, floored to whole minutes.
    pub average_duration: Duration,
    pub longest: Option<ActivityRecord>,
    pub shortest: Option<ActivityRecord>,
}

/// Saturates instead of overflowing on absurd spans.
fn add_durations(acc: Duration, duration: Duration) -> Duration {
    acc.checked_add(&duration).unwrap_or(Duration::MAX)
}

/// Metadata plus an ordered sequence of activities, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReportModelData", into = "ReportModelData")]
pub struct ReportModel {
    title: String,
    author: String,
    generated_at: DateTime<Utc>,
    range: DateRange,
    activities: Vec<ActivityRecord>,
}

/// Serialized form of a [`ReportModel`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReportModelData {
    title: String,
    #[serde(default)]
    author: String,
    generated_at: DateTime<Utc>,
    range: DateRange,
    #[serde(default)]
    activities: Vec<ActivityRecord>,
}

impl TryFrom<ReportModelData> for ReportModel {
    type Error = ValidationError;

    fn try_from(data: ReportModelData) -> Result<Self, Self::Error> {
        ReportModel::build(
            data.title,
            data.author,
            data.generated_at,
            data.range,
            data.activities,
        )
    }
}

impl From<ReportModel> for ReportModelData {
    fn from(model: ReportModel) -> Self {
        ReportModelData {
            title: model.title,
            author: model.author,
            generated_at: model.generated_at,
            range: model.range,
            activities: model.activities,
        }
    }
}

impl ReportModel {
    /// Validate and assemble a model.
    ///
    /// Rejects a blank title, duplicate activity ids and any activity whose
    /// start lies outside `range`. Offending activities are reported, never dropped.
    pub fn build(
        title: impl Into<String>,
        author: impl Into<String>,
        generated_at: DateTime<Utc>,
        range: DateRange,
        activities: Vec<ActivityRecord>,
    ) -> ValidationResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty("title"));
        }

        let mut seen = HashSet::new();
        for (index, activity) in activities.iter().enumerate() {
            let scope = format!("activities[{index}]");
            if !seen.insert(activity.id()) {
                return Err(ValidationError::DuplicateId {
                    field: "id".to_string(),
                    id: activity.id().to_string(),
                }
                .within(&scope));
            }
            if !range.contains(activity.start_time()) {
                return Err(ValidationError::OutsideRange {
                    field: "start_time".to_string(),
                    value: activity.start_time(),
                    range_start: range.start(),
                    range_end: range.end(),
                }
                .within(&scope));
            }
        }

        Ok(ReportModel {
            title,
            author: author.into(),
            generated_at,
            range,
            activities,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Activities in insertion order.
    pub fn activities(&self) -> &[ActivityRecord] {
        &self.activities
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Activities by start time; equal starts keep insertion order.
    pub fn sorted_activities(&self) -> Vec<&ActivityRecord> {
        let mut sorted: Vec<&ActivityRecord> = self.activities.iter().collect();
        sorted.sort_by_key(|a| a.start_time());
        sorted
    }

    /// Group by category and total durations and counts.
    pub fn aggregates(&self) -> Aggregates {
        let mut groups: BTreeMap<&str, (Duration, usize)> = BTreeMap::new();
        let mut total_duration = Duration::zero();

        for activity in &self.activities {
            let duration = activity.duration();
            total_duration = add_durations(total_duration, duration);
            let entry = groups
                .entry(activity.category())
                .or_insert((Duration::zero(), 0));
            entry.0 = add_durations(entry.0, duration);
            entry.1 += 1;
        }

        let mut per_category: Vec<CategoryTotal> = groups
            .into_iter()
            .map(|(category, (total_duration, count))| CategoryTotal {
                category: category.to_string(),
                total_duration,
                count,
            })
            .collect();
        // BTreeMap already yields names ascending; the stable sort keeps that for ties.
        per_category.sort_by_key(|c| Reverse(c.total_duration));

        Aggregates {
            total_duration,
            activity_count: self.activities.len(),
            per_category,
        }
    }

    /// Count, total, average, longest and shortest activity.
    pub fn statistics(&self) -> ActivityStatistics {
        let sorted = self.sorted_activities();
        let total_duration = sorted
            .iter()
            .fold(Duration::zero(), |acc, a| add_durations(acc, a.duration()));
        let average_duration = match sorted.len() {
            0 => Duration::zero(),
            n => Duration::minutes(total_duration.num_minutes() / n as i64),
        };

        // First in sorted order wins ties.
        let mut longest: Option<&ActivityRecord> = None;
        let mut shortest: Option<&ActivityRecord> = None;
        for &activity in &sorted {
            if longest.is_none_or(|l| activity.duration() > l.duration()) {
                longest = Some(activity);
            }
            if shortest.is_none_or(|s| activity.duration() < s.duration()) {
                shortest = Some(activity);
            }
        }

        ActivityStatistics {
            activity_count: sorted.len(),
            total_duration,
            average_duration,
            longest: longest.cloned(),
            shortest: shortest.cloned(),
        }
    }

    /// Activities whose title contains `query`, ignoring case.
    pub fn find_by_title(&self, query: &str) -> Vec<&ActivityRecord> {
        let query = query.to_lowercase();
        self.activities
            .iter()
            .filter(|a| a.title().to_lowercase().contains(&query))
            .collect()
    }

    /// Activities starting inside `[start, end]`.
    pub fn activities_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<&ActivityRecord> {
        self.activities
            .iter()
            .filter(|a| start <= a.start_time() && a.start_time() <= end)
            .collect()
    }

    /// Load and validate a model from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
