//! Logged activities.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::id::ActivityId;

/// Raw, unvalidated fields of an activity as handed over by the data-entry layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFields {
    pub id: ActivityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// One logged, time-boxed unit of work.
///
/// Immutable once created. The duration is always derived from the two
/// timestamps and never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ActivityFields", into = "ActivityFields")]
pub struct ActivityRecord {
    id: ActivityId,
    title: String,
    description: String,
    category: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl ActivityRecord {
    /// Validate `fields` and build a record.
    ///
    /// Fails on the first offending field: `id`, `title`, `category`, then `end_time`.
    pub fn create(fields: ActivityFields) -> ValidationResult<Self> {
        if fields.id.is_empty() {
            return Err(ValidationError::empty("id"));
        }
        if fields.title.trim().is_empty() {
            return Err(ValidationError::empty("title"));
        }
        if fields.category.trim().is_empty() {
            return Err(ValidationError::empty("category"));
        }
        if fields.end_time < fields.start_time {
            return Err(ValidationError::EndBeforeStart {
                field: "end_time".to_string(),
                start: fields.start_time,
                end: fields.end_time,
            });
        }

        Ok(Self {
            id: fields.id,
            title: fields.title,
            description: fields.description,
            category: fields.category,
            start_time: fields.start_time,
            end_time: fields.end_time,
        })
    }

    pub fn id(&self) -> &ActivityId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Time spent on the activity.
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

impl TryFrom<ActivityFields> for ActivityRecord {
    type Error = ValidationError;

    fn try_from(fields: ActivityFields) -> Result<Self, Self::Error> {
        ActivityRecord::create(fields)
    }
}

impl From<ActivityRecord> for ActivityFields {
    fn from(record: ActivityRecord) -> Self {
        ActivityFields {
            id: record.id,
            title: record.title,
            description: record.description,
            category: record.category,
            start_time: record.start_time,
            end_time: record.end_time,
        }
    }
}

/// Format a duration as `HH:MM`. Hours are not wrapped at 24 and seconds are
/// truncated.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes().max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, h, m, 0).unwrap()
    }

    fn fields() -> ActivityFields {
        ActivityFields {
            id: ActivityId::from("a1"),
            title: "Write weekly summary".to_string(),
            description: String::new(),
            category: "work".to_string(),
            start_time: at(9, 0),
            end_time: at(10, 30),
        }
    }

    #[test]
    fn test_create_valid_record() {
        let record = ActivityRecord::create(fields()).unwrap();
        assert_eq!(record.title(), "Write weekly summary");
        assert_eq!(record.duration(), Duration::minutes(90));
    }

    #[test]
    fn test_zero_length_activity_is_allowed() {
        let mut f = fields();
        f.end_time = f.start_time;
        let record = ActivityRecord::create(f).unwrap();
        assert!(record.duration().is_zero());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut f = fields();
        f.end_time = at(8, 59);
        let err = ActivityRecord::create(f).unwrap_err();
        assert_eq!(err.field(), "end_time");
        assert!(matches!(err, ValidationError::EndBeforeStart { .. }));
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let mut f = fields();
        f.title = "   ".to_string();
        assert_eq!(ActivityRecord::create(f).unwrap_err().field(), "title");

        let mut f = fields();
        f.category = String::new();
        assert_eq!(ActivityRecord::create(f).unwrap_err().field(), "category");

        let mut f = fields();
        f.id = ActivityId::from("");
        assert_eq!(ActivityRecord::create(f).unwrap_err().field(), "id");
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let json = r#"{
            "id": "a1",
            "title": "Standup",
            "category": "meeting",
            "start_time": "2025-03-14T10:00:00Z",
            "end_time": "2025-03-14T09:00:00Z"
        }"#;
        let err = serde_json::from_str::<ActivityRecord>(json).unwrap_err();
        assert!(err.to_string().contains("end_time"));
    }

    #[test]
    fn test_serialize_keeps_flat_fields() {
        let record = ActivityRecord::create(fields()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["category"], "work");
        assert!(json.get("duration").is_none());
        let back: ActivityRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::zero()), "00:00");
        assert_eq!(format_duration(Duration::minutes(90)), "01:30");
        assert_eq!(format_duration(Duration::minutes(25 * 60 + 5)), "25:05");
        assert_eq!(format_duration(Duration::seconds(119)), "00:01");
    }
}
