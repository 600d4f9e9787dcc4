//! Task types.
//!
//! A [`Task`] mirrors the subset of the Graph `todoTask` resource that the
//! metrics engine needs. Tasks are immutable once fetched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a task as returned by Graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBody {
    /// Free-text content.
    #[serde(default)]
    pub content: String,

    /// Content type reported by Graph ("text" or "html").
    #[serde(default)]
    pub content_type: String,
}

impl TaskBody {
    /// Creates a plain text body.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: "text".to_string(),
        }
    }
}

/// A single ToDo task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task title.
    pub title: String,

    /// When the task was created.
    #[serde(rename = "createdDateTime")]
    pub created: DateTime<Utc>,

    /// When the task was last modified.
    #[serde(rename = "lastModifiedDateTime")]
    pub last_modified: DateTime<Utc>,

    /// Optional due date.
    #[serde(
        rename = "dueDateTime",
        default,
        with = "due_date_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub due: Option<DateTime<Utc>>,

    /// Task body; only used to look for exclusion markers.
    #[serde(default)]
    pub body: TaskBody,
}

impl Task {
    /// Creates a task created (and last modified) at the given time.
    pub fn new(title: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            created,
            last_modified: created,
            due: None,
            body: TaskBody::default(),
        }
    }

    /// Sets the due date.
    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }

    /// Sets a plain text body.
    pub fn with_body(mut self, content: impl Into<String>) -> Self {
        self.body = TaskBody::text(content);
        self
    }

    /// Returns the timestamp the task's age is measured from.
    ///
    /// The due date wins when present, otherwise the creation time is used.
    pub fn reference_time(&self) -> DateTime<Utc> {
        self.due.unwrap_or(self.created)
    }
}

/// Graph encodes due dates as `{ "dateTime": "...", "timeZone": "..." }`
/// with a zone-less timestamp. The client sends `Prefer: outlook.timezone="UTC"`,
/// so the naive value is taken as UTC.
mod due_date_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct DateTimeTimeZone {
        date_time: NaiveDateTime,
        #[serde(default)]
        time_zone: String,
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value
            .map(|due| DateTimeTimeZone {
                date_time: due.naive_utc(),
                time_zone: "UTC".to_string(),
            })
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<DateTimeTimeZone>::deserialize(deserializer)?;
        Ok(raw.map(|due| due.date_time.and_utc()))
    }
}
