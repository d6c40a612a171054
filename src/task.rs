//! To-do tasks, as exchanged with the backend

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DEFAULT_TASK_COLOR;
use crate::date::IsoDate;

/// The backend identifier of a task.
///
/// The backend is not always consistent, and some records come with an id that is not a number.
/// Such records are kept (so that they can still be displayed), but they are flagged as `Invalid`
/// and every request that needs an id refuses them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum TaskId {
    Valid(i64),
    Invalid,
}

impl TaskId {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TaskId::Valid(id) => Some(*id),
            TaskId::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.as_i64().is_some()
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        TaskId::Valid(id)
    }
}

impl From<Option<i64>> for TaskId {
    fn from(id: Option<i64>) -> Self {
        id.map(TaskId::Valid).unwrap_or(TaskId::Invalid)
    }
}

impl From<TaskId> for Option<i64> {
    fn from(id: TaskId) -> Self {
        id.as_i64()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskId::Valid(id) => write!(f, "{}", id),
            TaskId::Invalid => write!(f, "NaN"),
        }
    }
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    /// The display name of the task
    task_name: String,
    done: bool,
    important: bool,
    /// Empty when the task has no category
    category: String,
    /// A CSS colour
    color: String,
    /// The due date
    date: Option<IsoDate>,
}

impl Task {
    pub fn new(id: TaskId, task_name: String, done: bool, important: bool,
               category: String, color: String, date: Option<IsoDate>) -> Self
    {
        Self { id, task_name, done, important, category, color, date }
    }

    pub fn id(&self) -> TaskId             { self.id }
    pub fn task_name(&self) -> &str        { &self.task_name }
    pub fn done(&self) -> bool             { self.done }
    pub fn important(&self) -> bool        { self.important }
    pub fn category(&self) -> &str         { &self.category }
    pub fn color(&self) -> &str            { &self.color }
    pub fn date(&self) -> Option<&IsoDate> { self.date.as_ref() }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    /// Parse the colour of this task, if it is a valid CSS colour
    pub fn parsed_color(&self) -> Option<csscolorparser::Color> {
        csscolorparser::parse(&self.color).ok()
    }
}


/// The body sent to the backend to create a task.
///
/// Depending on its version, the backend reads either `name` or `taskName`, so both are sent
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTask {
    pub name: String,
    #[serde(rename = "taskName")]
    pub task_name: String,
    pub important: bool,
    pub done: bool,
    pub category: String,
    pub color: String,
    pub date: Option<IsoDate>,
}

impl NewTask {
    /// A new, not done, not important task, without category nor date
    pub fn new<S: ToString>(name: S) -> Self {
        let name = name.to_string();
        Self {
            task_name: name.clone(),
            name,
            important: false,
            done: false,
            category: String::new(),
            color: DEFAULT_TASK_COLOR.to_string(),
            date: None,
        }
    }

    pub fn important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    pub fn category<S: ToString>(mut self, category: S) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn color<S: ToString>(mut self, color: S) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn date(mut self, date: Option<IsoDate>) -> Self {
        self.date = date;
        self
    }
}


/// Map a loosely-typed backend record into a [`Task`].
///
/// This never fails: missing or malformed fields get a default value.
pub fn normalize(raw: &Value) -> Task {
    let id = match raw.get("id") {
        Some(Value::Number(n)) => n.as_i64().map(TaskId::Valid).unwrap_or(TaskId::Invalid),
        Some(Value::String(s)) => s.trim().parse().map(TaskId::Valid).unwrap_or(TaskId::Invalid),
        _ => TaskId::Invalid,
    };
    if id == TaskId::Invalid {
        log::debug!("Task record has no numeric id: {}", raw);
    }

    // `name` is only a fallback, used when `taskName` is not there
    let task_name = non_null(raw, "taskName")
        .or_else(|| non_null(raw, "name"))
        .map(stringify)
        .unwrap_or_default();

    let date = match non_null(raw, "date") {
        None => None,
        Some(Value::String(s)) => match parse_due_date(s) {
            Ok(date) => Some(date),
            Err(err) => {
                log::warn!("Ignoring the date of task {:?}: {}", task_name, err);
                None
            },
        },
        Some(other) => {
            log::warn!("Ignoring the date of task {:?}: {} is not a string", task_name, other);
            None
        },
    };

    Task {
        id,
        task_name,
        done: non_null(raw, "done").map(is_truthy).unwrap_or(false),
        important: non_null(raw, "important").map(is_truthy).unwrap_or(false),
        category: non_null(raw, "category").map(stringify).unwrap_or_default(),
        color: non_null(raw, "color").map(stringify).unwrap_or_else(|| DEFAULT_TASK_COLOR.to_string()),
        date,
    }
}

/// A due date sent by the backend: `YYYY-MM-DD`, possibly followed by a time (`2026-01-10T08:00:00`).
///
/// Unlike [`crate::date::decode`], this does not fill in nor roll over anything, so that a task never
/// lands on another day than the one the backend meant.
fn parse_due_date(raw: &str) -> std::result::Result<IsoDate, chrono::ParseError> {
    let day = raw.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map(IsoDate::from)
}

fn non_null<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    match raw.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `false`, `0`, `""` and `null` are falsy, everything else is truthy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
