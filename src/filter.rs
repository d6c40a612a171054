//! Narrowing the task list down to what the user wants to see
//!
//! These are plain functions of their inputs: they are meant to be called again every time the task list or the filters change.

use std::collections::{BTreeMap, HashSet};

use crate::date::IsoDate;
use crate::task::Task;

/// Tasks due on `date`, or every task when there is no date
pub fn filter_by_date<'a>(tasks: &'a [Task], date: Option<&IsoDate>) -> Vec<&'a Task> {
    match date {
        None => tasks.iter().collect(),
        Some(date) => tasks.iter()
            .filter(|task| task.date() == Some(date))
            .collect(),
    }
}

/// Every day at least one task is due on. This is used to mark calendar cells
pub fn dates_with_tasks(tasks: &[Task]) -> HashSet<IsoDate> {
    tasks.iter()
        .filter_map(|task| task.date().cloned())
        .collect()
}

/// Tasks by category. Tasks without category are listed under `""`
pub fn group_by_category(tasks: &[Task]) -> BTreeMap<&str, Vec<&Task>> {
    let mut groups: BTreeMap<&str, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        groups.entry(task.category()).or_default().push(task);
    }
    groups
}


/// All the filters the task list can be narrowed with.
///
/// An unset field does not filter anything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskFilter {
    /// Only tasks due on this day
    pub date: Option<IsoDate>,
    /// Only tasks whose name contains this text (ignoring case). Blank text does not filter
    pub search: String,
    /// Only tasks in this category
    pub category: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(date) = &self.date {
            if task.date() != Some(date) {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() == false && task.task_name().to_lowercase().contains(&needle) == false {
            return false;
        }

        match &self.category {
            Some(category) => task.category() == category,
            None => true,
        }
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter()
            .filter(|task| self.matches(task))
            .collect()
    }
}
