use async_trait::async_trait;
use chrono::{Local, NaiveDate};

use crate::error::Result;
use crate::task::{NewTask, Task, TaskId};

/// A source of "today", so that code depending on the current date can be tested
pub trait Clock {
    /// Returns the current date
    fn today(&self) -> NaiveDate;
}

/// The wall clock, in the local timezone
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that is stuck on a given day
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}


/// A backend that stores tasks and categories.
///
/// This is usually a [`Client`](crate::client::Client) talking to the remote API, but it can be mocked in tests
#[async_trait]
pub trait TaskSource {
    /// Returns every task the backend knows about
    async fn fetch_tasks(&self) -> Result<Vec<Task>>;
    /// Creates a task, and returns it as the backend stored it
    async fn create_task(&self, new_task: &NewTask) -> Result<Task>;
    /// Deletes a task
    async fn delete_task(&self, id: TaskId) -> Result<()>;
    /// Sets the completion status of a task
    async fn patch_done(&self, id: TaskId, done: bool) -> Result<()>;

    /// Returns the category names, sorted and without duplicates
    async fn fetch_categories(&self) -> Result<Vec<String>>;
    /// Creates a category
    async fn create_category(&self, name: &str) -> Result<()>;
    /// Deletes a category
    async fn delete_category(&self, name: &str) -> Result<()>;
}
