//! An in-memory backend, that can be used in place of a [`Client`](crate::client::Client) in tests
#![cfg(any(test, feature = "mock_backend"))]

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::client::sort_unique_names;
use crate::error::{Error, Result};
use crate::mock_behaviour::{MockBehaviour, MockedRequest};
use crate::task::{normalize, NewTask, Task, TaskId};
use crate::traits::TaskSource;

#[derive(Debug, Default)]
struct MockData {
    tasks: Vec<Task>,
    categories: Vec<String>,
    next_id: i64,
    n_requests: usize,
    behaviour: MockBehaviour,
}

/// A [`TaskSource`] that keeps everything in memory
#[derive(Debug, Default)]
pub struct MockSource {
    data: Mutex<MockData>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already contains some tasks and categories
    pub fn with_data(tasks: Vec<Task>, categories: Vec<String>) -> Self {
        let next_id = tasks.iter().filter_map(|t| t.id().as_i64()).max().unwrap_or(0) + 1;
        Self {
            data: Mutex::new(MockData { tasks, categories, next_id, ..MockData::default() }),
        }
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        self.lock().behaviour = behaviour;
    }

    /// How many requests this backend has received so far (including failed ones)
    pub fn request_count(&self) -> usize {
        self.lock().n_requests
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn categories(&self) -> Vec<String> {
        self.lock().categories.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockData> {
        match self.data.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Lock the data and count one more request
    fn request(&self) -> MutexGuard<'_, MockData> {
        let mut data = self.lock();
        data.n_requests += 1;
        data
    }
}

fn not_found() -> Error {
    Error::Http { status: 404, body: "Not Found".to_string() }
}

#[async_trait]
impl TaskSource for MockSource {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let mut data = self.request();
        data.behaviour.can(MockedRequest::FetchTasks)?;
        Ok(data.tasks.clone())
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<Task> {
        let mut data = self.request();
        data.behaviour.can(MockedRequest::CreateTask)?;

        let id = data.next_id.max(1);
        data.next_id = id + 1;

        // Store what a real backend would send back
        let mut raw = serde_json::to_value(new_task)?;
        raw["id"] = id.into();
        let task = normalize(&raw);
        data.tasks.push(task.clone());
        Ok(task)
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let mut data = self.request();
        data.behaviour.can(MockedRequest::DeleteTask)?;
        if id.is_valid() == false {
            return Err(Error::InvalidTaskId);
        }

        let n_before = data.tasks.len();
        data.tasks.retain(|task| task.id() != id);
        if data.tasks.len() == n_before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn patch_done(&self, id: TaskId, done: bool) -> Result<()> {
        let mut data = self.request();
        data.behaviour.can(MockedRequest::PatchDone)?;
        if id.is_valid() == false {
            return Err(Error::InvalidTaskId);
        }

        match data.tasks.iter_mut().find(|task| task.id() == id) {
            None => Err(not_found()),
            Some(task) => {
                task.set_done(done);
                Ok(())
            },
        }
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        let mut data = self.request();
        data.behaviour.can(MockedRequest::FetchCategories)?;
        Ok(sort_unique_names(data.categories.clone()))
    }

    async fn create_category(&self, name: &str) -> Result<()> {
        let mut data = self.request();
        data.behaviour.can(MockedRequest::CreateCategory)?;
        data.categories.push(name.to_string());
        Ok(())
    }

    async fn delete_category(&self, name: &str) -> Result<()> {
        let mut data = self.request();
        data.behaviour.can(MockedRequest::DeleteCategory)?;
        data.categories.retain(|category| category != name);
        Ok(())
    }
}
