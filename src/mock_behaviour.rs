//! This module provides ways to tweak mocked backends, so that they can return errors on some tests
#![cfg(any(test, feature = "mock_backend"))]

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};

/// The requests a mocked backend can be told to fail
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MockedRequest {
    FetchTasks,
    CreateTask,
    DeleteTask,
    PatchDone,
    FetchCategories,
    CreateCategory,
    DeleteCategory,
}

impl MockedRequest {
    pub const ALL: [MockedRequest; 7] = [
        MockedRequest::FetchTasks,
        MockedRequest::CreateTask,
        MockedRequest::DeleteTask,
        MockedRequest::PatchDone,
        MockedRequest::FetchCategories,
        MockedRequest::CreateCategory,
        MockedRequest::DeleteCategory,
    ];
}

impl Display for MockedRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MockedRequest::FetchTasks => "fetch_tasks",
            MockedRequest::CreateTask => "create_task",
            MockedRequest::DeleteTask => "delete_task",
            MockedRequest::PatchDone => "patch_done",
            MockedRequest::FetchCategories => "fetch_categories",
            MockedRequest::CreateCategory => "create_category",
            MockedRequest::DeleteCategory => "delete_category",
        };
        write!(f, "{}", name)
    }
}

/// What happens to the next calls of a request: `successes` calls go through, then `failures` calls fail.
/// Any further call goes through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    pub successes: u32,
    pub failures: u32,
}

impl Schedule {
    /// Consume one call, and tell whether it succeeds
    fn next_call_succeeds(&mut self) -> bool {
        if self.successes > 0 {
            self.successes -= 1;
            true
        } else if self.failures > 0 {
            self.failures -= 1;
            false
        } else {
            true
        }
    }
}

/// How a mocked backend behaves during a given test.
///
/// Requests without a [`Schedule`] always succeed.
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    is_suspended: bool,
    schedules: HashMap<MockedRequest, Schedule>,
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests will fail at once, for `n_fails` times each
    pub fn fail_now(n_fails: u32) -> Self {
        MockedRequest::ALL.iter()
            .fold(Self::new(), |behaviour, request| behaviour.with(*request, 0, n_fails))
    }

    /// Let `request` succeed `successes` times, then fail `failures` times
    pub fn with(mut self, request: MockedRequest, successes: u32, failures: u32) -> Self {
        self.schedules.insert(request, Schedule { successes, failures });
        self
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    /// Called by the mocked backend before serving `request`
    pub fn can(&mut self, request: MockedRequest) -> Result<()> {
        if self.is_suspended {
            return Ok(());
        }
        let schedule = match self.schedules.get_mut(&request) {
            None => return Ok(()),
            Some(schedule) => schedule,
        };

        if schedule.next_call_succeeds() {
            log::debug!("Mock behaviour: allowing a {} ({:?})", request, schedule);
            Ok(())
        } else {
            log::debug!("Mock behaviour: failing a {} ({:?})", request, schedule);
            Err(Error::Mock(format!("Mocked behaviour requires this {} to fail this time", request)))
        }
    }
}
