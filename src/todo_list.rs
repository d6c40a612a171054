//! The to-do list as the user sees it: tasks, categories, calendar and filters, wired to a backend
//!
//! This holds no rendering logic. A front-end reads its getters to draw, and calls its methods on user actions.

use std::collections::HashSet;

use crate::calendar::state::CalendarState;
use crate::date::IsoDate;
use crate::error::{Error, Result};
use crate::filter::{dates_with_tasks, TaskFilter};
use crate::task::{NewTask, Task, TaskId};
use crate::traits::{Clock, SystemClock, TaskSource};

/// Tasks and categories fetched from a [`TaskSource`], plus the state of the widgets that filter them
pub struct TodoList<S, C = SystemClock>
where
    S: TaskSource,
    C: Clock,
{
    source: S,
    tasks: Vec<Task>,
    categories: Vec<String>,
    calendar: CalendarState<C>,

    /// Content of the search box
    search: String,
    /// Category selected in the dropdown, if any
    selected_category: Option<String>,
    /// The message of the last failed request, shown as-is to the user
    last_error: Option<String>,
}

impl<S: TaskSource> TodoList<S, SystemClock> {
    /// An empty list, that will fetch its content from `source` when [`Self::load`] is called
    pub fn new(source: S) -> Self {
        Self::with_calendar(source, CalendarState::new())
    }
}

impl<S, C> TodoList<S, C>
where
    S: TaskSource,
    C: Clock,
{
    pub fn with_calendar(source: S, calendar: CalendarState<C>) -> Self {
        Self {
            source,
            tasks: Vec::new(),
            categories: Vec::new(),
            calendar,
            search: String::new(),
            selected_category: None,
            last_error: None,
        }
    }

    pub fn source(&self) -> &S                   { &self.source }
    pub fn tasks(&self) -> &[Task]               { &self.tasks }
    pub fn categories(&self) -> &[String]        { &self.categories }
    pub fn calendar(&self) -> &CalendarState<C>  { &self.calendar }
    pub fn calendar_mut(&mut self) -> &mut CalendarState<C> { &mut self.calendar }
    pub fn search(&self) -> &str                 { &self.search }
    pub fn selected_category(&self) -> Option<&str> { self.selected_category.as_deref() }
    pub fn last_error(&self) -> Option<&str>     { self.last_error.as_deref() }

    pub fn set_search<T: ToString>(&mut self, search: T) {
        self.search = search.to_string();
    }

    pub fn select_category(&mut self, category: Option<String>) {
        self.selected_category = category;
    }

    /// The filters currently set by the user
    pub fn filter(&self) -> TaskFilter {
        TaskFilter {
            date: self.calendar.selected_date().cloned(),
            search: self.search.clone(),
            category: self.selected_category.clone(),
        }
    }

    /// The tasks to display, given the current date filter, search text and category
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.filter().apply(&self.tasks)
    }

    /// Days that should be marked in the calendar, because some tasks are due on them
    pub fn marked_dates(&self) -> HashSet<IsoDate> {
        dates_with_tasks(&self.tasks)
    }

    /// Fetch tasks and categories from the backend
    pub async fn load(&mut self) -> Result<()> {
        let tasks = self.source.fetch_tasks().await;
        self.tasks = self.record(tasks)?;

        let categories = self.source.fetch_categories().await;
        self.categories = self.record(categories)?;

        log::info!("Loaded {} tasks and {} categories", self.tasks.len(), self.categories.len());
        Ok(())
    }

    /// Create a task.
    ///
    /// The name is trimmed; an empty name is refused before anything is sent to the backend
    pub async fn add_task(&mut self, mut new_task: NewTask) -> Result<&Task> {
        let name = new_task.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::EmptyName("task"));
        }
        new_task.name = name.clone();
        new_task.task_name = name;

        let created = self.source.create_task(&new_task).await;
        let created = self.record(created)?;
        self.tasks.push(created);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub async fn delete_task(&mut self, id: TaskId) -> Result<()> {
        let result = self.source.delete_task(id).await;
        self.record(result)?;
        self.tasks.retain(|task| task.id() != id);
        Ok(())
    }

    /// Flip the completion status of a task, on the backend and locally
    pub async fn toggle_done(&mut self, id: TaskId) -> Result<()> {
        let done = match self.tasks.iter().find(|task| task.id() == id) {
            Some(task) => task.done() == false,
            None => return Err(Error::TaskNotFound(id)),
        };

        let result = self.source.patch_done(id, done).await;
        self.record(result)?;
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) {
            task.set_done(done);
        }
        Ok(())
    }

    /// Create a category, and fetch the updated list of categories
    pub async fn add_category(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName("category"));
        }

        let result = self.source.create_category(name).await;
        self.record(result)?;
        let categories = self.source.fetch_categories().await;
        self.categories = self.record(categories)?;
        Ok(())
    }

    pub async fn delete_category(&mut self, name: &str) -> Result<()> {
        let result = self.source.delete_category(name).await;
        self.record(result)?;
        self.categories.retain(|category| category != name);
        if self.selected_category.as_deref() == Some(name) {
            self.selected_category = None;
        }
        Ok(())
    }

    /// Remember the error of a failed request (or forget the previous one on success)
    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) => {
                log::error!("{}", err);
                self.last_error = Some(err.to_string());
            },
        }
        result
    }
}
