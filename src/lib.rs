//! This crate provides the logic of a small to-do list application.
//!
//! Tasks live on a remote JSON backend, that is reached through the [`client`] module. \
//! Because the backend is not always consistent about the shape of its records, every task it sends is
//! normalized into a [`Task`] (see [`task::normalize`]).
//!
//! Tasks can have a due date. A month [`calendar`] shows which days have tasks, and clicking a day filters
//! the task list on that day (see [`filter`]). \
//! All of this is wired together in a [`TodoList`], that a front-end can drive without knowing about HTTP.

pub mod traits;
pub mod error;
pub use error::{Error, Result};
pub mod config;

pub mod date;
pub use date::IsoDate;
pub mod calendar;
pub use calendar::grid::{CalendarCell, CalendarGrid};
pub use calendar::state::CalendarState;
pub mod task;
pub use task::{NewTask, Task, TaskId};
pub mod filter;

pub mod client;
pub mod todo_list;
pub use todo_list::TodoList;

pub mod mock_behaviour;
pub mod mock;
pub mod utils;
