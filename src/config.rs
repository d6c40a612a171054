//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Environment variable that overrides the default [`API_BASE`]
pub const API_BASE_ENV_VAR: &str = "WHATTODO_API_BASE";

/// Base URL of the backend, used when it is not provided explicitly
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// The base URL every request is made relative to (e.g. `{API_BASE}/tasks`).
/// It is read from the `WHATTODO_API_BASE` environment variable the first time it is used.
/// Feel free to override it when initing this library.
pub static API_BASE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| {
    let base = std::env::var(API_BASE_ENV_VAR).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    Arc::new(Mutex::new(base))
});

/// Colour given to tasks the backend did not assign a colour to
pub const DEFAULT_TASK_COLOR: &str = "#0d6efd";

/// How many years before and after the current one are offered in the year selector
pub const YEAR_OPTIONS_SPAN: i32 = 2;

/// Returns the current value of [`API_BASE`]
pub fn api_base() -> String {
    match API_BASE.lock() {
        Ok(base) => base.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Overrides [`API_BASE`] for every client created from now on
pub fn set_api_base<S: ToString>(base: S) {
    let mut current = match API_BASE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *current = base.to_string();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_api_base() {
        set_api_base("http://test/api");
        assert_eq!(api_base(), "http://test/api");

        let client = crate::client::Client::from_config().unwrap();
        assert_eq!(client.base_url().as_str(), "http://test/api");
    }
}
