//! This module provides a client for the to-do backend
//!
//! The backend is a plain JSON CRUD API:
//! * `GET /tasks`, `POST /tasks`, `PATCH /tasks/{id}`, `DELETE /tasks/{id}`
//! * `GET /categories`, `POST /categories`, `DELETE /categories/{name}`

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::error::{Error, Result};
use crate::task::{normalize, NewTask, Task, TaskId};
use crate::traits::TaskSource;


/// A [`TaskSource`] that fetches its data from the backend
#[derive(Clone, Debug)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    /// Create a client for the backend set in [`crate::config::API_BASE`]
    pub fn from_config() -> Result<Self> {
        Self::new(crate::config::api_base())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The URL of `{base}/{segments...}`. Every segment is percent-encoded, so that it cannot add path levels
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut endpoint = self.base_url.clone();
        endpoint.path_segments_mut()
            .map_err(|_| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(endpoint)
    }

    /// `GET` a JSON document
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        log::debug!("GET {}", url);
        let res = self.http
            .get(url)
            .send()
            .await?;
        read_json(res).await
    }

    /// Send a request with an optional JSON body, and parse the JSON answer
    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(&self, url: Url, method: Method, body: Option<&B>) -> Result<T> {
        log::debug!("{} {}", method, url);
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_string(body)?);
        }

        let res = request.send().await?;
        read_json(res).await
    }

    fn require_valid(id: TaskId) -> Result<String> {
        id.as_i64()
            .map(|id| id.to_string())
            .ok_or(Error::InvalidTaskId)
    }
}

/// Turn a non-2xx status into an [`Error::Http`], and an empty body into `{}`
async fn read_json<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    if status.is_success() == false {
        let body = res.text().await.unwrap_or_default();
        log::warn!("Request failed with status {}", status);
        return Err(Error::Http { status: status.as_u16(), body });
    }

    let text = res.text().await?;
    if text.trim().is_empty() {
        // e.g. 204 No Content
        return Ok(serde_json::from_value(Value::Object(Default::default()))?);
    }
    Ok(serde_json::from_str(&text)?)
}

/// Drop blank names and duplicates, and sort alphabetically.
///
/// Names are compared on their base letters first, ignoring case and accents (`Übung` sorts with `Ubung`,
/// before `Zoo`). Names that only differ by accents or case are then ordered by code point.
pub fn sort_unique_names(names: Vec<String>) -> Vec<String> {
    let unique: HashSet<String> = names.into_iter()
        .filter(|name| name.trim().is_empty() == false)
        .collect();

    let mut sorted: Vec<(String, String)> = unique.into_iter()
        .map(|name| (deunicode::deunicode(&name).to_lowercase(), name))
        .collect();
    sorted.sort_by(|(a_key, a), (b_key, b)| {
        a_key.cmp(b_key)
            .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
            .then_with(|| a.cmp(b))
    });
    sorted.into_iter().map(|(_, name)| name).collect()
}


#[async_trait]
impl TaskSource for Client {
    async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        let raw: Vec<Value> = self.get_json(self.endpoint(&["tasks"])?).await?;
        log::info!("Fetched {} tasks", raw.len());
        Ok(raw.iter().map(normalize).collect())
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<Task> {
        let raw: Value = self.send_json(self.endpoint(&["tasks"])?, Method::POST, Some(new_task)).await?;
        Ok(normalize(&raw))
    }

    async fn delete_task(&self, id: TaskId) -> Result<()> {
        let id = Self::require_valid(id)?;
        let _: Value = self.send_json::<_, Value>(self.endpoint(&["tasks", id.as_str()])?, Method::DELETE, None).await?;
        Ok(())
    }

    async fn patch_done(&self, id: TaskId, done: bool) -> Result<()> {
        let id = Self::require_valid(id)?;
        let body = json!({ "done": done });
        let _: Value = self.send_json(self.endpoint(&["tasks", id.as_str()])?, Method::PATCH, Some(&body)).await?;
        Ok(())
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        let names: Vec<String> = self.get_json(self.endpoint(&["categories"])?).await?;
        Ok(sort_unique_names(names))
    }

    async fn create_category(&self, name: &str) -> Result<()> {
        let body = json!({ "name": name });
        let _: Value = self.send_json(self.endpoint(&["categories"])?, Method::POST, Some(&body)).await?;
        Ok(())
    }

    async fn delete_category(&self, name: &str) -> Result<()> {
        let _: Value = self.send_json::<_, Value>(self.endpoint(&["categories", name])?, Method::DELETE, None).await?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let client = Client::new("http://test/api").unwrap();
        assert_eq!(client.endpoint(&["tasks"]).unwrap().as_str(), "http://test/api/tasks");
        assert_eq!(client.endpoint(&["tasks", "7"]).unwrap().as_str(), "http://test/api/tasks/7");

        let with_slash = Client::new("http://test/api/").unwrap();
        assert_eq!(with_slash.endpoint(&["tasks"]).unwrap().as_str(), "http://test/api/tasks");

        assert_eq!(client.endpoint(&["categories", "Uni/Arbeit"]).unwrap().as_str(),
                   "http://test/api/categories/Uni%2FArbeit");
    }

    #[test]
    fn invalid_base_urls() {
        assert!(matches!(Client::new("not a url"), Err(Error::Url(_))));
        assert!(matches!(Client::new("mailto:someone@example.com"), Err(Error::Url(_))));
    }

    #[test]
    fn category_names() {
        let names = vec!["uni".to_string(), "Arbeit".to_string(), "".to_string(),
                         "  ".to_string(), "Uni".to_string(), "Arbeit".to_string()];
        assert_eq!(sort_unique_names(names), vec!["Arbeit", "Uni", "uni"]);
    }

    #[test]
    fn accented_category_names() {
        let names = vec!["Zoo".to_string(), "Übung".to_string(), "Arbeit".to_string(),
                         "Ubung".to_string(), "Straße".to_string(), "Strand".to_string()];
        assert_eq!(sort_unique_names(names), vec!["Arbeit", "Strand", "Straße", "Ubung", "Übung", "Zoo"]);
    }
}
