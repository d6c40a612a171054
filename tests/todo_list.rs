//! A whole session of the to-do list, against a mocked backend

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use what_to_do::client::Client;
use what_to_do::traits::FixedClock;
use what_to_do::{CalendarState, NewTask, TaskId, TodoList};

fn visible_ids(list: &TodoList<Client, FixedClock>) -> Vec<TaskId> {
    list.visible_tasks().iter().map(|task| task.id()).collect()
}

#[tokio::test]
async fn filter_tasks_on_a_day() {
    let _ = env_logger::builder().is_test(true).try_init();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "taskName": "Erster", "date": "2026-01-01"},
            {"id": 11, "taskName": "Zweiter", "date": "2026-01-02"},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Uni"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"id": 12, "taskName": "Dritter", "date": "2026-01-01"})
        ))
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
    let mut list = TodoList::with_calendar(client, CalendarState::with_clock(clock));
    list.load().await.unwrap();
    assert_eq!(list.categories(), &["Uni".to_string()]);

    // Both days are marked in the January grid
    let grid = list.calendar().grid();
    let marked = list.marked_dates();
    let n_marked = grid.cells().iter().filter(|cell| cell.has_tasks(&marked)).count();
    assert_eq!(n_marked, 2);

    list.calendar_mut().select_day("2026-01-01".parse().unwrap());
    assert_eq!(visible_ids(&list), vec![TaskId::Valid(10)]);

    // Navigating does not lose the filter
    list.calendar_mut().next_month();
    assert_eq!(visible_ids(&list), vec![TaskId::Valid(10)]);

    list.add_task(NewTask::new("Dritter").date(Some("2026-01-01".parse().unwrap()))).await.unwrap();
    assert_eq!(visible_ids(&list), vec![TaskId::Valid(10), TaskId::Valid(12)]);

    list.calendar_mut().clear_date_filter();
    assert_eq!(visible_ids(&list), vec![TaskId::Valid(10), TaskId::Valid(11), TaskId::Valid(12)]);
}

#[tokio::test]
async fn failed_load_is_reported() {
    let _ = env_logger::builder().is_test(true).try_init();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(500).set_body_string("fail"))
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 1, 20).unwrap());
    let mut list = TodoList::with_calendar(client, CalendarState::with_clock(clock));

    assert!(list.load().await.is_err());
    assert_eq!(list.last_error(), Some("HTTP 500 – fail"));
    assert!(list.tasks().is_empty());
}
