//! Prints a month of the calendar and the matching tasks, as fetched from the backend.
//!
//! Usage: `whattodo [YYYY-MM] [YYYY-MM-DD]`
//! The first argument picks the displayed month (default: the current one), the second one filters tasks on a day.
//! The backend URL is read from `WHATTODO_API_BASE`.

use chrono::Datelike;

use what_to_do::client::Client;
use what_to_do::date::decode;
use what_to_do::utils::{print_grid, print_tasks};
use what_to_do::{IsoDate, TodoList};

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let client = match Client::from_config() {
        Ok(client) => client,
        Err(err) => {
            log::error!("Invalid backend URL: {}", err);
            std::process::exit(1);
        }
    };
    log::info!("Using backend {}", client.base_url());
    let mut todo_list = TodoList::new(client);

    if let Some(month) = args.get(0) {
        match decode(month) {
            Ok(date) => {
                let calendar = todo_list.calendar_mut();
                let moved = calendar.set_year(date.year())
                    .and_then(|_| calendar.set_month(date.month()));
                if let Err(err) = moved {
                    log::warn!("Ignoring the month argument: {}", err);
                }
            },
            Err(err) => log::warn!("Ignoring the month argument: {}", err),
        }
    }
    if let Some(day) = args.get(1) {
        match day.parse::<IsoDate>() {
            Ok(day) => todo_list.calendar_mut().select_day(day),
            Err(err) => log::warn!("Ignoring the day argument: {}", err),
        }
    }

    if let Err(err) = todo_list.load().await {
        eprintln!("{}", err);
        std::process::exit(1);
    }

    let calendar = todo_list.calendar();
    print_grid(&calendar.grid(), &todo_list.marked_dates(), calendar.selected_date());
    println!();
    match calendar.selected_date() {
        Some(day) => println!("Tasks due on {}:", day.format_for_display()),
        None => println!("All tasks:"),
    }
    print_tasks(&todo_list.visible_tasks());
}
