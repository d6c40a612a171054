//! Some utility functions

use std::collections::HashSet;
use std::fmt::Write;

use crate::calendar::grid::CalendarGrid;
use crate::date::IsoDate;
use crate::task::Task;

/// Renders a grid as text, one week per line.
///
/// Days from the adjacent months are shown in parentheses, days with tasks are followed by a `*`,
/// and the selected day is wrapped in brackets.
pub fn format_grid(grid: &CalendarGrid, dates_with_tasks: &HashSet<IsoDate>, selected: Option<&IsoDate>) -> String {
    let mut out = String::from(" Mo   Di   Mi   Do   Fr   Sa   So\n");
    for week in grid.weeks() {
        for cell in week {
            let day = cell.iso.date().format("%d").to_string();
            let marker = if cell.has_tasks(dates_with_tasks) { "*" } else { " " };
            let (open, close) = if Some(&cell.iso) == selected {
                ('[', ']')
            } else if cell.in_month {
                (' ', ' ')
            } else {
                ('(', ')')
            };
            let _ = write!(out, "{}{}{}{}", open, day, close, marker);
        }
        out.push('\n');
    }
    out
}

/// A debug utility that pretty-prints a calendar grid
pub fn print_grid(grid: &CalendarGrid, dates_with_tasks: &HashSet<IsoDate>, selected: Option<&IsoDate>) {
    let anchor = grid.anchor();
    println!("{} {}", anchor.name(), anchor.year());
    print!("{}", format_grid(grid, dates_with_tasks, selected));
}

/// A one-line description of a task
pub fn format_task(task: &Task) -> String {
    let completion = if task.done() { "✓" } else { " " };
    let important = if task.important() { "!" } else { " " };
    let mut line = format!("{}{} {}", completion, important, task.task_name());
    if task.category().is_empty() == false {
        let _ = write!(line, " [{}]", task.category());
    }
    if let Some(date) = task.date() {
        let _ = write!(line, " ({})", date.format_for_display());
    }
    let _ = write!(line, "\t#{}", task.id());
    line
}

/// A bullet in the colour of the task (as a 24-bit ANSI escape), or a plain one if its colour cannot be parsed
pub fn color_marker(task: &Task) -> String {
    match task.parsed_color() {
        Some(color) => {
            let (r, g, b, _) = color.rgba_u8();
            format!("\x1b[38;2;{};{};{}m●\x1b[0m", r, g, b)
        },
        None => "●".to_string(),
    }
}

/// A debug utility that pretty-prints tasks
pub fn print_tasks(tasks: &[&Task]) {
    for task in tasks {
        println!("  {} {}", color_marker(task), format_task(task));
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::task::normalize;

    #[test]
    fn grid_rendering() {
        let grid = CalendarGrid::for_month(2026, 2).unwrap();
        let mut marked = HashSet::new();
        marked.insert("2026-02-14".parse().unwrap());
        let selected: IsoDate = "2026-02-03".parse().unwrap();

        let text = format_grid(&grid, &marked, Some(&selected));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("(26) (27) (28) (29) (30) (31)  01 "));
        assert!(lines[2].contains("[03]"));
        assert!(lines[3].contains(" 14 *"));
    }

    #[test]
    fn task_line() {
        let task = normalize(&json!({"id": 1, "taskName": "Mit Datum", "done": true, "category": "Uni", "date": "2026-01-10"}));
        assert_eq!(format_task(&task), "✓  Mit Datum [Uni] (10.01.2026)\t#1");
    }

    #[test]
    fn task_colors() {
        let green = normalize(&json!({"taskName": "A", "color": "#198754"}));
        assert_eq!(color_marker(&green), "\x1b[38;2;25;135;84m●\x1b[0m");

        let named = normalize(&json!({"taskName": "B", "color": "red"}));
        assert_eq!(color_marker(&named), "\x1b[38;2;255;0;0m●\x1b[0m");

        let broken = normalize(&json!({"taskName": "C", "color": "not a colour"}));
        assert_eq!(color_marker(&broken), "●");
    }
}
