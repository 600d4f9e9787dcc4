//! Terminal rendering of metrics.
//!
//! Tables are laid out by `comfy-table`, which measures cells by display
//! width so emoji list names and status columns stay aligned.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use todoinfo_metrics::Metrics;

const CHAMPION_TITLE: &str = "🏅 Champion Procrastinator";

/// Creates a table in the style shared by every section.
fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn number(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

/// Section heading.
pub fn section(title: &str) -> String {
    format!("\n{}\n", title)
}

/// Number of tasks and their summed age.
pub fn global_stats(metrics: &Metrics) -> String {
    let summary = metrics.summary();

    let mut table = new_table();
    table.add_row(vec![Cell::new("Tasks"), number(summary.task_count)]);
    table.add_row(vec![
        Cell::new("Age"),
        number(format!("{} days", summary.total_age)),
    ]);

    format!("{}{}", section("📊 Global Stats"), table)
}

/// Per-list age, task count and share of the total.
pub fn list_ages(metrics: &Metrics) -> String {
    let list_ages = metrics.list_ages();

    let mut table = new_table();
    table.set_header(vec!["List Name", "Total Age (days)", "Task Count", "Share"]);
    for entry in &list_ages.ages {
        let share = if list_ages.total_age > 0 {
            entry.age as f64 / list_ages.total_age as f64 * 100.0
        } else {
            0.0
        };
        table.add_row(vec![
            Cell::new(&entry.title),
            number(entry.age),
            number(entry.task_count),
            number(format!("{:.1}%", share)),
        ]);
    }

    format!("{}{}", section("📋 Task Age by List"), table)
}

/// Ranked tasks, oldest first. `top` limits the number of rows.
pub fn all_tasks(metrics: &Metrics, top: Option<usize>) -> String {
    let tasks = match top {
        Some(n) => metrics.top_tasks_by_age(n),
        None => metrics.sorted_tasks(),
    };
    let title = match top {
        Some(n) => format!("🏆 Top {} Oldest Tasks", n),
        None => "🏆 All Tasks (Oldest First)".to_string(),
    };

    if tasks.is_empty() {
        return format!("{}No tasks found!", section(&title));
    }

    let mut table = new_table();
    table.set_header(vec!["Rank", "Task", "List", "Age (days)", "Status"]);
    for (i, task) in tasks.iter().enumerate() {
        table.add_row(vec![
            number(i + 1),
            Cell::new(&task.task_name),
            Cell::new(&task.task_list),
            number(task.age),
            Cell::new(task.rottenness.emoji()).set_alignment(CellAlignment::Center),
        ]);
    }

    format!("{}{}", section(&title), table)
}

/// Box naming the single oldest task, if there is one.
pub fn champion(metrics: &Metrics) -> Option<String> {
    let oldest = metrics.top_tasks_by_age(1).first()?;

    let mut table = new_table();
    table.set_header(vec![
        Cell::new(CHAMPION_TITLE).set_alignment(CellAlignment::Center)
    ]);
    table.add_row(vec![format!(
        "The oldest task is \"{}\" from list \"{}\"",
        oldest.task_name, oldest.task_list
    )]);
    table.add_row(vec![format!(
        "Age: {} days {}",
        oldest.age,
        oldest.rottenness.emoji()
    )]);

    Some(table.to_string())
}
