//! Built-in demo data.

use chrono::{DateTime, Duration, Utc};

use todoinfo_models::{Task, TaskList};

/// Returns the demo lists, with task ages measured back from `now`.
pub fn example_task_lists(now: DateTime<Utc>) -> Vec<TaskList> {
    let days_ago = |days: i64| now - Duration::days(days);

    vec![
        TaskList::new(
            "🏠Home",
            vec![
                Task::new("Take out the trash", days_ago(4)),
                Task::new("Hang a painting", days_ago(20)),
            ],
        ),
        TaskList::new(
            "🎒Hiking",
            vec![
                Task::new("Check with John for an itinerary", days_ago(8)),
                Task::new("Pack a bag", days_ago(1)),
            ],
        ),
        TaskList::new(
            "💻Work",
            vec![Task::new("Answer the letter from Bob", days_ago(10))],
        ),
    ]
}
