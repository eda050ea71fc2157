use chrono::{DateTime, Duration, TimeZone, Utc};
use tasklist_core::{
    detail_order, format_timestamp, summary_order, OrderingError, Task, TaskPriority,
    TaskValidationError,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 15, 12, 0, 0).unwrap()
}

fn task(id: &str, priority: TaskPriority) -> Task {
    let mut task = Task::new(id, "list-a", format!("task {id}"), "2026-04-01T08:00:00.000Z");
    task.priority = priority;
    task
}

fn due(mut task: Task, at: DateTime<Utc>) -> Task {
    task.due_date = Some(format_timestamp(at));
    task
}

fn completed(mut task: Task, at: Option<DateTime<Utc>>) -> Task {
    task.completed = true;
    task.completed_at = at.map(format_timestamp);
    task
}

fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|task| task.id.clone()).collect()
}

fn mixed_fixture() -> Vec<Task> {
    let now = now();
    vec![
        task("plain-medium", TaskPriority::Medium),
        due(task("overdue-low", TaskPriority::Low), now - Duration::days(2)),
        completed(task("done-high", TaskPriority::High), Some(now - Duration::hours(1))),
        due(task("soon-high", TaskPriority::High), now + Duration::hours(3)),
        due(task("overdue-high", TaskPriority::High), now - Duration::hours(5)),
        task("plain-high", TaskPriority::High),
        completed(task("done-undated", TaskPriority::Low), None),
        due(task("later-low", TaskPriority::Low), now + Duration::days(9)),
    ]
}

#[test]
fn summary_order_matches_expected_sequence() {
    let tasks = mixed_fixture();
    let ordered = summary_order(&tasks, now()).unwrap();
    assert_eq!(
        ids(&ordered),
        vec![
            "overdue-high",
            "overdue-low",
            "soon-high",
            "plain-high",
            "plain-medium",
            "later-low",
        ]
    );
}

#[test]
fn summary_order_never_contains_completed_tasks() {
    let tasks = mixed_fixture();
    let ordered = summary_order(&tasks, now()).unwrap();
    assert!(ordered.iter().all(|task| !task.completed));
}

#[test]
fn summary_order_places_every_overdue_task_first() {
    let tasks = mixed_fixture();
    let ordered = summary_order(&tasks, now()).unwrap();
    let first_not_overdue = ordered
        .iter()
        .position(|task| !task.is_overdue(now()))
        .unwrap();
    assert!(ordered[first_not_overdue..]
        .iter()
        .all(|task| !task.is_overdue(now())));
}

#[test]
fn detail_order_places_every_incomplete_task_first() {
    let tasks = mixed_fixture();
    let ordered = detail_order(&tasks).unwrap();
    let first_done = ordered.iter().position(|task| task.completed).unwrap();
    assert_eq!(first_done, 6);
    assert!(ordered[first_done..].iter().all(|task| task.completed));
    assert_eq!(ids(&ordered[first_done..]), vec!["done-high", "done-undated"]);
}

#[test]
fn resorting_sorted_output_is_idempotent() {
    let tasks = mixed_fixture();

    let summary = summary_order(&tasks, now()).unwrap();
    let summary_owned = summary.iter().map(|task| (*task).clone()).collect::<Vec<_>>();
    let again = summary_order(&summary_owned, now()).unwrap();
    assert_eq!(ids(&summary), ids(&again));

    let detail = detail_order(&tasks).unwrap();
    let detail_owned = detail.iter().map(|task| (*task).clone()).collect::<Vec<_>>();
    let again = detail_order(&detail_owned).unwrap();
    assert_eq!(ids(&detail), ids(&again));
}

#[test]
fn equal_keys_keep_input_order() {
    let tasks = vec![
        task("first", TaskPriority::Medium),
        task("second", TaskPriority::Medium),
        task("third", TaskPriority::Medium),
    ];
    assert_eq!(
        ids(&summary_order(&tasks, now()).unwrap()),
        vec!["first", "second", "third"]
    );
    assert_eq!(
        ids(&detail_order(&tasks).unwrap()),
        vec!["first", "second", "third"]
    );
}

#[test]
fn overdue_beats_priority_in_summary() {
    let tasks = vec![
        task("high-undated", TaskPriority::High),
        due(task("low-yesterday", TaskPriority::Low), now() - Duration::days(1)),
    ];
    let ordered = summary_order(&tasks, now()).unwrap();
    assert_eq!(ids(&ordered), vec!["low-yesterday", "high-undated"]);
}

#[test]
fn detail_orders_priorities_high_to_low() {
    let tasks = vec![
        task("low", TaskPriority::Low),
        task("medium", TaskPriority::Medium),
        task("high", TaskPriority::High),
    ];
    let ordered = detail_order(&tasks).unwrap();
    assert_eq!(ids(&ordered), vec!["high", "medium", "low"]);
}

#[test]
fn detail_orders_completed_by_most_recent_completion() {
    let day1 = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2026, 4, 2, 9, 0, 0).unwrap();
    let tasks = vec![
        completed(task("day1", TaskPriority::Medium), Some(day1)),
        completed(task("day2", TaskPriority::Medium), Some(day2)),
    ];
    let ordered = detail_order(&tasks).unwrap();
    assert_eq!(ids(&ordered), vec!["day2", "day1"]);
}

#[test]
fn malformed_due_date_is_treated_as_undated() {
    let mut broken = task("broken", TaskPriority::Medium);
    broken.due_date = Some("31/02/2026 25:99".to_string());
    let dated = due(task("dated", TaskPriority::Medium), now() + Duration::days(1));
    let tasks = vec![broken, dated];

    let summary = summary_order(&tasks, now()).unwrap();
    assert_eq!(ids(&summary), vec!["dated", "broken"]);
    let detail = detail_order(&tasks).unwrap();
    assert_eq!(ids(&detail), vec!["dated", "broken"]);
}

#[test]
fn unparseable_completed_at_sorts_after_stamped_completions() {
    let stamp = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
    let mut garbage = completed(task("garbage", TaskPriority::High), None);
    garbage.completed_at = Some("garbage".to_string());
    let tasks = vec![
        garbage,
        completed(task("stamped", TaskPriority::Low), Some(stamp)),
        task("open", TaskPriority::Low),
    ];

    let ordered = detail_order(&tasks).unwrap();
    assert_eq!(ids(&ordered), vec!["open", "stamped", "garbage"]);
}

#[test]
fn unparseable_created_at_sorts_after_tied_open_task() {
    let mut bad = task("bad", TaskPriority::Medium);
    bad.created_at = "bad".to_string();
    let tasks = vec![bad, task("good", TaskPriority::Medium)];

    let ordered = detail_order(&tasks).unwrap();
    assert_eq!(ids(&ordered), vec!["good", "bad"]);
}

#[test]
fn missing_identity_fields_reject_the_call() {
    let mut nameless = task("x", TaskPriority::High);
    nameless.id = "   ".to_string();
    let tasks = vec![nameless];

    let err = summary_order(&tasks, now()).unwrap_err();
    assert_eq!(
        err,
        OrderingError::InvalidTaskRecord {
            index: 0,
            reason: TaskValidationError::MissingId,
        }
    );
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(summary_order(&[], now()).unwrap().is_empty());
    assert!(detail_order(&[]).unwrap().is_empty());
}
