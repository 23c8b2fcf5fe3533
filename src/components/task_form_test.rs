use super::*;

fn draft(title: &str) -> TaskDraft {
    TaskDraft { title: title.to_owned(), ..TaskDraft::default() }
}

#[test]
fn blank_title_is_rejected() {
    assert_eq!(draft("   ").to_new_task(), Err("Title is required"));
}

#[test]
fn optional_inputs_become_none() {
    let task = draft(" Buy milk ").to_new_task().unwrap();
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, "");
    assert_eq!(task.priority, None);
    assert_eq!(task.category, None);
    assert_eq!(task.due_date, None);
}

#[test]
fn filled_inputs_are_parsed() {
    let input = TaskDraft {
        title: "Report".to_owned(),
        description: "Q2".to_owned(),
        priority: "High".to_owned(),
        category: "Work".to_owned(),
        due_date: "2024-06-30".to_owned(),
    };
    let task = input.to_new_task().unwrap();
    assert_eq!(task.priority, Some(Priority::High));
    assert_eq!(task.category.as_deref(), Some("Work"));
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 6, 30));
}

#[test]
fn malformed_due_date_is_rejected() {
    let input = TaskDraft { due_date: "30/06/2024".to_owned(), ..draft("Report") };
    assert_eq!(input.to_new_task(), Err("Due date is invalid"));
}
