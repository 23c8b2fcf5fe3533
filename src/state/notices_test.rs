use super::*;

#[test]
fn notice_state_default_uses_default_timeout() {
    let state = NoticeState::default();
    assert!(state.items.is_empty());
    assert_eq!(state.timeout_ms, 3000);
    assert!(!state.focus_lost);
}

#[test]
fn push_appends_oldest_first() {
    let mut state = NoticeState::default();
    let first = state.push(NoticeLevel::Error, "one");
    let second = state.push(NoticeLevel::Info, "two");
    assert_ne!(first, second);
    let messages: Vec<_> = state.items.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, ["one", "two"]);
    assert_eq!(state.items[0].remaining_ms, 3000);
}

#[test]
fn dismiss_removes_only_target() {
    let mut state = NoticeState::default();
    let first = state.push(NoticeLevel::Error, "one");
    state.push(NoticeLevel::Error, "two");
    state.dismiss(first);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].message, "two");
}

#[test]
fn tick_expires_after_timeout() {
    let mut state = NoticeState::with_timeout(1000);
    state.push(NoticeLevel::Error, "boom");
    state.tick(600);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].remaining_ms, 400);
    state.tick(600);
    assert!(state.items.is_empty());
}

#[test]
fn hovered_notice_does_not_count_down() {
    let mut state = NoticeState::with_timeout(1000);
    let held = state.push(NoticeLevel::Error, "held");
    state.push(NoticeLevel::Error, "free");
    state.pause(held);
    state.tick(1000);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].message, "held");

    state.resume(held);
    state.tick(1000);
    assert!(state.items.is_empty());
}

#[test]
fn focus_loss_holds_every_notice() {
    let mut state = NoticeState::with_timeout(1000);
    state.push(NoticeLevel::Error, "one");
    state.pause_all();
    state.tick(5000);
    assert_eq!(state.items.len(), 1);
    state.resume_all();
    state.tick(1000);
    assert!(state.items.is_empty());
}

#[test]
fn level_css_modifiers_are_distinct() {
    assert_eq!(NoticeLevel::Error.css_modifier(), "notice--error");
    assert_ne!(NoticeLevel::Info.css_modifier(), NoticeLevel::Success.css_modifier());
}

// =============================================================================
// Signal notifier
// =============================================================================

mod signal {
    use leptos::prelude::*;

    use crate::state::notices::{NoticeLevel, NoticeState, Notifier};

    #[test]
    fn raise_on_signal_pushes_with_prelude_in_scope() {
        let notices = RwSignal::new(NoticeState::with_timeout(1000));
        notices.raise(NoticeLevel::Success, "Task created");
        notices.raise(NoticeLevel::Error, "Task could not be saved");

        let items = notices.with_untracked(|s| s.items.iter().map(|n| (n.level, n.message.clone())).collect::<Vec<_>>());
        assert_eq!(
            items,
            vec![
                (NoticeLevel::Success, "Task created".to_owned()),
                (NoticeLevel::Error, "Task could not be saved".to_owned()),
            ]
        );
    }
}
