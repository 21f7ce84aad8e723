//! Cross-lesson user preferences: locale, stat accumulation, snapshot
//! expiry at session start.

mod common;

use common::fixtures::{mini_lesson, submit_correct};
use common::temp_store;

use chrono::{Duration, Utc};
use lingo_player::{PlayerSession, SNAPSHOT_MAX_AGE_HOURS};
use pretty_assertions::assert_eq;

fn complete_mini(store: lingo_player::FileStore, lesson_id: &str) {
    let mut session = PlayerSession::start_with(store, mini_lesson(lesson_id));
    for id in ["mini-1", "mini-2"] {
        assert!(submit_correct(&mut session, id));
        session.advance();
    }
    assert!(session.progress().is_complete);
}

#[test]
fn stats_accumulate_across_completed_lessons() {
    let (_dir, store) = temp_store();

    complete_mini(store.clone(), "mini-a");
    complete_mini(store.clone(), "mini-b");

    let prefs = store.load_user_preferences();
    assert_eq!(prefs.total_xp, 20);
    assert_eq!(prefs.total_streak, 2);
    assert_eq!(prefs.last_played_lesson_id.as_deref(), Some("mini-b"));
}

#[test]
fn locale_change_persists() {
    let (_dir, store) = temp_store();

    {
        let mut session = PlayerSession::start(store.clone(), "basics-1").unwrap();
        session.set_locale("es");
    }

    assert_eq!(store.load_user_preferences().locale, "es");

    // And survives into the next session.
    let session = PlayerSession::start(store, "basics-1").unwrap();
    assert_eq!(session.preferences().locale, "es");
}

#[test]
fn expired_snapshot_is_not_resumed() {
    let (_dir, store) = temp_store();

    {
        let mut session = PlayerSession::start(store.clone(), "basics-1").unwrap();
        submit_correct(&mut session, "greet-mc-hello");
        session.advance();
    }

    // Within the window the snapshot is still live...
    let fresh = Utc::now() + Duration::hours(SNAPSHOT_MAX_AGE_HOURS) - Duration::minutes(1);
    assert!(store.load_lesson_state_at(fresh).is_some());

    // ...but past it the record is dropped, so the next session starts over.
    let stale = Utc::now() + Duration::hours(SNAPSHOT_MAX_AGE_HOURS) + Duration::minutes(1);
    assert!(store.load_lesson_state_at(stale).is_none());

    let session = PlayerSession::start(store, "basics-1").unwrap();
    assert_eq!(session.progress().current_index, 0);
    assert_eq!(session.progress().xp, 0);
}

#[test]
fn completed_totals_never_decrease() {
    let (_dir, store) = temp_store();

    complete_mini(store.clone(), "mini-a");
    let first = store.load_user_preferences();

    complete_mini(store.clone(), "mini-b");
    let second = store.load_user_preferences();

    assert!(second.total_xp >= first.total_xp);
    assert!(second.total_streak >= first.total_streak);
}
