// crates/activity-stream-core/tests/recorder.rs
// ============================================================================
// Module: Activity Recorder Tests
// Description: Command filtering, status mapping, and per-record outcomes.
// ============================================================================
//! ## Overview
//! Records command batches into an in-memory store and inspects the saved
//! activities.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use activity_stream_core::ActivityLifecycle;
use activity_stream_core::ActivityRecorder;
use activity_stream_core::ActivityStatus;
use activity_stream_core::ActorId;
use activity_stream_core::AffectedRecord;
use activity_stream_core::CommandContext;
use activity_stream_core::InMemoryActivityStore;
use activity_stream_core::InMemoryTranslationCatalog;
use activity_stream_core::RecordOutcome;
use activity_stream_core::RecorderConfig;
use activity_stream_core::RowId;
use activity_stream_core::SaveError;
use activity_stream_core::SubjectIdentifier;
use activity_stream_core::Timestamp;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn row(raw: u64) -> RowId {
    RowId::from_raw(raw).unwrap()
}

fn command(name: &str, action: &str) -> CommandContext {
    CommandContext {
        name: name.to_string(),
        action: action.to_string(),
        subject: SubjectIdentifier {
            application: "admin".to_string(),
            kind: "controller".to_string(),
            package: "content".to_string(),
            name: "article".to_string(),
        },
        actor: ActorId::from_raw(7),
        actor_name: Some("Alice".to_string()),
        created_on: Some(Timestamp::Logical(42)),
        ip: Some("10.0.0.1".to_string()),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn records_one_activity_per_loggable_record() {
    let store = InMemoryActivityStore::new();
    let catalog = InMemoryTranslationCatalog::new();
    let recorder = ActivityRecorder::default();
    let records = [
        AffectedRecord::new(row(1), Some(ActivityStatus::Updated)).with_column("title", "First"),
        AffectedRecord::new(row(2), Some(ActivityStatus::Updated)).with_column("name", "second"),
    ];

    let report = recorder.record(&command("after.edit", "edit"), &records, &store, &catalog);

    assert_eq!(report.saved().len(), 2);
    assert_eq!(report.failed_count(), 0);
    let first = store.load(report.saved()[0]).unwrap().unwrap();
    assert_eq!(first.title(), "First");
    assert_eq!(first.package(), "content");
    assert_eq!(first.name(), "article");
    assert_eq!(first.action(), "edit");
    assert_eq!(first.application(), "admin");
    assert_eq!(first.kind(), "controller");
    assert_eq!(first.row(), Some(row(1)));
    assert_eq!(first.created_by(), ActorId::from_raw(7));
    assert_eq!(first.created_by_name(), Some("Alice"));
    assert_eq!(first.created_on(), Some(Timestamp::Logical(42)));
    assert_eq!(first.ip(), Some("10.0.0.1"));
    let second = store.load(report.saved()[1]).unwrap().unwrap();
    assert_eq!(second.title(), "second");
}

#[test]
fn unconfigured_commands_are_ignored() {
    let store = InMemoryActivityStore::new();
    let catalog = InMemoryTranslationCatalog::new();
    let recorder = ActivityRecorder::default();
    let records = [AffectedRecord::new(row(1), Some(ActivityStatus::Updated))];

    let report = recorder.record(&command("after.publish", "publish"), &records, &store, &catalog);

    assert!(report.is_empty());
    assert!(!recorder.is_recorded("after.publish"));
    assert_eq!(store.len().unwrap(), 0);
}

#[test]
fn add_commands_record_updates_as_created() {
    let store = InMemoryActivityStore::new();
    let catalog = InMemoryTranslationCatalog::new();
    let recorder = ActivityRecorder::default();
    let records = [AffectedRecord::new(row(3), Some(ActivityStatus::Updated))];

    let report = recorder.record(&command("after.add", "add"), &records, &store, &catalog);

    let saved = store.load(report.saved()[0]).unwrap().unwrap();
    assert_eq!(saved.status(), Some(ActivityStatus::Created));
    assert_eq!(saved.title(), "#3");
}

#[test]
fn empty_and_failed_statuses_are_skipped() {
    let store = InMemoryActivityStore::new();
    let catalog = InMemoryTranslationCatalog::new();
    let recorder = ActivityRecorder::default();
    let records = [
        AffectedRecord::new(row(1), None),
        AffectedRecord::new(row(2), Some(ActivityStatus::Failed)),
        AffectedRecord::new(row(3), Some(ActivityStatus::Deleted)).with_column("title", ""),
    ];

    let report = recorder.record(&command("after.delete", "delete"), &records, &store, &catalog);

    assert!(matches!(report.outcomes[0], (_, RecordOutcome::Skipped)));
    assert!(matches!(report.outcomes[1], (_, RecordOutcome::Skipped)));
    assert!(matches!(report.outcomes[2], (_, RecordOutcome::Saved(_))));
    let saved = store.load(report.saved()[0]).unwrap().unwrap();
    assert_eq!(saved.title(), "#3");
}

#[test]
fn failing_records_do_not_stop_the_batch() {
    let store = InMemoryActivityStore::new();
    let catalog = InMemoryTranslationCatalog::new();
    let recorder = ActivityRecorder::default();
    let mut broken = command("after.edit", "edit");
    broken.subject.name = String::new();
    let records = [
        AffectedRecord::new(row(1), Some(ActivityStatus::Updated)),
        AffectedRecord::new(row(2), Some(ActivityStatus::Updated)),
    ];

    let report = recorder.record(&broken, &records, &store, &catalog);

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.failed_count(), 2);
    assert!(matches!(report.outcomes[0], (_, RecordOutcome::Failed(SaveError::Validation(_)))));

    let ok = recorder.record(&command("after.edit", "edit"), &records, &store, &catalog);
    assert_eq!(ok.saved().len(), 2);
}

#[test]
fn custom_configuration_controls_commands_and_titles() {
    let store = InMemoryActivityStore::new();
    let catalog = InMemoryTranslationCatalog::new();
    let config = RecorderConfig {
        actions: vec!["after.publish".to_string()],
        title_columns: vec!["headline".to_string()],
        format: "{actor} published {title}".into(),
    };
    let recorder = ActivityRecorder::new(config, ActivityLifecycle::new());
    let records = [AffectedRecord::new(row(5), Some(ActivityStatus::Updated))
        .with_column("title", "ignored")
        .with_column("headline", "Launch")];

    let report = recorder.record(&command("after.publish", "publish"), &records, &store, &catalog);

    let saved = store.load(report.saved()[0]).unwrap().unwrap();
    assert_eq!(saved.title(), "Launch");
    assert_eq!(saved.format().as_str(), "{actor} published {title}");
    assert_eq!(recorder.config().title_columns, ["headline".to_string()]);
}
