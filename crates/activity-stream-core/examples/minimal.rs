// crates/activity-stream-core/examples/minimal.rs
// ============================================================================
// Module: Activity Stream Minimal Example
// Description: Records, saves, and renders one activity with in-memory adapters.
// Purpose: Demonstrate the recorder, lifecycle, and override resolution together.
// Dependencies: activity-stream-core
// ============================================================================

//! ## Overview
//! Records an `after.edit` command, then renders the saved activity with a
//! catalog carrying one actor-specific override. Audit records go to stderr.

use std::sync::Arc;

use activity_stream_core::ActivityLifecycle;
use activity_stream_core::ActivityRecorder;
use activity_stream_core::ActivityRenderer;
use activity_stream_core::ActivityStatus;
use activity_stream_core::ActorId;
use activity_stream_core::AffectedRecord;
use activity_stream_core::CommandContext;
use activity_stream_core::InMemoryActivityStore;
use activity_stream_core::InMemoryActorDirectory;
use activity_stream_core::InMemoryTranslationCatalog;
use activity_stream_core::OverrideResolver;
use activity_stream_core::RecorderConfig;
use activity_stream_core::RouteObjectLocator;
use activity_stream_core::RowId;
use activity_stream_core::StderrAuditSink;
use activity_stream_core::SubjectIdentifier;
use activity_stream_core::Timestamp;

/// Error type for example preconditions.
#[derive(Debug)]
struct ExampleError(&'static str);

impl std::fmt::Display for ExampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ExampleError {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let alice = ActorId::from_raw(7).ok_or(ExampleError("actor id must be nonzero"))?;
    let row = RowId::from_raw(12).ok_or(ExampleError("row id must be nonzero"))?;
    let audit = Arc::new(StderrAuditSink);

    let mut actors = InMemoryActorDirectory::new();
    actors.insert(alice, "Alice");
    let mut objects = RouteObjectLocator::new();
    objects.insert("content", "report", row);
    let catalog = InMemoryTranslationCatalog::from_entries([
        ("{actor} updated {object} {title}", "{actor} edited {object} {title}"),
        ("Alice updated report Quarterly Report", "Alice edited Quarterly Report"),
    ]);
    let store = InMemoryActivityStore::new();

    let recorder =
        ActivityRecorder::new(RecorderConfig::default(), ActivityLifecycle::new().with_audit(audit.clone()));
    let command = CommandContext {
        name: "after.edit".to_string(),
        action: "edit".to_string(),
        subject: SubjectIdentifier {
            application: "admin".to_string(),
            kind: "controller".to_string(),
            package: "content".to_string(),
            name: "report".to_string(),
        },
        actor: Some(alice),
        actor_name: Some("Alice".to_string()),
        created_on: Some(Timestamp::Logical(1)),
        ip: None,
    };
    let records =
        [AffectedRecord::new(row, Some(ActivityStatus::Updated)).with_column("title", "Quarterly Report")];
    let report = recorder.record(&command, &records, &store, &catalog);

    let id = report.saved().first().copied().ok_or(ExampleError("activity was not saved"))?;
    let activity = store.load(id)?.ok_or(ExampleError("saved activity is missing"))?;

    let resolver = OverrideResolver::new(&catalog).with_audit(audit);
    let mut renderer = ActivityRenderer::new(resolver, &actors, &objects);
    let message = renderer.render_message(&activity);
    if message.text != "Alice edited Quarterly Report" {
        return Err(Box::new(ExampleError("unexpected rendered message")));
    }
    Ok(())
}
