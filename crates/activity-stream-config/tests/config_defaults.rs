//! Default and builder tests for activity-stream-config.
// crates/activity-stream-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults Tests
// Description: Validate section defaults and collaborator builders.
// Purpose: Ensure a validated config wires the core runtime as described.
// =============================================================================

use std::fs;
use std::io::Write;

use activity_stream_config::ActivityStreamConfig;
use activity_stream_config::AuditSinkKind;
use activity_stream_core::ActivityStatus;
use activity_stream_core::AffectedRecord;
use activity_stream_core::CommandContext;
use activity_stream_core::DEFAULT_FORMAT;
use activity_stream_core::DEFAULT_REQUIRED_FIELDS;
use activity_stream_core::InMemoryActivityStore;
use activity_stream_core::RequiredField;
use activity_stream_core::RowId;
use activity_stream_core::SubjectIdentifier;
use activity_stream_core::TranslationCatalog;
use serde_json::Value;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn load(contents: &str) -> Result<ActivityStreamConfig, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(contents.as_bytes()).map_err(|err| err.to_string())?;
    ActivityStreamConfig::load(Some(file.path())).map_err(|err| err.to_string())
}

fn edit_command() -> CommandContext {
    CommandContext {
        name: "after.edit".to_string(),
        action: "edit".to_string(),
        subject: SubjectIdentifier {
            application: "admin".to_string(),
            kind: "controller".to_string(),
            package: "content".to_string(),
            name: "article".to_string(),
        },
        actor: None,
        actor_name: None,
        created_on: None,
        ip: None,
    }
}

#[test]
fn empty_file_yields_defaults() -> TestResult {
    let config = load("")?;
    if config.activity.default_format != DEFAULT_FORMAT {
        return Err(format!("unexpected default format {}", config.activity.default_format));
    }
    if config.activity.required_fields != DEFAULT_REQUIRED_FIELDS {
        return Err("unexpected default required fields".to_string());
    }
    if config.recorder.actions != ["after.add", "after.edit", "after.delete"] {
        return Err(format!("unexpected recorder actions {:?}", config.recorder.actions));
    }
    if config.recorder.title_columns != ["title", "name"] {
        return Err(format!("unexpected title columns {:?}", config.recorder.title_columns));
    }
    if config.audit.sink != AuditSinkKind::None || config.audit.path.is_some() {
        return Err("unexpected audit defaults".to_string());
    }
    if !config.catalog.entries.is_empty() {
        return Err("catalog should default to empty".to_string());
    }
    Ok(())
}

#[test]
fn default_struct_passes_validation() -> TestResult {
    ActivityStreamConfig::default().validate().map_err(|err| err.to_string())
}

#[test]
fn catalog_entries_build_a_translation_catalog() -> TestResult {
    let config = load(
        "[catalog.entries]\n\"{actor} updated {object} {title}\" = \"{actor} edited {object} \
         {title}\"\n",
    )?;
    let catalog = config.build_catalog();
    if !catalog.is_translatable("{actor} updated {object} {title}") {
        return Err("catalog entry missing".to_string());
    }
    if catalog.translate("{actor} updated {object} {title}") != "{actor} edited {object} {title}" {
        return Err("catalog translation mismatch".to_string());
    }
    Ok(())
}

#[test]
fn recorder_config_uses_activity_format() -> TestResult {
    let config = load(
        "[activity]\ndefault_format = \"{actor} touched {title}\"\n[recorder]\nactions = \
         [\"after.save\"]\ntitle_columns = [\"headline\"]\n",
    )?;
    let recorder = config.recorder_config();
    if recorder.format.as_str() != "{actor} touched {title}" {
        return Err(format!("unexpected format {}", recorder.format));
    }
    if recorder.actions != ["after.save"] || recorder.title_columns != ["headline"] {
        return Err("recorder settings not carried over".to_string());
    }
    Ok(())
}

#[test]
fn configured_required_fields_drive_the_lifecycle() -> TestResult {
    let config = load("[activity]\nrequired_fields = [\"package\", \"name\"]\n")?;
    let lifecycle = config.build_lifecycle().map_err(|err| err.to_string())?;
    if lifecycle.required_fields() != [RequiredField::Package, RequiredField::Name] {
        return Err("required fields not carried over".to_string());
    }
    Ok(())
}

#[test]
fn file_audit_sink_receives_recorder_events() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let audit_path = dir.path().join("audit.log");
    let config = load(&format!("[audit]\nsink = \"file\"\npath = {:?}\n", audit_path.display().to_string()))?;
    let recorder = config.build_recorder().map_err(|err| err.to_string())?;
    let store = InMemoryActivityStore::new();
    let catalog = config.build_catalog();
    let row = RowId::from_raw(4).ok_or("row id must be nonzero")?;
    let records = [AffectedRecord::new(row, Some(ActivityStatus::Updated)).with_column("title", "Draft")];

    let report = recorder.record(&edit_command(), &records, &store, &catalog);
    if report.saved().len() != 1 {
        return Err("expected one saved activity".to_string());
    }

    let contents = fs::read_to_string(&audit_path).map_err(|err| err.to_string())?;
    let line = contents.lines().next().ok_or("audit log is empty")?;
    let event: Value = serde_json::from_str(line).map_err(|err| err.to_string())?;
    if event["event"] != "activity_saved" || event["package"] != "content" {
        return Err(format!("unexpected audit event {event}"));
    }
    Ok(())
}

#[test]
fn audit_sink_kinds_parse_in_snake_case() -> TestResult {
    let config = load("[audit]\nsink = \"stderr\"\n")?;
    if config.audit.sink != AuditSinkKind::Stderr {
        return Err("stderr sink not parsed".to_string());
    }
    config.build_audit_sink().map(|_| ()).map_err(|err| err.to_string())
}
