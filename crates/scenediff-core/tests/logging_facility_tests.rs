#![allow(clippy::unwrap_used, clippy::expect_used)]

use scenediff_core::errors::{ExError, ExErrorKind, SceneDiffError};
use scenediff_core::logging_facility::test_capture::init_test_capture;
use scenediff_core::model::FileId;
use scenediff_core::{log_op_end, log_op_error, log_op_start};
use scenediff_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_ADDED_COUNT, FIELD_DURATION_MS,
    FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_LINE_COUNT, FIELD_MODIFIED_COUNT, FIELD_OBJECT_COUNT,
    FIELD_REMOVED_COUNT, FIELD_ROOT_COUNT,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    assert!(
        !capture.events_for(op_name, EVENT_START).is_empty(),
        "Should have captured at least one start event"
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = SceneDiffError::RevisionNotFound {
        revision: "abc123".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.events_for(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert_eq!(error_events[0].field(FIELD_ERR_KIND), Some("NotFound"));
}

#[test]
fn test_boundary_ownership_single_start_end() {
    let capture = init_test_capture();
    let op_name = "test_boundary_ownership_unique_4";

    log_op_start!(op_name, path = "Assets/Main.unity");
    log_op_end!(op_name, duration_ms = 42);

    assert_eq!(capture.events_for(op_name, EVENT_START).len(), 1);
    assert_eq!(capture.events_for(op_name, EVENT_END).len(), 1);
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_5";

    log_op_start!(op_name, revision = "HEAD", path = "Assets/Main.unity");

    let start_event = capture
        .events()
        .into_iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have start event");

    assert_eq!(start_event.field("revision"), Some("HEAD"));
    assert_eq!(start_event.field("path"), Some("Assets/Main.unity"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_test_capture_count_events() {
    let capture = init_test_capture();
    let op1_name = "test_count_events_op1_unique_6";
    let op2_name = "test_count_events_op2_unique_6";

    log_op_start!(op1_name);
    log_op_start!(op2_name);
    log_op_end!(op1_name, duration_ms = 10);

    let ours = |e: &scenediff_core::logging_facility::CapturedEvent| {
        e.op.as_deref() == Some(op1_name) || e.op.as_deref() == Some(op2_name)
    };
    let start_count = capture.count_events(|e| ours(e) && e.event.as_deref() == Some(EVENT_START));
    let end_count = capture.count_events(|e| ours(e) && e.event.as_deref() == Some(EVENT_END));

    assert_eq!(start_count, 2);
    assert_eq!(end_count, 1);
}

#[test]
fn test_error_conversion_preserves_context() {
    let capture = init_test_capture();
    let op_name = "test_error_conversion_unique_7";

    let err = SceneDiffError::MalformedNumber {
        transform_id: FileId(3),
        field: "m_LocalScale",
        literal: "x".to_string(),
        line: 9,
    };
    log_op_error!(op_name, err.clone(), duration_ms = 5);

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidNumber);

    let error_event = capture
        .events_for(op_name, EVENT_END_ERROR)
        .into_iter()
        .next()
        .expect("Should have error event for this test");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_INVALID_NUMBER"));
}

// Parser and diff engine run under the same global capture, so these tests
// look for events carrying counts unique to their input.

#[test]
fn test_parse_logs_start_and_end_with_counts() {
    let capture = init_test_capture();
    let doc = "--- !u!1 &1\n  m_Name: A\n--- !u!1 &2\n  m_Name: B\n--- !u!1 &3\n  m_Name: C\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n";

    scenediff_core::parse(doc).unwrap();

    let line_count = doc.split('\n').count().to_string();
    let end = capture
        .events_for("parse", EVENT_END)
        .into_iter()
        .find(|e| e.field(FIELD_LINE_COUNT) == Some(line_count.as_str()))
        .expect("parse end event");
    assert_eq!(end.field(FIELD_OBJECT_COUNT), Some("3"));
    assert_eq!(end.field(FIELD_ROOT_COUNT), Some("3"));
    assert!(end.field(FIELD_DURATION_MS).is_some());
    capture.assert_event_exists("parse", EVENT_START);
}

#[test]
fn test_parse_failure_logs_end_error() {
    let capture = init_test_capture();

    let err = scenediff_core::parse("--- !u!4 &8\n  m_LocalScale: {x: e, y: 1, z: 1}\n").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidNumber);

    let errors = capture.events_for("parse", EVENT_END_ERROR);
    assert!(errors
        .iter()
        .any(|e| e.field(FIELD_ERR_CODE) == Some("ERR_INVALID_NUMBER")));
}

#[test]
fn test_compute_diff_logs_counts() {
    let capture = init_test_capture();
    let before = scenediff_core::parse("").unwrap();
    let after = scenediff_core::parse(
        "--- !u!1 &1\n  m_Name: A\n--- !u!1 &2\n  m_Name: B\n--- !u!1 &3\n  m_Name: C\n--- !u!1 &4\n  m_Name: D\n--- !u!1 &5\n  m_Name: E\n",
    )
    .unwrap();

    scenediff_core::compute_diff(&before, &after);

    let end = capture
        .events_for("compute_diff", EVENT_END)
        .into_iter()
        .find(|e| e.field(FIELD_ADDED_COUNT) == Some("5") && e.field(FIELD_REMOVED_COUNT) == Some("0"))
        .expect("compute_diff end event");
    assert_eq!(end.field(FIELD_MODIFIED_COUNT), Some("0"));
}
