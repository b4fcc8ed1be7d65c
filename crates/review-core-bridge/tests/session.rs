use pretty_assertions::assert_eq;
use review_core::{OverlayConfig, OverlayStatus};
use review_core_bridge::{BridgeError, ReviewSession, parse_config};
use serde_json::{Value, json};
use std::time::{Duration, Instant};

const TEXT: &str = "The \\section{Intro} begins here.\nSecond   line with  gaps.\n";

fn types(messages: &[Value]) -> Vec<&str> {
    messages
        .iter()
        .map(|message| message["type"].as_str().unwrap())
        .collect()
}

fn open_session() -> ReviewSession {
    let mut session = ReviewSession::new(OverlayConfig::default(), 80);
    let open = json!({"type": "openDocument", "path": "/work/paper/main.tex", "text": TEXT});
    let out = session
        .handle_json(&open.to_string(), Instant::now())
        .unwrap();
    assert!(out.is_empty());
    session
}

#[test]
fn test_pending_edit_round_trip_accept() {
    let mut session = open_session();
    let now = Instant::now();

    let edit = json!({
        "type": "pendingEdit",
        "requestId": "42",
        "filePath": "paper/main.tex",
        "oldString": "\\section{Intro}",
        "newString": "\\section{Introduction}",
    });
    let out = session.handle_json(&edit.to_string(), now).unwrap();
    assert_eq!(types(&out), vec!["editShown", "reveal"]);
    assert_eq!(
        out[0]["range"],
        json!({"startLine": 1, "endLine": 1, "startColumn": 5, "endColumn": 20})
    );
    assert_eq!(out[0]["match"], "exact");

    let snapshot = session.snapshot();
    assert_eq!(snapshot["status"], "editPending");
    assert_eq!(snapshot["readOnly"], true);
    assert_eq!(snapshot["decorations"][0]["style"], "review-removal");
    assert_eq!(snapshot["decorations"][1]["placement"], "gutter");
    assert_eq!(snapshot["viewBlock"]["afterLine"], 1);
    assert_eq!(snapshot["viewBlock"]["rows"][0]["text"], "\\section{Introduction}");

    let out = session
        .handle_json(r#"{"type":"accept","requestId":"42"}"#, now)
        .unwrap();
    assert_eq!(types(&out), vec!["acceptEdit", "editCleared"]);
    assert_eq!(out[0]["newString"], "\\section{Introduction}");
    assert_eq!(out[1]["reason"], "accepted");
    assert_eq!(session.controller().status(), OverlayStatus::Idle);
    assert_eq!(session.snapshot()["viewBlock"], Value::Null);
}

#[test]
fn test_normalized_edit_and_stale_document() {
    let mut session = open_session();
    let now = Instant::now();

    let edit = json!({
        "type": "pendingEdit",
        "requestId": "1",
        "filePath": "main.tex",
        "oldString": "Second line with gaps.",
        "newString": "Second line.",
    });
    let out = session.handle_json(&edit.to_string(), now).unwrap();
    assert_eq!(out[0]["match"], "whitespaceNormalized");
    assert_eq!(
        out[0]["range"],
        json!({"startLine": 2, "endLine": 2, "startColumn": 1, "endColumn": 26})
    );

    let changed = json!({"type": "documentChanged", "text": "Nothing to see.\n"});
    let out = session.handle_json(&changed.to_string(), now).unwrap();
    assert_eq!(types(&out), vec!["editCleared", "editUnresolved"]);
    assert_eq!(out[0]["reason"], "documentChanged");
    assert_eq!(out[1]["reason"], "noMatch");

    // Same text again is not a change.
    let out = session.handle_json(&changed.to_string(), now).unwrap();
    assert!(out.is_empty());

    let out = session
        .handle_json(r#"{"type":"reject","requestId":"1"}"#, now)
        .unwrap();
    assert_eq!(types(&out), vec!["rejectEdit"]);
}

#[test]
fn test_navigation_then_tick() {
    let mut session = open_session();
    let now = Instant::now();

    let out = session
        .handle_json(r#"{"type":"navigate","line":2,"column":8}"#, now)
        .unwrap();
    assert_eq!(types(&out), vec!["navigationHighlighted", "reveal"]);
    assert_eq!(
        out[0]["range"],
        json!({"startLine": 2, "endLine": 2, "startColumn": 10, "endColumn": 14})
    );
    assert_eq!(out[0]["span"], "token");
    assert_eq!(session.snapshot()["decorations"][0]["style"], "navigation-highlight");

    let out = session
        .handle_json(r#"{"type":"tick"}"#, now + Duration::from_millis(500))
        .unwrap();
    assert!(out.is_empty());
    let out = session
        .handle_json(r#"{"type":"tick"}"#, now + Duration::from_secs(2))
        .unwrap();
    assert_eq!(types(&out), vec!["scrollComplete"]);
    assert_eq!(session.snapshot()["decorations"], json!([]));
}

#[test]
fn test_resize_reports_block_height() {
    let config = parse_config(r#"{"additionMarker": "+"}"#).unwrap();
    let mut session = ReviewSession::new(config, 80);
    let now = Instant::now();
    session
        .handle_json(
            &json!({"type": "openDocument", "path": "a.txt", "text": "short\n"}).to_string(),
            now,
        )
        .unwrap();
    session
        .handle_json(
            &json!({
                "type": "pendingEdit",
                "requestId": "r",
                "filePath": "a.txt",
                "oldString": "short",
                "newString": "0123456789",
            })
            .to_string(),
            now,
        )
        .unwrap();

    let out = session
        .handle_json(r#"{"type":"viewportResized","width":4}"#, now)
        .unwrap();
    assert_eq!(out, vec![json!({"type": "blockResized", "requestId": "r", "height": 3})]);
}

#[test]
fn test_malformed_message_is_an_error() {
    let mut session = open_session();
    let err = session
        .handle_json(r#"{"type":"navigate"}"#, Instant::now())
        .unwrap_err();
    assert!(matches!(err, BridgeError::Json(_)));
}
