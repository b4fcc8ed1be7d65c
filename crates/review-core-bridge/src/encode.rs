//! Outbound JSON encoding of overlay events and snapshots.

use review_core::{
    ClearReason, DecorationPlacement, MatchKind, OverlayController, OverlayEvent, OverlayStatus,
    ResolvedRange, RevealAlign, SpanKind, UnresolvedReason, ViewBlock,
};
use serde_json::{Value, json};

/// Encode a range as `{startLine, endLine, startColumn, endColumn}`.
pub fn range_to_value(range: &ResolvedRange) -> Value {
    json!({
        "startLine": range.start_line,
        "endLine": range.end_line,
        "startColumn": range.start_column,
        "endColumn": range.end_column,
    })
}

fn clear_reason_name(reason: ClearReason) -> &'static str {
    match reason {
        ClearReason::Accepted => "accepted",
        ClearReason::Rejected => "rejected",
        ClearReason::Superseded => "superseded",
        ClearReason::DocumentChanged => "documentChanged",
        ClearReason::FileChanged => "fileChanged",
        ClearReason::Cleared => "cleared",
    }
}

fn unresolved_reason_name(reason: UnresolvedReason) -> &'static str {
    match reason {
        UnresolvedReason::FileMismatch => "fileMismatch",
        UnresolvedReason::NoMatch => "noMatch",
    }
}

fn match_kind_name(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Exact => "exact",
        MatchKind::WhitespaceNormalized => "whitespaceNormalized",
    }
}

fn span_kind_name(kind: SpanKind) -> &'static str {
    match kind {
        SpanKind::Token => "token",
        SpanKind::WholeLine => "wholeLine",
        SpanKind::FallbackWindow => "fallbackWindow",
    }
}

fn placement_name(placement: DecorationPlacement) -> &'static str {
    match placement {
        DecorationPlacement::Inline => "inline",
        DecorationPlacement::Gutter => "gutter",
        DecorationPlacement::WholeLine => "wholeLine",
    }
}

fn align_name(align: RevealAlign) -> &'static str {
    match align {
        RevealAlign::Center => "center",
        RevealAlign::Nearest => "nearest",
    }
}

/// Encode one overlay event as a `{"type": ...}` message.
pub fn event_to_value(event: &OverlayEvent) -> Value {
    match event {
        OverlayEvent::EditShown {
            request_id,
            range,
            kind,
        } => json!({
            "type": "editShown",
            "requestId": request_id,
            "range": range_to_value(range),
            "match": match_kind_name(*kind),
        }),
        OverlayEvent::EditUnresolved { request_id, reason } => json!({
            "type": "editUnresolved",
            "requestId": request_id,
            "reason": unresolved_reason_name(*reason),
        }),
        OverlayEvent::EditCleared { request_id, reason } => json!({
            "type": "editCleared",
            "requestId": request_id,
            "reason": clear_reason_name(*reason),
        }),
        OverlayEvent::AcceptEdit(commit) => json!({
            "type": "acceptEdit",
            "requestId": commit.request_id,
            "filePath": commit.file_path,
            "range": range_to_value(&commit.range),
            "oldString": commit.old_string,
            "newString": commit.new_string,
        }),
        OverlayEvent::RejectEdit { request_id } => json!({
            "type": "rejectEdit",
            "requestId": request_id,
        }),
        OverlayEvent::BlockResized { request_id, height } => json!({
            "type": "blockResized",
            "requestId": request_id,
            "height": height,
        }),
        OverlayEvent::Reveal(reveal) => json!({
            "type": "reveal",
            "range": range_to_value(&reveal.range),
            "align": align_name(reveal.align),
        }),
        OverlayEvent::NavigationHighlighted { span, cursor } => json!({
            "type": "navigationHighlighted",
            "range": range_to_value(&span.range),
            "lineRange": range_to_value(&span.line_range),
            "span": span_kind_name(span.kind),
            "cursor": { "line": cursor.line, "column": cursor.column },
        }),
        OverlayEvent::ScrollComplete => json!({ "type": "scrollComplete" }),
    }
}

fn view_block_to_value(block: &ViewBlock) -> Value {
    let rows: Vec<Value> = block
        .rows
        .iter()
        .map(|row| {
            json!({
                "marker": row.marker,
                "text": row.text,
                "visualRows": row.visual_rows,
            })
        })
        .collect();
    json!({
        "afterLine": block.after_line,
        "height": block.height,
        "style": ViewBlock::STYLE_TAG,
        "rows": rows,
    })
}

/// Encode everything the host should currently draw.
pub fn snapshot_to_value(controller: &OverlayController) -> Value {
    let decorations: Vec<Value> = controller
        .decorations()
        .iter()
        .map(|decoration| {
            json!({
                "range": range_to_value(&decoration.range),
                "placement": placement_name(decoration.placement),
                "style": decoration.kind.style_tag(),
            })
        })
        .collect();
    let status = match controller.status() {
        OverlayStatus::Idle => "idle",
        OverlayStatus::EditPending => "editPending",
    };
    json!({
        "version": controller.version(),
        "status": status,
        "readOnly": controller.is_read_only(),
        "decorations": decorations,
        "viewBlock": controller.view_block().map(view_block_to_value),
    })
}
