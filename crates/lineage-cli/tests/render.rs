//! Terminal rendering of lineage views.

use lineage_cli::render::{PillColor, merge_table, panel, pills, render_view, resolution_table};
use lineage_explain::{ActionState, ExplainAction, LineageView};
use lineage_merge::{check_result, resolve_by_priority};
use lineage_model::{LineageRecord, sample_record};

fn sample_view() -> LineageView {
    LineageView::from_record(&sample_record().expect("sample record"))
}

#[test]
fn sample_page_shows_heading_logic_and_table() {
    let view = sample_view();
    let page = render_view(&view);

    assert!(page.starts_with("Decision\n"));
    assert!(page.contains("Decision type:"));
    assert!(page.contains(&view.decision_type));
    assert!(page.contains(&view.logic));
    assert!(page.contains("Merge config, source data and result:"));
    assert!(page.contains("Attribute name"));
    assert!(page.contains("Merge configuration"));
    assert!(page.contains("utmX"));
    assert!(!page.contains("warning:"));
}

#[test]
fn record_without_source_data_renders_warning_only() {
    let record = LineageRecord::from_json_str(
        r#"{"type": "Merge by attribute", "logic": "Highest priority wins", "result": {"a": {"S": 1}}}"#,
    )
    .expect("record");
    let page = render_view(&LineageView::from_record(&record));

    assert!(page.contains("warning: No source data available"));
    assert!(!page.contains("Source data and result:"));
}

#[test]
fn merge_table_grid_lists_cells_one_per_line() {
    let view = sample_view();
    let table = view.table.as_ref().expect("merge table");
    let mut grid = merge_table(table);
    grid.force_no_tty();

    assert_eq!(grid.column_count(), 4);
    assert_eq!(grid.row_count(), table.len());
    let text = grid.to_string();
    assert!(text.contains("Calc: NULL"));
}

#[test]
fn idle_action_has_no_panel() {
    assert!(panel(ExplainAction::ExplainResult, &ActionState::Idle).is_none());
}

#[test]
fn panels_show_answer_or_error() {
    let mut ready = panel(
        ExplainAction::ExplainResult,
        &ActionState::Ready("Vendor A has the highest priority".to_string()),
    )
    .expect("panel");
    ready.force_no_tty();
    let text = ready.to_string();
    assert!(text.contains("See the explanation"));
    assert!(text.contains("Vendor A has the highest priority"));

    let mut failed = panel(
        ExplainAction::EvaluateInconsistency,
        &ActionState::Failed {
            message: "Could not reach the serving endpoint. Please check your connection."
                .to_string(),
            detail: "network error: request timed out".to_string(),
        },
    )
    .expect("panel");
    failed.force_no_tty();
    let text = failed.to_string();
    assert!(text.contains("See evaluation results"));
    assert!(text.contains("Could not reach the serving endpoint."));
    assert!(text.contains("error: network error: request timed out"));
}

#[test]
fn resolution_table_has_one_row_per_attribute() {
    let record = sample_record().expect("sample record");
    let configs = record.configs().expect("configs");
    let source_data = record.source_data().expect("source data");
    let resolutions = resolve_by_priority(&configs, source_data);
    let checks = check_result(&resolutions, record.result().expect("result"));

    let mut table = resolution_table(&resolutions, &checks);
    table.force_no_tty();
    assert_eq!(table.row_count(), resolutions.len());
    assert!(table.to_string().contains("agrees"));
}

#[test]
fn pills_render_every_label() {
    let mut table = pills(&["Calc", "Vendor A"], PillColor::Green);
    table.force_no_tty();
    let text = table.to_string();
    assert!(text.contains("Calc"));
    assert!(text.contains("Vendor A"));
}
