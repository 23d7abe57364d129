//! Terminal rendering of lineage views, answers and resolutions.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};

use lineage_explain::{ActionState, ExplainAction, LineageView};
use lineage_merge::{MergeTable, Resolution, ResultCheck};

/// Pill colours for short labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillColor {
    Green,
    Orange,
    Neutral,
}

impl PillColor {
    fn background(self) -> Color {
        match self {
            Self::Green => Color::Green,
            Self::Orange => Color::DarkYellow,
            Self::Neutral => Color::Grey,
        }
    }
}

/// A one-row table of rounded "pill" labels.
pub fn pills(labels: &[&str], color: PillColor) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);
    if !labels.is_empty() {
        table.add_row(labels.iter().map(|label| {
            Cell::new(label)
                .fg(Color::Black)
                .bg(color.background())
        }));
    }
    table
}

/// Decision heading, type pill, logic text, and either the merge table or warnings.
pub fn render_view(view: &LineageView) -> String {
    let mut out = String::new();
    out.push_str("Decision\n\n");
    out.push_str("Decision type:\n");
    out.push_str(&pills(&[view.decision_type.as_str()], PillColor::Neutral).to_string());
    out.push_str("\n\nDecision logic:\n");
    out.push_str(&view.logic);
    out.push('\n');
    if let (Some(title), Some(table)) = (view.table_title(), view.table.as_ref()) {
        out.push('\n');
        out.push_str(title);
        out.push('\n');
        out.push_str(&merge_table(table).to_string());
        out.push('\n');
    }
    for warning in &view.warnings {
        out.push_str(&format!("\nwarning: {warning}\n"));
    }
    out
}

/// The merge table as a grid; each cell lists its strings one per line.
pub fn merge_table(table: &MergeTable) -> Table {
    let mut grid = Table::new();
    grid.set_header(table.column_labels().into_iter().map(header_cell));
    apply_merge_table_style(&mut grid);
    for row in &table.rows {
        let mut cells = vec![
            Cell::new(&row.attribute)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
        ];
        if table.has_configuration {
            cells.push(list_cell(row.configuration.as_deref()));
        }
        cells.push(list_cell(row.source_data.as_deref()));
        cells.push(list_cell(row.result.as_deref()));
        grid.add_row(cells);
    }
    grid
}

/// Collapsible-panel rendering of an action's state; `None` while idle.
pub fn panel(action: ExplainAction, state: &ActionState) -> Option<Table> {
    let body = match state {
        ActionState::Idle => return None,
        ActionState::Pending => dim_cell("Waiting for the serving endpoint..."),
        ActionState::Ready(text) => Cell::new(text),
        ActionState::Failed { message, detail } => {
            Cell::new(format!("{message}\nerror: {detail}")).fg(Color::Red)
        }
        ActionState::Cancelled => dim_cell("Request cancelled."),
    };
    let mut table = Table::new();
    table.set_header(vec![header_cell(action.panel_title())]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table.add_row(vec![body]);
    Some(table)
}

/// Priority-rule recomputation next to the recorded result.
pub fn resolution_table(resolutions: &[Resolution], checks: &[(String, ResultCheck)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attribute name"),
        header_cell("Resolved source"),
        header_cell("Resolved value"),
        header_cell("Recorded result"),
        header_cell("Status"),
    ]);
    apply_merge_table_style(&mut table);
    for (resolution, (_, check)) in resolutions.iter().zip(checks) {
        let recorded = match check {
            ResultCheck::Agrees => resolution.source.clone().unwrap_or_else(|| "NULL".to_string()),
            ResultCheck::Disagrees { recorded, .. } => recorded.clone(),
            ResultCheck::NotRecorded => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(&resolution.attribute)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            optional_cell(resolution.source.as_deref()),
            optional_cell(resolution.value.as_deref()),
            Cell::new(recorded),
            status_cell(check),
        ]);
    }
    table
}

fn status_cell(check: &ResultCheck) -> Cell {
    let (label, color) = match check {
        ResultCheck::Agrees => ("agrees", PillColor::Green),
        ResultCheck::Disagrees { .. } => ("differs", PillColor::Orange),
        ResultCheck::NotRecorded => ("not recorded", PillColor::Neutral),
    };
    Cell::new(label)
        .fg(Color::Black)
        .bg(color.background())
}

fn apply_merge_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
    if table.column_count() >= 4 {
        table.set_constraints(vec![ColumnConstraint::LowerBoundary(Width::Fixed(16))]);
    }
}

fn list_cell(items: Option<&[String]>) -> Cell {
    match items {
        Some(items) => Cell::new(items.join("\n")),
        None => Cell::new(""),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("NULL"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
