use anyhow::{Context, Result};
use tracing::{Instrument, info, info_span, trace, warn};

use lineage_cli::logging::redact_value;
use lineage_cli::render::{panel, render_view, resolution_table};
use lineage_explain::{
    ActionState, ExplainAction, Explainer, InferenceClient, LineageView, Session,
};
use lineage_merge::{check_result, resolve_by_priority};

use crate::cli::ShowArgs;

/// Render the decision page and run the requested actions.
///
/// Returns `true` when every requested action produced an answer.
pub async fn run_show<C: InferenceClient>(
    args: &ShowArgs,
    session: &mut Session,
    explainer: &Explainer<C>,
) -> Result<bool> {
    let view = LineageView::from_record(session.record());
    println!("{}", render_view(&view));

    if let Some(path) = &args.export {
        match &view.table {
            Some(table) => table
                .write_csv(path)
                .with_context(|| format!("export merge table to {}", path.display()))?,
            None => warn!(path = %path.display(), "no merge table to export"),
        }
    }

    let mut actions = Vec::new();
    if args.evaluate {
        actions.push(ExplainAction::EvaluateInconsistency);
    }
    if args.explain {
        actions.push(ExplainAction::ExplainResult);
    }

    let mut all_answered = true;
    for action in actions {
        eprintln!("{}...", action.label());
        let state = explainer
            .perform(session, action, cancel_on_ctrl_c())
            .instrument(info_span!("action", action = %action))
            .await;
        if let ActionState::Ready(text) = &state {
            trace!(answer = redact_value(text), "model answer");
        }
        if let Some(table) = panel(action, &state) {
            println!("{table}");
        }
        all_answered &= state.answer().is_some();
    }
    Ok(all_answered)
}

/// Print the priority-rule recomputation; returns `true` when nothing disagrees.
pub fn run_resolve(session: &Session) -> Result<bool> {
    let record = session.record();
    let Some(configs) = record.configs() else {
        println!("No merge configuration available");
        return Ok(true);
    };
    let Some(source_data) = record.source_data() else {
        println!("No source data available");
        return Ok(true);
    };

    let resolutions = resolve_by_priority(&configs, source_data);
    let checks = match record.result() {
        Some(result) => check_result(&resolutions, result),
        None => Vec::new(),
    };
    let disagreements = checks.iter().filter(|(_, check)| check.is_disagreement()).count();
    info!(
        attributes = resolutions.len(),
        disagreements, "recomputed priority rule"
    );

    if checks.is_empty() {
        println!("No merge result available");
    } else {
        println!("{}", resolution_table(&resolutions, &checks));
    }
    Ok(disagreements == 0)
}

/// Print whether the endpoint serves a supported chat task.
pub async fn run_endpoint<C: InferenceClient>(explainer: &Explainer<C>) -> Result<bool> {
    let supported = explainer
        .endpoint_supported()
        .await
        .with_context(|| format!("query serving endpoint {}", explainer.endpoint()))?;
    if supported {
        println!("Endpoint {} is supported", explainer.endpoint());
    } else {
        println!(
            "Endpoint {} is not a supported chat endpoint",
            explainer.endpoint()
        );
    }
    Ok(supported)
}

/// Resolves when the user presses Ctrl-C.
///
/// If the signal handler cannot be installed the future never resolves.
async fn cancel_on_ctrl_c() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "cannot listen for Ctrl-C; requests cannot be cancelled");
        std::future::pending::<()>().await;
    }
}
