//! Learner progress CLI command.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use sdglearn_types::progress::ModuleStatus;

use crate::state::AppState;

/// Show a learner's completion, either across the catalog or for one SDG.
pub async fn progress(
    state: &AppState,
    user_id: &str,
    sdg_slug: Option<&str>,
    json: bool,
) -> Result<()> {
    match sdg_slug {
        Some(slug) => sdg_detail(state, user_id, slug, json).await,
        None => overview(state, user_id, json).await,
    }
}

/// The gated module list for one SDG, as the player would see it.
async fn sdg_detail(state: &AppState, user_id: &str, slug: &str, json: bool) -> Result<()> {
    let sdg = state.sdg_service.get_by_slug(slug).await?;
    let view = state.progress_service.sdg_access(user_id, &sdg.id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {} -- {} ({}%)",
        style("◆").cyan().bold(),
        style(&sdg.title).cyan().bold(),
        user_id,
        view.summary.percent_complete
    );
    println!();

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Pos", "Module", "Status", "Access"]);

    for access in &view.modules {
        let status_cell = match access.status {
            ModuleStatus::Done => Cell::new("done").fg(Color::Green),
            ModuleStatus::Todo => Cell::new("todo").fg(Color::Yellow),
        };
        let access_cell = if access.unlocked {
            Cell::new("unlocked")
        } else {
            Cell::new("locked").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(access.position).fg(Color::Cyan),
            Cell::new(&access.title),
            status_cell,
            access_cell,
        ]);
    }

    println!("{table}");
    println!();

    Ok(())
}

/// Percent complete per SDG across the whole catalog.
async fn overview(state: &AppState, user_id: &str, json: bool) -> Result<()> {
    let summaries = state.progress_service.overview(user_id).await?;
    let sdgs = state.sdg_service.list(None).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!();
    println!("  Progress for {}:", style(user_id).cyan().bold());
    println!();

    for sdg in &sdgs {
        let summary = summaries.iter().find(|s| s.sdg_id == sdg.id);
        let (done, total, percent) = summary
            .map(|s| (s.done_modules, s.total_modules, s.percent_complete))
            .unwrap_or((0, 0, 0));

        let percent_style = if percent == 100 {
            style(format!("{percent:>3}%")).green()
        } else if percent > 0 {
            style(format!("{percent:>3}%")).yellow()
        } else {
            style(format!("{percent:>3}%")).dim()
        };

        println!(
            "  {} {:<45} {} ({done}/{total})",
            style(format!("{:>2}.", sdg.goal_number)).dim(),
            sdg.title,
            percent_style,
        );
    }
    println!();

    Ok(())
}
