//! System status dashboard command.

use anyhow::Result;
use console::style;
use sqlx::Row;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows catalog counts, learner counts, and version.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let counts = sqlx::query(
        r#"SELECT
            (SELECT COUNT(*) FROM sdgs) as sdgs,
            (SELECT COUNT(*) FROM modules) as modules,
            (SELECT COUNT(*) FROM sections) as sections,
            (SELECT COUNT(DISTINCT user_id) FROM user_module_progress) as learners,
            (SELECT COUNT(*) FROM user_module_progress WHERE status = 'done') as completed
        "#,
    )
    .fetch_one(&state.db_pool.reader)
    .await?;

    let sdgs: i64 = counts.try_get("sdgs").unwrap_or(0);
    let modules: i64 = counts.try_get("modules").unwrap_or(0);
    let sections: i64 = counts.try_get("sections").unwrap_or(0);
    let learners: i64 = counts.try_get("learners").unwrap_or(0);
    let completed: i64 = counts.try_get("completed").unwrap_or(0);

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "catalog": {
                "sdgs": sdgs,
                "modules": modules,
                "sections": sections,
            },
            "learners": learners,
            "completed_modules": completed,
            "free_navigation": state.config.free_navigation,
            "oauth_configured": state.oauth.is_some(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} sdglearn v{}",
        style("◆").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Catalog ──").dim());
    println!("  SDGs:     {}", style(sdgs).bold());
    println!("  Modules:  {}", style(modules).bold());
    println!("  Sections: {}", style(sections).bold());
    println!();

    println!("  {}", style("── Learners ──").dim());
    println!("  Tracked:   {}", style(learners).bold());
    println!("  Completed: {} module(s)", style(completed).green());
    println!();

    println!("  {}", style("── Config ──").dim());
    println!("  Data dir:        {}", state.data_dir.display());
    println!(
        "  Free navigation: {}",
        if state.config.free_navigation {
            style("on").yellow()
        } else {
            style("off").dim()
        }
    );
    println!(
        "  OAuth:           {}",
        if state.oauth.is_some() {
            style("configured").green()
        } else {
            style("not configured").dim()
        }
    );
    println!();

    Ok(())
}
