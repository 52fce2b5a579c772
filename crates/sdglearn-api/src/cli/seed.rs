//! Seed the catalog with the 17 canonical UN goals.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use sdglearn_types::sdg::CreateSdgRequest;

use crate::state::AppState;

/// The canonical UN goals, in display order.
const CANONICAL_GOALS: [(i32, &str); 17] = [
    (1, "No Poverty"),
    (2, "Zero Hunger"),
    (3, "Good Health and Well-Being"),
    (4, "Quality Education"),
    (5, "Gender Equality"),
    (6, "Clean Water and Sanitation"),
    (7, "Affordable and Clean Energy"),
    (8, "Decent Work and Economic Growth"),
    (9, "Industry, Innovation and Infrastructure"),
    (10, "Reduced Inequalities"),
    (11, "Sustainable Cities and Communities"),
    (12, "Responsible Consumption and Production"),
    (13, "Climate Action"),
    (14, "Life Below Water"),
    (15, "Life on Land"),
    (16, "Peace, Justice and Strong Institutions"),
    (17, "Partnerships for the Goals"),
];

/// Insert any of the 17 canonical goals that are not already present.
///
/// Idempotent: goals whose number already exists are skipped, so the command
/// can run safely against a partially-populated catalog.
pub async fn seed(state: &AppState, json: bool) -> Result<()> {
    let existing = state.sdg_service.list(None).await?;
    let taken: std::collections::HashSet<i32> =
        existing.iter().map(|s| s.goal_number).collect();

    let bar = ProgressBar::new(CANONICAL_GOALS.len() as u64);
    if json {
        bar.finish_and_clear();
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {bar:30.cyan} {pos}/{len} {msg}")
                .unwrap(),
        );
    }

    let mut created = Vec::new();
    let mut skipped = 0usize;

    for (number, title) in CANONICAL_GOALS {
        if taken.contains(&number) {
            skipped += 1;
        } else {
            let sdg = state
                .sdg_service
                .create(CreateSdgRequest {
                    goal_number: number,
                    title: title.to_string(),
                    description: None,
                })
                .await?;
            created.push(sdg);
        }
        if !json {
            bar.set_message(title.to_string());
            bar.inc(1);
        }
    }

    if !json {
        bar.finish_and_clear();
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "created": created.len(),
                "skipped": skipped,
            }))?
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Seeded {} goal(s), {} already present.",
        style("✓").green().bold(),
        created.len(),
        skipped
    );
    println!();

    Ok(())
}
