//! SDG catalog CLI commands: create, list, show, delete.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};

use sdglearn_types::sdg::CreateSdgRequest;

use crate::state::AppState;

/// Create a new SDG via interactive wizard or one-shot flags.
///
/// # Examples
///
/// ```bash
/// # Interactive wizard
/// sdgl create sdg
///
/// # One-shot with flags
/// sdgl create sdg --number 13 --title "Climate Action"
/// ```
pub async fn create_sdg(
    state: &AppState,
    number: Option<i32>,
    title: Option<String>,
    description: Option<String>,
    json: bool,
) -> Result<()> {
    let number = match number {
        Some(n) => n,
        None => Input::<i32>::new()
            .with_prompt("Goal number")
            .interact_text()?,
    };

    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("Goal title")
            .interact_text()?,
    };

    let description = match description {
        Some(d) => Some(d),
        None if json => None,
        None => {
            let text = Input::<String>::new()
                .with_prompt("Short description")
                .allow_empty(true)
                .interact_text()?;
            (!text.is_empty()).then_some(text)
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Creating SDG...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let sdg = state
        .sdg_service
        .create(CreateSdgRequest {
            goal_number: number,
            title,
            description,
        })
        .await?;

    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&sdg)?);
        return Ok(());
    }

    println!();
    println!("  {} SDG created!", style("✓").green().bold());
    println!();
    println!(
        "  {}  {} {}",
        style("Goal:").bold(),
        style(sdg.goal_number).cyan(),
        style(&sdg.title).cyan()
    );
    println!("  {}  {}", style("Slug:").bold(), &sdg.slug);
    println!("  {}  {}", style("ID:").bold(), style(sdg.id.to_string()).dim());
    println!();
    println!(
        "  Add a first module: {}",
        style(format!("sdgl show {} # then use the builder UI", sdg.slug)).yellow()
    );
    println!();

    Ok(())
}

/// List all SDGs in a table ordered by goal number.
pub async fn list_sdgs(state: &AppState, json: bool) -> Result<()> {
    let sdgs = state.sdg_service.list(None).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sdgs)?);
        return Ok(());
    }

    if sdgs.is_empty() {
        println!();
        println!("  No SDGs yet. Run {} to load the canonical 17.", style("sdgl seed").yellow());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Title", "Slug", "Description"]);

    for sdg in &sdgs {
        table.add_row(vec![
            Cell::new(sdg.goal_number).fg(Color::Cyan),
            Cell::new(&sdg.title),
            Cell::new(&sdg.slug).fg(Color::DarkGrey),
            Cell::new(truncate(&sdg.description, 48)),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}

/// Show one SDG with its module list.
pub async fn show_sdg(state: &AppState, slug: &str, json: bool) -> Result<()> {
    let sdg = state.sdg_service.get_by_slug(slug).await?;
    let modules = state.module_service.list_for_sdg(&sdg.id).await?;

    if json {
        let mut value = serde_json::to_value(&sdg)?;
        value["modules"] = serde_json::to_value(&modules)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Goal {}: {}",
        style("◆").cyan().bold(),
        style(sdg.goal_number).bold(),
        style(&sdg.title).cyan().bold()
    );
    if !sdg.description.is_empty() {
        println!("  {}", style(&sdg.description).dim());
    }
    println!();

    if modules.is_empty() {
        println!("  {}", style("No modules yet.").dim());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Pos", "Title", "Subtitle"]);

    for module in &modules {
        table.add_row(vec![
            Cell::new(module.position).fg(Color::Cyan),
            Cell::new(&module.title),
            Cell::new(&module.subtitle).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    println!();

    Ok(())
}

/// List the modules of one SDG.
pub async fn list_modules(state: &AppState, sdg_slug: &str, json: bool) -> Result<()> {
    let sdg = state.sdg_service.get_by_slug(sdg_slug).await?;
    let modules = state.module_service.list_for_sdg(&sdg.id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&modules)?);
        return Ok(());
    }

    println!();
    println!(
        "  Modules of {} ({}):",
        style(&sdg.title).cyan(),
        modules.len()
    );
    for module in &modules {
        println!(
            "    {} {}",
            style(format!("{}.", module.position)).dim(),
            module.title
        );
    }
    println!();

    Ok(())
}

/// Delete an SDG after confirmation.
pub async fn delete_sdg(state: &AppState, slug: &str, force: bool, json: bool) -> Result<()> {
    let sdg = state.sdg_service.get_by_slug(slug).await?;
    let modules = state.module_service.list_for_sdg(&sdg.id).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete '{}' and its {} module(s)? This cannot be undone",
                sdg.title,
                modules.len()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Aborted.");
            return Ok(());
        }
    }

    state.sdg_service.delete(&sdg.id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": true, "slug": sdg.slug})
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Deleted '{}' ({} modules).",
        style("✓").green().bold(),
        sdg.title,
        modules.len()
    );
    println!();

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
