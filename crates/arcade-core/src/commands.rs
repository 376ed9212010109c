use std::collections::BTreeMap;

use anyhow::anyhow;
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::catalogue::Catalogue;
use crate::cli::Command;
use crate::config::Config;
use crate::event::{Branch, Category};
use crate::filter::Selection;
use crate::render::Renderer;
use crate::schedule::Day;

#[instrument(skip(catalogue, cfg, renderer, command))]
pub fn dispatch(
    catalogue: &mut Catalogue,
    cfg: &Config,
    renderer: &mut Renderer,
    command: Command,
) -> anyhow::Result<()> {
    debug!(?command, "dispatching command");

    match command {
        Command::List {
            branch,
            day,
            category,
        } => cmd_list(catalogue, renderer, branch, day, category),
        Command::Search { query } => cmd_search(catalogue, renderer, &query),
        Command::Branches => cmd_branches(catalogue),
        Command::Days => cmd_days(catalogue),
        Command::Categories => cmd_categories(catalogue),
        Command::Info { id } => cmd_info(catalogue, renderer, id),
        Command::Export {
            branch,
            day,
            category,
        } => cmd_export(catalogue, branch, day, category),
        Command::Config => cmd_config(cfg),
    }
}

fn apply_structured_filters(
    catalogue: &mut Catalogue,
    branch: Option<Branch>,
    day: Option<Day>,
    category: Option<Category>,
) {
    if let Some(branch) = branch {
        catalogue.set_branch(Selection::Only(branch));
    }
    if let Some(day) = day {
        catalogue.set_day(Selection::Only(day));
    }
    if let Some(category) = category {
        catalogue.set_category(Selection::Only(category));
    }
}

#[instrument(skip(catalogue, renderer))]
fn cmd_list(
    catalogue: &mut Catalogue,
    renderer: &mut Renderer,
    branch: Option<Branch>,
    day: Option<Day>,
    category: Option<Category>,
) -> anyhow::Result<()> {
    info!("command list");

    apply_structured_filters(catalogue, branch, day, category);
    renderer.print_event_table(&catalogue.visible(), catalogue.state(), Utc::now())
}

#[instrument(skip(catalogue, renderer, query))]
fn cmd_search(catalogue: &mut Catalogue, renderer: &mut Renderer, query: &str) -> anyhow::Result<()> {
    info!("command search");

    catalogue.search(query);
    renderer.print_event_table(&catalogue.visible(), catalogue.state(), Utc::now())
}

#[instrument(skip(catalogue))]
fn cmd_branches(catalogue: &mut Catalogue) -> anyhow::Result<()> {
    for branch in Branch::ALL {
        let count = catalogue
            .events()
            .iter()
            .filter(|event| event.branch.name == branch)
            .count();
        println!("{branch} ({count})");
    }
    Ok(())
}

#[instrument(skip(catalogue))]
fn cmd_days(catalogue: &mut Catalogue) -> anyhow::Result<()> {
    let schedule = catalogue.schedule();
    for day in Day::ALL {
        let date = schedule.date_of(day);
        let count = catalogue
            .events()
            .iter()
            .filter(|event| event.occurs_on(date))
            .count();
        println!("{day}  {date}  ({count})");
    }
    Ok(())
}

#[instrument(skip(catalogue))]
fn cmd_categories(catalogue: &mut Catalogue) -> anyhow::Result<()> {
    for category in Category::ALL {
        let count = catalogue
            .events()
            .iter()
            .filter(|event| event.category == category)
            .count();
        println!("{category} ({count})");
    }
    Ok(())
}

#[instrument(skip(catalogue, renderer))]
fn cmd_info(catalogue: &mut Catalogue, renderer: &mut Renderer, id: u64) -> anyhow::Result<()> {
    let event = catalogue
        .events()
        .iter()
        .find(|event| event.id == id)
        .ok_or_else(|| anyhow!("no event with id {id}"))?;

    renderer.print_event_info(event)
}

#[instrument(skip(catalogue))]
fn cmd_export(
    catalogue: &mut Catalogue,
    branch: Option<Branch>,
    day: Option<Day>,
    category: Option<Category>,
) -> anyhow::Result<()> {
    info!("command export");

    apply_structured_filters(catalogue, branch, day, category);
    let out = serde_json::to_string(&catalogue.visible())?;
    println!("{out}");
    Ok(())
}

#[instrument(skip(cfg))]
fn cmd_config(cfg: &Config) -> anyhow::Result<()> {
    let sorted: BTreeMap<&String, &String> = cfg.iter().collect();
    for (key, value) in sorted {
        println!("{key}={value}");
    }
    Ok(())
}
