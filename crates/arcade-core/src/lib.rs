pub mod catalogue;
pub mod cli;
pub mod commands;
pub mod config;
pub mod datetime;
pub mod event;
pub mod filter;
pub mod render;
pub mod schedule;
pub mod source;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "arcade starting"
  );
  debug!(
    overrides =
      pre.rc_overrides.len(),
    "rc overrides captured"
  );

  let mut cfg = config::Config::load(
    cli.arcaderc.as_deref()
  )?;
  let mut overrides =
    pre.rc_overrides;
  overrides.extend(
    cli.rc_overrides.into_iter().map(
      |kv| (kv.key, kv.value)
    )
  );
  cfg.apply_overrides(overrides);

  let schedule =
    schedule::Schedule::from_config(
      &cfg
    )
    .context(
      "invalid schedule configuration"
    )?;

  let events_path =
    source::resolve_events_path(
      &cfg,
      cli.events.as_deref()
    );
  let events =
    source::load_events_or_empty(
      &events_path
    );

  let mut catalogue =
    catalogue::Catalogue::new(
      events, schedule
    );
  let mut renderer =
    render::Renderer::new(&cfg)?;

  let command = match cli.command {
    | Some(command) => command,
    | None => {
      cli::default_command(&cfg)?
    }
  };

  commands::dispatch(
    &mut catalogue,
    &cfg,
    &mut renderer,
    command
  )?;

  info!("arcade finished");
  Ok(())
}
