pub mod cli;
pub mod commands;
pub mod render;
pub mod session;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use convite_core::{
  InvitationStore,
  SiteConfig
};
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting convite CLI"
  );

  let mut cfg = SiteConfig::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .overrides
      .iter()
      .cloned()
      .map(|kv| (kv.key, kv.value))
  )?;
  debug!(?cfg, "resolved site config");

  let data = cli
    .data
    .clone()
    .or_else(|| cfg.data.clone());
  let store = match data {
    | Some(path) => {
      InvitationStore::load(&path)?
    }
    | None => InvitationStore::builtin()
      .context(
        "built-in invitation data is \
         invalid"
      )?
  };

  let renderer =
    render::Renderer::new(!cli.no_color);
  let ctx = commands::Context {
    store:    &store,
    cfg:      &cfg,
    renderer: &renderer,
    now:      cli.now
  };

  commands::dispatch(
    &ctx,
    cli.command
  )?;

  info!("done");
  Ok(())
}
