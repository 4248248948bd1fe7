use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context as _, bail};
use chrono::{DateTime, Utc};
use convite_core::access::{AccessDecision, AccessGate, Session};
use convite_core::ics::{calendar_file, calendar_filename};
use convite_core::lifecycle::Tick;
use convite_core::route::{Route, detail_path};
use convite_core::{InvitationRecord, InvitationSnapshot, InvitationStore, SiteConfig};
use tracing::{debug, info, warn};

use crate::cli::Command;
use crate::render::Renderer;
use crate::session::FileSession;

pub const DEFAULT_SESSION_FILE: &str = "convite-session.json";

/// Shared state for one command invocation.
#[derive(Debug)]
pub struct Context<'a> {
    pub store: &'a InvitationStore,
    pub cfg: &'a SiteConfig,
    pub renderer: &'a Renderer,
    /// Pinned "now"; `None` means the wall clock.
    pub now: Option<DateTime<Utc>>,
}

impl Context<'_> {
    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    fn record(&self, id: &str) -> anyhow::Result<&InvitationRecord> {
        Ok(self.store.resolve(Some(id))?)
    }

    fn snapshot(&self, record: &InvitationRecord, now: DateTime<Utc>) -> InvitationSnapshot {
        let page_url = self
            .cfg
            .absolute_url(&detail_path(&self.cfg.base_path, &record.id));
        InvitationSnapshot::capture(record, &self.cfg.tz(), now, &page_url)
    }
}

#[tracing::instrument(skip(ctx))]
pub fn dispatch(ctx: &Context<'_>, command: Command) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    match command {
        Command::List => cmd_list(ctx, &mut out),
        Command::Show { id } => cmd_show(ctx, &mut out, &id),
        Command::Watch { id, ticks } => cmd_watch(ctx, &id, ticks),
        Command::Ics { id, out: path } => cmd_ics(ctx, &mut out, &id, path.as_deref()),
        Command::Links { id } => cmd_links(ctx, &mut out, &id),
        Command::Check => cmd_check(ctx, &mut out),
        Command::Gate {
            path,
            admin,
            state,
        } => {
            let state = state.unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
            cmd_gate(ctx, &mut out, &path, admin.as_deref(), &state)
        }
    }
}

pub fn cmd_list<W: Write>(ctx: &Context<'_>, out: &mut W) -> anyhow::Result<()> {
    let summaries = ctx.store.summaries(&ctx.cfg.base_path);
    if summaries.is_empty() {
        writeln!(out, "No hay invitaciones.")?;
        return Ok(());
    }
    writeln!(out, "{}", ctx.cfg.brand)?;
    ctx.renderer.write_summaries(out, &summaries)
}

pub fn cmd_show<W: Write>(ctx: &Context<'_>, out: &mut W, id: &str) -> anyhow::Result<()> {
    let record = ctx.record(id)?;
    let snapshot = ctx.snapshot(record, ctx.now());
    ctx.renderer.write_snapshot(out, record, &snapshot)
}

pub fn cmd_links<W: Write>(ctx: &Context<'_>, out: &mut W, id: &str) -> anyhow::Result<()> {
    let record = ctx.record(id)?;
    let snapshot = ctx.snapshot(record, ctx.now());
    ctx.renderer.write_links(out, &snapshot)
}

pub fn cmd_ics<W: Write>(
    ctx: &Context<'_>,
    out: &mut W,
    id: &str,
    path: Option<&Path>,
) -> anyhow::Result<()> {
    let record = ctx.record(id)?;
    let start = record.event_instant(&ctx.cfg.tz());
    let text = calendar_file(record, start, ctx.now());

    match path {
        Some(path) if path == Path::new("-") => {
            out.write_all(text.as_bytes())?;
        }
        _ => {
            let path = path
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(calendar_filename(record)));
            fs::write(&path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(file = %path.display(), "wrote calendar file");
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}

/// Reports data problems a loaded store can still carry.
pub fn cmd_check<W: Write>(ctx: &Context<'_>, out: &mut W) -> anyhow::Result<()> {
    let mut problems = 0usize;

    for record in ctx.store.iter() {
        for (idx, entry) in record.timeline.iter().enumerate() {
            if entry.time_of_day().is_none() {
                problems += 1;
                writeln!(
                    out,
                    "{}: timeline[{idx}] \"{}\" has unparseable time {:?}",
                    record.id, entry.label, entry.time
                )?;
            }
        }
        for (kind, venue) in [("ceremony", &record.ceremony), ("reception", &record.reception)] {
            if let Some(venue) = venue
                && venue.place_ref.trim().is_empty()
            {
                problems += 1;
                writeln!(out, "{}: {kind} has no map reference", record.id)?;
            }
        }
        if record.customization.highlights.len() > 3 {
            warn!(id = %record.id, "only three highlight panels are shown");
        }
    }

    if problems > 0 {
        bail!("{problems} problem(s) in invitation data");
    }
    writeln!(out, "{} invitation(s) OK", ctx.store.len())?;
    Ok(())
}

pub fn cmd_gate<W: Write>(
    ctx: &Context<'_>,
    out: &mut W,
    path: &str,
    admin: Option<&str>,
    state: &Path,
) -> anyhow::Result<()> {
    let (path, query) = path.split_once('?').unwrap_or((path, ""));
    let admin = admin
        .map(str::to_string)
        .or_else(|| convite_core::route::query_param(query, convite_core::access::ADMIN_QUERY_PARAM));

    let route = Route::parse(path, &ctx.cfg.base_path);
    let gate = AccessGate::new(ctx.cfg.admin_key.clone());
    let mut session = Session::new(FileSession::open(state)?);

    let decision = gate.check(&mut session, &route, admin.as_deref());
    debug!(?decision, "gate decision");
    session.store().save()?;

    match decision {
        AccessDecision::Allow => writeln!(out, "allow {}", route.to_path(&ctx.cfg.base_path))?,
        AccessDecision::Redirect(target) => {
            writeln!(out, "redirect {}", target.to_path(&ctx.cfg.base_path))?
        }
        AccessDecision::Deny => writeln!(out, "deny")?,
    }
    Ok(())
}

/// Redraws the countdown every second and the itinerary every ten,
/// until Ctrl-C, the event starts, or `max_ticks` countdown ticks.
pub fn cmd_watch(ctx: &Context<'_>, id: &str, max_ticks: Option<u64>) -> anyhow::Result<()> {
    let record = ctx.record(id)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(watch_loop(ctx, record, max_ticks))
}

async fn watch_loop(
    ctx: &Context<'_>,
    record: &InvitationRecord,
    max_ticks: Option<u64>,
) -> anyhow::Result<()> {
    use tokio::time::{Duration, MissedTickBehavior, interval};

    let started = Instant::now();
    let origin = ctx.now();
    let clock = || {
        origin
            + chrono::Duration::from_std(started.elapsed()).unwrap_or_else(|_| chrono::Duration::zero())
    };

    let tz = ctx.cfg.tz();
    let mut snapshot = ctx.snapshot(record, clock());
    let mut stdout = io::stdout();
    ctx.renderer.write_snapshot(&mut stdout, record, &snapshot)?;

    let mut countdown = interval(Duration::from_millis(u64::from(Tick::Countdown.period_ms())));
    let mut timeline = interval(Duration::from_millis(u64::from(Tick::Timeline.period_ms())));
    countdown.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timeline.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // Both fire immediately; the first frame is already drawn.
    countdown.tick().await;
    timeline.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut ticks = 0u64;
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
            _ = countdown.tick() => {
                ticks += 1;
                snapshot.refresh(record, &tz, clock());
                writeln!(stdout, "{}", ctx.renderer.countdown_line(&snapshot.countdown))?;
                if snapshot.countdown.is_passed() {
                    info!("countdown reached the event");
                    break;
                }
                if max_ticks.is_some_and(|max| ticks >= max) {
                    break;
                }
            }
            _ = timeline.tick() => {
                snapshot.refresh(record, &tz, clock());
                let passed = snapshot.timeline.flags().iter().filter(|p| **p).count();
                debug!(passed, current = ?snapshot.current_entry, "timeline refreshed");
                if let Some(entry) = snapshot.current_entry.and_then(|idx| record.timeline.get(idx)) {
                    writeln!(stdout, "▶ {} {}", entry.time, entry.label)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::tempdir;

    use super::*;

    fn fixture() -> (InvitationStore, SiteConfig, Renderer) {
        (
            InvitationStore::builtin().expect("builtin"),
            SiteConfig::default(),
            Renderer::new(false),
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 18, 0, 0).single().expect("now")
    }

    fn run<F>(f: F) -> String
    where
        F: FnOnce(&Context<'_>, &mut Vec<u8>) -> anyhow::Result<()>,
    {
        let (store, cfg, renderer) = fixture();
        let ctx = Context {
            store: &store,
            cfg: &cfg,
            renderer: &renderer,
            now: Some(now()),
        };
        let mut out = Vec::new();
        f(&ctx, &mut out).expect("command");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn list_shows_every_invitation() {
        let text = run(|ctx, out| cmd_list(ctx, out));
        assert!(text.starts_with("ESSENCIAL PUEBLA\n"));
        assert!(text.contains("Arely-America"));
        assert!(text.contains("Sofia-Demo"));
    }

    #[test]
    fn unknown_id_is_reported() {
        let (store, cfg, renderer) = fixture();
        let ctx = Context {
            store: &store,
            cfg: &cfg,
            renderer: &renderer,
            now: Some(now()),
        };
        let err = cmd_show(&ctx, &mut Vec::new(), "ghost").expect_err("unknown id");
        assert_eq!(err.to_string(), "invitation not found: ghost");
    }

    #[test]
    fn ics_to_stdout() {
        let text = run(|ctx, out| cmd_ics(ctx, out, "Arely-America", Some(Path::new("-"))));
        assert!(text.contains("DTSTART:20251220T230000Z"));
        assert!(text.contains("DTSTAMP:20251201T180000Z"));
    }

    #[test]
    fn ics_to_file() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("arely.ics");
        let text = run(|ctx, out| cmd_ics(ctx, out, "Arely-America", Some(path.as_path())));
        assert!(text.contains("arely.ics"));
        let written = fs::read_to_string(&path).expect("read ics");
        assert!(written.contains("SUMMARY:XV Años de Arely"));
    }

    #[test]
    fn links_table() {
        let text = run(|ctx, out| cmd_links(ctx, out, "Sofia-Demo"));
        assert!(text.contains("Google Calendar"));
        assert!(text.contains("https://wa.me/"));
        assert!(!text.contains("Ceremonia (mapa)"));
    }

    #[test]
    fn check_passes_builtin_data() {
        let text = run(|ctx, out| cmd_check(ctx, out));
        assert!(text.ends_with("invitation(s) OK\n"));
    }

    #[test]
    fn check_reports_bad_times() {
        let store = InvitationStore::from_toml_str(
            r#"
            [[invitation]]
            id = "x"
            name = "X"
            event_at = "2030-01-01T10:00:00"

            [[invitation.timeline]]
            time = "tarde"
            label = "Fiesta"
            "#,
        )
        .expect("store");
        let cfg = SiteConfig::default();
        let renderer = Renderer::new(false);
        let ctx = Context {
            store: &store,
            cfg: &cfg,
            renderer: &renderer,
            now: None,
        };
        let mut out = Vec::new();
        assert!(cmd_check(&ctx, &mut out).is_err());
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("x: timeline[0] \"Fiesta\" has unparseable time \"tarde\""));
    }

    #[test]
    fn gate_uses_session_file() {
        let temp = tempdir().expect("tempdir");
        let state = temp.path().join("session.json");

        let denied = run(|ctx, out| cmd_gate(ctx, out, "/invitation_project/", None, &state));
        assert_eq!(denied, "deny\n");

        let allowed = run(|ctx, out| {
            cmd_gate(ctx, out, "/invitation_project/invitation/Sofia-Demo", None, &state)
        });
        assert_eq!(allowed, "allow /invitation_project/invitation/Sofia-Demo\n");

        let redirected = run(|ctx, out| cmd_gate(ctx, out, "/invitation_project/", None, &state));
        assert_eq!(redirected, "redirect /invitation_project/invitation/Sofia-Demo\n");

        let admin = run(|ctx, out| {
            cmd_gate(ctx, out, "/invitation_project/?admin=zeus-access", None, &state)
        });
        assert_eq!(admin, "allow /invitation_project/\n");
    }
}
