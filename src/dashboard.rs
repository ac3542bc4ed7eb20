//! The refresh lifecycle: fetch, cross-check, render, write.
//!
//! One `Dashboard` owns the snapshot slot and the page on disk. The
//! refresh loop is the only writer; readers only ever see the output
//! file, which is replaced atomically.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::fetch::{FetchError, HttpSource, SnapshotSource};
use crate::logging::{self, obj, v_str, Domain, Level};
use crate::render::{self, sections, Region};
use crate::state::{Config, DashboardState};

pub struct Dashboard {
    cfg: Config,
    source: Box<dyn SnapshotSource>,
    state: Mutex<DashboardState>,
}

impl Dashboard {
    pub fn new(cfg: Config) -> Result<Self, FetchError> {
        let source = HttpSource::new(&cfg.data_url, cfg.http_timeout_secs)?;
        Ok(Self::with_source(cfg, Box::new(source)))
    }

    /// Construction seam for non-HTTP sources (tests, local replay).
    pub fn with_source(cfg: Config, source: Box<dyn SnapshotSource>) -> Self {
        Self {
            cfg,
            source,
            state: Mutex::new(DashboardState::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// One fetch cycle. On success the snapshot slot is replaced and the
    /// failure counter resets; on failure the previous snapshot stays
    /// and only the error bookkeeping moves.
    pub async fn refresh(&self) -> Result<(), FetchError> {
        let url = self.source.describe();
        let started = Instant::now();
        match self.source.fetch().await {
            Ok(fetched) => {
                if let Some(summary) = &fetched.snapshot.summary {
                    let report = summary.consistency_report();
                    logging::log_consistency(report.ok, &report.warnings);
                }
                let hash = fetched.body_hash;
                let bytes = fetched.bytes;
                let mut changed = false;
                if let Ok(mut state) = self.state.lock() {
                    changed = state.apply_success(fetched.snapshot, hash.clone(), Utc::now());
                }
                logging::log_fetch_ok(
                    &url,
                    bytes,
                    &hash,
                    changed,
                    started.elapsed().as_secs_f64() * 1000.0,
                );
                Ok(())
            }
            Err(err) => {
                let mut consecutive = 0;
                if let Ok(mut state) = self.state.lock() {
                    state.apply_failure(err.detail().to_string());
                    consecutive = state.consecutive_failures;
                }
                logging::log_fetch_error(&url, err.kind(), err.detail(), consecutive);
                Err(err)
            }
        }
    }

    /// Render every region from the current state. A daemon that has
    /// never fetched gets placeholders; a failed fetch over a stale
    /// snapshot gets the stale data plus the error banner.
    pub fn render_regions(&self, now: DateTime<Utc>) -> Vec<(Region, String)> {
        let _scope = logging::ProfileScope::new("render_regions");
        let state = match self.state.lock() {
            Ok(state) => state,
            Err(_) => return render::placeholders(&self.cfg),
        };
        let mut regions = match &state.snapshot {
            Some(snap) => render::render_all(snap, &self.cfg, now),
            None => render::placeholders(&self.cfg),
        };
        if let Some(detail) = &state.last_error {
            for (region, html) in regions.iter_mut() {
                if *region == Region::ErrorMessage {
                    *html = sections::error_alert(detail);
                }
            }
        }
        let stale = state.snapshot.is_some() && state.last_error.is_some();
        logging::log_render(state.generation, regions.len(), stale);
        regions
    }

    /// Compose and atomically replace the output file.
    pub fn write_page(&self, now: DateTime<Utc>) -> anyhow::Result<()> {
        let regions = self.render_regions(now);
        let html = render::page::compose(&self.cfg.project_name, &regions);
        render::page::write_page(Path::new(&self.cfg.out_path), &html)
            .with_context(|| format!("write page to {}", self.cfg.out_path))?;

        let output_hash = logging::data_hash(html.as_bytes());
        let mut generation = 0;
        if let Ok(state) = self.state.lock() {
            generation = state.generation;
            if let Some(input_hash) = &state.data_hash {
                logging::log_audit("page_render", input_hash, &output_hash);
            }
        }
        logging::log_page_write(&self.cfg.out_path, html.len(), generation);
        Ok(())
    }

    /// Background fetch+write loop on the configured cadence. The first
    /// interval tick is consumed so the caller's initial cycle is not
    /// immediately repeated.
    pub fn spawn_refresh_loop(self: Arc<Self>) -> RefreshHandle {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(self.cfg.refresh_secs.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let _ = self.refresh().await;
                if let Err(e) = self.write_page(Utc::now()) {
                    logging::log(
                        Level::Error,
                        Domain::Page,
                        "page_write_failed",
                        obj(&[("error", v_str(&e.to_string()))]),
                    );
                }
            }
        });
        RefreshHandle { handle }
    }
}

pub struct RefreshHandle {
    handle: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn dispose(self) {
        self.handle.abort();
    }

    pub async fn join(self) {
        let _ = self.handle.await;
    }
}
