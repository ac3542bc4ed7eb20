//! Structured logging for the dashboard daemon.
//!
//! Design goals:
//! 1. Multi-level granularity (TRACE → FATAL)
//! 2. Domain-specific categories for filtering
//! 3. Replay/audit support via deterministic timestamps and data hashes
//! 4. Per-run log directory so refresh cycles can be diffed offline

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            Ok("fatal") => Level::Fatal,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

// =============================================================================
// Log Domains (categories for filtering)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Fetch,   // HTTP snapshot retrieval
    Data,    // Parsing, consistency checks
    Render,  // Fragment generation
    Page,    // Page composition, disk writes
    System,  // Startup, shutdown, refresh loop
    Profile, // Performance profiling
    Audit,   // Replay/audit trail entries
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Fetch => "fetch",
            Domain::Data => "data",
            Domain::Render => "render",
            Domain::Page => "page",
            Domain::System => "system",
            Domain::Profile => "profile",
            Domain::Audit => "audit",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // Check LOG_DOMAINS env var (comma-separated list or "all")
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

// =============================================================================
// Sequence counter for ordering
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static PROFILE_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug)]
struct RunContext {
    run_id: String,
    events: Mutex<BufWriter<File>>,
    trace: Mutex<BufWriter<File>>,
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", ts_epoch_ms(), process::id()));
        let base = std::env::var("LOG_DIR").unwrap_or_else(|_| "out/runs".to_string());
        let mut run_dir = PathBuf::from(base);
        run_dir.push(&run_id);
        if let Err(err) = create_dir_all(&run_dir) {
            eprintln!("[log] failed to create run dir: {}", err);
        }
        let events_path = run_dir.join("events.jsonl");
        let trace_path = run_dir.join("trace.jsonl");
        let manifest_path = run_dir.join("manifest.json");

        let _ = std::fs::write(
            manifest_path,
            json!({
                "run_id": run_id,
                "ts": ts_now(),
                "pid": process::id(),
                "log_dir": run_dir.to_string_lossy(),
            })
            .to_string(),
        );

        let events = File::create(events_path).unwrap_or_else(|err| {
            eprintln!("[log] failed to create events log: {}", err);
            File::create("/tmp/budgetview-events.jsonl").expect("events fallback")
        });
        let trace = File::create(trace_path).unwrap_or_else(|err| {
            eprintln!("[log] failed to create trace log: {}", err);
            File::create("/tmp/budgetview-trace.jsonl").expect("trace fallback")
        });

        RunContext {
            run_id,
            events: Mutex::new(BufWriter::new(events)),
            trace: Mutex::new(BufWriter::new(trace)),
        }
    })
}

fn sanitize_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    let redacted = Value::String("[REDACTED]".to_string());
    for key in ["authorization", "Authorization", "api_key", "token"] {
        if fields.contains_key(key) {
            fields.insert(key.to_string(), redacted.clone());
        }
    }
    fields
}

fn split_fields(mut fields: Map<String, Value>) -> (Map<String, Value>, Map<String, Value>) {
    let mut top = Map::new();
    for key in ["region", "url", "generation", "msg"] {
        if let Some(value) = fields.remove(key) {
            top.insert(key.to_string(), value);
        }
    }
    (top, fields)
}

fn write_line(writer: &Mutex<BufWriter<File>>, line: &str) {
    if let Ok(mut w) = writer.lock() {
        let _ = writeln!(w, "{}", line);
    }
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Epoch milliseconds (for cache busting and replay correlation)
pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// SHA-256 hex of a byte payload, for snapshot change detection.
pub fn data_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    let min_level = Level::from_env();
    if level < min_level || !domain.is_enabled() {
        return;
    }

    emit_record(level, domain.as_str(), event, fields);
}

fn emit_record(level: Level, component: &str, event: &str, fields: Map<String, Value>) {
    let ctx = ensure_run_context();
    let fields = sanitize_fields(fields);
    let (mut top, data) = split_fields(fields);

    let msg = top.remove("msg").unwrap_or(Value::String(String::new()));
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(ctx.run_id.clone()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(component));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    for (k, v) in top {
        entry.insert(k, v);
    }
    entry.insert("data".to_string(), Value::Object(data));

    let line = Value::Object(entry).to_string();
    match level {
        Level::Trace | Level::Debug => write_line(&ctx.trace, &line),
        _ => write_line(&ctx.events, &line),
    }
    println!("{}", line);
}

// =============================================================================
// Domain-Specific Logging Helpers
// =============================================================================

pub fn log_fetch_ok(url: &str, bytes: usize, hash: &str, changed: bool, elapsed_ms: f64) {
    log(
        Level::Info,
        Domain::Fetch,
        "snapshot_fetched",
        obj(&[
            ("url", v_str(url)),
            ("bytes", json!(bytes)),
            ("data_hash", v_str(hash)),
            ("changed", json!(changed)),
            ("elapsed_ms", v_num(elapsed_ms)),
        ]),
    );
}

pub fn log_fetch_error(url: &str, kind: &str, detail: &str, consecutive: u32) {
    log(
        Level::Error,
        Domain::Fetch,
        "snapshot_fetch_failed",
        obj(&[
            ("url", v_str(url)),
            ("kind", v_str(kind)),
            ("detail", v_str(detail)),
            ("consecutive_failures", json!(consecutive)),
        ]),
    );
}

pub fn log_consistency(ok: bool, warnings: &[String]) {
    let level = if ok { Level::Debug } else { Level::Warn };
    log(
        level,
        Domain::Data,
        "summary_consistency",
        obj(&[
            ("ok", json!(ok)),
            (
                "warnings",
                Value::Array(warnings.iter().map(|w| v_str(w)).collect()),
            ),
        ]),
    );
}

pub fn log_render(generation: u64, regions: usize, stale: bool) {
    log(
        Level::Debug,
        Domain::Render,
        "regions_rendered",
        obj(&[
            ("generation", json!(generation)),
            ("regions", json!(regions)),
            ("stale", json!(stale)),
        ]),
    );
}

pub fn log_page_write(path: &str, bytes: usize, generation: u64) {
    log(
        Level::Info,
        Domain::Page,
        "page_written",
        obj(&[
            ("path", v_str(path)),
            ("bytes", json!(bytes)),
            ("generation", json!(generation)),
        ]),
    );
}

/// Audit entry tying a rendered page back to its input snapshot.
pub fn log_audit(event_type: &str, input_hash: &str, output_hash: &str) {
    log(
        Level::Info,
        Domain::Audit,
        event_type,
        obj(&[
            ("input_hash", v_str(input_hash)),
            ("output_hash", v_str(output_hash)),
        ]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Profiling Scope
// =============================================================================

/// Profiling scope that emits structured timing on drop.
pub struct ProfileScope {
    domain: Domain,
    label: &'static str,
    context: Option<Map<String, Value>>,
    started: Instant,
    enabled: bool,
}

impl ProfileScope {
    pub fn new(label: &'static str) -> Self {
        let enabled = Self::should_sample();
        Self {
            domain: Domain::Profile,
            label,
            context: None,
            started: Instant::now(),
            enabled,
        }
    }

    pub fn with_context(label: &'static str, fields: &[(&str, Value)]) -> Self {
        let enabled = Self::should_sample();
        Self {
            domain: Domain::Profile,
            label,
            context: if enabled { Some(obj(fields)) } else { None },
            started: Instant::now(),
            enabled,
        }
    }

    fn should_sample() -> bool {
        std::env::var("PROFILE_SAMPLE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .map(|p| {
                if p >= 1.0 {
                    true
                } else if p <= 0.0 {
                    false
                } else {
                    let seq = PROFILE_SEQ.fetch_add(1, Ordering::SeqCst);
                    let bucket = (seq % 10_000) as f64 / 10_000.0;
                    bucket < p
                }
            })
            .unwrap_or(true)
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        if !self.enabled {
            return;
        }
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let mut fields = self.context.take().unwrap_or_default();
        fields.insert("label".to_string(), v_str(self.label));
        fields.insert("elapsed_ms".to_string(), v_num(elapsed_ms));
        log(Level::Trace, self.domain, "profile", fields);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_data_hash_deterministic() {
        let h1 = data_hash(b"snapshot-body");
        let h2 = data_hash(b"snapshot-body");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
    }

    #[test]
    fn test_data_hash_different_inputs() {
        assert_ne!(data_hash(b"a"), data_hash(b"b"));
    }

    #[test]
    fn test_obj_helper() {
        let m = obj(&[("key", v_str("value")), ("num", v_num(42.0))]);
        assert_eq!(m.get("key").unwrap(), "value");
        assert_eq!(m.get("num").unwrap(), 42.0);
    }

    #[test]
    fn test_seq_increments() {
        let s1 = next_seq();
        let s2 = next_seq();
        assert!(s2 > s1);
    }
}
