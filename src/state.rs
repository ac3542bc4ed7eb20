use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::model::BudgetSnapshot;

#[derive(Clone, Serialize)]
pub struct Config {
    pub data_url: String,
    pub refresh_secs: u64,
    pub http_timeout_secs: u64,
    pub project_end_date: String,
    pub total_budget: f64,
    pub urgent_days: i64,
    pub band_low: f64,
    pub band_high: f64,
    pub rate_over: f64,
    pub rate_low: f64,
    pub sort_by_priority: bool,
    pub table_max_rows: usize,
    pub out_path: String,
    pub project_name: String,
    pub project_period: String,
    pub funding_split_label: String,
    pub extension_note: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_url: std::env::var("DATA_URL").unwrap_or_else(|_| "http://localhost:8000/data/budget.json".to_string()),
            refresh_secs: std::env::var("REFRESH_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(300),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(10),
            project_end_date: std::env::var("PROJECT_END_DATE").unwrap_or_else(|_| "2026-12-31".to_string()),
            total_budget: std::env::var("TOTAL_BUDGET").ok().and_then(|v| v.parse().ok()).unwrap_or(24_000_000_000.0),
            urgent_days: std::env::var("URGENT_DAYS").ok().and_then(|v| v.parse().ok()).unwrap_or(90),
            band_low: std::env::var("BAND_LOW").ok().and_then(|v| v.parse().ok()).unwrap_or(30.0),
            band_high: std::env::var("BAND_HIGH").ok().and_then(|v| v.parse().ok()).unwrap_or(70.0),
            rate_over: std::env::var("RATE_OVER").ok().and_then(|v| v.parse().ok()).unwrap_or(100.0),
            rate_low: std::env::var("RATE_LOW").ok().and_then(|v| v.parse().ok()).unwrap_or(10.0),
            sort_by_priority: std::env::var("SORT_BY_PRIORITY").map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes")).unwrap_or(false),
            table_max_rows: std::env::var("TABLE_MAX_ROWS").ok().and_then(|v| v.parse().ok()).unwrap_or(20),
            out_path: std::env::var("OUT_PATH").unwrap_or_else(|_| "public/index.html".to_string()),
            project_name: std::env::var("PROJECT_NAME").unwrap_or_else(|_| "아산시 강소형 스마트시티 조성사업".to_string()),
            project_period: std::env::var("PROJECT_PERIOD").unwrap_or_else(|_| "2023.04 ~ 2026.12 (연장)".to_string()),
            funding_split_label: std::env::var("FUNDING_SPLIT_LABEL").unwrap_or_else(|_| "국비 50% / 도비 15% / 시비 35%".to_string()),
            extension_note: std::env::var("EXTENSION_NOTE").unwrap_or_else(|_| "사업기간 연장 승인 (2026.12)".to_string()),
        }
    }

    /// Stable hash of the effective configuration, logged at startup so
    /// runs can be matched to the settings that produced them.
    pub fn config_hash(&self) -> String {
        let serialized = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(serialized.as_bytes());
        hex::encode(hasher.finalize())[..16].to_string()
    }

    /// Project end as midnight UTC. Unparseable dates fall back to the
    /// built-in default rather than killing the daemon.
    pub fn end_date(&self) -> DateTime<Utc> {
        let date = NaiveDate::parse_from_str(&self.project_end_date, "%Y-%m-%d")
            .unwrap_or_else(|_| NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or_default());
        Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
    }
}

/// The single mutable snapshot slot. Last successful fetch wins; a
/// failed fetch never clears previously good data.
pub struct DashboardState {
    pub snapshot: Option<BudgetSnapshot>,
    pub generation: u64,
    pub loaded_at: Option<DateTime<Utc>>,
    pub data_hash: Option<String>,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            generation: 0,
            loaded_at: None,
            data_hash: None,
            consecutive_failures: 0,
            last_error: None,
        }
    }

    /// Install a fresh snapshot. Returns whether the payload differs
    /// from the previous one.
    pub fn apply_success(
        &mut self,
        snapshot: BudgetSnapshot,
        hash: String,
        now: DateTime<Utc>,
    ) -> bool {
        let changed = self.data_hash.as_deref() != Some(hash.as_str());
        self.snapshot = Some(snapshot);
        self.generation += 1;
        self.loaded_at = Some(now);
        self.data_hash = Some(hash);
        self.consecutive_failures = 0;
        self.last_error = None;
        changed
    }

    pub fn apply_failure(&mut self, detail: String) {
        self.consecutive_failures += 1;
        self.last_error = Some(detail);
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
