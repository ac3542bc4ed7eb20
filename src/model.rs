//! Serde model of the budget snapshot document.
//!
//! The snapshot is produced by a spreadsheet export pipeline, so every
//! section is optional and every list defaults to empty. Field names
//! on the wire are Korean; the renames keep Rust identifiers ASCII.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetSnapshot {
    #[serde(default)]
    pub update_date: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
    #[serde(default)]
    pub project_info: Option<ProjectInfo>,
    #[serde(default)]
    pub summary: Option<Summary>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub risks: Option<Risks>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub total_budget: Option<f64>,
    #[serde(default)]
    pub days_remaining: Option<i64>,
    #[serde(default)]
    pub extension_approved: Option<bool>,
    #[serde(default)]
    pub funding_split: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Summary {
    #[serde(rename = "총예산", default)]
    pub total_budget: Option<f64>,
    #[serde(rename = "총집행", default)]
    pub total_executed: Option<f64>,
    #[serde(rename = "총잔액", default)]
    pub total_remaining: Option<f64>,
    #[serde(rename = "집행률", default)]
    pub execution_rate: Option<f64>,
    #[serde(rename = "진도율", default)]
    pub progress_rate: Option<f64>,
    #[serde(rename = "남은일수", default)]
    pub days_left: Option<i64>,
    #[serde(rename = "재원별", default)]
    pub funding: Option<FundingBreakdown>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundingBreakdown {
    #[serde(rename = "국비", default)]
    pub national: Option<FundingSource>,
    #[serde(rename = "도비", default)]
    pub provincial: Option<FundingSource>,
    #[serde(rename = "시비", default)]
    pub municipal: Option<FundingSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundingSource {
    #[serde(rename = "총액", default)]
    pub total: Option<f64>,
    #[serde(rename = "집행", default)]
    pub executed: Option<f64>,
    #[serde(rename = "잔액", default)]
    pub remaining: Option<f64>,
    #[serde(rename = "집행률", default)]
    pub rate: Option<f64>,
    #[serde(rename = "비율", default)]
    pub share: Option<f64>,
}

/// Unit ids drift between numeric and text across sheet generations.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UnitId {
    Num(i64),
    Text(String),
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitId::Num(n) => write!(f, "{}", n),
            UnitId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Unit {
    #[serde(default)]
    pub id: Option<UnitId>,
    #[serde(rename = "사업명", default)]
    pub name: Option<String>,
    #[serde(rename = "예산", default)]
    pub budget: Option<f64>,
    #[serde(rename = "집행액", default)]
    pub executed: Option<f64>,
    #[serde(rename = "집행률", default)]
    pub rate: Option<f64>,
    #[serde(rename = "상태", default)]
    pub status: Option<String>,
    #[serde(rename = "비고", default)]
    pub status_detail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Milestone {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Risks {
    #[serde(default)]
    pub critical: Vec<RiskItem>,
    #[serde(default)]
    pub high: Vec<RiskItem>,
    #[serde(default)]
    pub medium: Vec<RiskItem>,
    #[serde(default)]
    pub summary: Option<RiskCounts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RiskCounts {
    #[serde(default)]
    pub critical: Option<i64>,
    #[serde(default)]
    pub high: Option<i64>,
    #[serde(default)]
    pub medium: Option<i64>,
    #[serde(default)]
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RiskItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}

/// Tolerances for the server-vs-derived aggregate cross-check.
const REMAINING_TOLERANCE_WON: f64 = 1_000.0;
const RATE_TOLERANCE_PP: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct ConsistencyReport {
    pub ok: bool,
    pub warnings: Vec<String>,
    pub derived_remaining: Option<f64>,
    pub derived_rate: Option<f64>,
}

impl Summary {
    /// Cross-check the server-computed aggregates against values
    /// derived from 총예산/총집행. Server values stay authoritative
    /// for display; disagreements are surfaced, not corrected.
    pub fn consistency_report(&self) -> ConsistencyReport {
        let mut warnings = Vec::new();
        let mut derived_remaining = None;
        let mut derived_rate = None;

        if let (Some(total), Some(executed)) = (self.total_budget, self.total_executed) {
            let remaining = total - executed;
            derived_remaining = Some(remaining);
            if let Some(reported) = self.total_remaining {
                if (reported - remaining).abs() > REMAINING_TOLERANCE_WON {
                    warnings.push(format!(
                        "총잔액 mismatch: reported {:.0}, derived {:.0}",
                        reported, remaining
                    ));
                }
            }
            if total > 0.0 {
                let rate = executed / total * 100.0;
                derived_rate = Some(rate);
                if let Some(reported) = self.execution_rate {
                    if (reported - rate).abs() > RATE_TOLERANCE_PP {
                        warnings.push(format!(
                            "집행률 mismatch: reported {:.1}%, derived {:.1}%",
                            reported, rate
                        ));
                    }
                }
            }
        }

        ConsistencyReport {
            ok: warnings.is_empty(),
            warnings,
            derived_remaining,
            derived_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(json: serde_json::Value) -> Summary {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn korean_keys_deserialize() {
        let s = summary(serde_json::json!({
            "총예산": 24000000000.0,
            "총집행": 10200000000.0,
            "총잔액": 13800000000.0,
            "집행률": 42.5,
            "남은일수": 147
        }));
        assert_eq!(s.total_budget, Some(24_000_000_000.0));
        assert_eq!(s.execution_rate, Some(42.5));
        assert_eq!(s.days_left, Some(147));
    }

    #[test]
    fn empty_document_is_valid() {
        let snap: BudgetSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snap.summary.is_none());
        assert!(snap.units.is_empty());
        assert!(snap.milestones.is_empty());
    }

    #[test]
    fn unit_id_accepts_both_shapes() {
        let n: Unit = serde_json::from_value(serde_json::json!({"id": 7})).unwrap();
        let t: Unit = serde_json::from_value(serde_json::json!({"id": "A-3"})).unwrap();
        assert_eq!(n.id.unwrap().to_string(), "7");
        assert_eq!(t.id.unwrap().to_string(), "A-3");
    }

    #[test]
    fn consistent_summary_reports_ok() {
        let s = summary(serde_json::json!({
            "총예산": 1000000.0,
            "총집행": 400000.0,
            "총잔액": 600000.0,
            "집행률": 40.0
        }));
        let report = s.consistency_report();
        assert!(report.ok);
        assert_eq!(report.derived_remaining, Some(600_000.0));
    }

    #[test]
    fn drifted_aggregates_warn_without_correcting() {
        let s = summary(serde_json::json!({
            "총예산": 1000000.0,
            "총집행": 400000.0,
            "총잔액": 650000.0,
            "집행률": 47.0
        }));
        let report = s.consistency_report();
        assert!(!report.ok);
        assert_eq!(report.warnings.len(), 2);
        // reported values untouched
        assert_eq!(s.total_remaining, Some(650_000.0));
    }

    #[test]
    fn tolerance_absorbs_rounding_noise() {
        let s = summary(serde_json::json!({
            "총예산": 1000000.0,
            "총집행": 400000.0,
            "총잔액": 600500.0,
            "집행률": 40.3
        }));
        assert!(s.consistency_report().ok);
    }

    #[test]
    fn zero_budget_skips_rate_derivation() {
        let s = summary(serde_json::json!({
            "총예산": 0.0,
            "총집행": 0.0,
            "집행률": 0.0
        }));
        let report = s.consistency_report();
        assert!(report.ok);
        assert!(report.derived_rate.is_none());
    }
}
