//! HTML fragment rendering for the fixed set of page regions.

pub mod escape;
pub mod page;
pub mod sections;

use chrono::{DateTime, Utc};

use crate::model::BudgetSnapshot;
use crate::state::Config;

/// The page regions, one per DOM mount point. `id()` values double as
/// the `id` attributes in the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    HeaderInfo,
    TotalBudget,
    AllocatedBudget,
    ExecutedAmount,
    RemainingBudget,
    StatusTable,
    FundingTable,
    MilestoneTable,
    RiskItems,
    FooterInfo,
    ErrorMessage,
}

impl Region {
    pub const ALL: [Region; 11] = [
        Region::HeaderInfo,
        Region::TotalBudget,
        Region::AllocatedBudget,
        Region::ExecutedAmount,
        Region::RemainingBudget,
        Region::StatusTable,
        Region::FundingTable,
        Region::MilestoneTable,
        Region::RiskItems,
        Region::FooterInfo,
        Region::ErrorMessage,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Region::HeaderInfo => "header-info",
            Region::TotalBudget => "total-budget",
            Region::AllocatedBudget => "allocated-budget",
            Region::ExecutedAmount => "executed-amount",
            Region::RemainingBudget => "remaining-budget",
            Region::StatusTable => "status-table",
            Region::FundingTable => "funding-table",
            Region::MilestoneTable => "milestone-table",
            Region::RiskItems => "risk-items",
            Region::FooterInfo => "footer-info",
            Region::ErrorMessage => "error-message",
        }
    }
}

/// Render every region from a snapshot. The error region starts empty;
/// the caller overwrites it when the last fetch failed.
pub fn render_all(
    snap: &BudgetSnapshot,
    cfg: &Config,
    now: DateTime<Utc>,
) -> Vec<(Region, String)> {
    Region::ALL
        .iter()
        .map(|region| {
            let html = match region {
                Region::HeaderInfo => sections::header(snap, cfg, now),
                Region::TotalBudget => sections::card_total(cfg),
                Region::AllocatedBudget => sections::card_allocated(snap, cfg),
                Region::ExecutedAmount => sections::card_executed(snap, cfg),
                Region::RemainingBudget => sections::card_remaining(snap, cfg, now),
                Region::StatusTable => sections::status_table(snap, cfg),
                Region::FundingTable => sections::funding_table(snap, cfg),
                Region::MilestoneTable => sections::milestone_table(snap),
                Region::RiskItems => sections::risk_list(snap),
                Region::FooterInfo => sections::footer(snap, cfg),
                Region::ErrorMessage => String::new(),
            };
            (*region, html)
        })
        .collect()
}

/// Region set for a daemon that has never fetched successfully.
pub fn placeholders(cfg: &Config) -> Vec<(Region, String)> {
    Region::ALL
        .iter()
        .map(|region| {
            let html = match region {
                Region::TotalBudget => sections::card_total(cfg),
                Region::ErrorMessage => String::new(),
                _ => sections::placeholder(),
            };
            (*region, html)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_ids_are_unique() {
        let mut ids: Vec<&str> = Region::ALL.iter().map(|r| r.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Region::ALL.len());
    }

    #[test]
    fn all_covers_eleven_regions() {
        assert_eq!(Region::ALL.len(), 11);
    }
}
