//! End-to-end render checks: snapshot JSON in, full HTML page out.
//!
//! These exercise the same path the daemon takes after a successful
//! fetch, with a fixture shaped like a real sheet export.

use budgetview::model::BudgetSnapshot;
use budgetview::render::{self, page, Region};
use budgetview::state::Config;
use chrono::{TimeZone, Utc};
use serde_json::json;

fn test_config() -> Config {
    Config {
        data_url: "http://localhost:8000/data/budget.json".to_string(),
        refresh_secs: 300,
        http_timeout_secs: 10,
        project_end_date: "2026-12-31".to_string(),
        total_budget: 24_000_000_000.0,
        urgent_days: 90,
        band_low: 30.0,
        band_high: 70.0,
        rate_over: 100.0,
        rate_low: 10.0,
        sort_by_priority: false,
        table_max_rows: 20,
        out_path: "public/index.html".to_string(),
        project_name: "아산시 강소형 스마트시티 조성사업".to_string(),
        project_period: "2023.04 ~ 2026.12 (연장)".to_string(),
        funding_split_label: "국비 50% / 도비 15% / 시비 35%".to_string(),
        extension_note: "사업기간 연장 승인 (2026.12)".to_string(),
    }
}

fn fixture() -> BudgetSnapshot {
    serde_json::from_value(json!({
        "update_date": "2026-08-06",
        "update_time": "09:00",
        "project_info": {
            "name": "아산시 강소형 스마트시티 조성사업",
            "period": "2023.04 ~ 2026.12 (연장)",
            "total_budget": 24000000000.0,
            "extension_approved": true
        },
        "summary": {
            "총예산": 24000000000.0,
            "총집행": 10200000000.0,
            "총잔액": 13800000000.0,
            "집행률": 42.5,
            "진도율": 48.0,
            "남은일수": 147,
            "재원별": {
                "국비": {"총액": 12000000000.0, "집행": 5100000000.0, "잔액": 6900000000.0, "집행률": 42.5, "비율": 50.0},
                "도비": {"총액": 3600000000.0, "집행": 1530000000.0, "잔액": 2070000000.0, "집행률": 42.5, "비율": 15.0},
                "시비": {"총액": 8400000000.0, "집행": 3570000000.0, "잔액": 4830000000.0, "집행률": 42.5, "비율": 35.0}
            }
        },
        "units": [
            {"id": 1, "사업명": "통합플랫폼 구축", "예산": 5000000000.0, "집행액": 2500000000.0, "집행률": 50.0, "상태": "진행중"},
            {"id": 2, "사업명": "스마트 교통체계", "예산": 3000000000.0, "집행액": 3300000000.0, "집행률": 110.0, "상태": "초과", "비고": "추가 발주분 정산 중"},
            {"id": "A-3", "사업명": "데이터 허브", "예산": 2000000000.0, "집행액": 100000000.0, "집행률": 5.0, "상태": "미집행"}
        ],
        "milestones": [
            {"date": "2026-03-15", "type": "보고", "title": "1분기 실적 보고", "status": "완료"},
            {"date": "2026-09-30", "type": "점검", "title": "중간 점검", "status": "예정"},
            {"date": "2026-12-31", "type": "마감", "title": "사업 종료", "status": "예정"}
        ],
        "risks": {
            "critical": [
                {"title": "교통체계 예산 초과", "description": "집행률 110% 도달", "impact": "3억원", "deadline": "2026-09-15", "response": "예산 전용 협의"}
            ],
            "high": [
                {"title": "데이터 허브 지연", "deadline": "2026-10-01"}
            ],
            "medium": [],
            "summary": {"critical": 1, "high": 1, "medium": 0, "total": 2}
        }
    }))
    .unwrap()
}

fn region_html(regions: &[(Region, String)], region: Region) -> &str {
    regions
        .iter()
        .find(|(r, _)| *r == region)
        .map(|(_, html)| html.as_str())
        .unwrap()
}

fn render_fixture() -> Vec<(Region, String)> {
    let now = Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap();
    render::render_all(&fixture(), &test_config(), now)
}

#[test]
fn every_region_renders_content() {
    let regions = render_fixture();
    assert_eq!(regions.len(), Region::ALL.len());
    for (region, html) in &regions {
        if *region == Region::ErrorMessage {
            assert!(html.is_empty(), "error region starts empty");
        } else {
            assert!(!html.is_empty(), "region {} rendered nothing", region.id());
        }
    }
}

#[test]
fn header_shows_update_stamp_and_countdown() {
    let regions = render_fixture();
    let header = region_html(&regions, Region::HeaderInfo);
    assert!(header.contains("2026-08-06 09:00"));
    assert!(header.contains("D-147"));
    // 147 days out, above the 90-day urgency threshold
    assert!(!header.contains("days-badge urgent"));
    assert!(header.contains("사업기간 연장 승인"));
}

#[test]
fn summary_cards_use_korean_scaling() {
    let regions = render_fixture();
    assert!(region_html(&regions, Region::TotalBudget).contains("240.0억원"));
    assert!(region_html(&regions, Region::AllocatedBudget).contains("총 사업비의 100.0%"));
    let executed = region_html(&regions, Region::ExecutedAmount);
    assert!(executed.contains("102.0억원"));
    assert!(executed.contains("집행률 42.5% | 진도율 48.0%"));
    assert!(executed.contains("width:42.5%"));
    let remaining = region_html(&regions, Region::RemainingBudget);
    assert!(remaining.contains("138.0억원"));
    assert!(remaining.contains("147일 내 집행 필요"));
}

#[test]
fn status_table_marks_rate_extremes() {
    let regions = render_fixture();
    let table = region_html(&regions, Region::StatusTable);
    assert!(table.contains("통합플랫폼 구축"));
    assert!(table.contains(r#"class="rate-over">110.0%"#));
    assert!(table.contains(r#"class="rate-low">5.0%"#));
    assert!(table.contains("추가 발주분 정산 중"));
    // mixed numeric and text unit ids both render
    assert!(table.contains("<td>1</td>"));
    assert!(table.contains("<td>A-3</td>"));
}

#[test]
fn priority_sort_puts_over_execution_first() {
    let cfg = Config {
        sort_by_priority: true,
        ..test_config()
    };
    let now = Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap();
    let regions = render::render_all(&fixture(), &cfg, now);
    let table = region_html(&regions, Region::StatusTable);
    let over = table.find("스마트 교통체계").unwrap();
    let not_executed = table.find("데이터 허브").unwrap();
    let in_progress = table.find("통합플랫폼 구축").unwrap();
    assert!(over < not_executed);
    assert!(not_executed < in_progress);
}

#[test]
fn long_tables_truncate_with_notice() {
    let cfg = Config {
        table_max_rows: 2,
        ..test_config()
    };
    let now = Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap();
    let regions = render::render_all(&fixture(), &cfg, now);
    let table = region_html(&regions, Region::StatusTable);
    assert!(table.contains("총 3개 항목 중 2개 표시"));
    assert!(!table.contains("데이터 허브"));
}

#[test]
fn funding_table_carries_totals_row() {
    let regions = render_fixture();
    let table = region_html(&regions, Region::FundingTable);
    for source in ["국비", "도비", "시비"] {
        assert!(table.contains(source), "missing funding source {}", source);
    }
    assert!(table.contains("합계"));
    assert!(table.contains("240.0억원"));
    assert!(table.contains("120.0억원"));
}

#[test]
fn milestones_get_kind_emoji_and_done_class() {
    let regions = render_fixture();
    let table = region_html(&regions, Region::MilestoneTable);
    assert!(table.contains("📝 보고"));
    assert!(table.contains("🔍 점검"));
    assert!(table.contains("📅 마감"));
    assert!(table.contains("✅ 완료"));
    assert!(table.contains("📅 예정"));
    assert!(table.contains(r#"class="status-done""#));
    // dates collapse to MM-DD
    assert!(table.contains("<td>03-15</td>"));
}

#[test]
fn risk_list_renders_tiers_and_counts() {
    let regions = render_fixture();
    let risks = region_html(&regions, Region::RiskItems);
    assert!(risks.contains("🔴 긴급 리스크"));
    assert!(risks.contains("🟠 높음 리스크"));
    // empty medium tier renders no section, only the summary count
    assert!(!risks.contains("🟡 주의 리스크"));
    assert!(risks.contains("교통체계 예산 초과"));
    assert!(risks.contains("대응: 예산 전용 협의"));
    assert!(risks.contains("총 2건 관리중"));
}

#[test]
fn empty_snapshot_degrades_to_empty_states() {
    let snap: BudgetSnapshot = serde_json::from_str("{}").unwrap();
    let now = Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap();
    let regions = render::render_all(&snap, &test_config(), now);
    assert!(region_html(&regions, Region::StatusTable).contains("사업 데이터가 없습니다."));
    assert!(region_html(&regions, Region::FundingTable).contains("재원별 데이터가 없습니다."));
    assert!(region_html(&regions, Region::MilestoneTable).contains("마일스톤 데이터가 없습니다."));
    assert!(region_html(&regions, Region::RiskItems).contains("리스크 데이터가 없습니다."));
    // config-backed surfaces still render real values
    assert!(region_html(&regions, Region::TotalBudget).contains("240.0억원"));
    assert!(region_html(&regions, Region::FooterInfo).contains("아산시"));
}

#[test]
fn snapshot_strings_are_escaped() {
    let snap: BudgetSnapshot = serde_json::from_value(json!({
        "units": [
            {"사업명": "<script>alert(1)</script>", "상태": "진행중", "비고": "\"quoted\" & <tag>"}
        ]
    }))
    .unwrap();
    let now = Utc.with_ymd_and_hms(2026, 8, 6, 0, 0, 0).unwrap();
    let regions = render::render_all(&snap, &test_config(), now);
    let table = region_html(&regions, Region::StatusTable);
    assert!(!table.contains("<script>"));
    assert!(table.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(table.contains("&quot;quoted&quot; &amp; &lt;tag&gt;"));
}

#[test]
fn composed_page_mounts_all_fragments() {
    let regions = render_fixture();
    let html = page::compose("아산시 강소형 스마트시티 조성사업", &regions);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<style>"));
    for region in Region::ALL {
        assert!(
            html.contains(&format!(r#"id="{}""#, region.id())),
            "page missing mount {}",
            region.id()
        );
    }
    assert!(html.contains("240.0억원"));
    assert!(html.contains("사업별 집행 현황"));
}
