//! Host page composition and disk writes.
//!
//! The output is a single self-contained HTML file: embedded CSS, no
//! scripts, region divs already filled. Readers behind the static host
//! get the same document a browser-side renderer would have produced.

use std::fs;
use std::io;
use std::path::Path;

use super::Region;

/// Compose the full page from rendered region fragments.
pub fn compose(title: &str, regions: &[(Region, String)]) -> String {
    let lookup = |region: Region| -> &str {
        regions
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, html)| html.as_str())
            .unwrap_or("")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <div id="error-message">{error}</div>
        <div id="header-info">{header}</div>
        <div class="summary">
            <div class="summary-card" id="total-budget">{total}</div>
            <div class="summary-card" id="allocated-budget">{allocated}</div>
            <div class="summary-card" id="executed-amount">{executed}</div>
            <div class="summary-card" id="remaining-budget">{remaining}</div>
        </div>
        <section class="section"><h2>사업별 집행 현황</h2><div id="status-table">{status}</div></section>
        <section class="section"><h2>재원별 집행 현황</h2><div id="funding-table">{funding}</div></section>
        <section class="section"><h2>주요 일정</h2><div id="milestone-table">{milestones}</div></section>
        <section class="section"><h2>리스크 관리</h2><div id="risk-items">{risks}</div></section>
        <footer id="footer-info">{footer}</footer>
    </div>
</body>
</html>"#,
        title = title,
        css = inline_css(),
        error = lookup(Region::ErrorMessage),
        header = lookup(Region::HeaderInfo),
        total = lookup(Region::TotalBudget),
        allocated = lookup(Region::AllocatedBudget),
        executed = lookup(Region::ExecutedAmount),
        remaining = lookup(Region::RemainingBudget),
        status = lookup(Region::StatusTable),
        funding = lookup(Region::FundingTable),
        milestones = lookup(Region::MilestoneTable),
        risks = lookup(Region::RiskItems),
        footer = lookup(Region::FooterInfo),
    )
}

/// Write atomically: temp file in the target directory, then rename.
/// A reader polling the static host never sees a half-written page.
pub fn write_page(path: &Path, html: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("html.tmp");
    fs::write(&tmp, html)?;
    fs::rename(&tmp, path)
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    line-height: 1.6;
    color: #111827;
    background: #F3F4F6;
}

.container { max-width: 1200px; margin: 0 auto; padding: 2rem; }

.header-status { display: flex; gap: 0.75rem; flex-wrap: wrap; margin-bottom: 1.5rem; }
.update-badge, .days-badge, .extension-badge {
    padding: 0.375rem 0.75rem;
    border-radius: 0.375rem;
    background: #ffffff;
    font-size: 0.875rem;
}
.days-badge.urgent { background: #FEE2E2; color: #B91C1C; font-weight: 700; }
.extension-badge { background: #D1FAE5; color: #065F46; }

.summary {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
    gap: 1rem;
    margin-bottom: 2rem;
}
.summary-card {
    background: #ffffff;
    padding: 1.25rem;
    border-radius: 0.5rem;
    border-left: 4px solid #3B82F6;
}
.card-value { font-size: 1.5rem; font-weight: 700; }
.card-label { font-size: 0.875rem; color: #6B7280; margin-top: 0.25rem; }
.card-sub { font-size: 0.75rem; color: #9CA3AF; margin-top: 0.5rem; }

.progress-bar {
    height: 0.5rem;
    background: #E5E7EB;
    border-radius: 0.25rem;
    margin-top: 0.75rem;
    overflow: hidden;
}
.progress-fill { height: 100%; border-radius: 0.25rem; }

.section { margin-bottom: 2rem; }
.section h2 { font-size: 1.25rem; font-weight: 700; margin-bottom: 1rem; }

.data-table { width: 100%; border-collapse: collapse; background: #ffffff; border-radius: 0.5rem; overflow: hidden; }
.data-table th {
    padding: 0.75rem;
    text-align: left;
    font-weight: 600;
    font-size: 0.875rem;
    color: #374151;
    background: #F9FAFB;
    border-bottom: 2px solid #E5E7EB;
}
.data-table td { padding: 0.75rem; border-bottom: 1px solid #E5E7EB; font-size: 0.875rem; }
.data-table tr:last-child td { border-bottom: none; }
.unit-detail { font-size: 0.75rem; color: #9CA3AF; }
.total-row td { background: #F9FAFB; }
.table-more { text-align: center; color: #9CA3AF; font-size: 0.875rem; padding: 0.5rem; }

.rate-over { color: #EF4444; font-weight: 700; }
.rate-low { color: #F59E0B; font-weight: 600; }
.status-badge { padding: 0.25rem 0.5rem; border-radius: 0.375rem; color: #ffffff; font-size: 0.75rem; }
.status-done td { color: #9CA3AF; }

.risk-section { margin-bottom: 1.5rem; }
.risk-section h3 { font-size: 1rem; margin-bottom: 0.75rem; }
.risk-item { background: #ffffff; padding: 1rem; border-radius: 0.5rem; margin-bottom: 0.75rem; }
.risk-item.critical { border-left: 4px solid #EF4444; }
.risk-item.high { border-left: 4px solid #F97316; }
.risk-item.medium { border-left: 4px solid #EAB308; }
.risk-title { font-weight: 700; }
.risk-detail { font-size: 0.875rem; color: #6B7280; margin-top: 0.25rem; }
.risk-meta { display: flex; gap: 1rem; font-size: 0.75rem; color: #9CA3AF; margin-top: 0.5rem; }
.risk-response { font-size: 0.875rem; color: #065F46; margin-top: 0.5rem; }
.risk-summary { display: flex; gap: 1.5rem; font-size: 0.875rem; padding: 0.75rem; background: #ffffff; border-radius: 0.5rem; }

.footer-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
    gap: 1rem;
    padding: 1.5rem;
    background: #ffffff;
    border-radius: 0.5rem;
    font-size: 0.875rem;
}
.footer-item { display: flex; flex-direction: column; }
.footer-item strong { color: #6B7280; font-size: 0.75rem; }

.empty-state { text-align: center; color: #999; padding: 1rem; }
.error-alert {
    background: #FEE2E2;
    color: #B91C1C;
    padding: 0.75rem 1rem;
    border-radius: 0.5rem;
    margin-bottom: 1rem;
}
.error-detail { display: block; font-size: 0.75rem; margin-top: 0.25rem; }

@media (max-width: 768px) {
    .container { padding: 1rem; }
    .summary { grid-template-columns: 1fr; }
    .data-table { font-size: 0.75rem; }
}
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_mounts_every_region() {
        let regions: Vec<(Region, String)> = Region::ALL
            .iter()
            .map(|r| (*r, format!("<!-- {} -->", r.id())))
            .collect();
        let html = compose("테스트", &regions);
        for region in Region::ALL {
            assert!(
                html.contains(&format!(r#"id="{}""#, region.id())),
                "missing mount point {}",
                region.id()
            );
            assert!(html.contains(&format!("<!-- {} -->", region.id())));
        }
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="ko">"#));
    }

    #[test]
    fn write_is_atomic_via_rename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("index.html");
        write_page(&path, "<html></html>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
        assert!(!path.with_extension("html.tmp").exists());
    }
}
