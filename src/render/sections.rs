//! Per-region fragment renderers.
//!
//! Every function here is pure: snapshot + config in, HTML string out.
//! Missing sections degrade to a Korean empty-state paragraph instead
//! of dropping the region. All snapshot strings are escaped on the way
//! in; numbers go through the formatters in [`crate::format`].

use chrono::{DateTime, Utc};

use crate::format::{days_remaining, format_currency, format_currency_opt, format_percent, month_day};
use crate::model::{BudgetSnapshot, RiskItem, Unit};
use crate::state::Config;
use crate::status::{milestone_is_done, milestone_status_label, MilestoneKind, RateBand, Status};

use super::escape::html_escape;

fn empty_state(msg: &str) -> String {
    format!(r#"<p class="empty-state">{}</p>"#, msg)
}

/// Preferred source order for the countdown: snapshot summary, then
/// project_info, then the clock-derived count.
fn effective_days(snap: &BudgetSnapshot, cfg: &Config, now: DateTime<Utc>) -> i64 {
    snap.summary
        .as_ref()
        .and_then(|s| s.days_left)
        .or_else(|| snap.project_info.as_ref().and_then(|p| p.days_remaining))
        .filter(|d| *d > 0)
        .unwrap_or_else(|| days_remaining(cfg.end_date(), now))
}

pub fn header(snap: &BudgetSnapshot, cfg: &Config, now: DateTime<Utc>) -> String {
    let days = effective_days(snap, cfg, now);
    let urgent = if days <= cfg.urgent_days { " urgent" } else { "" };
    let update_date = html_escape(snap.update_date.as_deref().unwrap_or("-"));
    let update_time = html_escape(snap.update_time.as_deref().unwrap_or(""));
    let extension = snap
        .project_info
        .as_ref()
        .and_then(|p| p.extension_approved)
        .unwrap_or(false);
    let extension_badge = if extension {
        format!(
            r#"<span class="extension-badge">✅ {}</span>"#,
            html_escape(&cfg.extension_note)
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="header-status">
    <span class="update-badge">📅 최종 업데이트: {update_date} {update_time}</span>
    <span class="days-badge{urgent}">⏰ D-{days}</span>
    {extension_badge}
</div>"#,
        update_date = update_date,
        update_time = update_time,
        urgent = urgent,
        days = days,
        extension_badge = extension_badge,
    )
}

pub fn card_total(cfg: &Config) -> String {
    format!(
        r#"<div class="card-value">{value}</div>
<div class="card-label">총 사업비</div>
<div class="card-sub">{split}</div>"#,
        value = format_currency(cfg.total_budget),
        split = html_escape(&cfg.funding_split_label),
    )
}

pub fn card_allocated(snap: &BudgetSnapshot, cfg: &Config) -> String {
    let allocated = snap.summary.as_ref().and_then(|s| s.total_budget);
    let share = match allocated {
        Some(a) if cfg.total_budget > 0.0 => format!("{:.1}", a / cfg.total_budget * 100.0),
        _ => "0.0".to_string(),
    };
    format!(
        r#"<div class="card-value">{value}</div>
<div class="card-label">배정예산</div>
<div class="card-sub">총 사업비의 {share}%</div>"#,
        value = format_currency_opt(allocated),
        share = share,
    )
}

pub fn card_executed(snap: &BudgetSnapshot, cfg: &Config) -> String {
    let summary = snap.summary.as_ref();
    let executed = summary.and_then(|s| s.total_executed);
    let rate = summary.and_then(|s| s.execution_rate).unwrap_or(0.0);
    let width = rate.clamp(0.0, 100.0);
    let color = RateBand::classify(rate, cfg.band_low, cfg.band_high).color();
    let progress = summary.and_then(|s| s.progress_rate);
    let sub = match progress {
        Some(p) => format!("집행률 {} | 진도율 {}", format_percent(rate), format_percent(p)),
        None => format!("집행률 {}", format_percent(rate)),
    };

    format!(
        r#"<div class="card-value">{value}</div>
<div class="card-label">집행금액</div>
<div class="progress-bar"><div class="progress-fill" style="width:{width}%;background:{color}"></div></div>
<div class="card-sub">{sub}</div>"#,
        value = format_currency_opt(executed),
        width = width,
        color = color,
        sub = sub,
    )
}

pub fn card_remaining(snap: &BudgetSnapshot, cfg: &Config, now: DateTime<Utc>) -> String {
    let remaining = snap.summary.as_ref().and_then(|s| s.total_remaining);
    let days = effective_days(snap, cfg, now);
    format!(
        r#"<div class="card-value">{value}</div>
<div class="card-label">미집행 잔액</div>
<div class="card-sub">{days}일 내 집행 필요</div>"#,
        value = format_currency_opt(remaining),
        days = days,
    )
}

fn unit_row(unit: &Unit, cfg: &Config) -> String {
    let rate = unit.rate.unwrap_or(0.0);
    let rate_class = if rate > cfg.rate_over {
        " class=\"rate-over\""
    } else if rate < cfg.rate_low {
        " class=\"rate-low\""
    } else {
        ""
    };
    let status_label = unit.status.as_deref().unwrap_or("");
    let status = Status::parse(status_label);
    let detail = unit
        .status_detail
        .as_deref()
        .map(|d| format!(r#"<div class="unit-detail">{}</div>"#, html_escape(d)))
        .unwrap_or_default();

    format!(
        r#"<tr>
    <td>{id}</td>
    <td><strong>{name}</strong>{detail}</td>
    <td>{budget}</td>
    <td>{executed}</td>
    <td{rate_class}>{rate}</td>
    <td><span class="status-badge" style="background:{color}">{emoji} {label}</span></td>
</tr>"#,
        id = unit.id.as_ref().map(|i| html_escape(&i.to_string())).unwrap_or_else(|| "-".to_string()),
        name = html_escape(unit.name.as_deref().unwrap_or("-")),
        detail = detail,
        budget = format_currency_opt(unit.budget),
        executed = format_currency_opt(unit.executed),
        rate_class = rate_class,
        rate = format_percent(rate),
        color = status.color(),
        emoji = status.emoji(),
        label = html_escape(status_label),
    )
}

pub fn status_table(snap: &BudgetSnapshot, cfg: &Config) -> String {
    if snap.units.is_empty() {
        return empty_state("사업 데이터가 없습니다.");
    }

    let mut units: Vec<&Unit> = snap.units.iter().collect();
    if cfg.sort_by_priority {
        units.sort_by_key(|u| Status::parse(u.status.as_deref().unwrap_or("")).priority());
    }

    let total = units.len();
    let shown = total.min(cfg.table_max_rows);
    let rows: String = units[..shown].iter().map(|u| unit_row(u, cfg)).collect();

    let more = if total > shown {
        format!(
            r#"<div class="table-more">총 {total}개 항목 중 {shown}개 표시</div>"#,
            total = total,
            shown = shown,
        )
    } else {
        String::new()
    };

    format!(
        r#"<table class="data-table">
    <thead><tr><th>#</th><th>사업명</th><th>예산</th><th>집행</th><th>집행률</th><th>상태</th></tr></thead>
    <tbody>{rows}</tbody>
</table>{more}"#,
        rows = rows,
        more = more,
    )
}

pub fn funding_table(snap: &BudgetSnapshot, cfg: &Config) -> String {
    let summary = match snap.summary.as_ref() {
        Some(s) => s,
        None => return empty_state("재원별 데이터가 없습니다."),
    };
    let funding = match summary.funding.as_ref() {
        Some(f) => f,
        None => return empty_state("재원별 데이터가 없습니다."),
    };

    let sources = [
        ("국비", funding.national.as_ref()),
        ("도비", funding.provincial.as_ref()),
        ("시비", funding.municipal.as_ref()),
    ];

    let mut rows = String::new();
    for (name, source) in sources {
        if let Some(s) = source {
            rows.push_str(&format!(
                r#"<tr>
    <td><strong>{name}</strong></td>
    <td>{total} ({share})</td>
    <td>{total}</td>
    <td>{executed}</td>
    <td>{rate}</td>
    <td>{remaining}</td>
</tr>"#,
                name = name,
                total = format_currency_opt(s.total),
                share = format_percent(s.share.unwrap_or(0.0)),
                executed = format_currency_opt(s.executed),
                rate = format_percent(s.rate.unwrap_or(0.0)),
                remaining = format_currency_opt(s.remaining),
            ));
        }
    }

    let total_row = format!(
        r#"<tr class="total-row">
    <td><strong>합계</strong></td>
    <td><strong>{grand}</strong></td>
    <td><strong>{grand}</strong></td>
    <td><strong>{executed}</strong></td>
    <td><strong>{rate}</strong></td>
    <td><strong>{remaining}</strong></td>
</tr>"#,
        grand = format_currency(cfg.total_budget),
        executed = format_currency_opt(summary.total_executed),
        rate = format_percent(summary.execution_rate.unwrap_or(0.0)),
        remaining = format_currency_opt(summary.total_remaining),
    );

    format!(
        r#"<table class="data-table">
    <thead><tr><th>재원</th><th>총 사업비</th><th>배정예산</th><th>집행금액</th><th>집행률</th><th>잔액</th></tr></thead>
    <tbody>{rows}{total_row}</tbody>
</table>"#,
        rows = rows,
        total_row = total_row,
    )
}

pub fn milestone_table(snap: &BudgetSnapshot) -> String {
    if snap.milestones.is_empty() {
        return empty_state("마일스톤 데이터가 없습니다.");
    }

    let rows: String = snap
        .milestones
        .iter()
        .map(|m| {
            let status = m.status.as_deref().unwrap_or("");
            let row_class = if milestone_is_done(status) {
                " class=\"status-done\""
            } else {
                ""
            };
            let kind_label = m.kind.as_deref().unwrap_or("");
            let kind = MilestoneKind::parse(kind_label);
            format!(
                r#"<tr{row_class}>
    <td>{date}</td>
    <td>{emoji} {kind}</td>
    <td>{title}</td>
    <td>{status}</td>
</tr>"#,
                row_class = row_class,
                date = html_escape(month_day(m.date.as_deref().unwrap_or(""))),
                emoji = kind.emoji(),
                kind = html_escape(kind_label),
                title = html_escape(m.title.as_deref().unwrap_or("")),
                status = html_escape(&milestone_status_label(status)),
            )
        })
        .collect();

    format!(
        r#"<table class="data-table">
    <thead><tr><th>일자</th><th>구분</th><th>내용</th><th>상태</th></tr></thead>
    <tbody>{rows}</tbody>
</table>"#,
        rows = rows,
    )
}

fn risk_item(item: &RiskItem, tier_class: &str) -> String {
    let description = item
        .description
        .as_deref()
        .map(|d| format!(r#"<div class="risk-detail">{}</div>"#, html_escape(d)))
        .unwrap_or_default();
    let deadline = item
        .deadline
        .as_deref()
        .map(|d| format!("<span>마감: {}</span>", html_escape(d)))
        .unwrap_or_default();
    let impact = item
        .impact
        .as_deref()
        .map(|i| format!("<span>영향: {}</span>", html_escape(i)))
        .unwrap_or_default();
    let response = item
        .response
        .as_deref()
        .map(|r| format!(r#"<div class="risk-response">대응: {}</div>"#, html_escape(r)))
        .unwrap_or_default();

    format!(
        r#"<div class="risk-item {tier_class}">
    <div class="risk-title">{title}</div>
    {description}
    <div class="risk-meta">{impact}{deadline}</div>
    {response}
</div>"#,
        tier_class = tier_class,
        title = html_escape(item.title.as_deref().unwrap_or("")),
        description = description,
        impact = impact,
        deadline = deadline,
        response = response,
    )
}

fn risk_section(heading: &str, tier_class: &str, items: &[RiskItem]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let body: String = items.iter().map(|i| risk_item(i, tier_class)).collect();
    format!(
        r#"<div class="risk-section"><h3>{heading}</h3>{body}</div>"#,
        heading = heading,
        body = body,
    )
}

pub fn risk_list(snap: &BudgetSnapshot) -> String {
    let risks = match snap.risks.as_ref() {
        Some(r) => r,
        None => return empty_state("리스크 데이터가 없습니다."),
    };

    let mut out = String::new();
    out.push_str(&risk_section("🔴 긴급 리스크", "critical", &risks.critical));
    out.push_str(&risk_section("🟠 높음 리스크", "high", &risks.high));
    out.push_str(&risk_section("🟡 주의 리스크", "medium", &risks.medium));

    let counts = risks.summary.clone().unwrap_or_default();
    let critical = counts.critical.unwrap_or(0);
    let high = counts.high.unwrap_or(0);
    let medium = counts.medium.unwrap_or(0);
    let total = counts.total.unwrap_or(critical + high + medium);
    out.push_str(&format!(
        r#"<div class="risk-summary">
    <span>🔴 긴급: {critical}건</span>
    <span>🟠 높음: {high}건</span>
    <span>🟡 주의: {medium}건</span>
    <span>총 {total}건 관리중</span>
</div>"#,
        critical = critical,
        high = high,
        medium = medium,
        total = total,
    ));

    out
}

pub fn footer(snap: &BudgetSnapshot, cfg: &Config) -> String {
    let info = snap.project_info.clone().unwrap_or_default();
    let name = info.name.as_deref().unwrap_or(&cfg.project_name);
    let period = info.period.as_deref().unwrap_or(&cfg.project_period);
    let split = info.funding_split.as_deref().unwrap_or(&cfg.funding_split_label);
    let total = info.total_budget.unwrap_or(cfg.total_budget);
    let extension = if info.extension_approved.unwrap_or(false) {
        format!("✅ {}", html_escape(&cfg.extension_note))
    } else {
        "❌ 미승인".to_string()
    };

    format!(
        r#"<div class="footer-grid">
    <div class="footer-item"><strong>사업명</strong><span>{name}</span></div>
    <div class="footer-item"><strong>사업기간</strong><span>{period}</span></div>
    <div class="footer-item"><strong>총 사업비</strong><span>{total} ({split})</span></div>
    <div class="footer-item"><strong>연장승인</strong><span>{extension}</span></div>
</div>"#,
        name = html_escape(name),
        period = html_escape(period),
        total = format_currency(total),
        split = html_escape(split),
        extension = extension,
    )
}

pub fn error_alert(detail: &str) -> String {
    format!(
        r#"<div class="error-alert">⚠️ 데이터 로드 오류가 발생했습니다. 페이지를 새로고침 해주세요.<span class="error-detail">{}</span></div>"#,
        html_escape(detail),
    )
}

pub fn placeholder() -> String {
    r#"<p class="empty-state">데이터를 기다리는 중입니다.</p>"#.to_string()
}
