//! Canonical status and milestone vocabulary.
//!
//! The snapshot file carries Korean status labels from two generations
//! of the tracking sheet ("완료/진행중/대기/신규/주의" and
//! "정상/초과/미집행"). Both sets map into one enum so every display
//! surface shares a single color/emoji/priority table instead of the
//! drifting per-page lookups the legacy dashboards accumulated.

/// Per-unit execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// 완료
    Done,
    /// 진행중
    InProgress,
    /// 대기
    Waiting,
    /// 신규
    New,
    /// 주의
    Caution,
    /// 정상
    Normal,
    /// 초과
    Over,
    /// 미집행
    NotExecuted,
    /// Anything outside the closed set.
    Unknown,
}

pub const DEFAULT_STATUS_COLOR: &str = "#6B7280";
pub const DEFAULT_STATUS_EMOJI: &str = "📋";

impl Status {
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "완료" => Status::Done,
            "진행중" => Status::InProgress,
            "대기" => Status::Waiting,
            "신규" => Status::New,
            "주의" => Status::Caution,
            "정상" => Status::Normal,
            "초과" => Status::Over,
            "미집행" => Status::NotExecuted,
            _ => Status::Unknown,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Status::Done => "#10B981",
            Status::InProgress => "#3B82F6",
            Status::Waiting => "#6B7280",
            Status::New => "#8B5CF6",
            Status::Caution => "#EF4444",
            Status::Normal => "#10B981",
            Status::Over => "#EF4444",
            Status::NotExecuted => "#6B7280",
            Status::Unknown => DEFAULT_STATUS_COLOR,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Status::Done => "✅",
            Status::InProgress => "🔄",
            Status::Waiting => "⏸️",
            Status::New => "🆕",
            Status::Caution => "🔴",
            Status::Normal => "🟢",
            Status::Over => "🔴",
            Status::NotExecuted => "⚪",
            Status::Unknown => DEFAULT_STATUS_EMOJI,
        }
    }

    /// Sort key for the priority-sorted table: over-execution first,
    /// then untouched budgets, then watch-listed, then healthy rows.
    pub fn priority(&self) -> u8 {
        match self {
            Status::Over => 0,
            Status::NotExecuted => 1,
            Status::Caution => 2,
            Status::Normal => 3,
            _ => 4,
        }
    }
}

/// Milestone category (보고/계약/착수/점검/마감).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneKind {
    Report,
    Contract,
    Kickoff,
    Inspection,
    Deadline,
    Unknown,
}

impl MilestoneKind {
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "보고" => MilestoneKind::Report,
            "계약" => MilestoneKind::Contract,
            "착수" => MilestoneKind::Kickoff,
            "점검" => MilestoneKind::Inspection,
            "마감" => MilestoneKind::Deadline,
            _ => MilestoneKind::Unknown,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MilestoneKind::Report => "📝",
            MilestoneKind::Contract => "📄",
            MilestoneKind::Kickoff => "🚀",
            MilestoneKind::Inspection => "🔍",
            MilestoneKind::Deadline => "📅",
            MilestoneKind::Unknown => "📌",
        }
    }
}

/// Milestone status display label. Labels outside the closed set pass
/// through unchanged (the sheet occasionally grows ad-hoc states).
pub fn milestone_status_label(status: &str) -> String {
    match status.trim() {
        "완료" => "✅ 완료".to_string(),
        "예정" => "📅 예정".to_string(),
        "진행중" => "🔄 진행중".to_string(),
        other => other.to_string(),
    }
}

pub fn milestone_is_done(status: &str) -> bool {
    status.trim() == "완료"
}

/// Execution-rate color band. One rule, used by every surface that
/// colors a rate: the executed-amount card, progress bars, and the
/// validate tool all classify through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateBand {
    /// rate < low threshold
    Low,
    /// low <= rate < high
    Mid,
    /// rate >= high
    High,
}

impl RateBand {
    pub fn classify(rate: f64, low: f64, high: f64) -> Self {
        if rate < low {
            RateBand::Low
        } else if rate < high {
            RateBand::Mid
        } else {
            RateBand::High
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RateBand::Low => "#EF4444",
            RateBand::Mid => "#F59E0B",
            RateBand::High => "#10B981",
        }
    }
}
