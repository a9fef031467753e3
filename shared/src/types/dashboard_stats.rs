use serde::Serialize;

/// Which statistic a dashboard card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Exams,
    Users,
    Clients,
    Balance,
}

impl StatKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exams => "Exams",
            Self::Users => "Users",
            Self::Clients => "Partners",
            Self::Balance => "Total balance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StatValue {
    Count(u64),
    Amount(f64),
}

/// One card in the dashboard's statistics strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub kind: StatKind,
    pub label: String,
    pub value: StatValue,
}

impl StatCard {
    pub fn count(kind: StatKind, value: u64) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            value: StatValue::Count(value),
        }
    }

    pub fn amount(kind: StatKind, value: f64) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            value: StatValue::Amount(value),
        }
    }
}

/// Raw numbers gathered from the backend before role gating.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DashboardCounts {
    pub exams: u64,
    pub users: u64,
    pub clients: u64,
    pub total_balance: f64,
}

impl DashboardCounts {
    /// All-zero counts, the fallback for every failed sub-fetch.
    pub fn empty() -> Self {
        Self::default()
    }
}
