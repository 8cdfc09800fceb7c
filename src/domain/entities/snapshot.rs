use chrono::{DateTime, Local};

use crate::domain::entities::campaign::CampaignRecord;

pub const GROWTH_RATE_PERCENT: f64 = 12.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyMetrics {
    pub month: String,
    pub revenue: u64,
    pub users: u64,
    pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapshotData {
    pub campaigns: Vec<CampaignRecord>,
    pub monthly: Option<Vec<MonthlyMetrics>>,
}

#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub generation: u64,
    pub generated_at: DateTime<Local>,
    pub campaigns: Vec<CampaignRecord>,
    pub monthly: Vec<MonthlyMetrics>,
}

impl DashboardSnapshot {
    pub fn new(generation: u64, campaigns: Vec<CampaignRecord>, monthly: Vec<MonthlyMetrics>) -> Self {
        Self {
            generation,
            generated_at: Local::now(),
            campaigns,
            monthly,
        }
    }

    pub fn metrics(&self) -> ReportMetrics {
        ReportMetrics::from_series(&self.monthly)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportMetrics {
    pub total_revenue: u64,
    pub total_users: u64,
    pub total_conversions: u64,
    pub growth_rate: f64,
}

impl ReportMetrics {
    pub fn from_series(series: &[MonthlyMetrics]) -> Self {
        Self {
            total_revenue: series.iter().map(|point| point.revenue).sum(),
            total_users: series.iter().map(|point| point.users).sum(),
            total_conversions: series.iter().map(|point| point.conversions).sum(),
            growth_rate: GROWTH_RATE_PERCENT,
        }
    }

    pub fn revenue_label(&self) -> String {
        format!("{:.1}M", self.total_revenue as f64 / 1_000_000.0)
    }

    pub fn users_label(&self) -> String {
        format!("{:.1}K", self.total_users as f64 / 1_000.0)
    }

    pub fn conversions_label(&self) -> String {
        format!("{:.1}K", self.total_conversions as f64 / 1_000.0)
    }

    pub fn growth_label(&self) -> String {
        format!("{}%", self.growth_rate)
    }
}
