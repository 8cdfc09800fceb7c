use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::entities::campaign::{CampaignId, CampaignRecord, CampaignStatus, Ctr};
use crate::domain::entities::snapshot::{MonthlyMetrics, SnapshotData};
use crate::usecase::ports::source::{SnapshotSource, SourceError};

pub const DEFAULT_CAMPAIGN_COUNT: usize = 50;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub struct MockSource {
    rng: StdRng,
    campaign_count: usize,
}

impl MockSource {
    pub fn new(campaign_count: usize) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            campaign_count,
        }
    }

    pub fn seeded(campaign_count: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            campaign_count,
        }
    }

    fn campaign(&mut self, index: usize) -> CampaignRecord {
        let number = index + 1;
        CampaignRecord {
            id: CampaignId(number as u32),
            campaign: format!("Campaign {number}"),
            clicks: self.rng.random_range(1_000..11_000),
            impressions: self.rng.random_range(10_000..110_000),
            ctr: Ctr::from_hundredths(self.rng.random_range(100..600)),
            cost: self.rng.random_range(500..5_500),
            conversions: self.rng.random_range(10..110),
            status: if self.rng.random_bool(0.5) {
                CampaignStatus::Active
            } else {
                CampaignStatus::Paused
            },
        }
    }

    fn month(&mut self, month: &str) -> MonthlyMetrics {
        MonthlyMetrics {
            month: month.to_string(),
            revenue: self.rng.random_range(30_000..80_000),
            users: self.rng.random_range(2_000..7_000),
            conversions: self.rng.random_range(500..1_500),
        }
    }
}

impl SnapshotSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch(&mut self) -> Result<SnapshotData, SourceError> {
        let campaigns = (0..self.campaign_count)
            .map(|index| self.campaign(index))
            .collect();
        let monthly = MONTHS.iter().map(|month| self.month(month)).collect();
        Ok(SnapshotData {
            campaigns,
            monthly: Some(monthly),
        })
    }
}
