use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::domain::entities::campaign::{CampaignId, CampaignRecord, CampaignStatus, Ctr, CAMPAIGN_COLUMNS};
use crate::domain::entities::snapshot::SnapshotData;
use crate::usecase::ports::source::{SnapshotSource, SourceError};

#[derive(Debug, Deserialize)]
struct CampaignRow {
    id: u32,
    campaign: String,
    clicks: u64,
    impressions: u64,
    ctr: String,
    cost: u64,
    conversions: u64,
    status: String,
}

impl CampaignRow {
    fn into_record(self) -> Result<CampaignRecord> {
        if self.id == 0 {
            anyhow::bail!("campaign id must be positive")
        }
        let campaign = self.campaign.trim().to_string();
        if campaign.is_empty() {
            anyhow::bail!("campaign #{} has an empty name", self.id)
        }
        let ctr = self.ctr.parse::<Ctr>()?;
        let status = self.status.parse::<CampaignStatus>()?;

        Ok(CampaignRecord {
            id: CampaignId(self.id),
            campaign,
            clicks: self.clicks,
            impressions: self.impressions,
            ctr,
            cost: self.cost,
            conversions: self.conversions,
            status,
        })
    }
}

pub fn load_campaigns_csv(csv_path: &Path) -> Result<Vec<CampaignRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    let missing = CAMPAIGN_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .copied()
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        anyhow::bail!("csv is missing columns: {}", missing.join(", "))
    }

    let mut seen_ids = BTreeSet::new();
    let mut records = Vec::new();
    for (row_idx, row) in reader.deserialize::<CampaignRow>().enumerate() {
        // Header is line 1.
        let line = row_idx + 2;
        let row = row.with_context(|| format!("failed to parse csv record on line {line}"))?;
        let record = row
            .into_record()
            .with_context(|| format!("invalid campaign on line {line}"))?;
        if !seen_ids.insert(record.id) {
            anyhow::bail!("duplicate campaign id {} on line {line}", record.id)
        }
        records.push(record);
    }

    info!(path = %csv_path.display(), rows = records.len(), "imported campaigns from csv");
    Ok(records)
}

pub struct CsvSource {
    pub csv_path: PathBuf,
}

impl SnapshotSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&mut self) -> Result<SnapshotData, SourceError> {
        let campaigns = load_campaigns_csv(&self.csv_path)
            .map_err(|err| SourceError::Message(format!("{err:#}")))?;
        if campaigns.is_empty() {
            return Err(SourceError::Empty);
        }
        Ok(SnapshotData {
            campaigns,
            monthly: None,
        })
    }
}
