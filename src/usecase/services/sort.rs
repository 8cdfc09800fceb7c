use std::cmp::Ordering;

use crate::domain::entities::campaign::CampaignRecord;
use crate::domain::entities::query::{SortDirection, SortField, SortSpec};

pub fn compare_field(field: SortField, a: &CampaignRecord, b: &CampaignRecord) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Campaign => a.campaign.cmp(&b.campaign),
        SortField::Clicks => a.clicks.cmp(&b.clicks),
        SortField::Impressions => a.impressions.cmp(&b.impressions),
        SortField::Ctr => a.ctr.cmp(&b.ctr),
        SortField::Cost => a.cost.cmp(&b.cost),
        SortField::Conversions => a.conversions.cmp(&b.conversions),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

pub fn sort_records(mut records: Vec<&CampaignRecord>, spec: SortSpec) -> Vec<&CampaignRecord> {
    records.sort_by(|a, b| {
        let ordering = compare_field(spec.field, a, b);
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::campaign::{CampaignId, CampaignStatus, Ctr};

    fn record(id: u32, name: &str, clicks: u64, ctr: u32, status: CampaignStatus) -> CampaignRecord {
        CampaignRecord {
            id: CampaignId(id),
            campaign: name.to_string(),
            clicks,
            impressions: 50_000,
            ctr: Ctr::from_hundredths(ctr),
            cost: 1_000,
            conversions: 20,
            status,
        }
    }

    fn sample() -> Vec<CampaignRecord> {
        vec![
            record(1, "Campaign 2", 300, 1_010, CampaignStatus::Paused),
            record(2, "Campaign 10", 100, 250, CampaignStatus::Active),
            record(3, "Campaign 1", 200, 999, CampaignStatus::Paused),
        ]
    }

    fn ids(records: &[&CampaignRecord]) -> Vec<u32> {
        records.iter().map(|record| record.id.0).collect()
    }

    #[test]
    fn numeric_field_sorts_both_directions() {
        let records = sample();

        let asc = sort_records(
            records.iter().collect(),
            SortSpec {
                field: SortField::Clicks,
                direction: SortDirection::Asc,
            },
        );
        let desc = sort_records(
            records.iter().collect(),
            SortSpec {
                field: SortField::Clicks,
                direction: SortDirection::Desc,
            },
        );

        assert_eq!(ids(&asc), vec![2, 3, 1]);
        assert_eq!(ids(&desc), vec![1, 3, 2]);
    }

    #[test]
    fn ctr_sorts_by_value_not_text() {
        let records = sample();

        let sorted = sort_records(
            records.iter().collect(),
            SortSpec {
                field: SortField::Ctr,
                direction: SortDirection::Asc,
            },
        );

        // "10.10" sorts before "9.99" as text; numerically it is the largest.
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
    }

    #[test]
    fn campaign_names_sort_lexicographically() {
        let records = sample();

        let sorted = sort_records(
            records.iter().collect(),
            SortSpec {
                field: SortField::Campaign,
                direction: SortDirection::Asc,
            },
        );

        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn status_sorts_by_name() {
        let records = sample();

        let sorted = sort_records(
            records.iter().collect(),
            SortSpec {
                field: SortField::Status,
                direction: SortDirection::Asc,
            },
        );

        assert_eq!(sorted[0].status, CampaignStatus::Active);
        assert!(sorted[1..].iter().all(|record| record.status == CampaignStatus::Paused));
    }
}
