use tracing::warn;

use crate::domain::entities::campaign::CampaignRecord;
use crate::domain::entities::query::{FilterCriteria, MalformedBoundPolicy, StatusFilter};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    Absent,
    Value(f64),
    Malformed,
}

impl Bound {
    fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Bound::Absent;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Bound::Value(value),
            _ => Bound::Malformed,
        }
    }

    fn truncated(self) -> Self {
        match self {
            Bound::Value(value) => Bound::Value(value.trunc()),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct RangeClause {
    min: Bound,
    max: Bound,
}

impl RangeClause {
    fn parse(min: &str, max: &str) -> Self {
        Self {
            min: Bound::parse(min),
            max: Bound::parse(max),
        }
    }

    fn integer(min: &str, max: &str) -> Self {
        let clause = Self::parse(min, max);
        Self {
            min: clause.min.truncated(),
            max: clause.max.truncated(),
        }
    }

    fn is_malformed(&self) -> bool {
        self.min == Bound::Malformed || self.max == Bound::Malformed
    }

    fn admits(&self, value: f64, policy: MalformedBoundPolicy) -> bool {
        let lower = match self.min {
            Bound::Absent => true,
            Bound::Value(min) => value >= min,
            Bound::Malformed => policy == MalformedBoundPolicy::Ignore,
        };
        let upper = match self.max {
            Bound::Absent => true,
            Bound::Value(max) => value <= max,
            Bound::Malformed => policy == MalformedBoundPolicy::Ignore,
        };
        lower && upper
    }
}

#[derive(Debug, Clone)]
pub struct CompiledFilter {
    search: String,
    status: StatusFilter,
    clicks: RangeClause,
    cost: RangeClause,
    ctr: RangeClause,
    policy: MalformedBoundPolicy,
}

impl CompiledFilter {
    pub fn new(criteria: &FilterCriteria, policy: MalformedBoundPolicy) -> Self {
        let compiled = Self {
            search: criteria.search_text.to_lowercase(),
            status: criteria.status,
            clicks: RangeClause::integer(&criteria.min_clicks, &criteria.max_clicks),
            cost: RangeClause::integer(&criteria.min_cost, &criteria.max_cost),
            ctr: RangeClause::parse(&criteria.min_ctr, &criteria.max_ctr),
            policy,
        };

        for (name, clause) in [
            ("clicks", &compiled.clicks),
            ("cost", &compiled.cost),
            ("ctr", &compiled.ctr),
        ] {
            if clause.is_malformed() {
                warn!(clause = name, ?policy, "malformed numeric filter bound");
            }
        }

        compiled
    }

    pub fn matches(&self, record: &CampaignRecord) -> bool {
        self.matches_search(record)
            && self.status.admits(record.status)
            && self.clicks.admits(record.clicks as f64, self.policy)
            && self.cost.admits(record.cost as f64, self.policy)
            && self.ctr.admits(record.ctr.value(), self.policy)
    }

    fn matches_search(&self, record: &CampaignRecord) -> bool {
        self.search.is_empty() || record.campaign.to_lowercase().contains(&self.search)
    }
}

pub fn filter_records<'a>(
    records: &'a [CampaignRecord],
    criteria: &FilterCriteria,
    policy: MalformedBoundPolicy,
) -> Vec<&'a CampaignRecord> {
    let filter = CompiledFilter::new(criteria, policy);
    records.iter().filter(|record| filter.matches(record)).collect()
}
