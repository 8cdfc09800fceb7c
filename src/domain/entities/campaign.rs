use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CampaignId(pub u32);

impl From<u32> for CampaignId {
    fn from(value: u32) -> Self {
        CampaignId(value)
    }
}

impl From<CampaignId> for u32 {
    fn from(value: CampaignId) -> Self {
        value.0
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ctr(u32);

impl Ctr {
    pub fn from_hundredths(hundredths: u32) -> Self {
        Ctr(hundredths)
    }

    #[cfg(test)]
    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Ctr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid ctr value: {0:?}")]
pub struct CtrParseError(pub String);

impl FromStr for Ctr {
    type Err = CtrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%');
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| CtrParseError(s.to_string()))?;
        if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) / 100.0 {
            return Err(CtrParseError(s.to_string()));
        }
        Ok(Ctr((value * 100.0).round() as u32))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CampaignStatus {
    Active,
    Paused,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CampaignStatus::Active => "Active",
            CampaignStatus::Paused => "Paused",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown campaign status: {0:?}")]
pub struct StatusParseError(pub String);

impl FromStr for CampaignStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(CampaignStatus::Active),
            "paused" => Ok(CampaignStatus::Paused),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignRecord {
    pub id: CampaignId,
    pub campaign: String,
    pub clicks: u64,
    pub impressions: u64,
    pub ctr: Ctr,
    pub cost: u64,
    pub conversions: u64,
    pub status: CampaignStatus,
}

pub const CAMPAIGN_COLUMNS: [&str; 8] = [
    "id",
    "campaign",
    "clicks",
    "impressions",
    "ctr",
    "cost",
    "conversions",
    "status",
];

impl CampaignRecord {
    pub fn to_fields(&self) -> [String; 8] {
        [
            self.id.to_string(),
            self.campaign.clone(),
            self.clicks.to_string(),
            self.impressions.to_string(),
            self.ctr.to_string(),
            self.cost.to_string(),
            self.conversions.to_string(),
            self.status.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctr_displays_two_fraction_digits() {
        assert_eq!(Ctr::from_hundredths(305).to_string(), "3.05");
        assert_eq!(Ctr::from_hundredths(100).to_string(), "1.00");
        assert_eq!(Ctr::from_hundredths(7).to_string(), "0.07");
    }

    #[test]
    fn ctr_parses_fixed_precision_text() {
        assert_eq!("4.56".parse::<Ctr>(), Ok(Ctr::from_hundredths(456)));
        assert_eq!("2.1%".parse::<Ctr>(), Ok(Ctr::from_hundredths(210)));
        assert!("abc".parse::<Ctr>().is_err());
        assert!("-1.00".parse::<Ctr>().is_err());
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!("ACTIVE".parse::<CampaignStatus>(), Ok(CampaignStatus::Active));
        assert_eq!(" paused ".parse::<CampaignStatus>(), Ok(CampaignStatus::Paused));
        assert!("archived".parse::<CampaignStatus>().is_err());
    }

    #[test]
    fn status_orders_by_display_name() {
        assert!(CampaignStatus::Active < CampaignStatus::Paused);
    }
}
