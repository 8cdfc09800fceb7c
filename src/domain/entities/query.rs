use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::domain::entities::campaign::CampaignStatus;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Paused,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Paused => "paused",
        }
    }

    pub fn admits(self, status: CampaignStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active | StatusFilter::Paused => status.key() == self.as_str(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = FilterOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "paused" => Ok(StatusFilter::Paused),
            _ => Err(FilterOptionError::InvalidStatus(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedBoundPolicy {
    #[default]
    Exclude,
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterOptionError {
    #[error("unknown filter option: {0:?}")]
    UnknownOption(String),
    #[error("invalid status filter: {0:?} (expected all, active or paused)")]
    InvalidStatus(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOption {
    Status,
    MinClicks,
    MaxClicks,
    MinCost,
    MaxCost,
    MinCtr,
    MaxCtr,
    SearchText,
}

impl FilterOption {
    pub const ALL: [FilterOption; 8] = [
        FilterOption::Status,
        FilterOption::MinClicks,
        FilterOption::MaxClicks,
        FilterOption::MinCost,
        FilterOption::MaxCost,
        FilterOption::MinCtr,
        FilterOption::MaxCtr,
        FilterOption::SearchText,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterOption::Status => "status",
            FilterOption::MinClicks => "minClicks",
            FilterOption::MaxClicks => "maxClicks",
            FilterOption::MinCost => "minCost",
            FilterOption::MaxCost => "maxCost",
            FilterOption::MinCtr => "minCTR",
            FilterOption::MaxCtr => "maxCTR",
            FilterOption::SearchText => "searchText",
        }
    }
}

impl FromStr for FilterOption {
    type Err = FilterOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterOption::ALL
            .into_iter()
            .find(|option| option.name() == s)
            .ok_or_else(|| FilterOptionError::UnknownOption(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    #[serde(rename = "minClicks", deserialize_with = "bound_text")]
    pub min_clicks: String,
    #[serde(rename = "maxClicks", deserialize_with = "bound_text")]
    pub max_clicks: String,
    #[serde(rename = "minCost", deserialize_with = "bound_text")]
    pub min_cost: String,
    #[serde(rename = "maxCost", deserialize_with = "bound_text")]
    pub max_cost: String,
    #[serde(rename = "minCTR", deserialize_with = "bound_text")]
    pub min_ctr: String,
    #[serde(rename = "maxCTR", deserialize_with = "bound_text")]
    pub max_ctr: String,
    #[serde(rename = "searchText")]
    pub search_text: String,
}

// Config files may write `minClicks = 1000` as well as `minClicks = "1000"`.
fn bound_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBound {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawBound::deserialize(deserializer)? {
        RawBound::Text(text) => text,
        RawBound::Integer(value) => value.to_string(),
        RawBound::Float(value) => value.to_string(),
    })
}

impl FilterCriteria {
    pub fn with_option(mut self, option: FilterOption, value: &str) -> Result<Self, FilterOptionError> {
        let value = value.to_string();
        match option {
            FilterOption::Status => self.status = value.parse()?,
            FilterOption::MinClicks => self.min_clicks = value,
            FilterOption::MaxClicks => self.max_clicks = value,
            FilterOption::MinCost => self.min_cost = value,
            FilterOption::MaxCost => self.max_cost = value,
            FilterOption::MinCtr => self.min_ctr = value,
            FilterOption::MaxCtr => self.max_ctr = value,
            FilterOption::SearchText => self.search_text = value,
        }
        Ok(self)
    }

    #[allow(dead_code)]
    pub fn set(self, name: &str, value: &str) -> Result<Self, FilterOptionError> {
        let option = name.parse::<FilterOption>()?;
        self.with_option(option, value)
    }

    pub fn option(&self, option: FilterOption) -> &str {
        match option {
            FilterOption::Status => self.status.as_str(),
            FilterOption::MinClicks => &self.min_clicks,
            FilterOption::MaxClicks => &self.max_clicks,
            FilterOption::MinCost => &self.min_cost,
            FilterOption::MaxCost => &self.max_cost,
            FilterOption::MinCtr => &self.min_ctr,
            FilterOption::MaxCtr => &self.max_ctr,
            FilterOption::SearchText => &self.search_text,
        }
    }

    pub fn badges(&self) -> Vec<String> {
        let mut badges = Vec::new();
        if self.status != StatusFilter::All {
            badges.push(format!("Status: {}", self.status.as_str()));
        }
        if let Some((min, max)) = range_labels(&self.min_clicks, &self.max_clicks) {
            badges.push(format!("Clicks: {min} - {max}"));
        }
        if let Some((min, max)) = range_labels(&self.min_cost, &self.max_cost) {
            badges.push(format!("Cost: ${min} - ${max}"));
        }
        if let Some((min, max)) = range_labels(&self.min_ctr, &self.max_ctr) {
            badges.push(format!("CTR: {min}% - {max}%"));
        }
        badges
    }
}

fn range_labels<'a>(min: &'a str, max: &'a str) -> Option<(&'a str, &'a str)> {
    let (min, max) = (min.trim(), max.trim());
    if min.is_empty() && max.is_empty() {
        return None;
    }
    Some((
        if min.is_empty() { "0" } else { min },
        if max.is_empty() { "∞" } else { max },
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    Campaign,
    Clicks,
    Impressions,
    Ctr,
    Cost,
    Conversions,
    Status,
}

impl SortField {
    pub const TABLE: [SortField; 7] = [
        SortField::Campaign,
        SortField::Clicks,
        SortField::Impressions,
        SortField::Ctr,
        SortField::Cost,
        SortField::Conversions,
        SortField::Status,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Campaign => "campaign",
            SortField::Clicks => "clicks",
            SortField::Impressions => "impressions",
            SortField::Ctr => "ctr",
            SortField::Cost => "cost",
            SortField::Conversions => "conversions",
            SortField::Status => "status",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortField::Id => "ID",
            SortField::Campaign => "Campaign",
            SortField::Clicks => "Clicks",
            SortField::Impressions => "Impressions",
            SortField::Ctr => "CTR (%)",
            SortField::Cost => "Cost ($)",
            SortField::Conversions => "Conversions",
            SortField::Status => "Status",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Clicks,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    pub fn select(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.toggled(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Desc,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(PageSize)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(NonZeroUsize::MIN.saturating_add(DEFAULT_PAGE_SIZE - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_new_field_starts_descending() {
        let spec = SortSpec {
            field: SortField::Cost,
            direction: SortDirection::Asc,
        };

        let next = spec.select(SortField::Campaign);

        assert_eq!(next.field, SortField::Campaign);
        assert_eq!(next.direction, SortDirection::Desc);
    }

    #[test]
    fn reselecting_active_field_flips_direction_and_back() {
        let spec = SortSpec::default();

        let once = spec.select(SortField::Clicks);
        let twice = once.select(SortField::Clicks);

        assert_eq!(once.direction, SortDirection::Asc);
        assert_eq!(twice, spec);
    }

    #[test]
    fn default_sort_is_clicks_descending() {
        let spec = SortSpec::default();
        assert_eq!(spec.field, SortField::Clicks);
        assert_eq!(spec.direction, SortDirection::Desc);
    }

    #[test]
    fn options_are_set_by_external_name() {
        let criteria = FilterCriteria::default()
            .set("status", "Paused")
            .and_then(|c| c.set("minCTR", "2.5"))
            .and_then(|c| c.set("searchText", "campaign 1"))
            .expect("known options should apply");

        assert_eq!(criteria.status, StatusFilter::Paused);
        assert_eq!(criteria.min_ctr, "2.5");
        assert_eq!(criteria.search_text, "campaign 1");
        assert_eq!(criteria.option(FilterOption::MaxCost), "");
    }

    #[test]
    fn unknown_option_and_status_are_rejected() {
        assert_eq!(
            FilterCriteria::default().set("minBudget", "1"),
            Err(FilterOptionError::UnknownOption("minBudget".to_string()))
        );
        assert_eq!(
            FilterCriteria::default().set("status", "archived"),
            Err(FilterOptionError::InvalidStatus("archived".to_string()))
        );
    }

    #[test]
    fn blank_criteria_have_no_badges() {
        let mut criteria = FilterCriteria::default();
        assert!(criteria.badges().is_empty());

        criteria.max_clicks = "   ".to_string();
        assert!(criteria.badges().is_empty(), "whitespace bound is blank");

        criteria.min_cost = "100".to_string();
        assert_eq!(criteria.badges(), vec!["Cost: $100 - $∞".to_string()]);
    }

    #[test]
    fn badges_fill_absent_sides() {
        let criteria = FilterCriteria {
            status: StatusFilter::Active,
            min_clicks: "500".to_string(),
            max_ctr: "3".to_string(),
            ..FilterCriteria::default()
        };

        assert_eq!(
            criteria.badges(),
            vec![
                "Status: active".to_string(),
                "Clicks: 500 - ∞".to_string(),
                "CTR: 0% - 3%".to_string(),
            ]
        );
    }

    #[test]
    fn status_filter_matches_lower_case_name() {
        assert!(StatusFilter::All.admits(CampaignStatus::Paused));
        assert!(StatusFilter::Active.admits(CampaignStatus::Active));
        assert!(!StatusFilter::Active.admits(CampaignStatus::Paused));
    }

    #[test]
    fn page_size_rejects_zero() {
        assert!(PageSize::new(0).is_none());
        assert_eq!(PageSize::default().get(), DEFAULT_PAGE_SIZE);
    }
}
