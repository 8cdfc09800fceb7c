use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::domain::entities::campaign::CampaignRecord;
use crate::domain::entities::query::{MalformedBoundPolicy, PageSize};
use crate::domain::entities::snapshot::DashboardSnapshot;
use crate::usecase::services::export_service::{
    export_csv, export_report, ExportDocument, ExportFormat,
};
use crate::usecase::services::filter::filter_records;
use crate::usecase::services::paginate::{paginate, PageResult};
use crate::usecase::services::sort::sort_records;
use crate::usecase::services::view_controller::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryService {
    page_size: PageSize,
    policy: MalformedBoundPolicy,
}

impl QueryService {
    pub fn new(page_size: PageSize, policy: MalformedBoundPolicy) -> Self {
        Self { page_size, policy }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn policy(&self) -> MalformedBoundPolicy {
        self.policy
    }

    pub fn ordered<'a>(&self, records: &'a [CampaignRecord], state: &ViewState) -> Vec<&'a CampaignRecord> {
        let filtered = filter_records(records, &state.criteria, self.policy);
        sort_records(filtered, state.sort)
    }

    pub fn query_page<'a>(
        &self,
        records: &'a [CampaignRecord],
        state: &ViewState,
    ) -> PageResult<&'a CampaignRecord> {
        let ordered = self.ordered(records, state);
        let page = paginate(&ordered, state.page, self.page_size);
        debug!(
            total = records.len(),
            filtered = page.total_rows,
            page = page.page,
            total_pages = page.total_pages,
            "ran dashboard query"
        );
        page
    }

    pub fn export(
        &self,
        snapshot: &DashboardSnapshot,
        state: &ViewState,
        format: ExportFormat,
        generated_on: NaiveDate,
    ) -> Result<ExportDocument> {
        let ordered = self.ordered(&snapshot.campaigns, state);
        let contents = match format {
            ExportFormat::Csv => export_csv(&ordered)?,
            ExportFormat::Report => export_report(&ordered, &snapshot.metrics(), generated_on),
        };
        info!(format = format.label(), rows = ordered.len(), "exported dashboard view");
        Ok(ExportDocument {
            format,
            contents,
            rows: ordered.len(),
        })
    }
}

impl Default for QueryService {
    fn default() -> Self {
        Self::new(PageSize::default(), MalformedBoundPolicy::default())
    }
}
