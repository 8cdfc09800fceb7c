use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use tracing::{debug, info};

use crate::domain::entities::campaign::CampaignRecord;
use crate::domain::entities::query::{FilterCriteria, SortField, SortSpec};
use crate::domain::entities::snapshot::{ReportMetrics, SnapshotData};
use crate::usecase::services::export_service::{ExportDocument, ExportFormat};
use crate::usecase::services::filter::filter_records;
use crate::usecase::services::paginate::{total_pages, PageRequest, PageResult};
use crate::usecase::services::query_service::QueryService;
use crate::usecase::services::record_store::RecordStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub criteria: FilterCriteria,
    pub sort: SortSpec,
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(FilterCriteria::default(), SortSpec::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    FiltersApplied(FilterCriteria),
    SearchChanged(String),
    FiltersCleared,
    SortRequested(SortField),
    PageRequested(PageRequest),
}

impl ViewState {
    pub fn new(criteria: FilterCriteria, sort: SortSpec) -> Self {
        Self {
            criteria,
            sort,
            page: 1,
        }
    }

    pub fn apply(&self, event: ViewEvent, total_pages: usize) -> ViewState {
        match event {
            ViewEvent::FiltersApplied(criteria) => ViewState {
                criteria,
                sort: self.sort,
                page: 1,
            },
            ViewEvent::SearchChanged(search_text) => ViewState {
                criteria: FilterCriteria {
                    search_text,
                    ..self.criteria.clone()
                },
                sort: self.sort,
                page: 1,
            },
            ViewEvent::FiltersCleared => ViewState {
                criteria: FilterCriteria {
                    search_text: self.criteria.search_text.clone(),
                    ..FilterCriteria::default()
                },
                sort: self.sort,
                page: 1,
            },
            ViewEvent::SortRequested(field) => ViewState {
                criteria: self.criteria.clone(),
                sort: self.sort.select(field),
                page: self.page,
            },
            ViewEvent::PageRequested(request) => ViewState {
                criteria: self.criteria.clone(),
                sort: self.sort,
                page: request.resolve(self.page, total_pages),
            },
        }
    }
}

pub struct DashboardView<'a> {
    pub page: PageResult<&'a CampaignRecord>,
    pub metrics: ReportMetrics,
    pub sort: SortSpec,
    pub loading: bool,
    pub generation: u64,
    pub generated_at: DateTime<Local>,
}

impl<'a> DashboardView<'a> {
    pub fn visible_rows(&self) -> Option<&[&'a CampaignRecord]> {
        if self.loading {
            None
        } else {
            Some(&self.page.window)
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardController {
    store: RecordStore,
    state: ViewState,
    query: QueryService,
    loading: bool,
}

impl DashboardController {
    pub fn new(data: SnapshotData, state: ViewState, query: QueryService) -> Self {
        Self {
            store: RecordStore::new(data),
            state,
            query,
            loading: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        let pages = match event {
            ViewEvent::PageRequested(_) => self.total_pages(),
            _ => 0,
        };
        let next = self.state.apply(event, pages);
        debug!(page = next.page, sort = %next.sort.field, "view state updated");
        self.state = next;
    }

    pub fn total_pages(&self) -> usize {
        let snapshot = self.store.current();
        let filtered = filter_records(&snapshot.campaigns, &self.state.criteria, self.query.policy());
        total_pages(filtered.len(), self.query.page_size())
    }

    pub fn view(&self) -> DashboardView<'_> {
        let snapshot = self.store.current();
        DashboardView {
            page: self.query.query_page(&snapshot.campaigns, &self.state),
            metrics: snapshot.metrics(),
            sort: self.state.sort,
            loading: self.loading,
            generation: snapshot.generation,
            generated_at: snapshot.generated_at,
        }
    }

    pub fn export(&self, format: ExportFormat, generated_on: NaiveDate) -> Result<ExportDocument> {
        self.query
            .export(self.store.current(), &self.state, format, generated_on)
    }

    pub fn begin_refresh(&mut self) -> bool {
        let started = !self.loading;
        self.loading = true;
        started
    }

    pub fn complete_refresh(&mut self, data: SnapshotData) {
        self.store.replace(data);
        self.clamp_page();
        self.loading = false;
    }

    pub fn abort_refresh(&mut self) {
        if self.loading {
            info!("refresh abandoned; keeping current snapshot");
        }
        self.loading = false;
    }

    pub fn replace_snapshot(&mut self, data: SnapshotData) {
        self.store.replace(data);
        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        let last = self.total_pages();
        if self.state.page > last {
            debug!(page = self.state.page, last, "page past the end of the new snapshot");
            self.state.page = last;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::campaign::{CampaignId, CampaignStatus, Ctr};
    use crate::domain::entities::query::{
        MalformedBoundPolicy, PageSize, SortDirection, StatusFilter,
    };

    fn campaigns(count: u32) -> Vec<CampaignRecord> {
        (1..=count)
            .map(|id| CampaignRecord {
                id: CampaignId(id),
                campaign: format!("Campaign {id}"),
                clicks: u64::from(id) * 100,
                impressions: u64::from(id) * 1_000,
                ctr: Ctr::from_hundredths(100 + id),
                cost: u64::from(id) * 50,
                conversions: u64::from(id),
                status: if id % 2 == 0 {
                    CampaignStatus::Active
                } else {
                    CampaignStatus::Paused
                },
            })
            .collect()
    }

    fn controller(count: u32) -> DashboardController {
        DashboardController::new(
            SnapshotData {
                campaigns: campaigns(count),
                monthly: None,
            },
            ViewState::default(),
            QueryService::new(
                PageSize::new(10).expect("non-zero"),
                MalformedBoundPolicy::Exclude,
            ),
        )
    }

    #[test]
    fn sort_request_keeps_page_and_toggles() {
        let state = ViewState {
            page: 3,
            ..ViewState::default()
        };

        let next = state.apply(ViewEvent::SortRequested(SortField::Clicks), 5);

        assert_eq!(next.page, 3);
        assert_eq!(next.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn clearing_filters_resets_criteria_and_page() {
        let state = ViewState {
            criteria: FilterCriteria {
                status: StatusFilter::Paused,
                min_cost: "10".to_string(),
                search_text: "launch".to_string(),
                ..FilterCriteria::default()
            },
            sort: SortSpec::default(),
            page: 2,
        };

        let next = state.apply(ViewEvent::FiltersCleared, 4);

        assert_eq!(next.page, 1);
        assert_eq!(next.criteria.status, StatusFilter::All);
        assert_eq!(next.criteria.min_cost, "");
        assert_eq!(next.criteria.search_text, "launch", "search box is separate");
    }

    #[test]
    fn search_change_resets_page() {
        let state = ViewState {
            page: 4,
            ..ViewState::default()
        };

        let next = state.apply(ViewEvent::SearchChanged("Campaign 1".to_string()), 5);

        assert_eq!(next.page, 1);
        assert_eq!(next.criteria.search_text, "Campaign 1");
    }

    #[test]
    fn page_navigation_is_bounded_by_result() {
        let mut dashboard = controller(25);

        dashboard.dispatch(ViewEvent::PageRequested(PageRequest::Goto(99)));
        assert_eq!(dashboard.state().page, 3);

        dashboard.dispatch(ViewEvent::PageRequested(PageRequest::Next));
        assert_eq!(dashboard.state().page, 3);

        dashboard.dispatch(ViewEvent::PageRequested(PageRequest::Previous));
        assert_eq!(dashboard.state().page, 2);
    }

    #[test]
    fn loading_withholds_rows_until_refresh_completes() {
        let mut dashboard = controller(12);

        assert!(dashboard.begin_refresh());
        assert!(!dashboard.begin_refresh(), "second refresh joins the pending one");
        assert!(dashboard.view().visible_rows().is_none());

        dashboard.complete_refresh(SnapshotData {
            campaigns: campaigns(3),
            monthly: None,
        });

        let view = dashboard.view();
        assert!(!view.loading);
        assert_eq!(view.visible_rows().map(<[_]>::len), Some(3));
        assert_eq!(view.generation, 2);
    }

    #[test]
    fn events_still_apply_while_loading() {
        let mut dashboard = controller(30);
        dashboard.begin_refresh();

        dashboard.dispatch(ViewEvent::SortRequested(SortField::Cost));

        assert_eq!(dashboard.state().sort.field, SortField::Cost);
        assert!(dashboard.is_loading());
    }

    #[test]
    fn refresh_preserves_view_state() {
        let mut dashboard = controller(40);
        dashboard.dispatch(ViewEvent::FiltersApplied(FilterCriteria {
            status: StatusFilter::Active,
            ..FilterCriteria::default()
        }));
        dashboard.dispatch(ViewEvent::SortRequested(SortField::Cost));
        dashboard.dispatch(ViewEvent::PageRequested(PageRequest::Next));
        let before = dashboard.state().clone();

        dashboard.replace_snapshot(SnapshotData {
            campaigns: campaigns(40),
            monthly: None,
        });

        assert_eq!(dashboard.state(), &before);
        let view = dashboard.view();
        assert_eq!(view.page.page, 2);
        assert!(view
            .page
            .window
            .iter()
            .all(|record| record.status == CampaignStatus::Active));
    }

    #[test]
    fn smaller_snapshot_pulls_page_back_to_last() {
        let mut dashboard = controller(50);
        dashboard.dispatch(ViewEvent::PageRequested(PageRequest::Goto(4)));

        dashboard.replace_snapshot(SnapshotData {
            campaigns: campaigns(12),
            monthly: None,
        });

        let view = dashboard.view();
        assert_eq!(view.page.page, 2);
        assert_eq!(view.page.total_pages, 2);
        assert_eq!(view.page.window.len(), 2);
        assert_eq!(view.page.summary(), "Showing 11 to 12 of 12 results");
    }

    #[test]
    fn completed_refresh_keeps_a_page_that_still_exists() {
        let mut dashboard = controller(50);
        dashboard.dispatch(ViewEvent::PageRequested(PageRequest::Goto(3)));
        dashboard.begin_refresh();

        dashboard.complete_refresh(SnapshotData {
            campaigns: campaigns(45),
            monthly: None,
        });
        assert_eq!(dashboard.state().page, 3);

        dashboard.begin_refresh();
        dashboard.complete_refresh(SnapshotData::default());
        assert_eq!(dashboard.state().page, 1, "empty snapshot still has one page");
    }

    #[test]
    fn aborted_refresh_leaves_snapshot_and_view_alone() {
        let mut dashboard = controller(25);
        dashboard.dispatch(ViewEvent::SortRequested(SortField::Cost));
        dashboard.dispatch(ViewEvent::PageRequested(PageRequest::Next));
        let state = dashboard.state().clone();
        let rows: Vec<CampaignRecord> = dashboard.view().page.window.into_iter().cloned().collect();

        dashboard.begin_refresh();
        dashboard.abort_refresh();

        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.state(), &state);
        let view = dashboard.view();
        assert_eq!(view.generation, 1);
        let after: Vec<CampaignRecord> = view.page.window.into_iter().cloned().collect();
        assert_eq!(after, rows);
    }

    #[test]
    fn export_ignores_current_page() {
        let mut dashboard = controller(25);
        dashboard.dispatch(ViewEvent::PageRequested(PageRequest::Last));

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        let document = dashboard
            .export(ExportFormat::Csv, date)
            .expect("csv export should succeed");

        assert_eq!(document.rows, 25);
        assert_eq!(document.contents.lines().count(), 26);
    }
}
