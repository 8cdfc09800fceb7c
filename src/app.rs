use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Local};
use dioxus::prelude::*;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::entities::campaign::{CampaignRecord, CampaignStatus};
use crate::domain::entities::query::{FilterCriteria, FilterOption, SortField, SortSpec};
use crate::domain::entities::schedule::{weekday_name, Frequency, ScheduleForm, WEEKDAYS};
use crate::domain::entities::snapshot::{ReportMetrics, SnapshotData};
use crate::infra::import::csv::CsvSource;
use crate::infra::notify::log_delivery::LogDelivery;
use crate::platform::desktop::download::{pick_import_file, save_export};
use crate::platform::desktop::timers::{RefreshTick, RefreshTimers};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::source::SnapshotSource;
use crate::usecase::services::export_service::ExportFormat;
use crate::usecase::services::paginate::PageRequest;
use crate::usecase::services::schedule_service::ScheduleService;
use crate::usecase::services::view_controller::{DashboardController, ViewEvent};

#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    pub rows: Option<Vec<CampaignRecord>>,
    pub summary: String,
    pub page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub sort: SortSpec,
    pub metrics: ReportMetrics,
    pub generation: u64,
    pub updated_at: String,
}

impl TableModel {
    pub fn from_controller(controller: &DashboardController) -> Self {
        let view = controller.view();
        Self {
            rows: view
                .visible_rows()
                .map(|rows| rows.iter().map(|record| (*record).clone()).collect()),
            summary: view.page.summary(),
            page: view.page.page,
            total_pages: view.page.total_pages,
            has_previous: view.page.has_previous(),
            has_next: view.page.has_next(),
            sort: view.sort,
            metrics: view.metrics,
            generation: view.generation,
            updated_at: clock_label(view.generated_at),
        }
    }
}

fn clock_label(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

pub fn submit_schedule_form(
    service: &ScheduleService,
    form: &mut ScheduleForm,
) -> Result<String, String> {
    let request = service.submit(form).map_err(|err| err.to_string())?;
    *form = ScheduleForm::default();
    Ok(request.confirmation())
}

pub fn header_label(field: SortField, sort: SortSpec) -> String {
    if sort.field == field {
        format!("{} {}", field.label(), sort.direction.arrow())
    } else {
        field.label().to_string()
    }
}

pub fn cell_text(record: &CampaignRecord, field: SortField) -> String {
    match field {
        SortField::Id => record.id.to_string(),
        SortField::Campaign => record.campaign.clone(),
        SortField::Clicks => record.clicks.to_string(),
        SortField::Impressions => record.impressions.to_string(),
        SortField::Ctr => format!("{}%", record.ctr),
        SortField::Cost => format!("${}", record.cost),
        SortField::Conversions => record.conversions.to_string(),
        SortField::Status => record.status.to_string(),
    }
}

fn column_alignment(field: SortField) -> &'static str {
    match field {
        SortField::Campaign | SortField::Status => "left",
        _ => "right",
    }
}

pub fn status_pill_style(status: CampaignStatus) -> &'static str {
    match status {
        CampaignStatus::Active => {
            "padding: 2px 8px; border-radius: 10px; background: #d4edda; color: #155724;"
        }
        CampaignStatus::Paused => {
            "padding: 2px 8px; border-radius: 10px; background: #f8d7da; color: #721c24;"
        }
    }
}

fn filter_input_label(option: FilterOption) -> &'static str {
    match option {
        FilterOption::Status => "Status",
        FilterOption::MinClicks => "Min clicks",
        FilterOption::MaxClicks => "Max clicks",
        FilterOption::MinCost => "Min cost ($)",
        FilterOption::MaxCost => "Max cost ($)",
        FilterOption::MinCtr => "Min CTR (%)",
        FilterOption::MaxCtr => "Max CTR (%)",
        FilterOption::SearchText => "Search",
    }
}

const BOUND_OPTIONS: [FilterOption; 6] = [
    FilterOption::MinClicks,
    FilterOption::MaxClicks,
    FilterOption::MinCost,
    FilterOption::MaxCost,
    FilterOption::MinCtr,
    FilterOption::MaxCtr,
];

fn table_header_cell_style() -> &'static str {
    "border: 1px solid #bbb; padding: 6px; background: #f3f3f3; cursor: pointer; user-select: none; white-space: nowrap;"
}

fn panel_style() -> &'static str {
    "border: 1px solid #ccc; border-radius: 6px; padding: 12px; margin: 8px 0; display: flex; gap: 12px; flex-wrap: wrap; align-items: flex-end;"
}

#[component]
fn MetricCard(title: &'static str, value: String) -> Element {
    rsx! {
        div {
            style: "flex: 1; min-width: 160px; border: 1px solid #ddd; border-radius: 6px; padding: 12px;",
            div { style: "color: #666; font-size: 12px;", "{title}" }
            div { style: "font-size: 22px; font-weight: bold;", "{value}" }
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let refresh_interval = config.refresh_interval();
    let refresh_latency = config.refresh_latency();

    let source = use_hook(|| Rc::new(RefCell::new(config.mock_source())));
    let source_for_init = source.clone();
    let config_for_init = config.clone();
    let state = AppState::new(move || {
        let data = match source_for_init.borrow_mut().fetch() {
            Ok(data) => data,
            Err(err) => {
                warn!(error = %err, "initial fetch failed; starting empty");
                SnapshotData::default()
            }
        };
        DashboardController::new(
            data,
            config_for_init.initial_view(),
            config_for_init.query_service(),
        )
    });
    let AppState {
        mut controller,
        mut status,
        mut busy,
        mut show_filters,
        mut filter_draft,
        mut show_schedule,
        mut schedule_form,
        mut schedule_error,
    } = state;

    let schedule_service = use_hook(|| ScheduleService::new(Arc::new(LogDelivery)));

    let (timers, ticks) = use_hook(|| {
        let (mut timers, ticks) = RefreshTimers::channel();
        timers.start_interval(refresh_interval);
        (Rc::new(RefCell::new(timers)), Rc::new(RefCell::new(Some(ticks))))
    });

    let source_for_ticks = source.clone();
    use_future(move || {
        let receiver = ticks.borrow_mut().take();
        let source = source_for_ticks.clone();
        async move {
            let Some(mut receiver) = receiver else {
                return;
            };
            while let Some(tick) = receiver.recv().await {
                let fetched = source.borrow_mut().fetch();
                match (tick, fetched) {
                    (RefreshTick::LatencyElapsed, Ok(data)) => {
                        controller.write().complete_refresh(data);
                        status.set("Data refreshed".to_string());
                    }
                    (RefreshTick::Interval, Ok(data)) => {
                        controller.write().replace_snapshot(data);
                    }
                    (tick, Err(err)) => {
                        warn!(?tick, error = %err, "refresh failed");
                        if tick == RefreshTick::LatencyElapsed {
                            controller.write().abort_refresh();
                        }
                        status.set(format!("Refresh failed: {err}"));
                    }
                }
            }
        }
    });

    let timers_for_drop = timers.clone();
    use_drop(move || timers_for_drop.borrow_mut().cancel_all());

    let timers_for_refresh = timers.clone();
    // A second click while loading restarts the latency timer.
    let refresh = move |_: MouseEvent| {
        controller.write().begin_refresh();
        timers_for_refresh
            .borrow_mut()
            .schedule_completion(refresh_latency);
        status.set("Refreshing...".to_string());
    };

    let mut export = move |format: ExportFormat| {
        let document = controller
            .read()
            .export(format, Local::now().date_naive());
        let outcome = document.and_then(|document| {
            save_export(&document).map(|path| path.map(|path| (path, document.rows)))
        });
        match outcome {
            Ok(Some((path, rows))) => {
                status.set(format!(
                    "Exported {rows} campaigns as {} to {}",
                    format.label(),
                    path.display()
                ));
            }
            Ok(None) => status.set("Export cancelled".to_string()),
            Err(err) => {
                let message = format!("{err:#}");
                warn!(error = %message, "export failed");
                status.set(format!("Export failed: {message}"));
            }
        }
    };

    let import = move |_: MouseEvent| {
        if busy() {
            return;
        }
        let Some(csv_path) = pick_import_file() else {
            status.set("Import cancelled".to_string());
            return;
        };
        busy.set(true);
        status.set(format!("Importing {}", csv_path.display()));
        let mut source = CsvSource { csv_path };
        match source.fetch() {
            Ok(data) => {
                let rows = data.campaigns.len();
                controller.write().replace_snapshot(data);
                info!(source = source.name(), rows, "snapshot imported");
                status.set(format!("Imported {rows} campaigns"));
            }
            Err(err) => status.set(format!("Import failed: {err}")),
        }
        busy.set(false);
    };

    let submit_schedule = move |_: MouseEvent| {
        let mut form = schedule_form.peek().clone();
        let submitted = submit_schedule_form(&schedule_service, &mut form);
        schedule_form.set(form);
        match submitted {
            Ok(confirmation) => {
                status.set(confirmation);
                schedule_error.set(None);
                show_schedule.set(false);
            }
            Err(message) => schedule_error.set(Some(message)),
        }
    };

    let model = TableModel::from_controller(&controller.read());
    let criteria = controller.read().state().criteria.clone();
    let badges = criteria.badges();
    let search_text = criteria.search_text.clone();
    let draft = filter_draft();
    let form = schedule_form();
    let loading = controller.read().is_loading();
    let schedule_error_text = schedule_error();

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 12px; display: flex; flex-direction: column; gap: 8px;",
            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                h2 { style: "margin: 0 12px 0 0;", "ADmyBRAND Analytics" }
                button { onclick: refresh, if loading { "Refreshing..." } else { "Refresh" } }
                button { disabled: busy(), onclick: import, "Import CSV" }
                button { onclick: move |_| export(ExportFormat::Csv), "Export CSV" }
                button { onclick: move |_| export(ExportFormat::Report), "Export report" }
                button {
                    onclick: move |_| {
                        let next = !show_schedule();
                        schedule_error.set(None);
                        show_schedule.set(next);
                    },
                    "Schedule report"
                }
                span { style: "color: #555;", "{status}" }
                span { style: "color: #999; font-size: 12px;", "snapshot #{model.generation} at {model.updated_at}" }
            }

            div {
                style: "display: flex; gap: 12px; flex-wrap: wrap;",
                MetricCard { title: "Revenue", value: model.metrics.revenue_label() }
                MetricCard { title: "Users", value: model.metrics.users_label() }
                MetricCard { title: "Conversions", value: model.metrics.conversions_label() }
                MetricCard { title: "Growth", value: model.metrics.growth_label() }
            }

            if show_schedule() {
                div {
                    style: "{panel_style()}",
                    label {
                        "Frequency "
                        select {
                            value: "{form.frequency}",
                            onchange: move |event| schedule_form.write().frequency = event.value(),
                            for frequency in Frequency::ALL {
                                option { value: "{frequency}", "{frequency}" }
                            }
                        }
                    }
                    label {
                        "Email "
                        input {
                            r#type: "email",
                            value: "{form.email}",
                            oninput: move |event| schedule_form.write().email = event.value(),
                        }
                    }
                    if form.frequency == Frequency::Weekly.as_str() {
                        label {
                            "Day "
                            select {
                                value: "{form.day}",
                                onchange: move |event| schedule_form.write().day = event.value(),
                                for day in WEEKDAYS {
                                    option { value: "{weekday_name(day)}", "{weekday_name(day)}" }
                                }
                            }
                        }
                    }
                    label {
                        "Time "
                        input {
                            r#type: "time",
                            value: "{form.time}",
                            oninput: move |event| schedule_form.write().time = event.value(),
                        }
                    }
                    button { onclick: submit_schedule, "Schedule" }
                    button { onclick: move |_| show_schedule.set(false), "Cancel" }
                    {schedule_error_text.map(|err| rsx! {
                        span { style: "color: #b00;", "{err}" }
                    })}
                }
            }

            div {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                input {
                    r#type: "search",
                    placeholder: "Search campaigns...",
                    value: "{search_text}",
                    oninput: move |event| {
                        let text = event.value();
                        filter_draft.write().search_text = text.clone();
                        controller.write().dispatch(ViewEvent::SearchChanged(text));
                    },
                }
                button {
                    onclick: move |_| {
                        let next = !show_filters();
                        if next {
                            filter_draft.set(controller.read().state().criteria.clone());
                        }
                        show_filters.set(next);
                    },
                    if show_filters() { "Hide filters" } else { "Filters" }
                }
                if badges.is_empty() {
                    span { style: "color: #888; font-size: 12px;", "No filters applied" }
                }
                for badge in badges.iter() {
                    span {
                        style: "padding: 2px 8px; border-radius: 10px; background: #e7eefc; font-size: 12px;",
                        "{badge}"
                    }
                }
            }

            if show_filters() {
                div {
                    style: "{panel_style()}",
                    label {
                        "{filter_input_label(FilterOption::Status)} "
                        select {
                            value: "{draft.status.as_str()}",
                            onchange: move |event| {
                                let current = filter_draft.peek().clone();
                                match current.with_option(FilterOption::Status, &event.value()) {
                                    Ok(next) => filter_draft.set(next),
                                    Err(err) => status.set(err.to_string()),
                                }
                            },
                            option { value: "all", "All" }
                            option { value: "active", "Active" }
                            option { value: "paused", "Paused" }
                        }
                    }
                    for option in BOUND_OPTIONS {
                        label {
                            key: "{option.name()}",
                            "{filter_input_label(option)} "
                            input {
                                r#type: "number",
                                style: "width: 90px;",
                                value: "{draft.option(option)}",
                                oninput: move |event| {
                                    let current = filter_draft.peek().clone();
                                    match current.with_option(option, &event.value()) {
                                        Ok(next) => filter_draft.set(next),
                                        Err(err) => status.set(err.to_string()),
                                    }
                                },
                            }
                        }
                    }
                    button {
                        onclick: move |_| {
                            let draft = FilterCriteria {
                                search_text: controller.read().state().criteria.search_text.clone(),
                                ..filter_draft.peek().clone()
                            };
                            controller.write().dispatch(ViewEvent::FiltersApplied(draft));
                            show_filters.set(false);
                        },
                        "Apply"
                    }
                    button {
                        onclick: move |_| {
                            controller.write().dispatch(ViewEvent::FiltersCleared);
                            filter_draft.set(controller.read().state().criteria.clone());
                        },
                        "Clear"
                    }
                }
            }

            div {
                style: "overflow: auto; flex: 1; min-height: 0;",
                table {
                    style: "border-collapse: collapse; width: 100%;",
                    thead {
                        tr {
                            for field in SortField::TABLE {
                                th {
                                    key: "{field}",
                                    style: "{table_header_cell_style()}",
                                    onclick: move |_| controller.write().dispatch(ViewEvent::SortRequested(field)),
                                    "{header_label(field, model.sort)}"
                                }
                            }
                        }
                    }
                    tbody {
                        {match &model.rows {
                            None => rsx! {
                                tr {
                                    td {
                                        colspan: SortField::TABLE.len() as i64,
                                        style: "padding: 24px; text-align: center; color: #666;",
                                        "Loading..."
                                    }
                                }
                            },
                            Some(rows) if rows.is_empty() => rsx! {
                                tr {
                                    td {
                                        colspan: SortField::TABLE.len() as i64,
                                        style: "padding: 24px; text-align: center; color: #666;",
                                        "No campaigns match the current filters"
                                    }
                                }
                            },
                            Some(rows) => rsx! {
                                for record in rows.iter() {
                                    tr {
                                        key: "{record.id}",
                                        for field in SortField::TABLE {
                                            td {
                                                style: "border: 1px solid #ddd; padding: 4px 6px; text-align: {column_alignment(field)};",
                                                if field == SortField::Status {
                                                    span { style: "{status_pill_style(record.status)}", "{record.status}" }
                                                } else {
                                                    "{cell_text(record, field)}"
                                                }
                                            }
                                        }
                                    }
                                }
                            },
                        }}
                    }
                }
            }

            div {
                style: "display: flex; gap: 12px; align-items: center; justify-content: space-between;",
                span { "{model.summary}" }
                div {
                    style: "display: flex; gap: 8px; align-items: center;",
                    button {
                        disabled: !model.has_previous,
                        onclick: move |_| controller.write().dispatch(ViewEvent::PageRequested(PageRequest::First)),
                        "First"
                    }
                    button {
                        disabled: !model.has_previous,
                        onclick: move |_| controller.write().dispatch(ViewEvent::PageRequested(PageRequest::Previous)),
                        "Previous"
                    }
                    span { "Page " }
                    input {
                        r#type: "number",
                        style: "width: 56px;",
                        min: 1,
                        max: model.total_pages as i64,
                        value: "{model.page}",
                        onchange: move |event| {
                            if let Ok(page) = event.value().trim().parse::<usize>() {
                                controller.write().dispatch(ViewEvent::PageRequested(PageRequest::Goto(page)));
                            }
                        },
                    }
                    span { " of {model.total_pages}" }
                    button {
                        disabled: !model.has_next,
                        onclick: move |_| controller.write().dispatch(ViewEvent::PageRequested(PageRequest::Next)),
                        "Next"
                    }
                    button {
                        disabled: !model.has_next,
                        onclick: move |_| controller.write().dispatch(ViewEvent::PageRequested(PageRequest::Last)),
                        "Last"
                    }
                }
            }
        }
    }
}
