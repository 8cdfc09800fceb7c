use dioxus::prelude::*;

use crate::domain::entities::query::FilterCriteria;
use crate::domain::entities::schedule::ScheduleForm;
use crate::usecase::services::view_controller::DashboardController;

#[derive(Clone, Copy)]
pub struct AppState {
    pub controller: Signal<DashboardController>,
    pub status: Signal<String>,
    pub busy: Signal<bool>,
    pub show_filters: Signal<bool>,
    pub filter_draft: Signal<FilterCriteria>,
    pub show_schedule: Signal<bool>,
    pub schedule_form: Signal<ScheduleForm>,
    pub schedule_error: Signal<Option<String>>,
}

impl AppState {
    pub fn new(controller: impl FnOnce() -> DashboardController) -> Self {
        let controller = use_signal(controller);
        let draft = controller.peek().state().criteria.clone();
        Self {
            controller,
            status: use_signal(|| "Ready".to_string()),
            busy: use_signal(|| false),
            show_filters: use_signal(|| false),
            filter_draft: use_signal(|| draft),
            show_schedule: use_signal(|| false),
            schedule_form: use_signal(ScheduleForm::default),
            schedule_error: use_signal(|| None::<String>),
        }
    }
}
