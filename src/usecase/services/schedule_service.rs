use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::entities::schedule::{ScheduleError, ScheduleForm, ScheduleRequest};
use crate::usecase::ports::delivery::{DeliveryError, ReportDelivery};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ScheduleError),
    #[error("could not schedule report: {0}")]
    Delivery(#[from] DeliveryError),
}

#[derive(Clone)]
pub struct ScheduleService {
    delivery: Arc<dyn ReportDelivery>,
}

impl ScheduleService {
    pub fn new(delivery: Arc<dyn ReportDelivery>) -> Self {
        Self { delivery }
    }

    pub fn submit(&self, form: &ScheduleForm) -> Result<ScheduleRequest, SubmitError> {
        let request = form.validate().inspect_err(|err| {
            warn!(%err, "rejected schedule form");
        })?;
        self.delivery.schedule(&request)?;
        info!(
            frequency = %request.frequency,
            email = %request.email,
            "report schedule submitted"
        );
        Ok(request)
    }
}
