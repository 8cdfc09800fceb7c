use tracing::info;

use crate::domain::entities::schedule::{weekday_name, ScheduleRequest};
use crate::usecase::ports::delivery::{DeliveryError, ReportDelivery};

#[derive(Debug, Default)]
pub struct LogDelivery;

impl ReportDelivery for LogDelivery {
    fn schedule(&self, request: &ScheduleRequest) -> Result<(), DeliveryError> {
        info!(
            frequency = %request.frequency,
            email = %request.email,
            day = request.day.map(weekday_name).unwrap_or("-"),
            time = %request.time.format("%H:%M"),
            "scheduled report delivery"
        );
        Ok(())
    }
}
