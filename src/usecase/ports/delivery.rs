use thiserror::Error;

use crate::domain::entities::schedule::ScheduleRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[allow(dead_code)]
    #[error("{0}")]
    Message(String),
}

pub trait ReportDelivery: Send + Sync {
    fn schedule(&self, request: &ScheduleRequest) -> Result<(), DeliveryError>;
}
