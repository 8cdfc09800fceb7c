use thiserror::Error;

use crate::domain::entities::snapshot::SnapshotData;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("{0}")]
    Message(String),
    #[error("source produced no campaigns")]
    Empty,
}

pub trait SnapshotSource {
    fn name(&self) -> &str;
    fn fetch(&mut self) -> Result<SnapshotData, SourceError>;
}
