use std::sync::Arc;

use tracing::info;

use crate::domain::entities::snapshot::{DashboardSnapshot, SnapshotData};

#[derive(Debug, Clone)]
pub struct RecordStore {
    current: Arc<DashboardSnapshot>,
}

impl RecordStore {
    pub fn new(data: SnapshotData) -> Self {
        let snapshot = DashboardSnapshot::new(1, data.campaigns, data.monthly.unwrap_or_default());
        Self {
            current: Arc::new(snapshot),
        }
    }

    pub fn current(&self) -> &DashboardSnapshot {
        &self.current
    }

    pub fn replace(&mut self, data: SnapshotData) {
        let generation = self.current.generation + 1;
        let monthly = data
            .monthly
            .unwrap_or_else(|| self.current.monthly.clone());
        let snapshot = DashboardSnapshot::new(generation, data.campaigns, monthly);
        info!(
            generation,
            campaigns = snapshot.campaigns.len(),
            "replaced dashboard snapshot"
        );
        self.current = Arc::new(snapshot);
    }
}
