use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{
    Clock, MemberStore, ProjectStore, SkillStore, WorkHoursStore,
};
use crate::services::data_stores::HashmapResourceStore;

pub type MemberStoreType = Arc<RwLock<dyn MemberStore + Send + Sync>>;
pub type ProjectStoreType = Arc<RwLock<dyn ProjectStore + Send + Sync>>;
pub type SkillStoreType = Arc<RwLock<dyn SkillStore + Send + Sync>>;
pub type WorkHoursStoreType = Arc<RwLock<dyn WorkHoursStore + Send + Sync>>;
pub type ClockType = Arc<dyn Clock + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub member_store: MemberStoreType,
    pub project_store: ProjectStoreType,
    pub skill_store: SkillStoreType,
    pub work_hours_store: WorkHoursStoreType,
    pub clock: ClockType,
}

impl AppState {
    pub fn new(
        member_store: MemberStoreType,
        project_store: ProjectStoreType,
        skill_store: SkillStoreType,
        work_hours_store: WorkHoursStoreType,
        clock: ClockType,
    ) -> Self {
        Self {
            member_store,
            project_store,
            skill_store,
            work_hours_store,
            clock,
        }
    }

    /// All four store handles share one in-memory store, so cascades on
    /// delete see every resource.
    pub fn in_memory(clock: ClockType) -> Self {
        let store = Arc::new(RwLock::new(HashmapResourceStore::default()));
        Self::new(store.clone(), store.clone(), store.clone(), store, clock)
    }
}
