mod hashmap_resource_store;
mod postgres_member_store;
mod postgres_project_store;
mod postgres_skill_store;
mod postgres_work_hours_store;

pub use hashmap_resource_store::*;
pub use postgres_member_store::*;
pub use postgres_project_store::*;
pub use postgres_skill_store::*;
pub use postgres_work_hours_store::*;
