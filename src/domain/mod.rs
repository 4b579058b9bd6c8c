mod assignment;
mod availability;
mod clock;
mod data_stores;
mod error;
mod ids;
mod member;
mod member_filter;
mod member_name;
mod project;
mod project_name;
mod skill;
mod work_hours;

pub use assignment::*;
pub use availability::*;
pub use clock::*;
pub use data_stores::*;
pub use error::*;
pub use ids::*;
pub use member::*;
pub use member_filter::*;
pub use member_name::*;
pub use project::*;
pub use project_name::*;
pub use skill::*;
pub use work_hours::*;
