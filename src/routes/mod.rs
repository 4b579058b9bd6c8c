pub mod extract;
mod health_check;
pub mod members;
pub mod projects;
pub mod skills;
pub mod work_hours;

pub use health_check::*;

use serde::{Deserialize, Serialize};

/// Envelope for every collection endpoint.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub count: usize,
    pub results: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(results: Vec<T>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}
