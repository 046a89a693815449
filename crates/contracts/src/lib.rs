//! Data contracts shared between the price test admin frontend and the REST backend.

pub mod dashboards;
pub mod domain;
pub mod system;
