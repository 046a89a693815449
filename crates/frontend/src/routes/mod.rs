pub mod guard;
pub mod routes;
