pub mod api;
pub mod choices;
pub mod models;
