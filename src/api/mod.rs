pub mod analytics;
pub mod leaves;
pub mod students;
