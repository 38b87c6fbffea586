pub mod human;
pub mod report;
pub mod stepper;
pub mod user_state;
