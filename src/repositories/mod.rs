pub(crate) mod exams;
pub(crate) mod health;
pub(crate) mod questions;
pub(crate) mod report_cards;
pub(crate) mod scores;
pub(crate) mod store;
pub(crate) mod students;
