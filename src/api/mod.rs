pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod report_cards;
pub(crate) mod router;
pub(crate) mod scores;
