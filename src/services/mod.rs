pub(crate) mod report_cards;
pub(crate) mod scores;
