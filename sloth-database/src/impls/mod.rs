pub mod actions;
pub mod analytics;
pub mod currency;
pub mod scores;
pub mod watchlist;
