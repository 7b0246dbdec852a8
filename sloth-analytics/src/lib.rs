//! Pure computations behind the server analytics and reputation commands:
//! growth-rate math over member-count history, the member-count predictor,
//! leaderboard ranking and the level progress bar.
//!
//! Everything in this crate is synchronous and stateless; callers hand in a
//! snapshot of data and get a value back. All I/O lives in `sloth-database`.

pub mod growth;
pub mod predict;
pub mod progress;
pub mod rank;

pub use growth::{average_growth, growth_percentage, growth_rates};
pub use predict::{Prediction, predict};
pub use rank::{LeaderboardRow, rank_of};

/// Failure modes of the growth computations.
///
/// These map one-to-one onto the user-facing refusals in the command layer:
/// a zero baseline makes the percentage undefined, an empty history has no
/// average, and a non-positive average rate makes a growth prediction
/// meaningless.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum GrowthError {
    #[error("growth baseline is zero")]
    ZeroBaseline,
    #[error("no history samples to average")]
    EmptyHistory,
    #[error("average growth rate of {0:.2}% is not positive")]
    NonPositiveRate(f64),
}
