use heapdex_core::{Error, Result};

pub mod page_rank;
pub mod tf_idf;

pub use page_rank::PageRankAnalyzer;
pub use tf_idf::TfIdfAnalyzer;

/// Parameters of the page rank iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankConfig {
    /// Probability of following a link rather than jumping to a random page. Within `[0, 1]`.
    pub decay: f64,
    /// Iteration stops once no rank changes by more than this.
    pub epsilon: f64,
    /// Maximum number of update passes. `0` keeps the initial uniform ranks.
    pub limit: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        RankConfig {
            decay: 0.85,
            epsilon: 1e-4,
            limit: 100,
        }
    }
}

impl RankConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(Error::InvalidArgument(format!(
                "decay must be within [0, 1], got {}",
                self.decay
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(Error::InvalidArgument(format!(
                "epsilon must be a non-negative number, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}
