//! The ranking engine trait and rule dispatch.

use super::config::{RankingConfig, RankingRule};
use super::kemeny::{Kemeny, Slater};
use super::pairs::RankedPairs;
use super::principal::Principal;
use super::scores::{Copeland, IteratedCopeland, IteratedNetFlows, Kohler, NetFlows};
use super::types::LinearRanking;
use crate::digraph::ValuedDigraph;
use crate::error::Result;
use tracing::info;

/// A rule turning a valued digraph into a linear ranking of its actions.
///
/// Every engine returns a permutation of the action set; ties are broken
/// by action order unless the rule defines its own tie-breaker.
///
/// # Examples
///
/// ```
/// use u_outranking::digraph::ValuedDigraph;
/// use u_outranking::ranking::{NetFlows, RankingEngine};
///
/// let g = ValuedDigraph::from_arcs(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("a", "c")])
///     .unwrap();
/// let ranking = NetFlows.rank(&g).unwrap();
/// assert_eq!(ranking.ranking(), ["a", "b", "c"]);
/// ```
pub trait RankingEngine: Send + Sync {
    /// The rule this engine implements.
    fn rule(&self) -> RankingRule;

    /// Ranks the actions of `digraph`, best first.
    fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking>;
}

impl RankingConfig {
    /// The engine for the selected rule.
    pub fn engine(&self) -> Box<dyn RankingEngine> {
        match self.rule {
            RankingRule::NetFlows => Box::new(NetFlows),
            RankingRule::IteratedNetFlows => Box::new(IteratedNetFlows),
            RankingRule::Copeland => Box::new(Copeland),
            RankingRule::IteratedCopeland => Box::new(IteratedCopeland),
            RankingRule::Kohler => Box::new(Kohler::new(self.kohler.clone())),
            RankingRule::RankedPairs => Box::new(RankedPairs::new(self.ranked_pairs.clone())),
            RankingRule::ExtendedPrudent => Box::new(RankedPairs::new(
                self.ranked_pairs.clone().with_prudent_seed(true),
            )),
            RankingRule::Kemeny => Box::new(Kemeny::new(self.kemeny.clone())),
            RankingRule::Slater => Box::new(Slater::new(self.kemeny.clone())),
            RankingRule::Principal => Box::new(Principal::new(self.principal.clone())),
        }
    }

    /// Validates the configuration and ranks `digraph` with the selected
    /// rule.
    pub fn rank(&self, digraph: &ValuedDigraph) -> Result<LinearRanking> {
        self.validate()?;
        let ranking = self.engine().rank(digraph)?;
        info!(
            event = "ranking_done",
            rule = %self.rule,
            order = digraph.order(),
            first = ranking.ranking().first().map(String::as_str).unwrap_or(""),
        );
        Ok(ranking)
    }
}
