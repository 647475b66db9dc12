//! One-step backward valuation rules.
//!
//! A [`ValuationRule`] turns the two child values of a lattice node into the
//! node's own value. Every rule receives the same [`NodeContext`] and reads
//! only the fields it needs, which lets European and American pricing share
//! one engine.

use serde::{Deserialize, Serialize};

use crate::lattice::NodeKey;
use crate::payoff::Payoff;
use crate::types::ExerciseStyle;

/// Everything a valuation rule may need at one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeContext {
    /// Node being valued.
    pub key: NodeKey,
    /// Risk-neutral probability of an up move.
    pub prob_up: f64,
    /// Risk-neutral probability of a down move.
    pub prob_down: f64,
    /// Discount factor over one time step.
    pub discount: f64,
    /// Value of the child reached by an up move, `(i+1, up+1, down)`.
    pub up_value: f64,
    /// Value of the child reached by a down move, `(i+1, up, down+1)`.
    pub down_value: f64,
    /// Intrinsic value function.
    pub payoff: Payoff,
    /// Strike price.
    pub strike: f64,
    /// Underlying price at this node.
    pub underlying: f64,
}

impl NodeContext {
    /// Discounted risk-neutral expectation of the two children.
    #[inline]
    #[must_use]
    pub fn continuation(&self) -> f64 {
        self.discount * (self.prob_up * self.up_value + self.prob_down * self.down_value)
    }

    /// Value of exercising at this node.
    #[inline]
    #[must_use]
    pub fn exercise(&self) -> f64 {
        self.payoff.intrinsic(self.underlying, self.strike)
    }
}

/// Backward induction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationRule {
    /// Discounted expectation only.
    European,
    /// Greater of the discounted expectation and immediate exercise.
    American,
}

impl ValuationRule {
    /// Values a node from its context.
    #[inline]
    #[must_use]
    pub fn value(self, ctx: &NodeContext) -> f64 {
        match self {
            Self::European => ctx.continuation(),
            Self::American => ctx.continuation().max(ctx.exercise()),
        }
    }
}

impl From<ExerciseStyle> for ValuationRule {
    fn from(style: ExerciseStyle) -> Self {
        match style {
            ExerciseStyle::European => Self::European,
            ExerciseStyle::American => Self::American,
        }
    }
}
