//! Parameter optimizer — exhaustive grid search over the strategy lattice.
//!
//! Brute force on purpose: correctness and reproducibility beat speed at
//! these grid sizes. Cells are independent backtests sharing no state, so
//! the sweep parallelizes freely; results are collected in grid order and
//! the best is chosen with a strict comparison, which keeps the
//! first-seen-wins tie rule deterministic under any thread scheduling.

use rayon::prelude::*;

use quantbot_core::domain::Candle;
use quantbot_core::strategy::{StrategyKind, StrategyParams};

use crate::config::BacktestConfig;
use crate::engine::run_backtest;
use crate::result::BacktestResult;

/// Performance score for ranking grid cells:
/// ROI weighted by win rate, with drawdown penalized at double weight.
pub fn score(result: &BacktestResult) -> f64 {
    let m = &result.metrics;
    m.return_on_investment * m.win_rate / 100.0 - m.max_drawdown * 2.0
}

/// The ema-rsi parameter lattice to sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamGrid {
    pub ema_fast: Vec<usize>,
    pub ema_slow: Vec<usize>,
    pub rsi_period: Vec<usize>,
    pub risk_level: Vec<f64>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        Self {
            ema_fast: vec![5, 7, 9, 12],
            ema_slow: vec![14, 21, 30],
            rsi_period: vec![9, 14, 21],
            risk_level: vec![1.0, 2.0, 3.0],
        }
    }
}

impl ParamGrid {
    /// All valid parameter combinations, in lattice order.
    ///
    /// Combinations where the fast EMA period is not strictly below the slow
    /// one are skipped — they describe no crossover. Fields outside the
    /// lattice are taken from `base`; the strategy is pinned to ema-rsi,
    /// the variant this lattice parameterizes.
    pub fn combinations(&self, base: &StrategyParams) -> Vec<StrategyParams> {
        let mut combos = Vec::new();
        for &ema_fast in &self.ema_fast {
            for &ema_slow in &self.ema_slow {
                if ema_fast >= ema_slow {
                    continue;
                }
                for &rsi_period in &self.rsi_period {
                    for &risk_level in &self.risk_level {
                        combos.push(StrategyParams {
                            strategy: StrategyKind::EmaRsi,
                            ema_fast,
                            ema_slow,
                            rsi_period,
                            risk_level,
                            ..base.clone()
                        });
                    }
                }
            }
        }
        combos
    }
}

/// One evaluated grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub score: f64,
    pub result: BacktestResult,
}

/// All evaluated cells, in grid order.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    scored: Vec<ScoredResult>,
}

impl SweepOutcome {
    /// Every cell in grid order.
    pub fn all(&self) -> &[ScoredResult] {
        &self.scored
    }

    pub fn len(&self) -> usize {
        self.scored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scored.is_empty()
    }

    /// The single best cell: highest score, first seen winning ties.
    pub fn best(&self) -> Option<&ScoredResult> {
        let mut best: Option<&ScoredResult> = None;
        for cell in &self.scored {
            match best {
                Some(b) if cell.score <= b.score => {}
                _ => best = Some(cell),
            }
        }
        best
    }

    /// Cells sorted by score descending; equal scores keep grid order.
    pub fn ranked(&self) -> Vec<&ScoredResult> {
        let mut sorted: Vec<&ScoredResult> = self.scored.iter().collect();
        sorted.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }
}

/// Sweep the grid over `candles`, one full backtest per cell.
///
/// `base` supplies everything but the lattice fields (market, symbol,
/// dates, capital, non-lattice params). With `parallel`, cells run on the
/// rayon pool; output order and the chosen best are identical either way.
pub fn grid_search(
    candles: &[Candle],
    base: &BacktestConfig,
    grid: &ParamGrid,
    parallel: bool,
) -> SweepOutcome {
    let configs: Vec<BacktestConfig> = grid
        .combinations(&base.params)
        .into_iter()
        .map(|params| BacktestConfig {
            params,
            ..base.clone()
        })
        .collect();

    let evaluate = |config: &BacktestConfig| {
        let result = run_backtest(candles, config);
        ScoredResult {
            score: score(&result),
            result,
        }
    };

    let scored: Vec<ScoredResult> = if parallel {
        configs.par_iter().map(evaluate).collect()
    } else {
        configs.iter().map(evaluate).collect()
    };

    SweepOutcome { scored }
}
