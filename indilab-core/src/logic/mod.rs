//! Oscillator-logic interpreter — series + logic mode in, per-bar signals out.
//!
//! Two signal series come back: `long` and `short`, 1.0 where active, 0.0
//! elsewhere. The caller decides whether they mean "allow open" or "force
//! close".
//!
//! All comparisons are sigma-tolerant: values closer than `sigma` are equal.
//! Non-finite samples never activate a signal.

pub mod mode;

pub use mode::LogicMode;

use serde::{Deserialize, Serialize};

/// Inputs for one interpreter pass.
#[derive(Debug, Clone, Copy)]
pub struct LogicInput<'a> {
    pub series: &'a [f64],
    /// First index of `series` that holds a meaningful value.
    pub first_valid_bar: usize,
    /// 0 or 1. With 1 the decision at bar `b` is taken from bar `b - 1`
    /// ("use previous bar value"). Larger values are treated as 1.
    pub lag: usize,
    /// Threshold for the long side.
    pub level: f64,
    /// Threshold for the short side.
    pub mirrored_level: f64,
    pub sigma: f64,
}

/// Interpreter output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signals {
    pub long: Vec<f64>,
    pub short: Vec<f64>,
    /// No signal is ever active below this index.
    pub first_bar: usize,
}

impl Signals {
    pub fn is_long(&self, bar: usize) -> bool {
        self.long.get(bar).is_some_and(|&v| v != 0.0)
    }

    pub fn is_short(&self, bar: usize) -> bool {
        self.short.get(bar).is_some_and(|&v| v != 0.0)
    }
}

/// Evaluate `mode` over the series.
///
/// Signals start at `first_valid_bar + 1 + lag`: every mode gets at least one
/// prior sample to compare with.
pub fn evaluate(input: &LogicInput<'_>, mode: LogicMode) -> Signals {
    run(input, |cur| decide(input, mode, cur))
}

/// Evaluate `mode` for a series that carries no direction (ATR, volume).
///
/// The long-side rule decides both outputs, so e.g. "rises" allows both
/// long and short trades.
pub fn evaluate_non_directional(input: &LogicInput<'_>, mode: LogicMode) -> Signals {
    run(input, |cur| {
        let (long, _) = decide(input, mode, cur);
        (long, long)
    })
}

fn run(input: &LogicInput<'_>, mut decide_at: impl FnMut(usize) -> (bool, bool)) -> Signals {
    let n = input.series.len();
    let lag = input.lag.min(1);
    let first_bar = input.first_valid_bar + 1 + lag;

    let mut long = vec![0.0; n];
    let mut short = vec![0.0; n];

    for bar in first_bar..n {
        let (l, s) = decide_at(bar - lag);
        long[bar] = if l { 1.0 } else { 0.0 };
        short[bar] = if s { 1.0 } else { 0.0 };
    }

    Signals {
        long,
        short,
        first_bar,
    }
}

/// (long, short) at sample index `cur`. `cur - 1 >= first_valid_bar` holds.
fn decide(input: &LogicInput<'_>, mode: LogicMode, cur: usize) -> (bool, bool) {
    let s = input.series;
    let sigma = input.sigma;
    let fvb = input.first_valid_bar;
    let (level, mirrored) = (input.level, input.mirrored_level);

    match mode {
        LogicMode::Rises => direction(s, cur, sigma),
        LogicMode::Falls => swap(direction(s, cur, sigma)),
        LogicMode::IsHigherThanLevel => (
            above(s[cur], level, sigma),
            below(s[cur], mirrored, sigma),
        ),
        LogicMode::IsLowerThanLevel => (
            below(s[cur], level, sigma),
            above(s[cur], mirrored, sigma),
        ),
        LogicMode::CrossesLevelUpward => (
            crosses(s, cur, level, sigma, true),
            crosses(s, cur, mirrored, sigma, false),
        ),
        LogicMode::CrossesLevelDownward => (
            crosses(s, cur, level, sigma, false),
            crosses(s, cur, mirrored, sigma, true),
        ),
        LogicMode::ChangesDirectionUpward => (
            turns(s, cur, fvb, sigma, true),
            turns(s, cur, fvb, sigma, false),
        ),
        LogicMode::ChangesDirectionDownward => (
            turns(s, cur, fvb, sigma, false),
            turns(s, cur, fvb, sigma, true),
        ),
        LogicMode::Inactive => (true, true),
    }
}

fn swap((a, b): (bool, bool)) -> (bool, bool) {
    (b, a)
}

/// (rising, falling) between `cur - 1` and `cur`.
fn direction(s: &[f64], cur: usize, sigma: f64) -> (bool, bool) {
    let (x, prev) = (s[cur], s[cur - 1]);
    if !x.is_finite() || !prev.is_finite() {
        return (false, false);
    }
    (x > prev + sigma, x < prev - sigma)
}

fn above(x: f64, level: f64, sigma: f64) -> bool {
    x.is_finite() && x > level + sigma
}

fn below(x: f64, level: f64, sigma: f64) -> bool {
    x.is_finite() && x < level - sigma
}

/// Crossing of `level` between `cur - 1` and `cur`.
///
/// Upward: `s[cur - 1] <= level + sigma` and `s[cur] > level + sigma`.
/// Downward mirrors it around `level - sigma`.
fn crosses(s: &[f64], cur: usize, level: f64, sigma: f64, upward: bool) -> bool {
    let (x, prev) = (s[cur], s[cur - 1]);
    if !prev.is_finite() {
        return false;
    }
    if upward {
        above(x, level, sigma) && prev <= level + sigma
    } else {
        below(x, level, sigma) && prev >= level - sigma
    }
}

/// Local minimum (`upward`) or maximum just formed at `cur - 1`.
///
/// The latest delta must move by more than sigma. The earlier delta is taken
/// against the most recent sample that differs from `s[cur - 1]` by more than
/// sigma, walking back over a flat stretch but never below `fvb`.
fn turns(s: &[f64], cur: usize, fvb: usize, sigma: f64, upward: bool) -> bool {
    if cur < fvb + 2 {
        return false;
    }

    let (rising, falling) = direction(s, cur, sigma);
    if (upward && !rising) || (!upward && !falling) {
        return false;
    }

    let pivot = s[cur - 1];
    let mut j = cur - 2;
    loop {
        let x = s[j];
        if !x.is_finite() {
            return false;
        }
        if (x - pivot).abs() > sigma {
            return if upward {
                x > pivot + sigma
            } else {
                x < pivot - sigma
            };
        }
        if j == fvb {
            return false;
        }
        j -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(series: &[f64], fvb: usize, lag: usize, level: f64, mirrored: f64) -> LogicInput<'_> {
        LogicInput {
            series,
            first_valid_bar: fvb,
            lag,
            level,
            mirrored_level: mirrored,
            sigma: 1e-7,
        }
    }

    fn active(signal: &[f64]) -> Vec<usize> {
        signal
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn rises_scenario() {
        let series = [0.0, 0.0, 1.0, 3.0, 2.0, 5.0];
        let out = evaluate(&input(&series, 2, 0, 0.0, 0.0), LogicMode::Rises);
        assert_eq!(out.first_bar, 3);
        assert_eq!(active(&out.long), vec![3, 5]);
        assert_eq!(active(&out.short), vec![4]);
    }

    #[test]
    fn falls_swaps_rises() {
        let series = [0.0, 0.0, 1.0, 3.0, 2.0, 5.0];
        let rises = evaluate(&input(&series, 2, 0, 0.0, 0.0), LogicMode::Rises);
        let falls = evaluate(&input(&series, 2, 0, 0.0, 0.0), LogicMode::Falls);
        assert_eq!(rises.long, falls.short);
        assert_eq!(rises.short, falls.long);
    }

    #[test]
    fn is_higher_than_level_sides_are_independent() {
        // long: x > -20, short: x < 20
        let series = [0.0, -10.0, -25.0, 5.0, 30.0];
        let out = evaluate(&input(&series, 0, 0, -20.0, 20.0), LogicMode::IsHigherThanLevel);
        assert_eq!(active(&out.long), vec![1, 3, 4]);
        assert_eq!(active(&out.short), vec![1, 2, 3]);
    }

    #[test]
    fn crossing_up_fires_once() {
        let series = [0.0, 49.0, 51.0, 52.0];
        let out = evaluate(&input(&series, 0, 0, 50.0, 50.0), LogicMode::CrossesLevelUpward);
        assert_eq!(active(&out.long), vec![2]);
        assert!(active(&out.short).is_empty());
    }

    #[test]
    fn touching_level_is_not_crossing() {
        let series = [0.0, 49.0, 50.0, 49.0, 50.0, 51.0];
        let out = evaluate(&input(&series, 0, 0, 50.0, 50.0), LogicMode::CrossesLevelUpward);
        // 50 sits on the level: only the move from 50 to 51 crosses it
        assert_eq!(active(&out.long), vec![5]);
    }

    #[test]
    fn dip_onto_level_then_above_crosses() {
        let series = [51.0, 50.0, 51.0];
        let out = evaluate(&input(&series, 0, 0, 50.0, 50.0), LogicMode::CrossesLevelUpward);
        assert_eq!(out.long, vec![0.0, 0.0, 1.0]);
        assert!(active(&out.short).is_empty());
    }

    #[test]
    fn crossing_reads_only_previous_sample() {
        // resting on the level for two bars: the step off it is the crossing
        let series = [48.0, 50.0, 50.0, 52.0];
        let out = evaluate(&input(&series, 0, 0, 50.0, 50.0), LogicMode::CrossesLevelUpward);
        assert_eq!(active(&out.long), vec![3]);

        let series = [52.0, 50.0, 50.0, 48.0];
        let out = evaluate(&input(&series, 0, 0, 50.0, 50.0), LogicMode::CrossesLevelDownward);
        assert_eq!(active(&out.long), vec![3]);
    }

    #[test]
    fn crossing_down_uses_mirrored_level_for_short() {
        // long: down-cross of 70, short: up-cross of 30
        let series = [80.0, 75.0, 65.0, 25.0, 35.0];
        let out = evaluate(&input(&series, 0, 0, 70.0, 30.0), LogicMode::CrossesLevelDownward);
        assert_eq!(active(&out.long), vec![2]);
        assert_eq!(active(&out.short), vec![4]);
    }

    #[test]
    fn changes_direction_upward_at_local_minimum() {
        let series = [5.0, 4.0, 3.0, 4.0, 5.0, 4.0];
        let out = evaluate(&input(&series, 0, 0, 0.0, 0.0), LogicMode::ChangesDirectionUpward);
        assert_eq!(active(&out.long), vec![3]);
        assert_eq!(active(&out.short), vec![5]);
    }

    #[test]
    fn changes_direction_walks_over_plateau() {
        let series = [5.0, 3.0, 3.0, 3.0, 4.0];
        let out = evaluate(&input(&series, 0, 0, 0.0, 0.0), LogicMode::ChangesDirectionUpward);
        assert_eq!(active(&out.long), vec![4]);
    }

    #[test]
    fn changes_direction_needs_two_deltas() {
        let series = [9.0, 9.0, 3.0, 4.0];
        // fvb = 2: only one delta is available at index 3
        let out = evaluate(&input(&series, 2, 0, 0.0, 0.0), LogicMode::ChangesDirectionUpward);
        assert!(active(&out.long).is_empty());
    }

    #[test]
    fn inactive_is_always_true_from_first_bar() {
        let series = [1.0; 5];
        let out = evaluate(&input(&series, 1, 1, 0.0, 0.0), LogicMode::Inactive);
        assert_eq!(out.first_bar, 3);
        assert_eq!(out.long, vec![0.0, 0.0, 0.0, 1.0, 1.0]);
        assert_eq!(out.short, out.long);
    }

    #[test]
    fn lag_uses_previous_bar() {
        let series = [0.0, 1.0, 2.0, 1.0, 3.0, 3.0];
        let now = evaluate(&input(&series, 0, 0, 0.0, 0.0), LogicMode::Rises);
        let prev = evaluate(&input(&series, 0, 1, 0.0, 0.0), LogicMode::Rises);
        assert_eq!(prev.first_bar, 2);
        for b in prev.first_bar..series.len() {
            assert_eq!(prev.long[b], now.long[b - 1], "bar {b}");
            assert_eq!(prev.short[b], now.short[b - 1], "bar {b}");
        }
    }

    #[test]
    fn lag_above_one_is_clamped() {
        let series = [0.0, 1.0, 2.0, 1.0];
        let one = evaluate(&input(&series, 0, 1, 0.0, 0.0), LogicMode::Rises);
        let five = evaluate(&input(&series, 0, 5, 0.0, 0.0), LogicMode::Rises);
        assert_eq!(one, five);
    }

    #[test]
    fn sigma_boundary() {
        let mut i = input(&[1.0, 1.5], 0, 0, 0.0, 0.0);
        i.sigma = 0.5;
        let out = evaluate(&i, LogicMode::Rises);
        assert!(!out.is_long(1));
        assert!(!out.is_short(1));

        let series = [1.0, 1.75];
        i.series = &series;
        assert!(evaluate(&i, LogicMode::Rises).is_long(1));
    }

    #[test]
    fn non_finite_never_signals() {
        let series = [0.0, 1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY];
        for mode in LogicMode::OSCILLATOR {
            if *mode == LogicMode::Inactive {
                continue;
            }
            let out = evaluate(&input(&series, 0, 0, 0.5, -0.5), *mode);
            for b in [2, 3, 4] {
                assert!(!out.is_long(b), "{mode} long at {b}");
                assert!(!out.is_short(b), "{mode} short at {b}");
            }
        }
    }

    #[test]
    fn non_directional_copies_long_side() {
        let series = [0.0, 1.0, 2.0, 1.0];
        let out = evaluate_non_directional(&input(&series, 0, 0, 0.0, 0.0), LogicMode::Rises);
        assert_eq!(out.long, vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(out.short, out.long);
    }

    #[test]
    fn short_series_is_all_zero() {
        let series = [1.0, 2.0];
        let out = evaluate(&input(&series, 3, 0, 0.0, 0.0), LogicMode::Inactive);
        assert_eq!(out.long, vec![0.0, 0.0]);
        assert_eq!(out.first_bar, 4);
    }
}
