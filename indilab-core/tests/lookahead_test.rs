//! Look-ahead contamination tests for every registered indicator.
//!
//! Invariant: no component value at bar t may depend on bar t+1 or later.
//!
//! Method: compute on a truncated series (bars 0..150) and the full series
//! (bars 0..300). Bars 0..150 must be identical in every component, for every
//! logic mode and both slots.

use chrono::NaiveDate;
use indilab_core::components::params::keys;
use indilab_core::components::{Indicator, IndicatorRegistry, IndicatorSlot};
use indilab_core::domain::{Bar, BarSeries};

/// Generate N hourly bars with a deterministic pseudo-random walk.
fn make_test_series(n: usize) -> BarSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut price = 1.2000;

    for i in 0..n {
        // Simple LCG step
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.00005;
        price = (price + change).max(0.5);

        let open = price - 0.0005;
        let close = price + 0.0003;
        bars.push(Bar {
            time: start + chrono::Duration::hours(i as i64),
            open,
            high: open.max(close) + 0.0020,
            low: open.min(close) - 0.0020,
            close,
            volume: 1000.0 + (i as f64 * 10.0),
        });
    }

    BarSeries::from_bars(&bars, 0.0001).unwrap()
}

fn assert_no_lookahead(indicator: &dyn Indicator, full: &BarSeries, truncated_len: usize) {
    let truncated = full.truncated(truncated_len);
    let full_out = indicator.calculate(full);
    let trunc_out = indicator.calculate(&truncated);

    assert_eq!(
        full_out.len(),
        trunc_out.len(),
        "{}: component count differs",
        indicator.caption()
    );

    for (f, t) in full_out.iter().zip(trunc_out.iter()) {
        assert_eq!(f.name, t.name);
        assert_eq!(f.first_bar, t.first_bar, "{}: {} first bar", indicator.caption(), f.name);
        assert_eq!(f.len(), full.len());
        assert_eq!(t.len(), truncated_len);

        for i in 0..truncated_len {
            assert_eq!(
                f.values[i].to_bits(),
                t.values[i].to_bits(),
                "{} ({}): look-ahead at bar {i} in '{}' (truncated={}, full={})",
                indicator.caption(),
                indicator.describe(),
                f.name,
                t.values[i],
                f.values[i]
            );
        }
    }
}

#[test]
fn no_registered_indicator_looks_ahead() {
    let registry = IndicatorRegistry::global();
    let full = make_test_series(300);

    for name in registry.names() {
        for slot in [IndicatorSlot::OpenFilter, IndicatorSlot::CloseFilter] {
            let base = registry.create(name, slot).unwrap();
            let logic_options = base
                .params()
                .choice(keys::LOGIC)
                .map_or(1, |c| c.options().len());

            for logic in 0..logic_options {
                let mut indicator = registry.create(name, slot).unwrap();
                let mut params = indicator.params().clone();
                if logic_options > 1 {
                    params.set_choice(keys::LOGIC, logic).unwrap();
                }
                indicator.configure(params).unwrap();
                assert_no_lookahead(indicator.as_ref(), &full, 150);
            }
        }
    }
}

#[test]
fn lookahead_holds_without_previous_bar_lag() {
    let registry = IndicatorRegistry::global();
    let full = make_test_series(120);

    for name in registry.names() {
        let mut indicator = registry.create(name, IndicatorSlot::OpenFilter).unwrap();
        let mut params = indicator.params().clone();
        if params.flag(keys::USE_PREVIOUS_BAR).is_some() {
            params.set_flag(keys::USE_PREVIOUS_BAR, false).unwrap();
        }
        indicator.configure(params).unwrap();
        assert_no_lookahead(indicator.as_ref(), &full, 61);
    }
}

#[test]
fn output_lengths_match_input() {
    let registry = IndicatorRegistry::global();
    for n in [0, 1, 2, 5, 40] {
        let bars = make_test_series(n);
        for name in registry.names() {
            let indicator = registry.create(name, IndicatorSlot::OpenFilter).unwrap();
            let out = indicator.calculate(&bars);
            assert_eq!(out.signals().count(), 2, "{name}");
            assert!(out.iter().all(|c| c.len() == n), "{name} at n={n}");
        }
    }
}
