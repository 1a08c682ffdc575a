//! Property-based tests for the risk statistics
//!
//! These tests use proptest to verify the invariants that must hold for every
//! finite return series, not only for the hand-picked unit test cases.

use proptest::prelude::*;
use quantrisk::{
    ReturnSeries, ReturnTable, cvar_historic, drawdown, semideviation, var_gaussian, var_historic,
};

fn returns_strategy(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.5f64..0.5f64, len)
}

proptest! {
    /// Peaks are the running maximum of wealth and never decrease
    #[test]
    fn peaks_are_cumulative_max_of_wealth(values in returns_strategy(0..200)) {
        let series = ReturnSeries::from_values(values).unwrap();
        let table = drawdown(&series);

        let mut running = f64::NEG_INFINITY;
        for (wealth, peak) in table.wealth.iter().zip(&table.peaks) {
            running = running.max(*wealth);
            prop_assert_eq!(*peak, running);
        }
        for pair in table.peaks.windows(2) {
            prop_assert!(pair[0] <= pair[1], "peaks decreased: {:?}", pair);
        }
    }

    /// Drawdown is never positive, is zero at a peak and never below -100%
    #[test]
    fn drawdown_is_bounded(values in returns_strategy(1..200)) {
        let series = ReturnSeries::from_values(values).unwrap();
        let table = drawdown(&series);

        for (_, point) in table.iter() {
            prop_assert!(point.drawdown <= 0.0, "positive drawdown: {:?}", point);
            prop_assert!(point.drawdown > -1.0, "drawdown beyond -100%: {:?}", point);
            if point.wealth == point.peak {
                prop_assert_eq!(point.drawdown, 0.0);
            }
        }
    }

    /// Max drawdown is the minimum of the drawdown column
    #[test]
    fn max_drawdown_is_deepest_point(values in returns_strategy(1..200)) {
        let series = ReturnSeries::from_values(values).unwrap();
        let table = drawdown(&series);

        let deepest = table.drawdown.iter().copied().fold(0.0, f64::min);
        match table.max_drawdown() {
            Some(max) => {
                prop_assert_eq!(max.value, deepest);
                prop_assert!(max.time_peak < max.time_trough);
                prop_assert_eq!(table.drawdown[max.time_trough], deepest);
            }
            None => {
                prop_assert_eq!(deepest, 0.0);
            }
        }
    }

    /// A table yields the same historic VaR per column as each column on its own
    #[test]
    fn table_var_historic_matches_columns(
        (a, b) in (1usize..100).prop_flat_map(|len| (
            prop::collection::vec(-0.5f64..0.5f64, len),
            prop::collection::vec(-0.5f64..0.5f64, len),
        )),
        level in 0.0f64..=100.0f64,
    ) {
        let table = ReturnTable::from_columns([("A", a.clone()), ("B", b.clone())]).unwrap();
        let actual = var_historic(&table, level).unwrap();

        let expected_a = var_historic(&ReturnSeries::from_values(a).unwrap(), level).unwrap();
        let expected_b = var_historic(&ReturnSeries::from_values(b).unwrap(), level).unwrap();

        prop_assert_eq!(actual.len(), 2);
        prop_assert_eq!(actual["A"], expected_a);
        prop_assert_eq!(actual["B"], expected_b);
    }

    /// Historic VaR shrinks as the level moves right and CVaR is at least VaR
    #[test]
    fn var_historic_is_monotonic_in_level(
        values in returns_strategy(1..200),
        low in 0.0f64..50.0f64,
        high in 50.0f64..=100.0f64,
    ) {
        let series = ReturnSeries::from_values(values).unwrap();

        let var_low = var_historic(&series, low).unwrap();
        let var_high = var_historic(&series, high).unwrap();
        prop_assert!(var_low >= var_high - 1e-12, "{} < {}", var_low, var_high);

        let cvar_low = cvar_historic(&series, low).unwrap();
        prop_assert!(cvar_low >= var_low - 1e-12, "{} < {}", cvar_low, var_low);
    }

    /// Gaussian VaR equals -(mean + z * population sigma)
    #[test]
    fn var_gaussian_matches_closed_form(values in returns_strategy(2..200)) {
        let series = ReturnSeries::from_values(values.clone()).unwrap();

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let sigma = (values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / n).sqrt();
        let expected = -(mean - 1.6448536269514729 * sigma);

        let actual = var_gaussian(&series, 5.0, false).unwrap();
        prop_assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    /// Semideviation is NaN exactly when no return is negative
    #[test]
    fn semideviation_nan_without_losses(values in returns_strategy(1..100)) {
        let has_losses = values.iter().any(|value| *value < 0.0);
        let series = ReturnSeries::from_values(values).unwrap();

        let actual = semideviation(&series);
        prop_assert_eq!(actual.is_nan(), !has_losses);
        if has_losses {
            prop_assert!(actual >= 0.0);
        }
    }
}

#[test]
fn zero_returns_keep_wealth_at_base() {
    let series = ReturnSeries::from_values(vec![0.0; 50]).unwrap();
    let table = drawdown(&series);

    assert!(table.wealth.iter().all(|wealth| *wealth == 1000.0));
    assert!(table.peaks.iter().all(|peak| *peak == 1000.0));
    assert!(table.drawdown.iter().all(|drawdown| *drawdown == 0.0));
}
