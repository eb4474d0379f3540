use crate::error::{BacktestError, Result};
use crate::indicator::IndicatorSeries;

//simple moving average, first window-1 entries undefined
pub fn moving_average(prices: &[f64], window: usize) -> Result<IndicatorSeries> {
    if window == 0 {
        return Err(BacktestError::invalid_parameter("window must be > 0"));
    }

    let mut out = vec![None; prices.len()];
    for (i, slice) in prices.windows(window).enumerate() {
        out[i + window - 1] = Some(slice.iter().sum::<f64>() / window as f64);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn window_two() {
        let out = moving_average(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(out, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
    }

    #[test]
    fn window_one_is_identity() {
        let prices = [3.0, 1.0, 4.0];
        let out = moving_average(&prices, 1).unwrap();
        assert_eq!(out, vec![Some(3.0), Some(1.0), Some(4.0)]);
    }

    #[test]
    fn window_longer_than_series_is_all_undefined() {
        let out = moving_average(&[1.0, 2.0], 5).unwrap();
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn zero_window_rejected() {
        let err = moving_average(&[1.0], 0).unwrap_err();
        assert!(matches!(err, BacktestError::InvalidParameter(_)));
    }

    proptest! {
        #[test]
        fn aligned_with_trailing_mean(
            prices in prop::collection::vec(1.0f64..1000.0, 1..60),
            window in 1usize..20,
        ) {
            let out = moving_average(&prices, window).unwrap();
            prop_assert_eq!(out.len(), prices.len());

            for (i, value) in out.iter().enumerate() {
                if i + 1 < window {
                    prop_assert!(value.is_none());
                } else {
                    let slice = &prices[i + 1 - window..=i];
                    let mean = slice.iter().sum::<f64>() / window as f64;
                    assert_relative_eq!(value.unwrap(), mean);
                }
            }
        }
    }
}
