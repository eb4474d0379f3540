use crate::indicator::IndicatorSeries;

//bar-over-bar fractional change, first entry undefined
pub fn period_return(prices: &[f64]) -> IndicatorSeries {
    let mut out = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return out;
    }

    out.push(None);
    out.extend(prices.windows(2).map(|w| Some((w[1] - w[0]) / w[0])));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_entry_undefined() {
        let out = period_return(&[100.0, 110.0, 99.0]);
        assert_eq!(out.len(), 3);
        assert!(out[0].is_none());
        assert_relative_eq!(out[1].unwrap(), 0.10);
        assert_relative_eq!(out[2].unwrap(), -0.10);
    }

    #[test]
    fn empty_input() {
        assert!(period_return(&[]).is_empty());
    }

    #[test]
    fn single_bar() {
        assert_eq!(period_return(&[5.0]), vec![None]);
    }
}
