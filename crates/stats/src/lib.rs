//! Statistical helper functions for the Helios forecaster.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Population variance with N denominator. Returns 0.0 if empty.
pub fn population_variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n
}

/// Moment-based sample skewness (population moments, as used by the
/// Jarque-Bera statistic). Returns `None` for fewer than 3 elements or
/// zero variance.
pub fn skewness(data: &[f64]) -> Option<f64> {
    if data.len() < 3 {
        return None;
    }
    let n = data.len() as f64;
    let m = data.iter().sum::<f64>() / n;
    let m2 = data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / n;
    if m2 <= 1e-300 {
        return None;
    }
    let m3 = data.iter().map(|&x| (x - m).powi(3)).sum::<f64>() / n;
    Some(m3 / m2.powf(1.5))
}

/// Moment-based excess kurtosis (population moments, Jarque-Bera
/// convention: normal data gives 0). Returns `None` for fewer than 4
/// elements or zero variance.
pub fn excess_kurtosis(data: &[f64]) -> Option<f64> {
    if data.len() < 4 {
        return None;
    }
    let n = data.len() as f64;
    let m = data.iter().sum::<f64>() / n;
    let m2 = data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / n;
    if m2 <= 1e-300 {
        return None;
    }
    let m4 = data.iter().map(|&x| (x - m).powi(4)).sum::<f64>() / n;
    Some(m4 / (m2 * m2) - 3.0)
}

/// Sample autocorrelations r_1..r_max_lag.
///
/// r_k = sum_{t=k}^{n-1} (x_t - m)(x_{t-k} - m) / sum_t (x_t - m)^2.
/// Returns an empty vector when the series is shorter than `max_lag + 1`
/// or has zero variance.
pub fn autocorrelations(data: &[f64], max_lag: usize) -> Vec<f64> {
    let n = data.len();
    if max_lag == 0 || n < max_lag + 1 {
        return Vec::new();
    }
    let m = data.iter().sum::<f64>() / n as f64;
    let denom: f64 = data.iter().map(|&x| (x - m) * (x - m)).sum();
    if denom <= 1e-300 {
        return Vec::new();
    }
    (1..=max_lag)
        .map(|k| {
            let num: f64 = (k..n).map(|t| (data[t] - m) * (data[t - k] - m)).sum();
            num / denom
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sd() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sd(&data), 2.138090, epsilon = 1e-6);
    }

    #[test]
    fn test_sd_single() {
        assert_eq!(sd(&[5.0]), 0.0);
    }

    #[test]
    fn test_variance_basic() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(variance(&data), 4.571429, epsilon = 1e-4);
    }

    #[test]
    fn test_variance_two() {
        // [3.0, 7.0]: mean=5, sum_sq=8, var=8/1=8
        assert_relative_eq!(variance(&[3.0, 7.0]), 8.0, epsilon = 1e-10);
    }

    #[test]
    fn test_population_variance() {
        // [3.0, 7.0]: mean=5, sum_sq=8, var=8/2=4
        assert_relative_eq!(population_variance(&[3.0, 7.0]), 4.0, epsilon = 1e-10);
    }

    #[test]
    fn test_skewness_symmetric() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(skewness(&data).unwrap(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_skewness_right_tail() {
        let data = [1.0, 1.0, 1.0, 1.0, 10.0];
        assert!(skewness(&data).unwrap() > 1.0);
    }

    #[test]
    fn test_skewness_constant() {
        assert!(skewness(&[5.0, 5.0, 5.0]).is_none());
    }

    #[test]
    fn test_excess_kurtosis_two_point() {
        // Two-point distribution {-1, 1}: m2 = 1, m4 = 1, kurtosis = 1,
        // excess = -2.
        let data = [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0];
        assert_relative_eq!(excess_kurtosis(&data).unwrap(), -2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_excess_kurtosis_too_short() {
        assert!(excess_kurtosis(&[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_autocorrelations_alternating() {
        // Perfectly alternating series has r_1 close to -1.
        let data: Vec<f64> = (0..100)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let acf = autocorrelations(&data, 2);
        assert_eq!(acf.len(), 2);
        assert!(acf[0] < -0.9, "r1 = {}", acf[0]);
        assert!(acf[1] > 0.9, "r2 = {}", acf[1]);
    }

    #[test]
    fn test_autocorrelations_constant() {
        assert!(autocorrelations(&[5.0; 20], 3).is_empty());
    }

    #[test]
    fn test_autocorrelations_short() {
        assert!(autocorrelations(&[1.0, 2.0], 5).is_empty());
    }
}
