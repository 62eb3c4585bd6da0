//! Latency statistics

use std::time::Duration;

/// Summary of the timed executions of one benchmark
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkStats {
    /// Arithmetic mean latency in milliseconds
    pub mean_ms: f64,
    /// Population standard deviation in milliseconds
    pub stdev_ms: f64,
    /// Number of samples the statistics were computed from
    pub runs: usize,
}

impl BenchmarkStats {
    /// Reduce timing samples (milliseconds) to mean and population stdev.
    ///
    /// Returns `None` for an empty sample set.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let mean_ms = mean(samples)?;
        let stdev_ms = population_stdev(samples)?;
        Some(Self {
            mean_ms,
            stdev_ms,
            runs: samples.len(),
        })
    }
}

/// Duration as fractional milliseconds
pub fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Standard deviation with divisor N
pub fn population_stdev(samples: &[f64]) -> Option<f64> {
    let mean = mean(samples)?;

    // Identical samples have no spread; summation rounding in the mean must
    // not leak a tiny non-zero value.
    if samples.iter().all(|&s| s == samples[0]) {
        return Some(0.0);
    }

    let variance =
        samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_samples() {
        assert!(mean(&[]).is_none());
        assert!(population_stdev(&[]).is_none());
        assert!(BenchmarkStats::from_samples(&[]).is_none());
    }

    #[test]
    fn test_identical_samples_have_zero_stdev() {
        // 0.1 does not sum exactly, so the mean drifts from the samples
        let samples = [0.1; 10];
        assert_eq!(population_stdev(&samples), Some(0.0));

        let stats = BenchmarkStats::from_samples(&[4.25; 10]).unwrap();
        assert_eq!(stats.mean_ms, 4.25);
        assert_eq!(stats.stdev_ms, 0.0);
        assert_eq!(stats.runs, 10);
    }

    #[test]
    fn test_population_not_sample_stdev() {
        // Population stdev of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&samples), Some(5.0));
        assert_eq!(population_stdev(&samples), Some(2.0));
    }

    #[test]
    fn test_single_sample() {
        let stats = BenchmarkStats::from_samples(&[12.5]).unwrap();
        assert_eq!(stats.mean_ms, 12.5);
        assert_eq!(stats.stdev_ms, 0.0);
        assert_eq!(stats.runs, 1);
    }

    #[test]
    fn test_duration_ms_keeps_sub_millisecond_resolution() {
        assert!((duration_ms(Duration::from_micros(1500)) - 1.5).abs() < 1e-12);
        assert_eq!(duration_ms(Duration::from_millis(3)), 3.0);
    }
}
