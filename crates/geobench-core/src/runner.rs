//! Warmup, timed repetitions and reduction for a single query function.

use std::future::Future;

use tokio::time::Instant;

use crate::config::RunConfig;
use crate::error::{GeobenchError, Result};
use crate::models::QueryOutcome;
use crate::stats::{duration_ms, BenchmarkStats};

/// Result of benchmarking one query function
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub label: String,
    pub stats: BenchmarkStats,
    /// Rows matched by the final timed execution
    pub matched: u64,
}

/// Drives the warmup / timed / reduce cycle
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkRunner {
    runs: RunConfig,
}

impl BenchmarkRunner {
    pub fn new(runs: RunConfig) -> Self {
        Self { runs }
    }

    /// Benchmark `query`.
    ///
    /// The function is awaited `warmup_runs` times without timing, then
    /// `timed_runs` times with each await measured on a monotonic clock. The
    /// first error aborts the benchmark; nothing is retried.
    pub async fn run<F, Fut>(&self, label: impl Into<String>, mut query: F) -> Result<BenchmarkReport>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<QueryOutcome>>,
    {
        let label = label.into();

        for run in 0..self.runs.warmup_runs {
            let outcome = query().await?;
            tracing::debug!(%label, run, matched = outcome.matched(), "warmup run finished");
        }

        let mut samples = Vec::with_capacity(self.runs.timed_runs);
        let mut matched = 0;
        for run in 0..self.runs.timed_runs {
            let started = Instant::now();
            let outcome = query().await?;
            let elapsed_ms = duration_ms(started.elapsed());

            tracing::debug!(%label, run, elapsed_ms, matched = outcome.matched(), "timed run finished");
            samples.push(elapsed_ms);
            matched = outcome.matched();
        }

        let stats = BenchmarkStats::from_samples(&samples).ok_or_else(|| {
            GeobenchError::config_invalid("runs.timed_runs", "must be greater than 0")
        })?;

        tracing::info!(
            %label,
            mean_ms = stats.mean_ms,
            stdev_ms = stats.stdev_ms,
            runs = stats.runs,
            "benchmark finished"
        );

        Ok(BenchmarkReport { label, stats, matched })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn runner() -> BenchmarkRunner {
        BenchmarkRunner::new(RunConfig {
            warmup_runs: 2,
            timed_runs: 10,
        })
    }

    #[tokio::test]
    async fn test_calls_warmup_plus_timed() {
        let mut calls = 0u64;
        let report = runner()
            .run("stub", || {
                calls += 1;
                let n = calls;
                async move { Ok(QueryOutcome::Counted(n)) }
            })
            .await
            .unwrap();

        assert_eq!(calls, 12);
        assert_eq!(report.label, "stub");
        assert_eq!(report.stats.runs, 10);
        // The final timed call was the twelfth
        assert_eq!(report.matched, 12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_warmup_timings_are_excluded() {
        let mut calls = 0u32;
        let report = runner()
            .run("slow warmup", || {
                calls += 1;
                let delay = if calls <= 2 { 500 } else { 5 };
                async move {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    Ok(QueryOutcome::Fetched(1))
                }
            })
            .await
            .unwrap();

        assert_eq!(calls, 12);
        assert!(
            (report.stats.mean_ms - 5.0).abs() < 1.0,
            "mean {} should reflect only the 5ms timed runs",
            report.stats.mean_ms
        );
        assert!(report.stats.stdev_ms < 1.0, "stdev {}", report.stats.stdev_ms);
    }

    #[tokio::test]
    async fn test_error_aborts_without_retry() {
        let mut calls = 0u32;
        let result = runner()
            .run("failing", || {
                calls += 1;
                let n = calls;
                async move {
                    if n == 4 {
                        Err(GeobenchError::query("stub", "connection reset"))
                    } else {
                        Ok(QueryOutcome::Counted(0))
                    }
                }
            })
            .await;

        assert!(matches!(result, Err(GeobenchError::Query { .. })));
        assert_eq!(calls, 4);
    }

    #[tokio::test]
    async fn test_zero_timed_runs_is_an_error() {
        let runner = BenchmarkRunner::new(RunConfig {
            warmup_runs: 1,
            timed_runs: 0,
        });
        let result = runner
            .run("empty", || async { Ok(QueryOutcome::Counted(0)) })
            .await;
        assert!(matches!(result, Err(GeobenchError::ConfigInvalid { .. })));
    }
}
