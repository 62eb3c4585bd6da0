//! End-to-end benchmark sequence: generate, load every backend, then run
//! the radius and polygon benchmarks against each backend in order.

use rand::Rng;

use crate::config::BenchConfig;
use crate::error::{GeobenchError, Result};
use crate::generator::generate_points;
use crate::models::{Dataset, QueryShape};
use crate::ports::{GeoBackend, QueryOperators};
use crate::runner::{BenchmarkReport, BenchmarkRunner};

/// Progress notifications emitted while the suite runs
#[derive(Debug, Clone, Copy)]
pub enum SuiteEvent<'a> {
    GeneratingPoints { count: usize },
    PointsGenerated { count: usize },
    LoadingBackend { backend: &'a str },
    BackendLoaded { backend: &'a str, points: u64 },
    BenchmarkStarted { label: &'a str },
    BenchmarkFinished { report: &'a CaseReport },
}

/// Benchmark result for one (backend, query shape) pair
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub backend: String,
    pub shape: QueryShape,
    pub report: BenchmarkReport,
}

/// Label shown for a benchmark, e.g. `PostGIS radius (ST_DWithin)`
pub fn case_label(backend: &str, shape: QueryShape, operators: QueryOperators) -> String {
    let operator = match shape {
        QueryShape::Radius => operators.radius,
        QueryShape::Polygon => operators.polygon,
    };
    format!("{} {} ({})", backend, shape, operator)
}

/// Sequential benchmark over a fixed, ordered set of backends
pub struct BenchmarkSuite<'a> {
    config: &'a BenchConfig,
    runner: BenchmarkRunner,
    backends: Vec<&'a dyn GeoBackend>,
}

impl<'a> BenchmarkSuite<'a> {
    pub fn new(config: &'a BenchConfig) -> Self {
        Self {
            config,
            runner: BenchmarkRunner::new(config.runs),
            backends: Vec::new(),
        }
    }

    /// Append a backend; backends are loaded and benchmarked in the order added
    pub fn with_backend(mut self, backend: &'a dyn GeoBackend) -> Self {
        self.backends.push(backend);
        self
    }

    pub fn backends(&self) -> &[&'a dyn GeoBackend] {
        &self.backends
    }

    /// Run the whole sequence. The first failure aborts everything after it.
    pub async fn run<R, F>(&self, rng: &mut R, mut observer: F) -> Result<Vec<CaseReport>>
    where
        R: Rng + ?Sized,
        F: FnMut(SuiteEvent<'_>),
    {
        self.config.validate()?;

        let count = self.config.dataset.point_count;
        observer(SuiteEvent::GeneratingPoints { count });
        let dataset = generate_points(rng, &self.config.dataset);
        observer(SuiteEvent::PointsGenerated { count: dataset.len() });

        self.load_all(&dataset, &mut observer).await?;
        // The stores are the source of truth from here on
        drop(dataset);

        self.benchmark_all(&mut observer).await
    }

    /// Load `dataset` into every backend and verify the stored point counts
    pub async fn load_all<F>(&self, dataset: &Dataset, observer: &mut F) -> Result<()>
    where
        F: FnMut(SuiteEvent<'_>),
    {
        let expected = dataset.len() as u64;

        for &backend in &self.backends {
            observer(SuiteEvent::LoadingBackend { backend: backend.name() });
            tracing::info!(backend = backend.name(), points = expected, "loading dataset");

            backend.load_dataset(dataset).await?;

            let actual = backend.count_points().await?;
            if actual != expected {
                return Err(GeobenchError::LoadMismatch {
                    backend: backend.name().to_string(),
                    expected,
                    actual,
                });
            }

            observer(SuiteEvent::BackendLoaded {
                backend: backend.name(),
                points: actual,
            });
        }

        Ok(())
    }

    /// Run radius then polygon for each backend, in backend order
    pub async fn benchmark_all<F>(&self, observer: &mut F) -> Result<Vec<CaseReport>>
    where
        F: FnMut(SuiteEvent<'_>),
    {
        let mode = self.config.result_mode;
        let radius = &self.config.radius;
        let polygon = &self.config.polygon;
        let mut reports = Vec::with_capacity(self.backends.len() * 2);

        for &backend in &self.backends {
            for shape in [QueryShape::Radius, QueryShape::Polygon] {
                let label = case_label(backend.name(), shape, backend.operators(mode));
                observer(SuiteEvent::BenchmarkStarted { label: &label });

                let report = match shape {
                    QueryShape::Radius => {
                        self.runner
                            .run(label, move || backend.query_radius(radius, mode))
                            .await?
                    }
                    QueryShape::Polygon => {
                        self.runner
                            .run(label, move || backend.query_polygon(polygon, mode))
                            .await?
                    }
                };

                let case = CaseReport {
                    backend: backend.name().to_string(),
                    shape,
                    report,
                };
                observer(SuiteEvent::BenchmarkFinished { report: &case });
                reports.push(case);
            }
        }

        Ok(reports)
    }
}
