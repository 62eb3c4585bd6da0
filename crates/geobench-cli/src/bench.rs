//! Benchmark session: connect, run the suite, report, disconnect

use anyhow::{Context, Result};
use geobench_core::generator::dataset_rng;
use geobench_core::suite::BenchmarkSuite;
use geobench_store::{MongoBackend, PostgisBackend};

use crate::config::AppConfig;
use crate::output::OutputWriter;
use crate::progress::{create_spinner, finish_error, finish_success, SuiteProgress};

pub async fn execute(config: &AppConfig, output: &OutputWriter) -> Result<()> {
    config.validate().context("Invalid benchmark configuration")?;

    print_header(config, output);

    let spinner = create_spinner("Connecting to PostGIS...");
    let postgis = match PostgisBackend::connect(config.postgres.clone()).await {
        Ok(backend) => backend,
        Err(e) => {
            finish_error(&spinner, "PostGIS unreachable");
            return Err(e).context("Failed to connect to PostGIS");
        }
    };
    finish_success(&spinner, "Connected to PostGIS");

    let spinner = create_spinner("Connecting to MongoDB...");
    let mongo = match MongoBackend::connect(config.mongo.clone()).await {
        Ok(backend) => backend,
        Err(e) => {
            finish_error(&spinner, "MongoDB unreachable");
            postgis.close().await;
            return Err(e).context("Failed to connect to MongoDB");
        }
    };
    finish_success(&spinner, "Connected to MongoDB");

    let mut rng = dataset_rng(&config.bench.dataset);
    let mut progress = SuiteProgress::new(output);

    let result = BenchmarkSuite::new(&config.bench)
        .with_backend(&postgis)
        .with_backend(&mongo)
        .run(&mut rng, |event| progress.handle(event))
        .await;

    postgis.close().await;
    mongo.close().await;

    let reports = match result {
        Ok(reports) => reports,
        Err(e) => {
            progress.abandon("Benchmark aborted");
            return Err(e).context("Benchmark aborted");
        }
    };

    tracing::info!(benchmarks = reports.len(), "benchmark session finished");

    output.summary(&reports);
    output.done();
    Ok(())
}

fn print_header(config: &AppConfig, output: &OutputWriter) {
    output.section(format!(
        "geobench {} | {}",
        env!("CARGO_PKG_VERSION"),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    let bench = &config.bench;
    output.kv("Points", bench.dataset.point_count);
    output.kv(
        "Runs",
        format!("{} timed, {} warmup", bench.runs.timed_runs, bench.runs.warmup_runs),
    );
    output.kv("Radius", format!("{} m", bench.radius.radius_meters));
    output.kv("Result mode", bench.result_mode);
    output.kv("Connections", format!("{:?}", config.postgres.connection_policy));
    output.info(format!(
        "PostGIS {}:{}/{} table {}, MongoDB {}/{}",
        config.postgres.host,
        config.postgres.port,
        config.postgres.database,
        config.postgres.table,
        config.mongo.database,
        config.mongo.collection
    ));
    println!();
}
