use async_trait::async_trait;
use geobench_core::error::{GeobenchError, Result};
use geobench_core::models::{BoundingPolygon, Dataset, QueryOutcome, RadiusQuery, ResultMode};
use geobench_core::ports::{GeoBackend, QueryOperators};

use super::{PostgisBackend, BACKEND_NAME};

#[async_trait]
impl GeoBackend for PostgisBackend {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    fn operators(&self, _mode: ResultMode) -> QueryOperators {
        QueryOperators {
            radius: "ST_DWithin",
            polygon: "ST_Contains",
        }
    }

    async fn load_dataset(&self, dataset: &Dataset) -> Result<()> {
        self.replace_dataset(dataset).await
    }

    async fn count_points(&self) -> Result<u64> {
        let mut session = self.session().await?;
        let count: i64 = sqlx::query_scalar(&self.statements.count_all)
            .fetch_one(session.conn())
            .await
            .map_err(|e| GeobenchError::query(BACKEND_NAME, format!("failed to count points: {}", e)))?;
        session.close().await?;

        Ok(count as u64)
    }

    async fn query_radius(&self, query: &RadiusQuery, mode: ResultMode) -> Result<QueryOutcome> {
        let sql = &self.statements;
        let center = query.center;
        let mut session = self.session().await?;

        let outcome = match mode {
            ResultMode::Count => {
                let count: i64 = sqlx::query_scalar(&sql.radius_count)
                    .bind(center.lon)
                    .bind(center.lat)
                    .bind(query.radius_meters)
                    .fetch_one(session.conn())
                    .await
                    .map_err(|e| GeobenchError::query(BACKEND_NAME, e))?;
                QueryOutcome::Counted(count as u64)
            }
            ResultMode::FetchCapped { limit } => {
                let rows: Vec<(f64, f64)> = sqlx::query_as(&sql.radius_fetch)
                    .bind(center.lon)
                    .bind(center.lat)
                    .bind(query.radius_meters)
                    .bind(i64::from(limit))
                    .fetch_all(session.conn())
                    .await
                    .map_err(|e| GeobenchError::query(BACKEND_NAME, e))?;
                QueryOutcome::Fetched(rows.len())
            }
        };

        session.close().await?;
        Ok(outcome)
    }

    async fn query_polygon(
        &self,
        polygon: &BoundingPolygon,
        mode: ResultMode,
    ) -> Result<QueryOutcome> {
        let sql = &self.statements;
        let wkt = polygon.to_wkt();
        let mut session = self.session().await?;

        let outcome = match mode {
            ResultMode::Count => {
                let count: i64 = sqlx::query_scalar(&sql.polygon_count)
                    .bind(&wkt)
                    .fetch_one(session.conn())
                    .await
                    .map_err(|e| GeobenchError::query(BACKEND_NAME, e))?;
                QueryOutcome::Counted(count as u64)
            }
            ResultMode::FetchCapped { limit } => {
                let rows: Vec<(f64, f64)> = sqlx::query_as(&sql.polygon_fetch)
                    .bind(&wkt)
                    .bind(i64::from(limit))
                    .fetch_all(session.conn())
                    .await
                    .map_err(|e| GeobenchError::query(BACKEND_NAME, e))?;
                QueryOutcome::Fetched(rows.len())
            }
        };

        session.close().await?;
        Ok(outcome)
    }
}
