use geobench_core::error::{GeobenchError, Result};
use geobench_core::models::{Dataset, GeoPoint};
use sqlx::{Connection, Postgres, QueryBuilder};

use super::{PostgisBackend, BACKEND_NAME};

impl PostgisBackend {
    /// Truncate the benchmark table, bulk insert `dataset` and rebuild the
    /// GIST index, all in one transaction.
    pub(super) async fn replace_dataset(&self, dataset: &Dataset) -> Result<()> {
        let sql = &self.statements;
        let mut session = self.session().await?;

        let mut tx = session.conn().begin().await.map_err(|e| {
            GeobenchError::load(BACKEND_NAME, format!("failed to begin transaction: {}", e))
        })?;

        sqlx::query("CREATE EXTENSION IF NOT EXISTS postgis")
            .execute(&mut *tx)
            .await
            .map_err(|e| GeobenchError::schema(BACKEND_NAME, format!("postgis extension: {}", e)))?;

        sqlx::query(&sql.create_table)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                GeobenchError::schema(BACKEND_NAME, format!("create table {}: {}", sql.table, e))
            })?;

        sqlx::query(&sql.truncate)
            .execute(&mut *tx)
            .await
            .map_err(|e| GeobenchError::load(BACKEND_NAME, format!("truncate {}: {}", sql.table, e)))?;

        let rows: Vec<(i64, GeoPoint)> = dataset.iter_with_ids().collect();
        for (batch_idx, batch) in rows.chunks(self.config.batch_size).enumerate() {
            let mut builder = QueryBuilder::<Postgres>::new(&sql.insert_prefix);
            builder.push_values(batch, |mut row, &(id, point)| {
                row.push_bind(id)
                    .push_bind(point.lat)
                    .push_bind(point.lon)
                    .push("ST_SetSRID(ST_MakePoint(")
                    .push_bind_unseparated(point.lon)
                    .push_unseparated(", ")
                    .push_bind_unseparated(point.lat)
                    .push_unseparated("), 4326)::geography");
            });

            builder.build().execute(&mut *tx).await.map_err(|e| {
                GeobenchError::load(BACKEND_NAME, format!("insert batch {}: {}", batch_idx, e))
            })?;

            tracing::debug!(table = %sql.table, batch = batch_idx, rows = batch.len(), "inserted batch");
        }

        for statement in [&sql.drop_index, &sql.create_index, &sql.analyze] {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(|e| GeobenchError::schema(BACKEND_NAME, format!("{}: {}", statement, e)))?;
        }

        tx.commit().await.map_err(|e| {
            GeobenchError::load(BACKEND_NAME, format!("failed to commit load: {}", e))
        })?;

        tracing::info!(table = %sql.table, points = dataset.len(), "PostGIS dataset replaced");
        session.close().await
    }
}
