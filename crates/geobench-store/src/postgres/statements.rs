//! SQL text for one benchmark table.
//!
//! The table name is validated as a plain identifier before it gets here.

/// Geography point built from `$lon, $lat` placeholders
const POINT_SQL: &str = "ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography";

#[derive(Debug, Clone)]
pub(crate) struct Statements {
    pub table: String,
    pub create_table: String,
    pub truncate: String,
    pub insert_prefix: String,
    pub drop_index: String,
    pub create_index: String,
    pub analyze: String,
    pub count_all: String,
    pub radius_count: String,
    pub radius_fetch: String,
    pub polygon_count: String,
    pub polygon_fetch: String,
}

impl Statements {
    pub fn new(table: &str) -> Self {
        let index = format!("{}_geom_idx", table);
        let radius_predicate = format!("ST_DWithin(geom, {}, $3)", POINT_SQL);
        let polygon_predicate = "ST_Contains(ST_GeomFromText($1, 4326), geom::geometry)";

        Self {
            table: table.to_string(),
            create_table: format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id BIGINT PRIMARY KEY,
                    lat DOUBLE PRECISION NOT NULL,
                    lon DOUBLE PRECISION NOT NULL,
                    geom GEOGRAPHY(Point, 4326) NOT NULL
                )
                "#,
                table
            ),
            truncate: format!("TRUNCATE TABLE {}", table),
            insert_prefix: format!("INSERT INTO {} (id, lat, lon, geom) ", table),
            drop_index: format!("DROP INDEX IF EXISTS {}", index),
            create_index: format!("CREATE INDEX {} ON {} USING GIST (geom)", index, table),
            analyze: format!("ANALYZE {}", table),
            count_all: format!("SELECT COUNT(*) FROM {}", table),
            radius_count: format!("SELECT COUNT(*) FROM {} WHERE {}", table, radius_predicate),
            // Nearest first, matching the order `$nearSphere` returns
            radius_fetch: format!(
                "SELECT lat, lon FROM {} WHERE {} ORDER BY geom <-> {} LIMIT $4",
                table, radius_predicate, POINT_SQL
            ),
            polygon_count: format!("SELECT COUNT(*) FROM {} WHERE {}", table, polygon_predicate),
            polygon_fetch: format!(
                "SELECT lat, lon FROM {} WHERE {} LIMIT $2",
                table, polygon_predicate
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_target_table() {
        let sql = Statements::new("bench_points");
        assert_eq!(sql.truncate, "TRUNCATE TABLE bench_points");
        assert_eq!(sql.insert_prefix, "INSERT INTO bench_points (id, lat, lon, geom) ");
        assert_eq!(
            sql.create_index,
            "CREATE INDEX bench_points_geom_idx ON bench_points USING GIST (geom)"
        );
        assert_eq!(sql.drop_index, "DROP INDEX IF EXISTS bench_points_geom_idx");
        assert!(sql.create_table.contains("CREATE TABLE IF NOT EXISTS bench_points"));
    }

    #[test]
    fn test_radius_uses_geography_distance() {
        let sql = Statements::new("locations");
        assert_eq!(
            sql.radius_count,
            "SELECT COUNT(*) FROM locations WHERE ST_DWithin(geom, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, $3)"
        );
        assert_eq!(
            sql.radius_fetch,
            "SELECT lat, lon FROM locations WHERE ST_DWithin(geom, ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography, $3) \
             ORDER BY geom <-> ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography LIMIT $4"
        );
    }

    #[test]
    fn test_polygon_uses_containment() {
        let sql = Statements::new("locations");
        assert!(sql
            .polygon_count
            .contains("ST_Contains(ST_GeomFromText($1, 4326), geom::geometry)"));
        assert!(sql.polygon_fetch.starts_with("SELECT lat, lon FROM locations"));
        assert!(sql.polygon_fetch.ends_with("LIMIT $2"));
    }
}
