//! Building repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load buildings by id, by id set, and by bounding box.
//! - Insert validated buildings for the seed loader.
//!
//! # Invariants
//! - Bounding-box queries use inclusive `BETWEEN` bounds, matching
//!   [`BoundingBox::contains`].

use crate::geo::BoundingBox;
use crate::model::building::{Building, BuildingId};
use crate::repo::{ensure_catalog_connection_ready, in_placeholders, RepoError, RepoResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const BUILDING_SELECT_SQL: &str = "SELECT id, address, latitude, longitude FROM building";

/// Repository interface for building reads and seeding.
pub trait BuildingRepository {
    fn get_building(&self, id: BuildingId) -> RepoResult<Option<Building>>;
    fn list_by_ids(&self, ids: &[BuildingId]) -> RepoResult<Vec<Building>>;
    fn list_in_box(&self, bbox: &BoundingBox) -> RepoResult<Vec<Building>>;
    fn create_building(&self, address: &str, latitude: f64, longitude: f64)
        -> RepoResult<Building>;
    fn count_buildings(&self) -> RepoResult<u64>;
}

/// SQLite-backed building repository.
pub struct SqliteBuildingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBuildingRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BuildingRepository for SqliteBuildingRepository<'_> {
    fn get_building(&self, id: BuildingId) -> RepoResult<Option<Building>> {
        let row = self
            .conn
            .query_row(
                &format!("{BUILDING_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_building_columns,
            )
            .optional()?;
        row.map(validated).transpose()
    }

    fn list_by_ids(&self, ids: &[BuildingId]) -> RepoResult<Vec<Building>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "{BUILDING_SELECT_SQL} WHERE id IN ({}) ORDER BY id ASC;",
            in_placeholders(ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(ids.iter()), read_building_columns)?;
        collect_buildings(rows)
    }

    fn list_in_box(&self, bbox: &BoundingBox) -> RepoResult<Vec<Building>> {
        let mut stmt = self.conn.prepare(&format!(
            "{BUILDING_SELECT_SQL}
             WHERE latitude BETWEEN ?1 AND ?2
               AND longitude BETWEEN ?3 AND ?4
             ORDER BY id ASC;"
        ))?;
        let rows = stmt.query_map(
            params![bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon],
            read_building_columns,
        )?;
        collect_buildings(rows)
    }

    fn create_building(
        &self,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> RepoResult<Building> {
        let building = Building {
            id: 0,
            address: address.to_string(),
            latitude,
            longitude,
        };
        building.validate()?;

        self.conn.execute(
            "INSERT INTO building (address, latitude, longitude) VALUES (?1, ?2, ?3);",
            params![building.address, building.latitude, building.longitude],
        )?;

        Ok(Building {
            id: self.conn.last_insert_rowid(),
            ..building
        })
    }

    fn count_buildings(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM building;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative building count `{count}`")))
    }
}

fn read_building_columns(row: &Row<'_>) -> rusqlite::Result<Building> {
    Ok(Building {
        id: row.get("id")?,
        address: row.get("address")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    })
}

fn validated(building: Building) -> RepoResult<Building> {
    building.validate().map_err(|err| {
        RepoError::InvalidData(format!("building {} has {err}", building.id))
    })?;
    Ok(building)
}

fn collect_buildings<I>(rows: I) -> RepoResult<Vec<Building>>
where
    I: Iterator<Item = rusqlite::Result<Building>>,
{
    rows.map(|row| validated(row?)).collect()
}

#[cfg(test)]
mod tests {
    use super::{BuildingRepository, SqliteBuildingRepository};
    use crate::db::open_db_in_memory;
    use crate::geo::BoundingBox;
    use crate::model::building::GeoPoint;
    use crate::repo::RepoError;

    #[test]
    fn create_then_get_round_trips_columns() {
        let conn = open_db_in_memory().expect("in-memory catalog should open");
        let repo = SqliteBuildingRepository::try_new(&conn)
            .expect("migrated connection should be ready");

        let created = repo
            .create_building("ул. Ленина, 1", 55.7558, 37.6176)
            .expect("building insert should succeed");
        let loaded = repo
            .get_building(created.id)
            .expect("building lookup should succeed")
            .expect("building should exist");

        assert_eq!(loaded, created);
        assert_eq!(repo.count_buildings().expect("query should succeed"), 1);
        assert!(repo
            .get_building(created.id + 1)
            .expect("building lookup should succeed")
            .is_none());
    }

    #[test]
    fn create_rejects_out_of_range_coordinates() {
        let conn = open_db_in_memory().expect("in-memory catalog should open");
        let repo = SqliteBuildingRepository::try_new(&conn)
            .expect("migrated connection should be ready");

        let err = repo
            .create_building("nowhere", 91.0, 0.0)
            .expect_err("out-of-range latitude should be rejected");
        assert!(matches!(err, RepoError::InvalidCoordinates(_)));
        assert_eq!(repo.count_buildings().expect("query should succeed"), 0);
    }

    #[test]
    fn list_in_box_uses_inclusive_bounds() {
        let conn = open_db_in_memory().expect("in-memory catalog should open");
        let repo = SqliteBuildingRepository::try_new(&conn)
            .expect("migrated connection should be ready");
        let on_edge = repo
            .create_building("edge", 10.0, 20.0)
            .expect("building insert should succeed");
        let inside = repo
            .create_building("inside", 10.5, 20.5)
            .expect("building insert should succeed");
        repo.create_building("outside", 12.0, 20.5).expect("building insert should succeed");

        let bbox = BoundingBox {
            min_lat: 10.0,
            max_lat: 11.0,
            min_lon: 20.0,
            max_lon: 21.0,
        };
        let ids: Vec<i64> = repo
            .list_in_box(&bbox)
            .expect("query should succeed")
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![on_edge.id, inside.id]);
    }

    #[test]
    fn list_in_box_handles_polar_spans() {
        let conn = open_db_in_memory().expect("in-memory catalog should open");
        let repo = SqliteBuildingRepository::try_new(&conn)
            .expect("migrated connection should be ready");
        let polar = repo
            .create_building("station", 89.99, -179.5)
            .expect("building insert should succeed");

        let bbox = BoundingBox::around(GeoPoint::new(90.0, 0.0), 5_000.0);
        let found = repo.list_in_box(&bbox).expect("query should succeed");
        assert_eq!(found, vec![polar]);
    }

    #[test]
    fn list_by_ids_skips_unknown_and_empty_input() {
        let conn = open_db_in_memory().expect("in-memory catalog should open");
        let repo = SqliteBuildingRepository::try_new(&conn)
            .expect("migrated connection should be ready");
        let first = repo.create_building("a", 1.0, 1.0).expect("building insert should succeed");
        let second = repo.create_building("b", 2.0, 2.0).expect("building insert should succeed");

        assert!(repo.list_by_ids(&[]).expect("query should succeed").is_empty());
        let found = repo.list_by_ids(&[second.id, 404, first.id]).expect("query should succeed");
        assert_eq!(found, vec![first, second]);
    }
}
