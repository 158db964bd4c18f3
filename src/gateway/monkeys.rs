use anyhow::{Context, Result};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, Row};
use tracing::info;

use super::MonkeyGateway;
use crate::error::GatewayError;
use crate::models::{Monkey, MonkeyFields, MonkeyId, Species};

const SELECT_COLUMNS: &str = "SELECT id, name, species, age, habitat, favorite_food, diet,
            fun_fact, image_url, is_endangered
     FROM monkeys";

impl ToSql for Species {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

impl FromSql for Species {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let label = value.as_str()?;
        Species::from_label(label).ok_or_else(|| {
            FromSqlError::Other(Box::new(GatewayError::UnknownSpecies(label.to_string())))
        })
    }
}

/// Gateway backed by an embedded SQLite database.
pub struct SqliteGateway {
    conn: Connection,
}

impl SqliteGateway {
    /// Wrap a connection whose schema is already in place.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Fresh in-memory store, mostly useful for tests and demos.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        super::ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    fn fetch_one(&self, id: MonkeyId) -> Result<Option<Monkey>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .context("failed to prepare monkey lookup")?;
        let mut rows = stmt
            .query_map(params![id.0], monkey_from_row)
            .context("failed to query monkey")?;
        let monkey = rows
            .next()
            .transpose()
            .context("failed to read monkey row")?;
        Ok(monkey)
    }
}

fn monkey_from_row(row: &Row<'_>) -> rusqlite::Result<Monkey> {
    Ok(Monkey {
        id: MonkeyId(row.get(0)?),
        name: row.get(1)?,
        species: row.get(2)?,
        age: row.get(3)?,
        habitat: row.get(4)?,
        favorite_food: row.get(5)?,
        diet: row.get(6)?,
        fun_fact: row.get(7)?,
        image_url: row.get(8)?,
        is_endangered: row.get(9)?,
    })
}

impl MonkeyGateway for SqliteGateway {
    /// Ordered by name case-insensitively so mixed-case entries group together
    /// in the grid; the id keeps duplicates stable.
    fn list(&self) -> Result<Vec<Monkey>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY name COLLATE NOCASE, id"))
            .context("failed to prepare monkey query")?;

        let monkeys = stmt
            .query_map([], monkey_from_row)
            .context("failed to load monkeys")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect monkeys")?;

        Ok(monkeys)
    }

    fn create(&self, fields: &MonkeyFields) -> Result<Monkey> {
        self.conn
            .execute(
                "INSERT INTO monkeys (name, species, age, habitat, favorite_food, diet,
                                      fun_fact, image_url, is_endangered)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    fields.name,
                    fields.species,
                    fields.age,
                    fields.habitat,
                    fields.favorite_food,
                    fields.diet,
                    fields.fun_fact,
                    fields.image_url,
                    fields.is_endangered,
                ],
            )
            .context("failed to insert monkey")?;

        let id = MonkeyId(self.conn.last_insert_rowid());
        info!(%id, name = %fields.name, "monkey created");
        Ok(Monkey::from_fields(id, fields.clone()))
    }

    fn update(&self, id: MonkeyId, fields: &MonkeyFields) -> Result<Monkey> {
        let updated = self
            .conn
            .execute(
                "UPDATE monkeys
                 SET name = ?1, species = ?2, age = ?3, habitat = ?4, favorite_food = ?5,
                     diet = ?6, fun_fact = ?7, image_url = ?8, is_endangered = ?9
                 WHERE id = ?10",
                params![
                    fields.name,
                    fields.species,
                    fields.age,
                    fields.habitat,
                    fields.favorite_food,
                    fields.diet,
                    fields.fun_fact,
                    fields.image_url,
                    fields.is_endangered,
                    id.0,
                ],
            )
            .context("failed to update monkey")?;

        if updated == 0 {
            return Err(GatewayError::NotFound(id).into());
        }

        info!(%id, "monkey updated");
        self.fetch_one(id)?
            .ok_or_else(|| GatewayError::NotFound(id).into())
    }

    fn delete(&self, id: MonkeyId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM monkeys WHERE id = ?1", params![id.0])
            .context("failed to delete monkey")?;

        if deleted == 0 {
            Err(GatewayError::NotFound(id).into())
        } else {
            info!(%id, "monkey deleted");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charlie() -> MonkeyFields {
        let mut fields = MonkeyFields::new("Charlie", Species::Chimpanzee);
        fields.age = Some(12);
        fields.habitat = Some("Tropical rainforest".to_string());
        fields.is_endangered = true;
        fields
    }

    #[test]
    fn create_assigns_ids_and_list_returns_rows() {
        let gateway = SqliteGateway::in_memory().unwrap();
        let first = gateway.create(&charlie()).unwrap();
        let second = gateway
            .create(&MonkeyFields::new("Abu", Species::Capuchin))
            .unwrap();
        assert_ne!(first.id, second.id);

        let all = gateway.list().unwrap();
        assert_eq!(all, vec![second, first]);
    }

    #[test]
    fn list_orders_names_case_insensitively() {
        let gateway = SqliteGateway::in_memory().unwrap();
        for name in ["zed", "Bob", "alice"] {
            gateway
                .create(&MonkeyFields::new(name, Species::Baboon))
                .unwrap();
        }
        let names: Vec<_> = gateway.list().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["alice", "Bob", "zed"]);
    }

    #[test]
    fn update_replaces_every_field() {
        let gateway = SqliteGateway::in_memory().unwrap();
        let created = gateway.create(&charlie()).unwrap();

        let mut changed = MonkeyFields::new("Charles", Species::Bonobo);
        changed.diet = Some("Omnivore".to_string());
        let updated = gateway.update(created.id, &changed).unwrap();

        assert_eq!(updated, Monkey::from_fields(created.id, changed));
        assert_eq!(gateway.list().unwrap(), vec![updated]);
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let gateway = SqliteGateway::in_memory().unwrap();
        let err = gateway
            .update(MonkeyId(42), &charlie())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GatewayError>(),
            Some(GatewayError::NotFound(MonkeyId(42)))
        ));

        let err = gateway.delete(MonkeyId(7)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GatewayError>(),
            Some(GatewayError::NotFound(MonkeyId(7)))
        ));
    }

    #[test]
    fn delete_removes_the_row() {
        let gateway = SqliteGateway::in_memory().unwrap();
        let created = gateway.create(&charlie()).unwrap();
        gateway.delete(created.id).unwrap();
        assert!(gateway.list().unwrap().is_empty());
    }

    #[test]
    fn unknown_species_in_storage_fails_the_load() {
        let gateway = SqliteGateway::in_memory().unwrap();
        gateway
            .conn
            .execute(
                "INSERT INTO monkeys (name, species) VALUES ('Mort', 'Lemur')",
                [],
            )
            .unwrap();
        assert!(gateway.list().is_err());
    }
}
