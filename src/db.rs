//! SQLite storage for catalog reference data

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use crate::catalog::{Catalog, RequirementEntry};
use crate::models::{Category, Component};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Purchasable parts; rowid preserves insertion order for tie-breaks
        CREATE TABLE IF NOT EXISTS components (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            price INTEGER NOT NULL CHECK (price >= 0),
            performance INTEGER NOT NULL CHECK (performance >= 0)
        );

        CREATE TABLE IF NOT EXISTS component_tags (
            component_id TEXT NOT NULL,
            tag TEXT NOT NULL,
            PRIMARY KEY (component_id, tag)
        );

        -- Minimum performance per game or application
        CREATE TABLE IF NOT EXISTS requirements (
            title TEXT PRIMARY KEY,
            min_performance INTEGER NOT NULL CHECK (min_performance >= 0)
        );

        CREATE INDEX IF NOT EXISTS idx_components_category ON components(category);
        "#,
    )?;
    Ok(())
}

/// Insert or replace a component and its tags
pub fn upsert_component(conn: &Connection, component: &Component) -> Result<()> {
    conn.execute(
        "INSERT INTO components (id, name, category, price, performance)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(id) DO UPDATE SET
             name = excluded.name,
             category = excluded.category,
             price = excluded.price,
             performance = excluded.performance",
        params![
            component.id,
            component.name,
            component.category.as_str(),
            i64::try_from(component.price).context("price out of range")?,
            component.performance,
        ],
    )?;

    conn.execute(
        "DELETE FROM component_tags WHERE component_id = ?1",
        [&component.id],
    )?;
    for tag in &component.tags {
        conn.execute(
            "INSERT INTO component_tags (component_id, tag) VALUES (?1, ?2)",
            (&component.id, tag),
        )?;
    }
    Ok(())
}

/// Insert or replace a requirement entry
pub fn upsert_requirement(conn: &Connection, entry: &RequirementEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO requirements (title, min_performance) VALUES (?1, ?2)
         ON CONFLICT(title) DO UPDATE SET min_performance = excluded.min_performance",
        (&entry.title, entry.min_performance),
    )?;
    Ok(())
}

/// Clear all catalog data (for re-import)
pub fn clear_catalog(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM component_tags;
        DELETE FROM components;
        DELETE FROM requirements;
        "#,
    )?;
    Ok(())
}

/// Write a whole catalog in one transaction
pub fn store_catalog(conn: &mut Connection, catalog: &Catalog) -> Result<()> {
    let tx = conn.transaction()?;
    for component in catalog.components() {
        upsert_component(&tx, component)
            .with_context(|| format!("storing component {}", component.id))?;
    }
    for entry in catalog.requirements() {
        upsert_requirement(&tx, entry)?;
    }
    tx.commit()?;
    Ok(())
}

/// Load the catalog stored in the database, components in insertion order
pub fn load_catalog(conn: &Connection) -> Result<Catalog> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category, price, performance FROM components ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i64>(3)?,
            row.get::<_, u32>(4)?,
        ))
    })?;

    let mut components = Vec::new();
    for row in rows {
        let (id, name, category, price, performance) = row?;
        let category: Category = category
            .parse()
            .with_context(|| format!("component {id}"))?;
        let price = u64::try_from(price).with_context(|| format!("negative price for {id}"))?;
        let tags = get_tags(conn, &id)?;
        components.push(Component {
            id,
            name,
            category,
            price,
            performance,
            tags,
        });
    }

    let mut stmt = conn.prepare("SELECT title, min_performance FROM requirements ORDER BY rowid")?;
    let rows = stmt.query_map([], |row| {
        Ok(RequirementEntry {
            title: row.get(0)?,
            min_performance: row.get(1)?,
        })
    })?;

    let mut requirements = Vec::new();
    for row in rows {
        requirements.push(row?);
    }

    Ok(Catalog::new(components, requirements)?)
}

fn get_tags(conn: &Connection, component_id: &str) -> Result<std::collections::BTreeSet<String>> {
    let mut stmt = conn.prepare("SELECT tag FROM component_tags WHERE component_id = ?1")?;
    let rows = stmt.query_map([component_id], |row| row.get(0))?;

    let mut tags = std::collections::BTreeSet::new();
    for row in rows {
        tags.insert(row?);
    }
    Ok(tags)
}

/// List components, optionally for one category, ordered for display
pub fn list_components(conn: &Connection, category: Option<Category>) -> Result<Vec<Component>> {
    let mut components: Vec<Component> = load_catalog(conn)?
        .components()
        .iter()
        .filter(|c| category.is_none_or(|cat| c.category == cat))
        .cloned()
        .collect();
    components.sort_by_key(|c| (c.category, c.price));
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn stored_catalog_loads_back_identically() {
        let mut conn = memory_db();
        let builtin = Catalog::builtin();
        store_catalog(&mut conn, &builtin).unwrap();
        assert_eq!(load_catalog(&conn).unwrap(), builtin);
    }

    #[test]
    fn empty_database_gives_empty_catalog() {
        let conn = memory_db();
        assert!(load_catalog(&conn).unwrap().is_empty());
    }

    #[test]
    fn upsert_replaces_tags_and_keeps_position() {
        let mut conn = memory_db();
        store_catalog(&mut conn, &Catalog::builtin()).unwrap();

        let mut cooler = Catalog::builtin().by_id("cooler-air").cloned().unwrap();
        cooler.price = 99_000;
        cooler.tags = ["air".to_string(), "low-profile".to_string()].into();
        upsert_component(&conn, &cooler).unwrap();

        let catalog = load_catalog(&conn).unwrap();
        let builtin = Catalog::builtin();
        let position = |cat: &Catalog| cat.components().iter().position(|c| c.id == "cooler-air");
        assert_eq!(position(&catalog), position(&builtin));
        assert_eq!(catalog.by_id("cooler-air"), Some(&cooler));
    }

    #[test]
    fn unknown_category_fails_to_load() {
        let conn = memory_db();
        conn.execute(
            "INSERT INTO components (id, name, category, price, performance) VALUES ('x', 'X', 'Sound card', 1, 1)",
            [],
        )
        .unwrap();
        assert!(load_catalog(&conn).is_err());
    }

    #[test]
    fn listing_filters_and_orders() {
        let mut conn = memory_db();
        store_catalog(&mut conn, &Catalog::builtin()).unwrap();

        let gpus = list_components(&conn, Some(Category::Gpu)).unwrap();
        let prices: Vec<u64> = gpus.iter().map(|c| c.price).collect();
        assert_eq!(prices, vec![700_000, 1_200_000, 1_800_000, 5_400_000]);

        let all = list_components(&conn, None).unwrap();
        assert_eq!(all.first().map(|c| c.category), Some(Category::Cpu));
        assert_eq!(all.last().map(|c| c.category), Some(Category::Mouse));
    }

    #[test]
    fn clear_removes_everything() {
        let mut conn = memory_db();
        store_catalog(&mut conn, &Catalog::builtin()).unwrap();
        clear_catalog(&conn).unwrap();
        assert!(load_catalog(&conn).unwrap().is_empty());
    }
}
