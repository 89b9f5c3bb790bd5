use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, Set, Statement,
};

use crate::models::property;

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_owned(),
    ))
    .await?;
    Ok(())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    execute(db, "PRAGMA foreign_keys = ON").await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS properties (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            price REAL NOT NULL,
            price_currency TEXT NOT NULL,
            area REAL NOT NULL,
            total_area REAL NOT NULL,
            measured_area REAL,
            total_rooms REAL,
            toilets INTEGER,
            construction_year INTEGER,
            renovation_year INTEGER,
            total_floors INTEGER,
            heating TEXT NOT NULL DEFAULT '',
            outer_walls TEXT NOT NULL DEFAULT '',
            roof_type TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            energy_class TEXT,
            street_name TEXT NOT NULL,
            street_number TEXT,
            postal_code TEXT NOT NULL,
            city TEXT NOT NULL,
            region TEXT,
            street_name_lc TEXT NOT NULL DEFAULT '',
            postal_code_lc TEXT NOT NULL DEFAULT '',
            city_lc TEXT NOT NULL DEFAULT '',
            country_code TEXT NOT NULL,
            property_type TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'ACTIVE',
            owner_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Databases created before the folded columns existed
    for column in ["street_name_lc", "postal_code_lc", "city_lc"] {
        let _ = execute(
            db,
            &format!("ALTER TABLE properties ADD COLUMN {column} TEXT NOT NULL DEFAULT ''"),
        )
        .await;
    }
    backfill_folded_columns(db).await?;

    // Listing queries always filter on country and status plus one more dimension.
    for column in [
        "city",
        "city_lc",
        "property_type",
        "price",
        "area",
        "postal_code",
        "total_rooms",
        "created_at",
        "construction_year",
    ] {
        execute(
            db,
            &format!(
                "CREATE INDEX IF NOT EXISTS idx_properties_country_status_{column} \
                 ON properties (country_code, status, {column})"
            ),
        )
        .await?;
    }

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS property_images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
            title TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            is_primary BOOLEAN NOT NULL DEFAULT 0,
            image TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;
    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_property_images_property ON property_images (property_id)",
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS user_favorite_properties (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE (user_id, property_id)
        )
        "#,
    )
    .await?;

    tracing::debug!("Database migrations applied");
    Ok(())
}

/// Fill the lower-case copies for rows written before they were maintained.
async fn backfill_folded_columns(db: &DatabaseConnection) -> Result<(), DbErr> {
    let stale = property::Entity::find()
        .filter(property::Column::CityLc.eq(""))
        .filter(property::Column::City.ne(""))
        .all(db)
        .await?;
    if stale.is_empty() {
        return Ok(());
    }

    tracing::info!("Backfilling folded location columns for {} properties", stale.len());
    for model in stale {
        let mut active: property::ActiveModel = model.clone().into();
        active.street_name = Set(model.street_name);
        active.postal_code = Set(model.postal_code);
        active.city = Set(model.city);
        active.update(db).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = init_db("sqlite::memory:").await.unwrap();
        run_migrations(&db).await.unwrap();
    }

    #[tokio::test]
    async fn backfills_folded_columns_for_raw_rows() {
        let db = init_db("sqlite::memory:").await.unwrap();
        execute(
            &db,
            "INSERT INTO properties (price, price_currency, area, total_area, street_name, \
             postal_code, city, country_code, property_type, created_at, updated_at) \
             VALUES (1.0, 'EUR', 50.0, 50.0, 'Šar Planina', 'MK-2000', 'Štip', 'MK', \
             'LAND', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
        )
        .await
        .unwrap();

        run_migrations(&db).await.unwrap();

        let row = property::Entity::find().one(&db).await.unwrap().unwrap();
        assert_eq!(row.city_lc, "štip");
        assert_eq!(row.street_name_lc, "šar planina");
        assert_eq!(row.postal_code_lc, "mk-2000");
    }
}
