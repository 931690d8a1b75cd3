use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use super::models::{Condition, LostItem, NewUser, OwnerSnapshot, Product, User};
use super::store::{ListQuery, LostItemStore, ProductStore, Store, StoreError, UserStore};

/// Collections as Postgres tables; idempotent so it can run on every start
pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            UUID PRIMARY KEY,
        name          TEXT NOT NULL,
        email         TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (email)",
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id           UUID PRIMARY KEY,
        name         TEXT NOT NULL,
        category     TEXT NOT NULL,
        price        DOUBLE PRECISION NOT NULL CHECK (price >= 0),
        condition    TEXT NOT NULL,
        description  TEXT NOT NULL,
        image        TEXT NOT NULL,
        owner_id     UUID NOT NULL REFERENCES users (id),
        owner_name   TEXT NOT NULL,
        owner_email  TEXT NOT NULL,
        owner_phone  TEXT NOT NULL,
        owner_year   TEXT NOT NULL,
        owner_branch TEXT NOT NULL,
        is_available BOOLEAN NOT NULL DEFAULT TRUE,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "ALTER TABLE products ADD COLUMN IF NOT EXISTS seq BIGSERIAL",
    "CREATE INDEX IF NOT EXISTS products_listing_idx ON products (is_available, created_at DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS lost_items (
        id             UUID PRIMARY KEY,
        item_name      TEXT NOT NULL,
        description    TEXT NOT NULL,
        location       TEXT NOT NULL,
        date_lost      TIMESTAMPTZ NOT NULL,
        contact_number TEXT NOT NULL,
        email          TEXT NOT NULL,
        image          TEXT NOT NULL,
        reported_by    UUID NOT NULL REFERENCES users (id),
        is_found       BOOLEAN NOT NULL DEFAULT FALSE,
        created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "ALTER TABLE lost_items ADD COLUMN IF NOT EXISTS seq BIGSERIAL",
    "CREATE INDEX IF NOT EXISTS lost_items_listing_idx ON lost_items (is_found, created_at DESC)",
];

const PRODUCT_COLUMNS: &str = "id, name, category, price, condition, description, image, \
    owner_id, owner_name, owner_email, owner_phone, owner_year, owner_branch, is_available, created_at";

/// Newest first; rows sharing a timestamp fall back to insertion order
const LISTING_ORDER: &str = "ORDER BY created_at DESC, seq DESC";

const LOST_ITEM_COLUMNS: &str = "id, item_name, description, location, date_lost, contact_number, \
    email, image, reported_by, is_found, created_at";

/// Postgres-backed store over a single pool opened at startup
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

/// `%term%` for ILIKE with the pattern metacharacters escaped
fn like_pattern(query: &ListQuery) -> Option<String> {
    query.search.as_ref().map(|term| {
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    })
}

fn unique_violation(err: sqlx::Error, field: &'static str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(field),
        _ => StoreError::Sqlx(err),
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    let condition: String = row.try_get("condition")?;
    let condition = Condition::from_label(&condition).ok_or_else(|| {
        StoreError::Sqlx(sqlx::Error::Decode(
            format!("unknown product condition '{}'", condition).into(),
        ))
    })?;

    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        price: row.try_get("price")?,
        condition,
        description: row.try_get("description")?,
        image: row.try_get("image")?,
        owner: OwnerSnapshot {
            user_id: row.try_get("owner_id")?,
            name: row.try_get("owner_name")?,
            email: row.try_get("owner_email")?,
            phone: row.try_get("owner_phone")?,
            year: row.try_get("owner_year")?,
            branch: row.try_get("owner_branch")?,
        },
        is_available: row.try_get("is_available")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "email"))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn insert_product(&self, product: Product) -> Result<Product, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO products ({PRODUCT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.category)
            .bind(product.price)
            .bind(product.condition.as_str())
            .bind(&product.description)
            .bind(&product.image)
            .bind(product.owner.user_id)
            .bind(&product.owner.name)
            .bind(&product.owner.email)
            .bind(&product.owner.phone)
            .bind(&product.owner.year)
            .bind(&product.owner.branch)
            .bind(product.is_available)
            .bind(product.created_at)
            .fetch_one(&self.pool)
            .await?;
        product_from_row(&row)
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn list_products(&self, query: &ListQuery) -> Result<Vec<Product>, StoreError> {
        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE is_available = TRUE
              AND ($1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1)
            {LISTING_ORDER}
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(product_from_row).collect()
    }

    async fn replace_product(&self, product: Product) -> Result<Product, StoreError> {
        let sql = format!(
            r#"
            UPDATE products
            SET name = $2, category = $3, price = $4, condition = $5, description = $6,
                image = $7, owner_phone = $8, owner_year = $9, owner_branch = $10,
                is_available = $11
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.category)
            .bind(product.price)
            .bind(product.condition.as_str())
            .bind(&product.description)
            .bind(&product.image)
            .bind(&product.owner.phone)
            .bind(&product.owner.year)
            .bind(&product.owner.branch)
            .bind(product.is_available)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)?;
        product_from_row(&row)
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl LostItemStore for PgStore {
    async fn insert_lost_item(&self, item: LostItem) -> Result<LostItem, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO lost_items ({LOST_ITEM_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {LOST_ITEM_COLUMNS}
            "#
        );
        let record = sqlx::query_as::<_, LostItem>(&sql)
            .bind(item.id)
            .bind(&item.item_name)
            .bind(&item.description)
            .bind(&item.location)
            .bind(item.date_lost)
            .bind(&item.contact_number)
            .bind(&item.email)
            .bind(&item.image)
            .bind(item.reported_by)
            .bind(item.is_found)
            .bind(item.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_lost_item(&self, id: Uuid) -> Result<Option<LostItem>, StoreError> {
        let sql = format!("SELECT {LOST_ITEM_COLUMNS} FROM lost_items WHERE id = $1");
        let record = sqlx::query_as::<_, LostItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn list_lost_items(&self, query: &ListQuery) -> Result<Vec<LostItem>, StoreError> {
        let sql = format!(
            r#"
            SELECT {LOST_ITEM_COLUMNS} FROM lost_items
            WHERE is_found = FALSE
              AND ($1::TEXT IS NULL OR item_name ILIKE $1 OR location ILIKE $1)
            {LISTING_ORDER}
            "#
        );
        let records = sqlx::query_as::<_, LostItem>(&sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn replace_lost_item(&self, item: LostItem) -> Result<LostItem, StoreError> {
        let sql = format!(
            r#"
            UPDATE lost_items
            SET item_name = $2, description = $3, location = $4, date_lost = $5,
                contact_number = $6, email = $7, image = $8, is_found = $9
            WHERE id = $1
            RETURNING {LOST_ITEM_COLUMNS}
            "#
        );
        sqlx::query_as::<_, LostItem>(&sql)
            .bind(item.id)
            .bind(&item.item_name)
            .bind(&item.description)
            .bind(&item.location)
            .bind(item.date_lost)
            .bind(&item.contact_number)
            .bind(&item.email)
            .bind(&item.image)
            .bind(item.is_found)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_lost_item(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM lost_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        let query = ListQuery::search(Some("50%_off"));
        assert_eq!(like_pattern(&query).as_deref(), Some("%50\\%\\_off%"));
        assert_eq!(like_pattern(&ListQuery::default()), None);
    }

    #[test]
    fn listings_break_timestamp_ties_by_insertion_order() {
        for table in ["products", "lost_items"] {
            let column = format!("ALTER TABLE {table} ADD COLUMN IF NOT EXISTS seq BIGSERIAL");
            assert!(SCHEMA.contains(&column.as_str()), "{table} lacks a sequence column");
        }
        assert_eq!(LISTING_ORDER, "ORDER BY created_at DESC, seq DESC");
    }
}
