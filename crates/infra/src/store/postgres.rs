//! Postgres-backed pricing store.
//!
//! ## Guarded writes
//!
//! `insert_product_price` and `update_product_price` run in one transaction:
//!
//! 1. `SELECT … FOR UPDATE` on the owning `products` row
//! 2. load the sibling schedules
//! 3. run the overlap guard
//! 4. write the row and commit
//!
//! The row lock serializes concurrent writers for the same product, so two
//! inserts can never both pass the guard against a stale sibling set.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (foreign key violation) | `23503` | `NotFound` |
//! | Database (check constraint violation) | `23514` | `Domain(Validation)` |
//! | RowNotFound | N/A | `NotFound` |
//! | anything else | any | `Database` |

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::{instrument, Span};

use async_trait::async_trait;

use smilewidgets_core::{Cents, DateRange, DomainError, GiftCardId, ProductId, ProductPriceId};
use smilewidgets_products::{
    GiftCard, NewGiftCard, NewProduct, NewProductPrice, Product, ProductPrice, check_no_overlap,
};

use super::{PricingStore, StoreError, StoreResult};

const MIGRATION: &str = include_str!("../../migrations/0001_pricing.sql");

/// Postgres-backed pricing store.
///
/// Uses the SQLx connection pool, which is `Send + Sync` and cheap to clone.
#[derive(Debug, Clone)]
pub struct PostgresPricingStore {
    pool: PgPool,
}

impl PostgresPricingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and apply the schema.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Create tables and indexes if missing. Idempotent.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::raw_sql(MIGRATION)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        tracing::info!("pricing schema ready");
        Ok(())
    }

    async fn begin(&self) -> StoreResult<Transaction<'static, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))
    }
}

/// Lock the product row for the rest of the transaction.
async fn lock_product(
    tx: &mut Transaction<'static, Postgres>,
    product_id: ProductId,
) -> StoreResult<()> {
    sqlx::query("SELECT id FROM products WHERE id = $1 FOR UPDATE")
        .bind(product_id.get())
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("lock_product", e))?
        .ok_or(StoreError::NotFound)?;
    Ok(())
}

/// `NotFound` unless `price_id` exists and belongs to `product_id`.
async fn ensure_owned_price(
    tx: &mut Transaction<'static, Postgres>,
    product_id: ProductId,
    price_id: ProductPriceId,
) -> StoreResult<()> {
    sqlx::query("SELECT 1 FROM product_prices WHERE id = $1 AND product_id = $2")
        .bind(price_id.get())
        .bind(product_id.get())
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| map_sqlx_error("ensure_owned_price", e))?
        .ok_or(StoreError::NotFound)?;
    Ok(())
}

async fn load_siblings(
    tx: &mut Transaction<'static, Postgres>,
    product_id: ProductId,
    except: Option<ProductPriceId>,
) -> StoreResult<Vec<ProductPrice>> {
    let rows = sqlx::query(
        r#"
        SELECT id, product_id, amount, date_start, date_end
        FROM product_prices
        WHERE product_id = $1 AND ($2::BIGINT IS NULL OR id <> $2)
        ORDER BY date_start ASC, id ASC
        "#,
    )
    .bind(product_id.get())
    .bind(except.map(|id| id.get()))
    .fetch_all(&mut **tx)
    .await
    .map_err(|e| map_sqlx_error("load_siblings", e))?;

    rows.iter().map(product_price_from_row).collect()
}

#[async_trait]
impl PricingStore for PostgresPricingStore {
    #[instrument(skip(self, product), fields(code = %product.code), err)]
    async fn create_product(&self, product: NewProduct) -> StoreResult<Product> {
        let product = product.validate()?;

        let row = sqlx::query(
            r#"
            INSERT INTO products (name, code, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, code, price
            "#,
        )
        .bind(&product.name)
        .bind(&product.code)
        .bind(cents_to_db(product.price)?)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Conflict(format!("product code '{}' already exists", product.code))
            } else {
                map_sqlx_error("create_product", e)
            }
        })?;

        product_from_row(&row)
    }

    #[instrument(skip(self), err)]
    async fn product_by_code(&self, code: &str) -> StoreResult<Option<Product>> {
        let row = sqlx::query("SELECT id, name, code, price FROM products WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("product_by_code", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query("SELECT id, name, code, price FROM products ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_products", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), fields(product_id = %product_id), err)]
    async fn set_base_price(&self, product_id: ProductId, price: Cents) -> StoreResult<Product> {
        let row = sqlx::query(
            r#"
            UPDATE products SET price = $2
            WHERE id = $1
            RETURNING id, name, code, price
            "#,
        )
        .bind(product_id.get())
        .bind(cents_to_db(price)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("set_base_price", e))?
        .ok_or(StoreError::NotFound)?;

        product_from_row(&row)
    }

    #[instrument(skip(self), fields(product_id = %product_id), err)]
    async fn delete_product(&self, product_id: ProductId) -> StoreResult<()> {
        // product_prices rows go with it (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %product_id), err)]
    async fn product_prices(&self, product_id: ProductId) -> StoreResult<Vec<ProductPrice>> {
        let exists = sqlx::query("SELECT 1 FROM products WHERE id = $1")
            .bind(product_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("product_exists", e))?;
        if exists.is_none() {
            return Err(StoreError::NotFound);
        }

        let rows = sqlx::query(
            r#"
            SELECT id, product_id, amount, date_start, date_end
            FROM product_prices
            WHERE product_id = $1
            ORDER BY date_start ASC, id ASC
            "#,
        )
        .bind(product_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("product_prices", e))?;

        rows.iter().map(product_price_from_row).collect()
    }

    #[instrument(
        skip(self, price),
        fields(product_id = %product_id, range = %price.range, price_id = tracing::field::Empty),
        err
    )]
    async fn insert_product_price(
        &self,
        product_id: ProductId,
        price: NewProductPrice,
    ) -> StoreResult<ProductPrice> {
        let span = Span::current();
        let mut tx = self.begin().await?;

        lock_product(&mut tx, product_id).await?;
        let siblings = load_siblings(&mut tx, product_id, None).await?;
        if let Err(reason) = check_no_overlap(&siblings, &price.range) {
            tracing::warn!(%reason, siblings = siblings.len(), "price schedule rejected");
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(reason.into());
        }

        let row = sqlx::query(
            r#"
            INSERT INTO product_prices (product_id, amount, date_start, date_end)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, amount, date_start, date_end
            "#,
        )
        .bind(product_id.get())
        .bind(cents_to_db(price.amount)?)
        .bind(price.range.start())
        .bind(price.range.end())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert_product_price", e))?;
        let stored = product_price_from_row(&row)?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        span.record("price_id", stored.id.get());
        tracing::info!(price_id = %stored.id, "price schedule stored");
        Ok(stored)
    }

    #[instrument(
        skip(self, price),
        fields(product_id = %product_id, price_id = %price_id, range = %price.range),
        err
    )]
    async fn update_product_price(
        &self,
        product_id: ProductId,
        price_id: ProductPriceId,
        price: NewProductPrice,
    ) -> StoreResult<ProductPrice> {
        let mut tx = self.begin().await?;

        lock_product(&mut tx, product_id).await?;
        ensure_owned_price(&mut tx, product_id, price_id).await?;
        let siblings = load_siblings(&mut tx, product_id, Some(price_id)).await?;
        if let Err(reason) = check_no_overlap(&siblings, &price.range) {
            tracing::warn!(%reason, "price schedule update rejected");
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(reason.into());
        }

        let row = sqlx::query(
            r#"
            UPDATE product_prices
            SET amount = $3, date_start = $4, date_end = $5
            WHERE id = $1 AND product_id = $2
            RETURNING id, product_id, amount, date_start, date_end
            "#,
        )
        .bind(price_id.get())
        .bind(product_id.get())
        .bind(cents_to_db(price.amount)?)
        .bind(price.range.start())
        .bind(price.range.end())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update_product_price", e))?
        .ok_or(StoreError::NotFound)?;
        let stored = product_price_from_row(&row)?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        tracing::info!("price schedule updated");
        Ok(stored)
    }

    #[instrument(skip(self), fields(product_id = %product_id, price_id = %price_id), err)]
    async fn delete_product_price(
        &self,
        product_id: ProductId,
        price_id: ProductPriceId,
    ) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM product_prices WHERE id = $1 AND product_id = $2")
            .bind(price_id.get())
            .bind(product_id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product_price", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self, card), fields(code = %card.code), err)]
    async fn create_gift_card(&self, card: NewGiftCard) -> StoreResult<GiftCard> {
        let card = card.validate()?;

        let row = sqlx::query(
            r#"
            INSERT INTO gift_cards (code, amount, date_start, date_end)
            VALUES ($1, $2, $3, $4)
            RETURNING id, code, amount, date_start, date_end
            "#,
        )
        .bind(&card.code)
        .bind(cents_to_db(card.amount)?)
        .bind(card.range.start())
        .bind(card.range.end())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_gift_card", e))?;

        gift_card_from_row(&row)
    }

    #[instrument(skip(self), err)]
    async fn gift_cards_by_code(&self, code: &str) -> StoreResult<Vec<GiftCard>> {
        let rows = sqlx::query(
            r#"
            SELECT id, code, amount, date_start, date_end
            FROM gift_cards
            WHERE code = $1
            ORDER BY date_start ASC, id ASC
            "#,
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("gift_cards_by_code", e))?;

        rows.iter().map(gift_card_from_row).collect()
    }
}

// Row mapping

fn cents_to_db(cents: Cents) -> StoreResult<i64> {
    i64::try_from(cents.get()).map_err(|_| {
        StoreError::Domain(DomainError::validation(format!(
            "amount {} is too large",
            cents.get()
        )))
    })
}

fn cents_from_db(value: i64) -> StoreResult<Cents> {
    u64::try_from(value)
        .map(Cents::new)
        .map_err(|_| StoreError::Database(format!("negative amount in storage: {value}")))
}

fn range_from_db(start: NaiveDate, end: Option<NaiveDate>) -> StoreResult<DateRange> {
    DateRange::new(start, end)
        .map_err(|e| StoreError::Database(format!("invalid stored date range: {e}")))
}

fn product_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<Product> {
    let decode = |e| map_sqlx_error("decode_product", e);
    Ok(Product {
        id: ProductId::new(row.try_get("id").map_err(decode)?),
        name: row.try_get("name").map_err(decode)?,
        code: row.try_get("code").map_err(decode)?,
        price: cents_from_db(row.try_get("price").map_err(decode)?)?,
    })
}

fn product_price_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<ProductPrice> {
    let decode = |e| map_sqlx_error("decode_product_price", e);
    Ok(ProductPrice {
        id: ProductPriceId::new(row.try_get("id").map_err(decode)?),
        product_id: ProductId::new(row.try_get("product_id").map_err(decode)?),
        amount: cents_from_db(row.try_get("amount").map_err(decode)?)?,
        range: range_from_db(
            row.try_get("date_start").map_err(decode)?,
            row.try_get("date_end").map_err(decode)?,
        )?,
    })
}

fn gift_card_from_row(row: &sqlx::postgres::PgRow) -> StoreResult<GiftCard> {
    let decode = |e| map_sqlx_error("decode_gift_card", e);
    Ok(GiftCard {
        id: GiftCardId::new(row.try_get("id").map_err(decode)?),
        code: row.try_get("code").map_err(decode)?,
        amount: cents_from_db(row.try_get("amount").map_err(decode)?)?,
        range: range_from_db(
            row.try_get("date_start").map_err(decode)?,
            row.try_get("date_end").map_err(decode)?,
        )?,
    })
}

/// Map SQLx errors to store errors.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => StoreError::Conflict(msg),
                Some("23503") => StoreError::NotFound,
                Some("23514") => StoreError::Domain(DomainError::validation(msg)),
                _ => StoreError::Database(msg),
            }
        }
        sqlx::Error::RowNotFound => StoreError::NotFound,
        other => StoreError::Database(format!("{operation}: {other}")),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code.as_ref() == "23505";
        }
    }
    false
}
