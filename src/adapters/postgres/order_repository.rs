//! PostgreSQL implementation of OrderRepository.
//!
//! The checkout write is a single transaction: stock decrements, the
//! order row, its lines, and the invoice either all land or none do.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, Money, OrderId, OrderLineId, Page, PageQuery, ProductId, StoreId, Timestamp,
    UserId,
};
use crate::domain::invoice::Invoice;
use crate::domain::order::{Order, OrderLine, OrderStatus};
use crate::ports::OrderRepository;

use super::{db_error, insert_invoice};

pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    store_id: Uuid,
    customer_id: Uuid,
    status: String,
    total_cents: i64,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: OrderId::from_uuid(row.id),
            store_id: StoreId::from_uuid(row.store_id),
            customer_id: UserId::from_uuid(row.customer_id),
            status: parse_status(&row.status)?,
            total: Money::from_cents(row.total_cents),
            deleted: row.deleted,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price_cents: i64,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        OrderLine {
            id: OrderLineId::from_uuid(row.id),
            order_id: OrderId::from_uuid(row.order_id),
            product_id: ProductId::from_uuid(row.product_id),
            quantity: row.quantity,
            unit_price: Money::from_cents(row.unit_price_cents),
        }
    }
}

fn parse_status(s: &str) -> Result<OrderStatus, DomainError> {
    match s {
        "pending" => Ok(OrderStatus::Pending),
        "processing" => Ok(OrderStatus::Processing),
        "shipped" => Ok(OrderStatus::Shipped),
        "delivered" => Ok(OrderStatus::Delivered),
        "cancelled" => Ok(OrderStatus::Cancelled),
        _ => Err(DomainError::database(format!("Invalid order status value: {}", s))),
    }
}

const COLUMNS: &str = "id, store_id, customer_id, status, total_cents, deleted, created_at, updated_at";

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create_checkout(
        &self,
        order: &Order,
        lines: &[OrderLine],
        invoice: &Invoice,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start checkout transaction", e))?;

        // Decrement stock first; the predicate makes insufficiency a
        // zero-row update instead of a negative balance.
        for line in lines {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - $2, updated_at = $3
                WHERE id = $1 AND deleted = FALSE AND stock >= $2
                "#,
            )
            .bind(line.product_id.as_uuid())
            .bind(line.quantity)
            .bind(Timestamp::now().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to reserve stock", e))?;

            if result.rows_affected() == 0 {
                return Err(DomainError::conflict(format!(
                    "Insufficient stock for product {}",
                    line.product_id
                )));
            }
        }

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, store_id, customer_id, status, total_cents,
                deleted, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.store_id.as_uuid())
        .bind(order.customer_id.as_uuid())
        .bind(order.status.as_str())
        .bind(order.total.cents())
        .bind(order.deleted)
        .bind(order.created_at.as_datetime())
        .bind(order.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to save order", e))?;

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO order_lines (id, order_id, product_id, quantity, unit_price_cents)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(line.id.as_uuid())
            .bind(line.order_id.as_uuid())
            .bind(line.product_id.as_uuid())
            .bind(line.quantity)
            .bind(line.unit_price.cents())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to save order line", e))?;
        }

        insert_invoice(&mut tx, invoice).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit checkout", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM orders WHERE id = $1 AND deleted = FALSE",
            COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find order", e))?;

        row.map(Order::try_from).transpose()
    }

    async fn find_lines(&self, order_id: &OrderId) -> Result<Vec<OrderLine>, DomainError> {
        let rows: Vec<OrderLineRow> = sqlx::query_as(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price_cents
            FROM order_lines
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load order lines", e))?;

        Ok(rows.into_iter().map(OrderLine::from).collect())
    }

    async fn list_by_customer(
        &self,
        customer_id: &UserId,
        page: &PageQuery,
    ) -> Result<Page<Order>, DomainError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE customer_id = $1 AND deleted = FALSE",
        )
        .bind(customer_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count orders", e))?;

        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM orders
            WHERE customer_id = $1 AND deleted = FALSE
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            COLUMNS
        ))
        .bind(customer_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list orders", e))?;

        let items = rows
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn list_by_store(
        &self,
        store_id: &StoreId,
        page: &PageQuery,
    ) -> Result<Page<Order>, DomainError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE store_id = $1 AND deleted = FALSE",
        )
        .bind(store_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count orders", e))?;

        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM orders
            WHERE store_id = $1 AND deleted = FALSE
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            COLUMNS
        ))
        .bind(store_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list orders", e))?;

        let items = rows
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, total as u64, page))
    }

    async fn update_status(
        &self,
        id: &OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE orders SET status = $3, updated_at = $4
            WHERE id = $1 AND status = $2 AND deleted = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update order status", e))?;

        if result.rows_affected() == 0 {
            // Distinguish a vanished order from a lost race.
            return match self.find_by_id(id).await? {
                None => Err(DomainError::not_found("Order", id)),
                Some(order) => Err(DomainError::conflict(format!(
                    "Order is {} but the update expected {}",
                    order.status, from
                ))),
            };
        }

        Ok(())
    }
}
