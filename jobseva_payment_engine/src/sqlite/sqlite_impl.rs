use std::fmt::Debug;

use log::trace;
use sqlx::SqlitePool;

use super::{db, new_pool};
use crate::{
    db_types::{
        FulfillmentRequest,
        FulfillmentStatus,
        NewFulfillmentRequest,
        NewPaymentRecord,
        OrderId,
        PaymentId,
        PaymentRecord,
    },
    traits::{FulfillmentLedgerDatabase, LedgerError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object. The URL is always injected by the caller; this crate
    /// never reads the environment.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, LedgerError> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl FulfillmentLedgerDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_payment_record(&self, payment: NewPaymentRecord) -> Result<(PaymentRecord, bool), LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::payments::idempotent_insert(payment, &mut conn).await
    }

    async fn create_request_if_absent(
        &self,
        request: NewFulfillmentRequest,
    ) -> Result<(FulfillmentRequest, bool), LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::requests::conditional_insert(request, &mut conn).await
    }

    async fn fetch_payment_record(
        &self,
        order_id: &OrderId,
        payment_id: &PaymentId,
    ) -> Result<Option<PaymentRecord>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::payments::fetch_payment_record(order_id, payment_id, &mut conn).await
    }

    async fn fetch_request_for_payment(
        &self,
        order_id: &OrderId,
        payment_id: &PaymentId,
    ) -> Result<Option<FulfillmentRequest>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::requests::fetch_request_for_payment(order_id, payment_id, &mut conn).await
    }

    async fn fetch_request_by_id(&self, id: i64) -> Result<Option<FulfillmentRequest>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::requests::fetch_request_by_id(id, &mut conn).await
    }

    async fn advance_request_status(
        &self,
        id: i64,
        new_status: FulfillmentStatus,
    ) -> Result<FulfillmentRequest, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        db::requests::advance_status(id, new_status, &mut conn).await
    }

    async fn close(&mut self) -> Result<(), LedgerError> {
        self.pool.close().await;
        Ok(())
    }
}
