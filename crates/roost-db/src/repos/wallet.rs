//! Wallet repository
//!
//! One wallet per user, created together with the account. Balance writes
//! never happen through this repository alone: [`adjust_balance`] is
//! crate-private and only callable from the ledger repository, inside the
//! same database transaction as the ledger-status write that triggered it.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbResult, DbWallet};

pub struct WalletRepo {
    pool: PgPool,
}

impl WalletRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a wallet with zero balance in the default currency
    pub async fn create(&self, user_id: Uuid) -> DbResult<DbWallet> {
        let wallet = sqlx::query_as::<_, DbWallet>(
            r#"
            INSERT INTO wallets (user_id)
            VALUES ($1)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(wallet)
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbResult<Option<DbWallet>> {
        let wallet = sqlx::query_as::<_, DbWallet>("SELECT * FROM wallets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(wallet)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> DbResult<Option<DbWallet>> {
        let wallet = sqlx::query_as::<_, DbWallet>("SELECT * FROM wallets WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(wallet)
    }
}

/// Apply a signed balance delta to a wallet.
///
/// Takes an executor so it can only run inside an open transaction owned by
/// the ledger repository; the schema's non-negative CHECK rejects any
/// update that would overdraw.
pub(crate) async fn adjust_balance<'e, E>(
    executor: E,
    wallet_id: Uuid,
    delta: Decimal,
) -> DbResult<DbWallet>
where
    E: sqlx::PgExecutor<'e>,
{
    let wallet = sqlx::query_as::<_, DbWallet>(
        r#"
        UPDATE wallets
        SET balance = balance + $2, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(wallet_id)
    .bind(delta)
    .fetch_one(executor)
    .await?;

    Ok(wallet)
}
