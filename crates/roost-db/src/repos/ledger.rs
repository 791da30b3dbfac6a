//! Transaction ledger repository
//!
//! Append/update records of funding and withdrawal attempts, each tied to a
//! wallet and a unique gateway reference. This repository owns the atomic
//! unit of work for webhook reconciliation: the row lock, the terminal-state
//! guard, the balance mutation, and the status write all commit together or
//! not at all, so concurrent deliveries for the same reference cannot
//! double-apply a balance change.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use roost_types::{decide, Decision, EventKind, TransactionStatus, TransactionType};

use crate::repos::wallet::adjust_balance;
use crate::{DbError, DbResult, DbTransaction};

/// Result of reconciling one gateway event against the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No ledger row matches the event reference; foreign event, acknowledged
    UnknownReference,
    /// The transaction was already terminal; duplicate delivery absorbed
    AlreadySettled,
    /// The event kind does not apply to this transaction; acknowledged
    Ignored,
    /// Balance and status were updated in this call
    Applied(Decision),
}

pub struct LedgerRepo {
    pool: PgPool,
}

impl LedgerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a PENDING transaction before any external gateway call, so a
    /// crash after the call still leaves a reconcilable row behind.
    pub async fn create_pending(
        &self,
        wallet_id: Uuid,
        tx_type: TransactionType,
        amount: Decimal,
        reference: &str,
    ) -> DbResult<DbTransaction> {
        if amount <= Decimal::ZERO {
            return Err(DbError::InvalidInput(
                "Transaction amount must be positive".to_string(),
            ));
        }

        let tx = sqlx::query_as::<_, DbTransaction>(
            r#"
            INSERT INTO transactions (wallet_id, tx_type, amount, reference)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(wallet_id)
        .bind(tx_type.as_str())
        .bind(amount)
        .bind(reference)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::on_conflict(e, format!("reference {}", reference).as_str()))?;

        Ok(tx)
    }

    pub async fn find_by_reference(&self, reference: &str) -> DbResult<Option<DbTransaction>> {
        let tx = sqlx::query_as::<_, DbTransaction>(
            "SELECT * FROM transactions WHERE reference = $1",
        )
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tx)
    }

    pub async fn list_by_wallet(&self, wallet_id: Uuid) -> DbResult<Vec<DbTransaction>> {
        let txs = sqlx::query_as::<_, DbTransaction>(
            "SELECT * FROM transactions WHERE wallet_id = $1 ORDER BY created_at DESC",
        )
        .bind(wallet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(txs)
    }

    /// Debit the wallet and insert the PENDING withdrawal row in one unit.
    ///
    /// Eager deduction: the balance moves at request time and is refunded if
    /// the transfer later fails, so concurrent withdrawals cannot overdraw
    /// between initiation and gateway confirmation.
    pub async fn initiate_withdrawal(
        &self,
        wallet_id: Uuid,
        amount: Decimal,
        reference: &str,
    ) -> DbResult<DbTransaction> {
        if amount <= Decimal::ZERO {
            return Err(DbError::InvalidInput(
                "Withdrawal amount must be positive".to_string(),
            ));
        }

        let mut db_tx = self.pool.begin().await?;

        let balance: Decimal = sqlx::query_scalar(
            "SELECT balance FROM wallets WHERE id = $1 FOR UPDATE",
        )
        .bind(wallet_id)
        .fetch_optional(&mut *db_tx)
        .await?
        .ok_or_else(|| DbError::NotFound("Wallet not found".to_string()))?;

        if balance < amount {
            return Err(DbError::InsufficientBalance(format!(
                "have {}, need {}",
                balance, amount
            )));
        }

        adjust_balance(&mut *db_tx, wallet_id, -amount).await?;

        let tx = sqlx::query_as::<_, DbTransaction>(
            r#"
            INSERT INTO transactions (wallet_id, tx_type, amount, reference)
            VALUES ($1, 'WITHDRAW', $2, $3)
            RETURNING *
            "#,
        )
        .bind(wallet_id)
        .bind(amount)
        .bind(reference)
        .fetch_one(&mut *db_tx)
        .await
        .map_err(|e| DbError::on_conflict(e, format!("reference {}", reference).as_str()))?;

        db_tx.commit().await?;

        Ok(tx)
    }

    /// Atomically apply one gateway event to the ledger.
    ///
    /// The transaction row is locked (`FOR UPDATE`) before the terminal-state
    /// check so two concurrent deliveries for the same reference serialize at
    /// the storage layer: the second one observes the terminal status and
    /// becomes a no-op.
    pub async fn apply_event(
        &self,
        kind: EventKind,
        reference: &str,
        amount: Decimal,
        gateway_id: Option<&str>,
        channel: Option<&str>,
        metadata: &serde_json::Value,
    ) -> DbResult<ReconcileOutcome> {
        let mut db_tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbTransaction>(
            "SELECT * FROM transactions WHERE reference = $1 FOR UPDATE",
        )
        .bind(reference)
        .fetch_optional(&mut *db_tx)
        .await?;

        let Some(row) = row else {
            return Ok(ReconcileOutcome::UnknownReference);
        };

        let tx_type: TransactionType = row
            .tx_type
            .parse()
            .map_err(|_| DbError::InvalidInput(format!("corrupt tx_type {}", row.tx_type)))?;
        let status: TransactionStatus = row
            .status
            .parse()
            .map_err(|_| DbError::InvalidInput(format!("corrupt status {}", row.status)))?;

        if status.is_terminal() {
            return Ok(ReconcileOutcome::AlreadySettled);
        }

        let decision = decide(kind, tx_type, status);
        let outcome = match decision {
            Decision::Ignore => ReconcileOutcome::Ignored,
            Decision::CreditAndSucceed => {
                adjust_balance(&mut *db_tx, row.wallet_id, amount).await?;
                mark_terminal(
                    &mut db_tx,
                    row.id,
                    TransactionStatus::Success,
                    gateway_id,
                    channel,
                    metadata,
                )
                .await?;
                ReconcileOutcome::Applied(decision)
            }
            Decision::Succeed => {
                mark_terminal(
                    &mut db_tx,
                    row.id,
                    TransactionStatus::Success,
                    gateway_id,
                    channel,
                    metadata,
                )
                .await?;
                ReconcileOutcome::Applied(decision)
            }
            Decision::RefundAndFail => {
                adjust_balance(&mut *db_tx, row.wallet_id, amount).await?;
                mark_terminal(
                    &mut db_tx,
                    row.id,
                    TransactionStatus::Failed,
                    gateway_id,
                    channel,
                    metadata,
                )
                .await?;
                ReconcileOutcome::Applied(decision)
            }
        };

        db_tx.commit().await?;

        Ok(outcome)
    }
}

/// Write the terminal status plus gateway details onto a ledger row.
///
/// Private to this module: terminal marking is only meaningful inside the
/// reconciliation unit of work that holds the row lock.
async fn mark_terminal(
    db_tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
    status: TransactionStatus,
    gateway_id: Option<&str>,
    channel: Option<&str>,
    metadata: &serde_json::Value,
) -> DbResult<()> {
    sqlx::query(
        r#"
        UPDATE transactions
        SET status = $2, paystack_ref = $3, channel = $4, metadata = $5
        WHERE id = $1 AND status = 'PENDING'
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(gateway_id)
    .bind(channel)
    .bind(metadata)
    .execute(&mut **db_tx)
    .await?;

    Ok(())
}
