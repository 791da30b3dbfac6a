//! Bank account repository
//!
//! One linked payout account per user. The gateway recipient code is filled
//! lazily by the first withdrawal that needs it.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbError, DbResult, DbBankAccount};

pub struct BankAccountRepo {
    pool: PgPool,
}

impl BankAccountRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Link (or relink) a payout account. Changing the account details
    /// invalidates any previously created recipient code.
    pub async fn link(
        &self,
        user_id: Uuid,
        bank_code: &str,
        bank_name: &str,
        account_number: &str,
        account_name: &str,
    ) -> DbResult<DbBankAccount> {
        let account = sqlx::query_as::<_, DbBankAccount>(
            r#"
            INSERT INTO bank_accounts (user_id, bank_code, bank_name, account_number, account_name)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id)
            DO UPDATE SET bank_code = EXCLUDED.bank_code,
                          bank_name = EXCLUDED.bank_name,
                          account_number = EXCLUDED.account_number,
                          account_name = EXCLUDED.account_name,
                          recipient_code = NULL,
                          updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(bank_code)
        .bind(bank_name)
        .bind(account_number)
        .bind(account_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> DbResult<Option<DbBankAccount>> {
        let account =
            sqlx::query_as::<_, DbBankAccount>("SELECT * FROM bank_accounts WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(account)
    }

    pub async fn set_recipient_code(
        &self,
        user_id: Uuid,
        recipient_code: &str,
    ) -> DbResult<DbBankAccount> {
        let account = sqlx::query_as::<_, DbBankAccount>(
            r#"
            UPDATE bank_accounts
            SET recipient_code = $2, updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(recipient_code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound("Bank account not linked".to_string()))?;

        Ok(account)
    }
}
