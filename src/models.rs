// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::ToSql;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Debit,
    Credit,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountKind::Debit => "debit",
            AccountKind::Credit => "credit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "debit" => Some(AccountKind::Debit),
            "credit" => Some(AccountKind::Credit),
            _ => None,
        }
    }
}

impl FromSql for AccountKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        AccountKind::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown account kind '{}'", s).into()))
    }
}

impl ToSql for AccountKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

/// Ledger entry kinds. `amount` is stored positive everywhere; the kind
/// alone decides whether an entry credits or debits its account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Expense,
    Bill,
    Income,
    Refund,
    TransferOut,
    TransferIn,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Bill => "bill",
            TransactionKind::Income => "income",
            TransactionKind::Refund => "refund",
            TransactionKind::TransferOut => "transfer_out",
            TransactionKind::TransferIn => "transfer_in",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "expense" => Some(TransactionKind::Expense),
            "bill" => Some(TransactionKind::Bill),
            "income" => Some(TransactionKind::Income),
            "refund" => Some(TransactionKind::Refund),
            "transfer_out" => Some(TransactionKind::TransferOut),
            "transfer_in" => Some(TransactionKind::TransferIn),
            _ => None,
        }
    }

    /// Signed balance effect of an entry of this kind carrying `amount`.
    pub fn signed_effect(self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::Expense | TransactionKind::Bill | TransactionKind::TransferOut => {
                -amount
            }
            TransactionKind::Income | TransactionKind::Refund | TransactionKind::TransferIn => {
                amount
            }
        }
    }

    /// Kinds that count toward `spent` and the spending aggregates.
    pub fn is_spending(self) -> bool {
        matches!(self, TransactionKind::Expense | TransactionKind::Bill)
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        TransactionKind::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown transaction kind '{}'", s).into()))
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub name: String,
    pub kind: AccountKind,
    pub balance: Decimal,
    pub opening_balance: Decimal,
    pub monthly_budget: Decimal,
    pub spent: Decimal, // running total of expense/bill amounts
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub owner: String,
    pub kind: TransactionKind,
    pub amount: Decimal, // always positive; see TransactionKind
    pub description: String,
    pub transaction_date: NaiveDate,
    pub payment_date: NaiveDate,
    pub account_id: i64,
    pub category: String,
    pub notes: Option<String>,
    pub transfer_id: Option<i64>, // links the two legs of a transfer
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub owner: String,
    pub category: String,
    pub limit: Decimal,
    pub month: u32, // 1..=12
    pub year: i32,
}
