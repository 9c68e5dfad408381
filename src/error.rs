// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failure taxonomy for account, ledger, transfer, and budget operations.
///
/// Everything except `InconsistentState` is a caller mistake and safe to
/// retry after fixing the input. `InconsistentState` means a compensating
/// reversal failed and stored balances need manual reconciliation.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount '{0}': must be greater than zero")]
    InvalidAmount(Decimal),

    #[error("Description must not be empty")]
    MissingDescription,

    #[error("Account {0} not found for this owner")]
    InvalidAccount(i64),

    #[error("Transfer source and destination are the same account")]
    SameAccount,

    #[error("No such {0}")]
    NotFound(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Ledger needs manual reconciliation: {0}")]
    InconsistentState(String),

    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}
