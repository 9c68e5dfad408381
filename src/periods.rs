// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period aggregator. Buckets spending history into navigable calendar
//! windows: four months, the four quarters of a year, or five years per
//! page. Pages are addressed by a zero-based "periods back" index and
//! always come out chronologically ascending with a fixed bucket count,
//! zero-filled so charting callers get stable series shapes.

use chrono::{Datelike, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::{Category, CATALOG};
use crate::db::decimal_col;
use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Monthly,
    Quarterly,
    Yearly,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Monthly => "monthly",
            Granularity::Quarterly => "quarterly",
            Granularity::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Granularity::Monthly),
            "quarterly" => Some(Granularity::Quarterly),
            "yearly" => Some(Granularity::Yearly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

/// One time slot in a report page: its calendar span plus the summed
/// expense/bill amounts, broken down by catalog category.
#[derive(Debug, Clone, Serialize)]
pub struct Bucket {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate, // exclusive
    pub per_category: Vec<CategoryTotal>,
    pub grand_total: Decimal,
}

fn out_of_range(index: u32) -> LedgerError {
    LedgerError::InvalidPeriod(format!("period index {} out of calendar range", index))
}

/// First day of the month `abs` counts from year 0 (year * 12 + month0).
fn month_start(abs: i64, index: u32) -> Result<NaiveDate, LedgerError> {
    let year = abs.div_euclid(12);
    let month0 = abs.rem_euclid(12) as u32;
    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month0 + 1, 1))
        .ok_or_else(|| out_of_range(index))
}

fn year_start(year: i64, index: u32) -> Result<NaiveDate, LedgerError> {
    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        .ok_or_else(|| out_of_range(index))
}

/// Bucket spans for one navigation page, chronologically ascending.
/// End dates are exclusive.
///
/// Monthly pages hold 4 consecutive months and step back 4 months per
/// index, so index 1 seen from January yields September..=December of
/// the prior year. Quarterly pages hold the 4 quarters of the year
/// `index` years back. Yearly pages hold 5 consecutive years ending at
/// `current year - 5 * index`.
pub fn window(
    granularity: Granularity,
    today: NaiveDate,
    index: u32,
) -> Result<Vec<(String, NaiveDate, NaiveDate)>, LedgerError> {
    let mut spans = Vec::new();
    match granularity {
        Granularity::Monthly => {
            let anchor =
                today.year() as i64 * 12 + today.month0() as i64 - 4 * index as i64;
            for k in 0..4 {
                let start = month_start(anchor + k, index)?;
                let end = month_start(anchor + k + 1, index)?;
                spans.push((format!("{:04}-{:02}", start.year(), start.month()), start, end));
            }
        }
        Granularity::Quarterly => {
            let year = today.year() as i64 - index as i64;
            for q in 0..4u32 {
                let start = month_start(year * 12 + (q * 3) as i64, index)?;
                let end = month_start(year * 12 + (q * 3 + 3) as i64, index)?;
                spans.push((format!("{}-Q{}", start.year(), q + 1), start, end));
            }
        }
        Granularity::Yearly => {
            let last = today.year() as i64 - 5 * index as i64;
            for year in (last - 4)..=last {
                let start = year_start(year, index)?;
                let end = year_start(year + 1, index)?;
                spans.push((format!("{}", start.year()), start, end));
            }
        }
    }
    Ok(spans)
}

/// Sum expense/bill amounts per bucket and per catalog category for one
/// report page. Every catalog category appears in every bucket, zero
/// when nothing matched; unrecognized category strings accumulate under
/// the `uncategorized` fallback.
pub fn aggregate(
    conn: &Connection,
    owner: &str,
    granularity: Granularity,
    index: u32,
    today: NaiveDate,
) -> Result<Vec<Bucket>, LedgerError> {
    let spans = window(granularity, today, index)?;
    let mut stmt = conn.prepare(
        "SELECT category, amount FROM transactions
         WHERE owner=?1 AND kind IN ('expense','bill')
           AND transaction_date >= ?2 AND transaction_date < ?3",
    )?;
    let mut buckets = Vec::with_capacity(spans.len());
    for (label, start, end) in spans {
        let mut totals: HashMap<Category, Decimal> = HashMap::new();
        let mut grand_total = Decimal::ZERO;
        let mut rows = stmt.query(params![owner, start.to_string(), end.to_string()])?;
        while let Some(r) = rows.next()? {
            let raw: String = r.get(0)?;
            let amount = decimal_col(r, 1)?;
            *totals
                .entry(Category::resolve(&raw))
                .or_insert(Decimal::ZERO) += amount;
            grand_total += amount;
        }
        let per_category = CATALOG
            .iter()
            .map(|&c| CategoryTotal {
                category: c,
                total: totals.get(&c).copied().unwrap_or(Decimal::ZERO),
            })
            .collect();
        buckets.push(Bucket {
            label,
            start,
            end,
            per_category,
            grand_total,
        });
    }
    Ok(buckets)
}
