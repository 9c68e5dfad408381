// Copyright (c) 2025 Monedero Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod categories;
pub mod transactions;
pub mod transfer;
pub mod budgets;
pub mod reports;
pub mod exporter;
pub mod owner;
pub mod doctor;
