// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

pub mod api;
pub mod app_state;
pub mod config;
pub mod overrides;
pub mod public;
pub mod stats;
pub mod taxonomy;
pub mod templates;
