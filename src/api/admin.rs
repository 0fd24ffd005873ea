// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use actix_web::{HttpResponse, web};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

const SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Opaque bearer tokens for the shared-password admin area. Tokens live in
/// memory only and expire after [`SESSION_TTL`]; stale entries are pruned
/// on the next issue, so the store stays bounded by active editors. A
/// restart logs every editor out, which is acceptable for a
/// single-password gate.
pub struct AdminSessionStore {
    tokens: Mutex<HashMap<String, Instant>>,
}

impl AdminSessionStore {
    pub fn new() -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
        }
    }

    pub fn issue(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let now = Instant::now();
        let mut tokens = self.tokens.lock().expect("admin session lock");
        tokens.retain(|_, expires_at| *expires_at > now);
        tokens.insert(token.clone(), now + SESSION_TTL);
        token
    }

    pub fn is_valid(&self, token: &str) -> bool {
        let tokens = self.tokens.lock().expect("admin session lock");
        tokens
            .get(token)
            .is_some_and(|expires_at| *expires_at > Instant::now())
    }

    #[cfg(test)]
    fn expire_now(&self, token: &str) {
        let mut tokens = self.tokens.lock().expect("admin session lock");
        if let Some(expires_at) = tokens.get_mut(token) {
            *expires_at = Instant::now();
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.tokens.lock().expect("admin session lock").len()
    }
}

impl Default for AdminSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn login(
    body: web::Json<LoginRequest>,
    config: web::Data<ValidatedConfig>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    if body.password != config.admin.password {
        warn!("Rejected admin login attempt");
        return HttpResponse::Unauthorized().json(LoginResponse {
            success: false,
            token: None,
            error: Some("Invalid password".to_string()),
        });
    }

    let token = app_state.admin_sessions.issue();
    info!("Admin login succeeded");
    HttpResponse::Ok().json(LoginResponse {
        success: true,
        token: Some(token),
        error: None,
    })
}
