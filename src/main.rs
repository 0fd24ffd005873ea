// This file is part of the product Cyberstats.
// SPDX-FileCopyrightText: 2025-2026 Cyberstats Media Ltd
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{LevelFilter, info};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use cyberstats::app_state::AppState;
use cyberstats::config::{Config, ValidatedConfig};
use cyberstats::overrides::DescriptionOverrides;
use cyberstats::stats::RemoteStatsClient;
use cyberstats::taxonomy::{LegacyRedirects, Taxonomy};
use cyberstats::{api, public};

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    let runtime_root = match parse_args() {
        Ok(root) => root,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    let config = match Config::load_and_validate(&runtime_root) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("❌ Configuration error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    init_logging(&config);

    let taxonomy = match Taxonomy::load(&runtime_root.join(&config.data.taxonomy)) {
        Ok(taxonomy) => taxonomy,
        Err(error) => {
            eprintln!("❌ Taxonomy error: {}", error);
            return 1;
        }
    };
    let legacy_redirects =
        match LegacyRedirects::load(&runtime_root.join(&config.data.legacy_redirects)) {
            Ok(redirects) => redirects,
            Err(error) => {
                eprintln!("❌ Legacy redirect error: {}", error);
                return 1;
            }
        };
    let overrides = DescriptionOverrides::load(
        &runtime_root.join(&config.data.category_overrides),
        &runtime_root.join(&config.data.vendor_overrides),
    );

    info!(
        "Loaded taxonomy: {} categories, {} legacy redirects",
        taxonomy.categories().len(),
        legacy_redirects.len()
    );

    let stats = Arc::new(RemoteStatsClient::new(
        config.stats_api.url.clone(),
        config.stats_api.key.clone(),
    ));
    let app_state = AppState::new(
        &config.app.name,
        taxonomy,
        legacy_redirects,
        overrides,
        stats,
    );

    match run_server(config, app_state) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("❌ Server error: {}", error);
            1
        }
    }
}

fn run_server(config: ValidatedConfig, app_state: AppState) -> std::io::Result<()> {
    actix_web::rt::System::new().block_on(async move {
        let bind = (config.server.bind_address, config.server.port);
        let app_state = web::Data::new(app_state);
        let config_data = web::Data::new(config.clone());

        info!(
            "Starting {} on {}:{}",
            config.app.name, config.server.bind_address, config.server.port
        );

        HttpServer::new(move || {
            App::new()
                .app_data(config_data.clone())
                .app_data(app_state.clone())
                .wrap(Logger::default())
                .configure(api::configure)
                .configure(public::configure)
        })
        .bind(bind)?
        .run()
        .await
    })
}

fn parse_args() -> Result<PathBuf, String> {
    let mut args = std::env::args().skip(1);
    let mut root = PathBuf::from(".");

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-C" => {
                let value = args
                    .next()
                    .ok_or_else(|| "-C requires a directory argument".to_string())?;
                root = PathBuf::from(value);
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    Ok(root)
}

fn init_logging(config: &ValidatedConfig) {
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    // Configure logging with a stable format
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
