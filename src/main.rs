// This file is part of the product Brushwork.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::rt::System;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{info, LevelFilter};
use std::path::PathBuf;

use brushwork::api;
use brushwork::app_state::AppState;
use brushwork::bootstrap;
use brushwork::iam::{JwtAuthMiddlewareFactory, UserServices};
use brushwork::roles::CapabilityPolicy;

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

struct ParsedArgs {
    runtime_root: PathBuf,
}

fn parse_args() -> Result<ParsedArgs, String> {
    let mut runtime_root = PathBuf::from(".");
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-C" => {
                let value = args
                    .next()
                    .ok_or_else(|| "-C requires a directory".to_string())?;
                runtime_root = PathBuf::from(value);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(ParsedArgs { runtime_root })
}

fn run() -> i32 {
    let parsed_args = match parse_args() {
        Ok(args) => args,
        Err(error) => {
            eprintln!("❌ Invalid command line arguments: {}", error);
            eprintln!("❌ Use -C <root> to set the runtime directory.");
            return 1;
        }
    };

    let bootstrap = match bootstrap::bootstrap_runtime(&parsed_args.runtime_root) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("❌ Bootstrap error: {}", error);
            eprintln!("❌ Application cannot start with invalid configuration.");
            return 1;
        }
    };

    init_logger(&bootstrap.validated_config.logging.level);

    let config = bootstrap.validated_config;
    let runtime_paths = bootstrap.runtime_paths;

    let user_services = match UserServices::new(&config, &runtime_paths.users_file) {
        Ok(services) => services,
        Err(error) => {
            eprintln!("❌ Failed to load users: {}", error);
            return 1;
        }
    };

    info!(
        "Starting {} on {}:{} (active theme '{}')",
        config.app.name, config.server.host, config.server.port, config.theme.active
    );

    System::new().block_on(async move {
        let bind_addr = (config.server.host.clone(), config.server.port);
        let workers = config.server.workers;

        let config_data = web::Data::new(config);
        let app_state = web::Data::new(AppState::new(runtime_paths));
        let user_services_data = web::Data::new(user_services);
        let policy_data = web::Data::new(CapabilityPolicy::with_default_grants());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(config_data.clone())
                .app_data(app_state.clone())
                .app_data(user_services_data.clone())
                .app_data(policy_data.clone())
                .wrap(Logger::default())
                .wrap(JwtAuthMiddlewareFactory)
                .configure(api::configure)
                .default_service(web::route().to(api::not_found))
        })
        .workers(workers)
        .bind(&bind_addr);

        match server {
            Ok(server) => match server.run().await {
                Ok(()) => 0,
                Err(error) => {
                    eprintln!("❌ Server error: {}", error);
                    1
                }
            },
            Err(error) => {
                eprintln!(
                    "❌ Failed to bind {}:{}: {}",
                    bind_addr.0, bind_addr.1, error
                );
                1
            }
        }
    })
}

fn init_logger(level: &str) {
    let level_filter = match level.to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level_filter)
        .try_init();
}
