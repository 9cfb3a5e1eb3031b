// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `lms-access`: inspect role grants and run permission checks against the
//! configured user database.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lms_access_core::Role;
use lms_server_access::{PermissionChecker, SqliteActorResolver};
use lms_server_config::{LoggingConfig, ServerConfig};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{CheckArgs, CheckRequest};

#[derive(Parser, Debug)]
#[command(
	name = "lms-access",
	about = "Inspect LMS role grants and permission checks",
	version
)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/lms/server.toml)
	#[arg(long, env = "LMS_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Print the permission tokens granted to a role
	Grants {
		/// Role name, e.g. `StaffMinor`
		role: Role,
	},
	/// Check whether a user holds a permission; exits non-zero on denial
	Check(CheckArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => lms_server_config::load_config_with_file(path),
		None => lms_server_config::load_config(),
	}
	.context("failed to load configuration")?;

	init_tracing(&config.logging);

	match args.command {
		Command::Grants { role } => {
			let matrix = config.access.build_matrix();
			for token in commands::grants(&matrix, role) {
				println!("{token}");
			}
			Ok(ExitCode::SUCCESS)
		}
		Command::Check(check_args) => {
			let request = CheckRequest::try_from(&check_args)?;
			let checker = build_checker(&config).await?;

			if commands::check(&checker, request).await {
				println!("allowed");
				Ok(ExitCode::SUCCESS)
			} else {
				println!("denied");
				Ok(ExitCode::FAILURE)
			}
		}
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| logging.level.clone().into());

	// Logs go to stderr so stdout stays machine-readable.
	let json_layer = logging.json.then(|| {
		tracing_subscriber::fmt::layer()
			.json()
			.with_writer(std::io::stderr)
	});
	let text_layer =
		(!logging.json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

	tracing_subscriber::registry()
		.with(filter)
		.with(json_layer)
		.with(text_layer)
		.init();
}

async fn build_checker(config: &ServerConfig) -> anyhow::Result<PermissionChecker> {
	let options = SqliteConnectOptions::from_str(&config.database.url)
		.with_context(|| format!("invalid database URL {}", config.database.url))?
		.read_only(true);
	let pool = SqlitePool::connect_with(options)
		.await
		.with_context(|| format!("failed to open {}", config.database.url))?;

	tracing::debug!(database = %config.database.url, "database pool created");

	Ok(PermissionChecker::new(
		Arc::new(config.access.build_matrix()),
		Arc::new(SqliteActorResolver::new(pool)),
	))
}
