// ABOUTME: PrepMyWeek API server binary
// ABOUTME: Loads configuration, opens the database, and serves the REST API until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

//! # `PrepMyWeek` API Server Binary
//!
//! Configuration comes from the environment; `--http-port` overrides the
//! port and `--grant-admin` promotes an existing account and exits.

use anyhow::{bail, Result};
use clap::Parser;
use prepmyweek::{
    config::ServerConfig, logging, resources::ServerResources, server::PrepServer,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "prepmyweek-server")]
#[command(about = "PrepMyWeek - weekly meal prep planning API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Grant moderator rights to the account with this email, then exit
    #[arg(long, value_name = "EMAIL")]
    grant_admin: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;
    info!("Starting PrepMyWeek API");
    info!("{}", config.summary());

    let port = config.http_port;
    let resources = ServerResources::connect(config).await?;

    if let Some(email) = args.grant_admin {
        return grant_admin(&resources, &email).await;
    }

    PrepServer::new(Arc::new(resources)).run(port).await
}

async fn grant_admin(resources: &ServerResources, email: &str) -> Result<()> {
    let users = resources.database.users();
    let email = email.trim().to_lowercase();
    let Some(user) = users.get_by_email(&email).await? else {
        bail!("No account registered with email {email}");
    };
    users.set_admin(user.id, true).await?;
    info!(user_id = user.id, %email, "Moderator rights granted");
    Ok(())
}
