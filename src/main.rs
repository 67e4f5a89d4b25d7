// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::Parser;
use domainmapper::{
    apply::apply_ingress,
    config::NetworkConfig,
    constants::{DEFAULT_FIELD_MANAGER, TOKIO_WORKER_THREADS},
    crd::{HttpOption, Ingress},
    ingress::make_ingress,
    manifest::{read_challenges, read_domain_mapping, read_network_config, to_yaml},
    resolve::{backend_for, http_option_for, ingress_class_for, service_hostname, tls_for},
};
use kube::{Client, ResourceExt};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Render (and optionally apply) the Ingress for a DomainMapping.
#[derive(Debug, Parser)]
#[command(name = "domainmapper", version, about)]
struct Cli {
    /// DomainMapping manifest (YAML or JSON)
    #[arg(short, long)]
    file: PathBuf,

    /// config-network ConfigMap manifest supplying defaults
    #[arg(long)]
    network_config: Option<PathBuf>,

    /// YAML list of pending HTTP-01 challenges
    #[arg(long)]
    challenges: Option<PathBuf>,

    /// Backend service name, instead of spec.ref.name
    #[arg(long)]
    backend_service: Option<String>,

    /// Host requests are rewritten to, instead of the backend's cluster hostname
    #[arg(long)]
    target_host: Option<String>,

    /// Ingress class, instead of the annotation or configured default
    #[arg(long)]
    ingress_class: Option<String>,

    /// HTTP option (Enabled or Redirected), instead of the annotation or configured default
    #[arg(long)]
    http_option: Option<HttpOption>,

    /// Apply the Ingress to the cluster with server-side apply instead of only printing it
    #[arg(long)]
    apply: bool,

    /// Field manager used for server-side apply
    #[arg(long, default_value = DEFAULT_FIELD_MANAGER)]
    field_manager: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("domainmapper")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Logs go to stderr so stdout carries only the rendered manifest.
    // Respects RUST_LOG (default: info) and RUST_LOG_FORMAT (text|json).
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .compact()
                .init();
        }
    }

    let ingress = match render(&cli) {
        Ok(ingress) => ingress,
        Err(e) => {
            error!("Failed to build Ingress: {e:#}");
            return Err(e);
        }
    };

    print!("{}", to_yaml(&ingress)?);

    if cli.apply {
        debug!("Initializing Kubernetes client");
        let client = Client::try_default()
            .await
            .context("Failed to initialize Kubernetes client")?;
        apply_ingress(&client, &ingress, &cli.field_manager).await?;
    }

    Ok(())
}

fn render(cli: &Cli) -> Result<Ingress> {
    let dm = read_domain_mapping(&cli.file)?;

    let config = match &cli.network_config {
        Some(path) => read_network_config(path)?,
        None => NetworkConfig::default(),
    };

    let challenges = match &cli.challenges {
        Some(path) => read_challenges(path)?,
        None => Vec::new(),
    };

    let backend = backend_for(&dm, &config)?;
    let backend_service = cli
        .backend_service
        .clone()
        .unwrap_or(backend.service_name);
    let target_host = match &cli.target_host {
        Some(host) => host.clone(),
        None if cli.backend_service.is_some() => service_hostname(
            &backend_service,
            &dm.namespace().unwrap_or_default(),
            &config.cluster_domain,
        ),
        None => backend.target_host,
    };
    let ingress_class = cli
        .ingress_class
        .clone()
        .unwrap_or_else(|| ingress_class_for(&dm, &config));
    let http_option = match cli.http_option {
        Some(option) => option,
        None => http_option_for(&dm, &config)?,
    };

    info!(
        domain_mapping = %dm.name_any(),
        namespace = %dm.namespace().unwrap_or_default(),
        backend = %backend_service,
        ingress_class = %ingress_class,
        challenges = challenges.len(),
        "Rendering Ingress"
    );

    Ok(make_ingress(
        &dm,
        &backend_service,
        &target_host,
        &ingress_class,
        http_option,
        tls_for(&dm),
        &challenges,
    ))
}
