//! Probe the configured endpoint and credentials from the command line.

use shoplink::{config, Gateway, Role};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Show only the edges of a credential.
fn mask(secret: Option<&str>) -> String {
    match secret {
        None => "(empty)".to_string(),
        Some(s) if s.chars().count() <= 8 => {
            let mut chars = s.chars();
            let first = chars.next().unwrap_or('?');
            let last = chars.last().unwrap_or('?');
            format!("{}…{}", first, last)
        }
        Some(s) => {
            let head: String = s.chars().take(4).collect();
            let tail: String = s.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            format!("{}…{}", head, tail)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            return ExitCode::from(2);
        }
    };
    println!("endpoint = {}", config.base_url());
    println!("service  = {}", mask(config.api_key(Role::Service)));
    println!("anon     = {}", mask(config.api_key(Role::Anon)));

    let gateway = match Gateway::new(config) {
        Ok(gateway) => gateway,
        Err(err) => {
            eprintln!("gateway error: {}", err);
            return ExitCode::from(2);
        }
    };

    match gateway.health_check().await {
        Ok(report) if report.reachable() && report.credential_ok() => {
            println!("rest root status: {}, endpoint looks healthy", report.status);
            ExitCode::SUCCESS
        }
        Ok(report) if !report.credential_ok() => {
            eprintln!(
                "rest root status: {}, invalid api key for this project",
                report.status
            );
            ExitCode::from(2)
        }
        Ok(report) => {
            eprintln!(
                "rest root status: {}, unexpected answer: {}",
                report.status, report.body
            );
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("endpoint unreachable: {}", err);
            ExitCode::from(2)
        }
    }
}
