use std::io::{Write, stderr, stdout};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tenant_fetch_config::{ApiConfig, ROOT_URL_ENV, TenantFetchConfig};
use tenant_fetch_runner::RequestRunner;
use tenant_fetch_transport::HttpTransport;
use tenant_fetch_types::{OutcomeState, QueryParams, QueryValue, RequestDescriptor};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the payload; logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(stderr))
        .with(env_filter)
        .init();
}

#[derive(Debug, Parser)]
#[command(name = "tenant-fetch")]
#[command(about = "Fetch one item from a tenant-scoped API and print it as JSON")]
struct Cli {
    /// API root, overriding `TENANT_FETCH_API_ROOT` and `[api] root_url`
    #[arg(long, value_name = "URL")]
    root: Option<String>,
    /// Address prefix, e.g. `/users/`
    base_url: String,
    /// Appended to the prefix verbatim
    identifier: String,
    /// Query parameters; a repeated key is sent once per value
    #[arg(value_name = "KEY=VALUE", value_parser = parse_key_value)]
    params: Vec<(String, String)>,
}

impl Cli {
    fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor::new(self.base_url.as_str(), self.identifier.as_str())
            .with_query(group_params(&self.params))
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

/// Values are sent as written. Repeated keys become a list, in first-seen order.
fn group_params(pairs: &[(String, String)]) -> QueryParams {
    let mut grouped: Vec<(&str, Vec<QueryValue>)> = Vec::new();
    for (key, raw) in pairs {
        let value = QueryValue::Text(raw.clone());
        match grouped.iter_mut().find(|(k, _)| *k == key.as_str()) {
            Some((_, values)) => values.push(value),
            None => grouped.push((key.as_str(), vec![value])),
        }
    }

    grouped
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                QueryValue::List(values)
            };
            (key, value)
        })
        .collect()
}

fn build_transport(api: &ApiConfig, root_override: Option<String>) -> Result<HttpTransport> {
    let Some(root_url) = root_override.or_else(|| api.resolved_root_url()) else {
        bail!(
            "no API root configured: pass --root, set {ROOT_URL_ENV}, or set [api] root_url"
        );
    };

    let mut builder = HttpTransport::builder(root_url);
    if let Some(user_agent) = &api.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    if let Some(secs) = api.connect_timeout_secs {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = api.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    for (name, value) in api.resolved_headers() {
        builder = builder.header(name, value);
    }

    builder.build().context("failed to build HTTP transport")
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = match TenantFetchConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(path = %err.path().display(), "Ignoring unreadable config: {err}");
            TenantFetchConfig::default()
        }
    };
    let api = config.api.unwrap_or_default();
    tracing::debug!(?api, "Loaded API config");

    let transport = build_transport(&api, cli.root.clone())?;
    let runner = RequestRunner::new(transport);
    let mut outcome = OutcomeState::new();

    let payload = runner.run(&cli.descriptor(), &mut outcome).await;
    tracing::debug!(
        loading = outcome.is_loading(),
        failed = outcome.error().is_some(),
        "Fetch finished"
    );
    let payload = payload?;

    let rendered = serde_json::to_string_pretty(&payload.unwrap_or(Value::Null))?;
    let mut out = stdout().lock();
    writeln!(out, "{rendered}")?;

    Ok(())
}
