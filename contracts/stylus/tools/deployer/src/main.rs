use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Which registry contract to deploy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Registry {
    Intent,
    Receipt,
}

impl Registry {
    fn default_contract_dir(self) -> PathBuf {
        match self {
            Registry::Intent => PathBuf::from("src/intent-registry"),
            Registry::Receipt => PathBuf::from("src/receipt-registry"),
        }
    }

    fn default_key(self) -> &'static str {
        match self {
            Registry::Intent => "intent-registry",
            Registry::Receipt => "receipt-registry",
        }
    }
}

/// Deploy a registry contract using `cargo stylus deploy`, then write/update a deployments JSON.
///
/// Wraps `cargo stylus deploy`, passing the constructor's admin argument and recording the
/// result in a machine-readable file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Registry to deploy.
    #[arg(long, value_enum)]
    registry: Registry,

    /// Override the contract crate directory (defaults to `src/<registry>-registry`).
    #[arg(long)]
    contract_dir: Option<PathBuf>,

    /// Administrator address passed to the constructor (manages executors/committers).
    #[arg(long, env = "REGISTRY_ADMIN")]
    admin: String,

    /// RPC URL used by `cargo stylus deploy`.
    #[arg(long, env = "RPC_URL")]
    rpc_url: String,

    /// Path to a file containing the deployer private key.
    #[arg(long, env = "PRIV_KEY_PATH", conflicts_with = "private_key")]
    private_key_path: Option<String>,

    /// Private key (hex string, 0x...).
    #[arg(long, env = "PKEY", conflicts_with = "private_key_path")]
    private_key: Option<String>,

    /// Path to write deployment info (eg, deployments.devnet.json).
    #[arg(long, default_value = "deployments.devnet.json")]
    deployments_path: PathBuf,

    /// Key under `deployments` to store this contract (defaults to the registry name).
    #[arg(long)]
    contract_key: Option<String>,

    /// Optional network name (eg, devnet, arb-sepolia).
    #[arg(long, default_value = "devnet")]
    network: String,

    /// Extra args to pass through to `cargo stylus deploy` (after `--`).
    ///
    /// Example:
    /// `-- --estimate-gas`
    #[arg(last = true)]
    passthrough: Vec<String>,
}

impl Cli {
    fn contract_dir(&self) -> PathBuf {
        self.contract_dir
            .clone()
            .unwrap_or_else(|| self.registry.default_contract_dir())
    }

    fn contract_key(&self) -> String {
        self.contract_key
            .clone()
            .unwrap_or_else(|| self.registry.default_key().to_string())
    }
}

/// One entry under `deployments` in the JSON file.
#[derive(Debug, Serialize)]
struct DeploymentEntry<'a> {
    address: &'a str,
    admin: &'a str,
    rpc_url: &'a str,
    deployed_at: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    tx_hashes: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    cargo_stylus_output: Option<&'a str>,
}

/// Parsed result of a successful `cargo stylus deploy` run.
#[derive(Debug, PartialEq, Eq)]
struct DeployOutput {
    address: String,
    tx_hashes: Vec<String>,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    validate_address(&cli.admin).context("invalid --admin")?;

    let (deployed, raw_output) = run_cargo_stylus_deploy(&cli)?;
    write_deployments_json(&cli, &deployed, &raw_output)?;

    info!(
        contract = %cli.contract_key(),
        address = %deployed.address,
        admin = %cli.admin,
        "deployed"
    );
    Ok(())
}

fn validate_address(s: &str) -> Result<()> {
    let re = Regex::new(r"^0x[a-fA-F0-9]{40}$")?;
    if !re.is_match(s) {
        bail!("expected a 0x-prefixed 20-byte hex address, got `{s}`");
    }
    if s[2..].chars().all(|c| c == '0') {
        bail!("admin must not be the zero address");
    }
    Ok(())
}

fn run_cargo_stylus_deploy(cli: &Cli) -> Result<(DeployOutput, String)> {
    let contract_dir = cli.contract_dir();

    let mut cmd = Command::new("cargo");
    cmd.current_dir(&contract_dir);
    cmd.arg("stylus").arg("deploy");
    cmd.arg("-e").arg(&cli.rpc_url);
    cmd.arg("--constructor-args").arg(&cli.admin);

    if let Some(ref pk_path) = cli.private_key_path {
        cmd.arg("--private-key-path").arg(pk_path);
    } else if let Some(ref pk) = cli.private_key {
        cmd.arg("--private-key").arg(pk);
    } else {
        return Err(anyhow!(
            "missing deployer key: provide --private-key-path or --private-key (or set PRIV_KEY_PATH/PKEY)"
        ));
    }

    // Keep stdout/stderr for parsing and for debugging when runs fail.
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    // Allow passing flags like --estimate-gas, --mode, etc.
    if !cli.passthrough.is_empty() {
        cmd.args(&cli.passthrough);
    }

    info!(
        registry = ?cli.registry,
        contract_dir = %contract_dir.display(),
        network = %cli.network,
        "running `cargo stylus deploy`"
    );
    let output = cmd
        .output()
        .context("failed to run `cargo stylus deploy`")?;
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let combined = format!("{stdout}\n{stderr}");
    debug!(output = %combined, "cargo stylus deploy finished");

    if !output.status.success() {
        return Err(anyhow!(
            "`cargo stylus deploy` failed (exit {}):\n{}",
            output.status,
            combined
        ));
    }

    let deployed = parse_deploy_output(&combined)?;
    Ok((deployed, combined))
}

fn parse_deploy_output(combined: &str) -> Result<DeployOutput> {
    // Example output lines we parse:
    //   Deploying program to address 0x...
    //   Confirmed tx 0x...
    let re_address = Regex::new(r"Deploying program to address (0x[a-fA-F0-9]{40})")?;
    let re_tx = Regex::new(r"Confirmed tx (0x[a-fA-F0-9]{64})")?;

    let address = re_address
        .captures_iter(combined)
        .next()
        .and_then(|c| c.get(1).map(|m| m.as_str().to_string()))
        .ok_or_else(|| {
            anyhow!("could not parse deployed address from `cargo stylus deploy` output")
        })?;

    let tx_hashes: Vec<String> = re_tx
        .captures_iter(combined)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    Ok(DeployOutput { address, tx_hashes })
}

fn write_deployments_json(cli: &Cli, deployed: &DeployOutput, raw_output: &str) -> Result<()> {
    let now = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let existing = if cli.deployments_path.exists() {
        fs::read_to_string(&cli.deployments_path)
            .with_context(|| format!("failed reading {}", cli.deployments_path.display()))?
    } else {
        String::new()
    };

    let mut root: Value = if existing.trim().is_empty() {
        json!({})
    } else {
        serde_json::from_str(&existing)
            .with_context(|| format!("failed parsing JSON in {}", cli.deployments_path.display()))?
    };

    // Raw output is kept, capped at 16k bytes.
    let trimmed = raw_output.trim();
    let cargo_stylus_output = (!trimmed.is_empty()).then(|| truncate(trimmed, 16_000));

    let entry = DeploymentEntry {
        address: &deployed.address,
        admin: &cli.admin,
        rpc_url: &cli.rpc_url,
        deployed_at: &now,
        tx_hashes: &deployed.tx_hashes,
        cargo_stylus_output,
    };
    upsert_deployment(
        &mut root,
        &cli.network,
        &now,
        &cli.contract_key(),
        serde_json::to_value(&entry).context("failed serialising deployment entry")?,
    );

    write_json_atomic(&cli.deployments_path, &root)?;
    Ok(())
}

/// Set `root.deployments[key] = entry`, creating the structure as needed.
fn upsert_deployment(root: &mut Value, network: &str, now: &str, key: &str, entry: Value) {
    if !root.is_object() {
        *root = json!({});
    }

    root["network"] = json!(network);
    root["updated_at"] = json!(now);

    if root.get("deployments").and_then(Value::as_object).is_none() {
        root["deployments"] = json!({});
    }
    root["deployments"][key] = entry;
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }

    let serialised =
        serde_json::to_string_pretty(value).context("failed serialising deployments JSON")?;
    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, serialised.as_bytes())
        .with_context(|| format!("failed writing temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("failed replacing {}", path.display()))?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_address_and_tx_hashes() {
        let out = "\
            stripped custom section from user wasm\n\
            Deploying program to address 0x5FbDB2315678afecb367f032d93F642f64180aa3\n\
            Confirmed tx 0x1111111111111111111111111111111111111111111111111111111111111111\n\
            Confirmed tx 0x2222222222222222222222222222222222222222222222222222222222222222\n";
        let parsed = parse_deploy_output(out).unwrap();
        assert_eq!(parsed.address, "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(parsed.tx_hashes.len(), 2);
    }

    #[test]
    fn missing_address_is_an_error() {
        assert!(parse_deploy_output("error: insufficient funds").is_err());
    }

    #[test]
    fn admin_address_validation() {
        assert!(validate_address("0x5FbDB2315678afecb367f032d93F642f64180aa3").is_ok());
        assert!(validate_address("0x0000000000000000000000000000000000000000").is_err());
        assert!(validate_address("5FbDB2315678afecb367f032d93F642f64180aa3").is_err());
        assert!(validate_address("0x1234").is_err());
    }

    #[test]
    fn upsert_keeps_other_deployments() {
        let mut root = json!({
            "network": "devnet",
            "deployments": { "intent-registry": { "address": "0xaa" } }
        });
        upsert_deployment(
            &mut root,
            "arb-sepolia",
            "2026-01-01T00:00:00Z",
            "receipt-registry",
            json!({ "address": "0xbb" }),
        );
        assert_eq!(root["network"], "arb-sepolia");
        assert_eq!(root["deployments"]["intent-registry"]["address"], "0xaa");
        assert_eq!(root["deployments"]["receipt-registry"]["address"], "0xbb");
    }

    #[test]
    fn upsert_replaces_non_object_root() {
        let mut root = json!([1, 2, 3]);
        upsert_deployment(&mut root, "devnet", "now", "intent-registry", json!({}));
        assert!(root["deployments"]["intent-registry"].is_object());
    }

    #[test]
    fn registry_defaults() {
        assert_eq!(
            Registry::Receipt.default_contract_dir(),
            PathBuf::from("src/receipt-registry")
        );
        assert_eq!(Registry::Intent.default_key(), "intent-registry");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abc", 10), "abc");
        assert_eq!(truncate("héllo", 2), "h");
        assert_eq!(tmp_path_for(Path::new("out/d.json")), PathBuf::from("out/d.json.tmp"));
    }
}
