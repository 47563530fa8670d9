//! passhash CLI - hash and verify passwords with bcrypt
//!
//! Hashes go to stdout, logs go to stderr, so the output can be piped
//! straight into a config file or database import.
//!
//! The work factor comes from `--cost` / `PASSHASH_COST` when given, otherwise
//! from the settings file in the platform config directory.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

use passhash_core::{
    stored_cost, verify_password, BcryptHasher, CredentialHasher, Password, SettingsManager,
};

/// passhash - bcrypt password hashing from the command line
#[derive(Parser, Debug)]
#[command(name = "passhash")]
#[command(author = "Symbia Labs")]
#[command(version = "0.1.0")]
#[command(about = "Hash and verify passwords with bcrypt")]
struct Args {
    /// Work factor for new hashes (overrides the settings file)
    #[arg(long, global = true, env = "PASSHASH_COST")]
    cost: Option<u32>,

    /// Directory holding settings.json
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash a password and print the stored hash
    Hash {
        /// Password to hash (prompted for when omitted)
        #[arg(long, env = "PASSHASH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Check a password against a stored hash; exits 1 on mismatch
    Verify {
        /// Stored hash to check against
        hash: String,

        /// Password to check (prompted for when omitted)
        #[arg(long, env = "PASSHASH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Print the work factor embedded in a stored hash
    Cost {
        /// Stored hash to inspect
        hash: String,
    },
}

fn read_password(arg: Option<String>) -> std::io::Result<Password> {
    match arg {
        Some(password) => Ok(Password::new(password)),
        None => rpassword::prompt_password("Password: ").map(Password::new),
    }
}

fn resolve_hasher(
    cost: Option<u32>,
    config_dir: Option<&Path>,
) -> Result<BcryptHasher, Box<dyn std::error::Error>> {
    if let Some(cost) = cost {
        debug!("Using work factor {} from command line", cost);
        return Ok(BcryptHasher::new(cost)?);
    }

    let dir = match config_dir {
        Some(dir) => dir.to_path_buf(),
        None => SettingsManager::default_dir()?,
    };
    let settings = SettingsManager::new(&dir);
    debug!("Using work factor {} from {:?}", settings.get_cost(), dir);

    Ok(settings.hasher()?)
}

/// Run one subcommand, writing its result to `out`
///
/// Returns `false` when a password did not match.
///
/// Verification reads the work factor from the stored hash, so only `hash`
/// needs a valid configured cost.
async fn run(args: Args, out: &mut impl Write) -> Result<bool, Box<dyn std::error::Error>> {
    let Args {
        cost,
        config_dir,
        command,
    } = args;

    match command {
        Command::Hash { password } => {
            let hasher = resolve_hasher(cost, config_dir.as_deref())?;
            let password = read_password(password)?;
            let stored = hasher.hash(password.expose()).await?;
            info!("Hashed password with work factor {}", hasher.cost());
            writeln!(out, "{}", stored)?;
        }
        Command::Verify { hash, password } => {
            let password = read_password(password)?;
            let matches = verify_password(password.expose(), &hash).await?;
            writeln!(out, "{}", matches)?;
            return Ok(matches);
        }
        Command::Cost { hash } => {
            let stored = stored_cost(&hash)?;
            match resolve_hasher(cost, config_dir.as_deref()) {
                Ok(hasher) if hasher.needs_rehash(&hash)? => info!(
                    "Hash uses work factor {}, configured is {}",
                    stored,
                    hasher.cost()
                ),
                Ok(_) => {}
                Err(e) => warn!("Skipping rehash check: {}", e),
            }
            writeln!(out, "{}", stored)?;
        }
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if run(args, &mut std::io::stdout()).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("passhash").chain(argv.iter().copied())).unwrap()
    }

    async fn run_captured(argv: &[&str]) -> (Result<bool, String>, String) {
        let mut out = Vec::new();
        let result = run(parse(argv), &mut out).await.map_err(|e| e.to_string());
        (result, String::from_utf8(out).unwrap())
    }

    async fn hash_with(dir: &TempDir, password: &str) -> String {
        let dir = dir.path().to_str().unwrap();
        let (result, out) =
            run_captured(&["--cost", "4", "--config-dir", dir, "hash", "--password", password])
                .await;
        assert!(result.unwrap());
        out.trim().to_string()
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let temp_dir = TempDir::new().unwrap();
        let stored = hash_with(&temp_dir, "hunter2").await;
        assert!(stored.starts_with("$2b$04$"));

        let (result, out) = run_captured(&["verify", &stored, "--password", "hunter2"]).await;
        assert!(result.unwrap());
        assert_eq!(out.trim(), "true");

        let (result, out) = run_captured(&["verify", &stored, "--password", "hunter3"]).await;
        assert!(!result.unwrap());
        assert_eq!(out.trim(), "false");
    }

    #[tokio::test]
    async fn test_verify_ignores_invalid_configured_cost() {
        let temp_dir = TempDir::new().unwrap();
        let stored = hash_with(&temp_dir, "hunter2").await;

        std::fs::write(temp_dir.path().join("settings.json"), r#"{"cost": 40}"#).unwrap();
        let dir = temp_dir.path().to_str().unwrap();
        let (result, out) =
            run_captured(&["--config-dir", dir, "verify", &stored, "--password", "hunter2"]).await;
        assert!(result.unwrap());
        assert_eq!(out.trim(), "true");

        let (result, out) =
            run_captured(&["--cost", "3", "verify", &stored, "--password", "hunter2"]).await;
        assert!(result.unwrap());
        assert_eq!(out.trim(), "true");
    }

    #[tokio::test]
    async fn test_cost_ignores_invalid_configured_cost() {
        let temp_dir = TempDir::new().unwrap();
        let stored = hash_with(&temp_dir, "hunter2").await;

        let (result, out) = run_captured(&["--cost", "3", "cost", &stored]).await;
        assert!(result.unwrap());
        assert_eq!(out.trim(), "4");
    }

    #[tokio::test]
    async fn test_hash_rejects_invalid_cost() {
        let (result, out) = run_captured(&["--cost", "3", "hash", "--password", "hunter2"]).await;
        assert!(result.unwrap_err().contains("Invalid work factor"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_verify_malformed_hash_is_an_error() {
        let (result, out) = run_captured(&["verify", "not-a-hash", "--password", "x"]).await;
        assert!(result.is_err());
        assert!(out.is_empty());
    }
}
