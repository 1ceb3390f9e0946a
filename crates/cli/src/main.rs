use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use vkapi_client::{CancellationToken, ClientConfig, VkApi};
use vkapi_core::{ErrorKind, MethodName, ParameterBag};

#[derive(Parser)]
#[command(
    name = "vkapi-cli",
    about = "CLI tool for calling VK API methods while debugging",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, help = "Output format", default_value = "pretty")]
    format: OutputFormat,

    #[arg(short, long, help = "Set log level", default_value = "warn")]
    log_level: String,

    #[arg(short, long, help = "TOML configuration file; VKAPI_* variables still apply")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Call a method and print its response")]
    Call {
        #[arg(help = "Method name (e.g., users.get)")]
        method: String,

        #[arg(help = "Parameters as key=value pairs")]
        params: Vec<String>,

        #[arg(long, env = "VKAPI_ACCESS_TOKEN", hide_env_values = true, help = "Access token")]
        token: Option<String>,

        #[arg(long, help = "Send the call without an access token")]
        skip_auth: bool,
    },

    #[command(about = "Show the error kind for a numeric error code")]
    Classify {
        #[arg(help = "Error code (e.g., 600)")]
        code: i32,
    },

    #[command(about = "List every known error code")]
    Codes,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
    Raw,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Call {
            method,
            params,
            token,
            skip_auth,
        } => {
            let config = load_config(cli.config.as_deref())?;
            call_method(config, &method, &params, token, skip_auth, cli.format).await
        }
        Commands::Classify { code } => {
            classify_code(code, cli.format);
            Ok(())
        }
        Commands::Codes => {
            list_codes(cli.format);
            Ok(())
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<ClientConfig> {
    let Some(path) = path else {
        return Ok(ClientConfig::load()?);
    };

    let mut config = ClientConfig::from_file(path)?;
    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn parse_params(pairs: &[String]) -> Result<ParameterBag> {
    let mut params = ParameterBag::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Parameter `{pair}` is not in key=value form");
        };
        if key.is_empty() {
            bail!("Parameter `{pair}` has an empty name");
        }
        params.insert(key, value);
    }
    Ok(params)
}

async fn call_method(
    config: ClientConfig,
    method: &str,
    pairs: &[String],
    token: Option<String>,
    skip_auth: bool,
    format: OutputFormat,
) -> Result<()> {
    let method: MethodName = method.parse().context("Invalid method name")?;
    let params = parse_params(pairs)?;

    let mut builder = VkApi::builder().config(config);
    if let Some(token) = token {
        builder = builder.access_token(token);
    }
    let api = builder.build()?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupted, cancelling call");
            on_interrupt.cancel();
        }
    });

    let response = api.call(&method, params, skip_auth, &cancel).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(response.raw())?),
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(response.raw())?),
        OutputFormat::Raw => match response.raw().as_str() {
            Some(text) => println!("{text}"),
            None => println!("{response}"),
        },
    }

    Ok(())
}

fn classify_code(code: i32, format: OutputFormat) {
    let kind = ErrorKind::from_code(code);
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "code": code,
                "kind": kind.to_string(),
                "known": kind.is_known(),
                "description": kind.description(),
            })
        ),
        OutputFormat::Pretty => println!("{code}: {kind} - {}", kind.description()),
        OutputFormat::Raw => println!("{kind}"),
    }
}

fn list_codes(format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let codes: Vec<_> = ErrorKind::KNOWN
                .iter()
                .map(|kind| {
                    serde_json::json!({
                        "code": kind.code(),
                        "kind": kind.to_string(),
                        "description": kind.description(),
                    })
                })
                .collect();
            println!("{}", serde_json::Value::Array(codes));
        }
        OutputFormat::Pretty => {
            println!("Known error codes:\n");
            for kind in ErrorKind::KNOWN {
                println!("  {:>5}  {kind} - {}", kind.code(), kind.description());
            }
        }
        OutputFormat::Raw => {
            for kind in ErrorKind::KNOWN {
                println!("{} {kind}", kind.code());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let pairs = vec!["user_ids=1,2".to_string(), "fields=photo_50".to_string()];
        let params = parse_params(&pairs).unwrap();
        assert_eq!(params.get("user_ids"), Some("1,2"));
        assert_eq!(params.get("fields"), Some("photo_50"));

        let with_equals = parse_params(&["message=a=b".to_string()]).unwrap();
        assert_eq!(with_equals.get("message"), Some("a=b"));
    }

    #[test]
    fn test_parse_params_rejects_bad_pairs() {
        assert!(parse_params(&["novalue".to_string()]).is_err());
        assert!(parse_params(&["=1".to_string()]).is_err());
    }

    #[test]
    fn test_cli_parses_call() {
        let cli = Cli::try_parse_from([
            "vkapi-cli",
            "call",
            "wall.get",
            "domain=durov",
            "--skip-auth",
        ])
        .unwrap();
        match cli.command {
            Commands::Call {
                method,
                params,
                skip_auth,
                ..
            } => {
                assert_eq!(method, "wall.get");
                assert_eq!(params, vec!["domain=durov"]);
                assert!(skip_auth);
            }
            _ => panic!("Expected call command"),
        }
    }
}
