//! `cms-admin` command line

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use cms_access::{AuthorizationDecision, UninitializedPolicy};
use cms_client::HttpTransport;
use cms_core::{check_endpoint, endpoint_table, logging, render_document, AdminConfig, AdminSession, RenderFormat};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("cms-admin")
        .version(cms_core::VERSION)
        .about("CMS admin core: permission checks and content rendering")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .help("Log filter, e.g. debug or cms_client=trace"),
        )
        .subcommand(
            Command::new("render")
                .about("Render a style tree JSON file")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Style tree document"),
                )
                .arg(
                    Arg::new("max-depth")
                        .long("max-depth")
                        .value_parser(value_parser!(usize))
                        .help("Deepest level to render"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the element tree as JSON instead of HTML"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Show the authorization decision for a catalogue endpoint")
                .arg(Arg::new("endpoint").required(true).help("Endpoint name, e.g. users.list"))
                .arg(
                    Arg::new("permissions")
                        .long("permissions")
                        .value_delimiter(',')
                        .help("Permissions the user holds"),
                )
                .arg(
                    Arg::new("uninitialized")
                        .long("uninitialized")
                        .action(ArgAction::SetTrue)
                        .help("Evaluate as before the profile has loaded"),
                ),
        )
        .subcommand(Command::new("endpoints").about("List the endpoint catalogue"))
        .subcommand(
            Command::new("whoami")
                .about("Load the profile from the API and show its permissions")
                .arg(
                    Arg::new("token")
                        .long("token")
                        .env("CMS_ADMIN_TOKEN")
                        .required(true)
                        .help("Bearer token"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<AdminConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => AdminConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AdminConfig::default().apply_env(),
    };
    if let Some(filter) = matches.get_one::<String>("log") {
        config = config.with_log_filter(filter.clone());
    }
    config.validate()?;
    Ok(config)
}

fn print_decision(endpoint: &str, decision: &AuthorizationDecision) {
    match decision {
        AuthorizationDecision::Allow(reason) => println!("{endpoint}: allowed ({reason:?})"),
        AuthorizationDecision::Deny(reason) => println!("{endpoint}: denied ({reason:?})"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    logging::init(&config.log_filter);

    match matches.subcommand() {
        Some(("render", args)) => {
            let Some(path) = args.get_one::<PathBuf>("file") else {
                anyhow::bail!("missing file argument");
            };
            let max_depth = args
                .get_one::<usize>("max-depth")
                .copied()
                .unwrap_or(config.max_render_depth);
            let format = if args.get_flag("json") {
                RenderFormat::Json
            } else {
                RenderFormat::Html
            };
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            println!("{}", render_document(&json, max_depth, format)?);
        }
        Some(("check", args)) => {
            let Some(endpoint) = args.get_one::<String>("endpoint") else {
                anyhow::bail!("missing endpoint argument");
            };
            let permissions: Vec<String> = args
                .get_many::<String>("permissions")
                .map(|values| values.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()).collect())
                .unwrap_or_default();
            let initialized = !args.get_flag("uninitialized");
            let decision = check_endpoint(endpoint, &permissions, initialized, config.uninitialized_policy)?;
            print_decision(endpoint, &decision);
            if !decision.is_allowed() {
                std::process::exit(1);
            }
        }
        Some(("endpoints", _)) => {
            print!("{}", endpoint_table());
        }
        Some(("whoami", args)) => {
            let Some(token) = args.get_one::<String>("token") else {
                anyhow::bail!("missing token");
            };
            let transport = HttpTransport::new(config.request_timeout())?.with_bearer_token(token.clone());
            let session = AdminSession::new();
            // profile endpoint is public
            let client = session.client(&config.api_base_url, UninitializedPolicy::Deny, transport);
            let profile = session.load_profile(&client).await?;
            println!("{} <{}>", profile.name, profile.email);
            let mut permissions = profile.permissions;
            permissions.sort();
            for permission in permissions {
                println!("  {permission}");
            }
        }
        _ => {}
    }
    Ok(())
}
