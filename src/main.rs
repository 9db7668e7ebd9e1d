//! `hostmgr` command line.

use clap::{ArgAction, Parser, Subcommand};
use hostmgr::commands::{add_host, get_hosts, remove_host, set_host_address};
use hostmgr::{
    HostEntry, HostsDataService, HostsError, LogService, ServiceConfig, ServiceContext,
    register_defaults,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hostmgr", version, about = "Manage hosts file entries")]
struct Cli {
    /// Hosts file to operate on instead of the system one.
    #[arg(long, global = true, value_name = "PATH")]
    hosts_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List entries, optionally only the given hostnames.
    Get { hostnames: Vec<String> },
    /// Add a hostname mapping.
    Add { hostname: String, address: String },
    /// Remove every entry for a hostname.
    Remove { hostname: String },
    /// Change the address of an existing hostname.
    Set { hostname: String, address: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if e.is_permission_denied() {
                eprintln!("hint: writing the system hosts file usually requires root");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), HostsError> {
    let mut config = ServiceConfig::new();
    if let Some(path) = cli.hosts_file {
        config = config.with_hosts_path(path);
    }

    let ctx = ServiceContext::new();
    register_defaults(&ctx, &config)?;
    let hosts = ctx.resolve::<dyn HostsDataService>()?;
    let log = ctx.resolve::<dyn LogService>()?;

    match cli.command {
        Command::Get { hostnames } => print_entries(&get_hosts(hosts.as_ref(), &hostnames)?),
        Command::Add { hostname, address } => {
            let entry = add_host(hosts.as_ref(), log.as_ref(), &hostname, &address)?;
            print_entries(&[entry]);
        }
        Command::Remove { hostname } => {
            remove_host(hosts.as_ref(), log.as_ref(), &hostname)?;
        }
        Command::Set { hostname, address } => {
            print_entries(&set_host_address(hosts.as_ref(), log.as_ref(), &hostname, &address)?);
        }
    }
    Ok(())
}

fn print_entries(entries: &[HostEntry]) {
    let width = entries.iter().map(|e| e.address().chars().count()).max().unwrap_or(0);
    for entry in entries {
        println!(
            "{:<width$}  {:<7}  {}",
            entry.address(),
            entry.address_family().to_string(),
            entry.hostname()
        );
    }
}
