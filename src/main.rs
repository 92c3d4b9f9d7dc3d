/*!
# Introduction

netscribe validates network interface descriptions and writes the files that configure them on an
installed system.

Each description carries a boot protocol, addressing, nameservers, a device name and an optional
hostname.  netscribe renders it into a systemd-networkd `.network` unit and writes the hostname to
`/etc/hostname`.  All paths are relative to an install root, which defaults to `/`.

It contains the following subcommands:
* `write-net-config`: validate a network config document and write the unit files and hostname
* `validate-net-config`: validate a network config document without writing anything
* `set-hostname`: validate and write a single hostname

The network config document is JSON (or TOML, chosen by file extension) with a `Networks` list:

```json
{
  "Networks": [
    {
      "BootProto": "static",
      "GateWay": "10.154.214.130",
      "Ip": "10.154.214.158",
      "NetMask": "255.255.255.0",
      "OnBoot": false,
      "HostName": "mariner-test",
      "NameServers": ["10.159.32.34"],
      "Device": "eth1"
    }
  ]
}
```
*/

#![deny(rust_2018_idioms)]

mod cli;
mod hostname;
mod net_config;
mod networkd;

use argh::FromArgs;
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use snafu::ResultExt;
use std::process;

static DEFAULT_NET_CONFIG_FILE: &str = "/etc/netscribe/net.json";
static DEFAULT_INSTALL_ROOT: &str = "/";
// Both of these are relative to the install root
static SYSTEMD_NETWORK_DIR: &str = "etc/systemd/network";
static HOSTNAME_FILE: &str = "etc/hostname";

/// Stores user-supplied arguments.
#[derive(FromArgs, PartialEq, Debug)]
struct Args {
    #[argh(option, default = "LevelFilter::Info")]
    /// filter level for log messages
    log_level: LevelFilter,

    #[argh(subcommand)]
    subcommand: SubCommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum SubCommand {
    WriteNetConfig(cli::WriteNetConfigArgs),
    ValidateNetConfig(cli::ValidateNetConfigArgs),
    SetHostname(cli::SetHostnameArgs),
}

fn run() -> cli::Result<()> {
    let args: Args = argh::from_env();

    // Logs go to stderr so stdout stays clean for the subcommands' own output
    TermLogger::init(
        args.log_level,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context(cli::error::LoggerSnafu)?;

    match args.subcommand {
        SubCommand::WriteNetConfig(args) => cli::write_net_config::run(args)?,
        SubCommand::ValidateNetConfig(args) => cli::validate_net_config::run(args)?,
        SubCommand::SetHostname(args) => cli::set_hostname::run(args)?,
    }
    Ok(())
}

// Returning a Result from main makes it print a Debug representation of the error, but with Snafu
// we have nice Display representations of the error, so we wrap "main" (run) and print any error.
// https://github.com/shepmaster/snafu/issues/110
fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
