// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use treble_info::commands::filename::FilenameCommand;
use treble_info::commands::mounts::MountsCommand;
use treble_info::commands::report::ReportCommand;
use treble_info::commands::treble::TrebleCommand;
use treble_info::config::TrebleConfig;
use treble_info::detect::Device;
use treble_info::error::{Result, format_error_chain, format_error_with_color, get_exit_code};
use treble_info::logging;

#[derive(Parser)]
#[command(name = "treble-info")]
#[command(author, version, long_about = None)]
#[command(about = "Android Project Treble and GSI compatibility report")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to the per-user config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Resolve /vendor and /odm below this directory
    #[arg(long, value_name = "DIR", global = true)]
    root: Option<PathBuf>,

    /// Read properties from a getprop or build.prop dump
    #[arg(long, value_name = "FILE", global = true)]
    props: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the full device report
    #[command(visible_alias = "r")]
    Report {
        /// Output results in JSON format
        #[arg(long)]
        json: bool,

        /// Show only one category (treble, partitions, architecture, image)
        #[arg(long, value_name = "CATEGORY")]
        category: Option<String>,

        /// Explain what each entry means
        #[arg(long)]
        explain: bool,
    },

    /// Print the name of the system image to flash
    #[command(visible_alias = "f")]
    Filename,

    /// Show Treble support and the VNDK version
    Treble {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the parsed mount table
    Mounts,
}

fn setup_logger(cli: &Cli) {
    logging::setup_logger(cli.verbose);
}

fn load_config(cli: &Cli) -> Result<TrebleConfig> {
    let mut config = TrebleConfig::load(cli.config.as_deref())?;
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
    if let Some(props) = &cli.props {
        config.properties_file = Some(props.clone());
    }
    Ok(config)
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger based on CLI flags and environment
    setup_logger(&cli);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    let result: Result<i32> = (|| {
        let device = Device::from_config(&config)?;

        match cli.command {
            Commands::Report {
                json,
                category,
                explain,
            } => {
                let command = ReportCommand::new(&device)?;
                command.execute(json, explain, cli.verbose > 0, category.as_deref())
            }
            Commands::Filename => {
                let command = FilenameCommand::new(&device)?;
                command.execute().map(|()| 0)
            }
            Commands::Treble { json } => {
                let command = TrebleCommand::new(&device)?;
                command.execute(json).map(|()| 0)
            }
            Commands::Mounts => {
                let command = MountsCommand::new(&device)?;
                command.execute().map(|()| 0)
            }
        }
    })();

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            let use_color = config.output.color && std::io::stderr().is_terminal();
            eprint!("{}", format_error_with_color(&e, use_color));
            std::process::exit(get_exit_code(&e));
        }
    }
}
