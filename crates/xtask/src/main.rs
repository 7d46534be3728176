mod cargo;
mod probe;

use std::process::Command;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

const TARGET: &str = "thumbv7em-none-eabihf";
const CHIP: &str = "nRF52840_xxAA";
const APP: &str = "flood-app";

/// Flood monitor build helper
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the firmware
    Build(FirmwareArgs),
    /// Build and flash the firmware
    Flash {
        #[command(flatten)]
        firmware: FirmwareArgs,
        /// Erase the whole chip first. This also removes the UF2 bootloader.
        #[arg(long)]
        erase_all: bool,
    },
    /// Build, flash, and stream the defmt log
    Run(FirmwareArgs),
    /// Stream the defmt log of the firmware already on the target
    Attach {
        #[arg(long)]
        release: bool,
    },
    /// Run the pipeline tests on the host
    Test {
        /// Arguments passed through to the test binaries
        #[arg(last = true)]
        args: Vec<String>,
    },
}

#[derive(Args, Clone)]
struct FirmwareArgs {
    /// Extra cargo features for the firmware
    #[arg(long)]
    features: Option<String>,
    /// Hand each snapshot to a single consumer instead of broadcasting it
    #[arg(long)]
    single_delivery: bool,
    /// Build with the `defmt` logging feature
    #[arg(long)]
    defmt: bool,
    #[arg(long)]
    release: bool,
}

impl FirmwareArgs {
    fn features(&self) -> Option<String> {
        let features: Vec<&str> = self
            .features
            .as_deref()
            .into_iter()
            .chain(self.defmt.then_some("defmt"))
            .chain(self.single_delivery.then_some("single-delivery"))
            .collect();
        (!features.is_empty()).then(|| features.join(","))
    }
}

fn elf_path(release: bool) -> String {
    let profile = if release { "release" } else { "debug" };
    format!("target/{TARGET}/{profile}/{APP}")
}

/// Runs `cmd` to completion, failing unless it exits successfully.
fn run_checked(mut cmd: Command, what: &str) -> Result<()> {
    let status = cmd.status().with_context(|| format!("Failed to {what}"))?;
    if !status.success() {
        anyhow::bail!("Failed to {what} ({status})");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(firmware) => {
            cargo::build_firmware(&firmware)?;
            println!("Build complete: {}", elf_path(firmware.release));
        }
        Commands::Flash { firmware, erase_all } => {
            cargo::build_firmware(&firmware)?;
            if erase_all {
                probe::erase_all()?;
            }
            probe::download(&elf_path(firmware.release))?;
        }
        Commands::Run(firmware) => {
            cargo::build_firmware(&firmware)?;
            let elf = elf_path(firmware.release);
            probe::download(&elf)?;
            probe::attach(&elf)?;
        }
        Commands::Attach { release } => probe::attach(&elf_path(release))?,
        Commands::Test { args } => cargo::test_host(&args)?,
    }

    Ok(())
}
