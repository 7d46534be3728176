use std::process::Command;

use anyhow::Result;

use crate::{run_checked, FirmwareArgs, APP, TARGET};

/// Crates whose tests build for the host.
const HOST_CRATES: &[&str] = &["flood-pipeline"];

pub fn build_firmware(firmware: &FirmwareArgs) -> Result<()> {
    println!("Building {APP} for {TARGET}...");
    let mut cmd = Command::new("cargo");
    cmd.args(["build", "--no-default-features", "-p", APP, "--target", TARGET]);
    if firmware.release {
        cmd.arg("--release");
    }
    if let Some(features) = firmware.features() {
        cmd.args(["--features", features.as_str()]);
    }
    run_checked(cmd, &format!("build {APP}"))
}

pub fn test_host(args: &[String]) -> Result<()> {
    for krate in HOST_CRATES {
        println!("Testing {krate}...");
        let mut cmd = Command::new("cargo");
        cmd.args(["test", "-p", krate]);
        if !args.is_empty() {
            cmd.arg("--").args(args);
        }
        run_checked(cmd, &format!("test {krate}"))?;
    }
    Ok(())
}
