//! probe-rs invocations.

use std::process::Command;

use anyhow::Result;

use crate::{run_checked, CHIP};

fn probe_rs(subcommand: &str) -> Command {
    let mut cmd = Command::new("probe-rs");
    cmd.args([subcommand, "--chip", CHIP]);
    cmd
}

pub fn erase_all() -> Result<()> {
    println!("Erasing chip...");
    let mut cmd = probe_rs("erase");
    cmd.arg("--allow-erase-all");
    run_checked(cmd, "erase chip")
}

/// Writes the image above the bootloader's MBR, leaving the rest of flash
/// untouched.
pub fn download(elf: &str) -> Result<()> {
    println!("Flashing {elf}...");
    let mut cmd = probe_rs("download");
    cmd.args([elf, "--preverify", "--restore-unwritten"]);
    run_checked(cmd, "flash firmware")
}

pub fn attach(elf: &str) -> Result<()> {
    println!("Attaching RTT...");
    let mut cmd = probe_rs("attach");
    cmd.arg(elf);
    run_checked(cmd, "attach probe-rs")
}
