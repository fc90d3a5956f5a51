use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};

use crate::config::CommandExec;
use crate::vcard;

/// Hand the exported files to the configured share command.
///
/// The command receives the file paths as trailing arguments and the MIME
/// type in `VCFEX_MIME`. What the user does once the platform's chooser is
/// up is out of our hands.
pub fn dispatch(command: &CommandExec, files: &[PathBuf]) -> Result<()> {
    let mut child = Command::new(&command.program)
        .args(&command.args)
        .args(files)
        .env("VCFEX_MIME", vcard::MIME_TYPE)
        .spawn()
        .with_context(|| format!("failed to spawn `{}`", command.program))?;

    let status = child.wait()?;
    if !status.success() {
        bail!("`{}` exited with {}", command.program, status);
    }

    Ok(())
}
