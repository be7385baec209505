//! Git command runner for patchstat.
//!
//! Provides a wrapper around git commands with captured stdout/stderr and
//! structured error handling. Git is only used to cross-check parsed patches
//! against `git apply`; the parser itself never shells out.

use crate::error::{PatchstatError, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command in `cwd`.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(PatchstatError::GitError)` - Git could not be started or exited non-zero
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    run_git_with_input(cwd, args, None)
}

/// Run a git command in `cwd`, optionally feeding `input` on stdin.
pub fn run_git_with_input<P: AsRef<Path>>(
    cwd: P,
    args: &[&str],
    input: Option<&str>,
) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    let subcommand = args.first().copied().unwrap_or_default();

    log::debug!("running git {} in {}", args.join(" "), cwd.display());

    let mut child = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            PatchstatError::GitError(format!("failed to execute git {}: {}", subcommand, e))
        })?;

    if let (Some(text), Some(mut stdin)) = (input, child.stdin.take()) {
        stdin.write_all(text.as_bytes()).map_err(|e| {
            PatchstatError::GitError(format!("failed to write to git {}: {}", subcommand, e))
        })?;
    }

    let output = child.wait_with_output().map_err(|e| {
        PatchstatError::GitError(format!("failed to wait for git {}: {}", subcommand, e))
    })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };

        Err(PatchstatError::GitError(format!(
            "git {} failed (exit code {}): {}",
            subcommand, exit_code, error_msg
        )))
    }
}

/// Check that `patch_text` applies cleanly to the working tree in `repo`.
///
/// Runs `git apply --check` with the patch on stdin; nothing is modified.
pub fn apply_check<P: AsRef<Path>>(repo: P, patch_text: &str) -> Result<()> {
    run_git_with_input(repo, &["apply", "--check", "-"], Some(patch_text))?;
    Ok(())
}

/// Apply `patch_text` to the working tree in `repo`.
pub fn apply<P: AsRef<Path>>(repo: P, patch_text: &str) -> Result<()> {
    run_git_with_input(repo, &["apply", "-"], Some(patch_text))?;
    Ok(())
}
