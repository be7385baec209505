//! Implementation of the `patchstat verify` command.
//!
//! Always checks the parse/reconstruct round trip. With `--repo`, the patch
//! must pass `git apply --check` against the repository working tree, and the
//! post-image of every file computed in-process must equal what `git apply`
//! writes into a scratch copy of the affected files.

use super::Report;
use crate::apply::apply_file_patch;
use crate::cli::VerifyArgs;
use crate::error::{PatchstatError, Result};
use crate::git;
use crate::patch::Patch;
use crate::reconstruct::check_round_trip;
use std::path::Path;
use tempfile::TempDir;

/// Expected content of one file after the patch is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostImage {
    /// Path relative to the repository root.
    pub path: String,
    /// File content, or `None` when the patch deletes the file.
    pub content: Option<String>,
}

/// Execute the `patchstat verify` command.
pub fn cmd_verify(args: VerifyArgs) -> Result<String> {
    let (text, patch) = super::load_patch(&args.input)?;
    let mut report = Report::default();

    if let Some(mismatch) = check_round_trip(&patch, &text) {
        return Err(PatchstatError::VerificationFailed(format!(
            "reconstruction differs from input: {}",
            mismatch
        )));
    }
    report.line(format!("round trip: ok ({} file(s))", patch.len()));

    if let Some(repo) = args.repo.as_deref() {
        git::apply_check(repo, &text)?;
        report.line("git apply --check: ok");

        let images = apply_against(repo, &patch)?;
        let scratch = apply_in_scratch(repo, &patch, &text)?;
        compare_post_images(scratch.path(), &images)?;
        report.line(format!(
            "in-process apply matches git apply: ok ({} file(s))",
            images.len()
        ));
    }

    Ok(report.finish())
}

/// Compute the post-image of every text file section from the files under `repo`.
///
/// Binary sections are skipped.
pub(crate) fn apply_against(repo: &Path, patch: &Patch) -> Result<Vec<PostImage>> {
    let mut images = Vec::new();

    for file in patch {
        if file.metadata.is_binary {
            log::debug!("skipping {} (binary)", file.path());
            continue;
        }

        let original = match file.source_path.as_deref() {
            Some(source) => std::fs::read_to_string(repo.join(source)).map_err(|e| {
                PatchstatError::UserError(format!(
                    "failed to read '{}' in {}: {}",
                    source,
                    repo.display(),
                    e
                ))
            })?,
            None => String::new(),
        };

        let content = apply_file_patch(&original, file).map_err(|source| PatchstatError::Apply {
            path: file.path().to_string(),
            source,
        })?;
        log::info!("applied {} in-process", file.path());

        if let Some(source) = file.source_path.as_deref()
            && file.target_path.as_deref() != Some(source)
        {
            // Renamed or deleted: the old path must be gone afterwards.
            images.push(PostImage {
                path: source.to_string(),
                content: None,
            });
        }
        if let Some(target) = file.target_path.as_deref() {
            images.push(PostImage {
                path: target.to_string(),
                content: Some(content),
            });
        }
    }

    Ok(images)
}

/// Copy the patch's source files from `repo` into a scratch repository and
/// run `git apply` there.
pub(crate) fn apply_in_scratch(repo: &Path, patch: &Patch, patch_text: &str) -> Result<TempDir> {
    let scratch = TempDir::new().map_err(|e| {
        PatchstatError::UserError(format!("failed to create scratch directory: {}", e))
    })?;
    git::run_git(scratch.path(), &["init", "-q"])?;

    for source in patch.iter().filter_map(|f| f.source_path.as_deref()) {
        let from = repo.join(source);
        if !from.is_file() {
            continue;
        }
        let to = scratch.path().join(source);
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PatchstatError::UserError(format!(
                    "failed to create '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        std::fs::copy(&from, &to).map_err(|e| {
            PatchstatError::UserError(format!("failed to copy '{}': {}", source, e))
        })?;
    }

    log::debug!("applying patch in scratch copy {}", scratch.path().display());
    git::apply(scratch.path(), patch_text)?;
    Ok(scratch)
}

/// Compare in-process post-images with the files under `root`.
pub(crate) fn compare_post_images(root: &Path, images: &[PostImage]) -> Result<()> {
    for image in images {
        let path = root.join(&image.path);
        let actual = if path.is_file() {
            Some(std::fs::read_to_string(&path).map_err(|e| {
                PatchstatError::UserError(format!("failed to read '{}': {}", path.display(), e))
            })?)
        } else {
            None
        };

        if actual != image.content {
            return Err(PatchstatError::VerificationFailed(format!(
                "{}: in-process post-image differs from git apply ({} vs {})",
                image.path,
                describe(image.content.as_deref()),
                describe(actual.as_deref())
            )));
        }
    }

    Ok(())
}

fn describe(content: Option<&str>) -> String {
    match content {
        Some(text) => format!("{} bytes", text.len()),
        None => "absent".to_string(),
    }
}
