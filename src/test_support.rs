use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Create a git repository with one commit containing `files`.
pub(crate) fn create_repo_with_files(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
    // Keep `git diff` output free of local colour and rename settings.
    git(path, &["config", "color.ui", "false"]);
    git(path, &["config", "diff.renames", "true"]);

    for (name, content) in files {
        write_file(path, name, content);
    }
    git(path, &["add", "."]);
    git(path, &["commit", "--allow-empty", "-m", "Initial commit"]);

    temp_dir
}

pub(crate) fn write_file(root: &Path, name: &str, content: &str) {
    let file = root.join(name);
    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(file, content).unwrap();
}

/// Stage everything and return `git diff HEAD` output, untrimmed.
pub(crate) fn git_diff_head(root: &Path) -> String {
    git(root, &["add", "-A"]);
    git(root, &["diff", "HEAD"])
}

/// Throw away all working tree and index changes.
pub(crate) fn reset_hard(root: &Path) {
    git(root, &["reset", "--hard", "HEAD"]);
    git(root, &["clean", "-fd"]);
}

/// Run git and return raw stdout; panics on failure.
pub(crate) fn git(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }

    String::from_utf8_lossy(&output.stdout).into_owned()
}
