//! Periodic checkpoints of generated files to version control

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{Result, WordlistError};

/// What a checkpoint covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointRequest {
    pub files_completed: u64,
    /// File name of the most recently finalized output file
    pub latest_file: String,
}

impl CheckpointRequest {
    pub fn commit_message(&self) -> String {
        format!(
            "Wordlist progress: added files up to {} ({} files)",
            self.latest_file, self.files_completed
        )
    }
}

/// Checkpoint capability.
///
/// Failures are reported through the returned error. The generation loop
/// logs them and carries on.
pub trait Checkpointer {
    fn checkpoint(&mut self, request: &CheckpointRequest) -> Result<()>;
}

/// Does nothing, for offline runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCheckpointer;

impl Checkpointer for NoopCheckpointer {
    fn checkpoint(&mut self, _request: &CheckpointRequest) -> Result<()> {
        Ok(())
    }
}

/// Stages, commits and pushes the working tree with the `git` binary
#[derive(Debug, Clone)]
pub struct GitCheckpointer {
    repo_dir: PathBuf,
    remote: String,
    branch: String,
}

impl Default for GitCheckpointer {
    fn default() -> Self {
        Self::new(".", "origin", "main")
    }
}

impl GitCheckpointer {
    pub fn new(
        repo_dir: impl Into<PathBuf>,
        remote: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: remote.into(),
            branch: branch.into(),
        }
    }

    /// The three git invocations for a request, labelled for error reporting
    pub fn steps(&self, request: &CheckpointRequest) -> Vec<(&'static str, Vec<String>)> {
        vec![
            ("git add", vec!["add".to_string(), ".".to_string()]),
            (
                "git commit",
                vec![
                    "commit".to_string(),
                    "-m".to_string(),
                    request.commit_message(),
                ],
            ),
            (
                "git push",
                vec!["push".to_string(), self.remote.clone(), self.branch.clone()],
            ),
        ]
    }

    /// A non-interactive git invocation: no stdin and no terminal prompts,
    /// so a missing credential fails instead of waiting for input
    pub fn command(&self, args: &[String]) -> Command {
        let mut command = Command::new("git");
        command
            .args(args)
            .current_dir(&self.repo_dir)
            .stdin(Stdio::null())
            .env("GIT_TERMINAL_PROMPT", "0");
        command
    }
}

impl Checkpointer for GitCheckpointer {
    fn checkpoint(&mut self, request: &CheckpointRequest) -> Result<()> {
        for (step, args) in self.steps(request) {
            let output = self
                .command(&args)
                .output()
                .map_err(|e| WordlistError::checkpoint(step, e.to_string()))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(WordlistError::checkpoint(
                    step,
                    format!("{} ({})", stderr.trim(), output.status),
                ));
            }
            tracing::debug!(step, "Checkpoint step succeeded");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CheckpointRequest {
        CheckpointRequest {
            files_completed: 20,
            latest_file: "combos_000020.txt".to_string(),
        }
    }

    #[test]
    fn test_commit_message() {
        assert_eq!(
            request().commit_message(),
            "Wordlist progress: added files up to combos_000020.txt (20 files)"
        );
    }

    #[test]
    fn test_git_steps() {
        let git = GitCheckpointer::new(".", "backup", "wordlists");
        let steps = git.steps(&request());
        let names: Vec<_> = steps.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["git add", "git commit", "git push"]);
        assert_eq!(steps[2].1, vec!["push", "backup", "wordlists"]);
        assert_eq!(steps[1].1[2], request().commit_message());
    }

    #[test]
    fn test_git_command_never_prompts() {
        let git = GitCheckpointer::new("/srv/wordlists", "origin", "main");
        let command = git.command(&["push".to_string()]);
        let prompt = command
            .get_envs()
            .find(|(key, _)| *key == "GIT_TERMINAL_PROMPT")
            .and_then(|(_, value)| value);
        assert_eq!(prompt, Some(std::ffi::OsStr::new("0")));
        assert_eq!(command.get_current_dir(), Some(std::path::Path::new("/srv/wordlists")));
        assert_eq!(command.get_program(), "git");
    }

    #[test]
    fn test_git_outside_repository_fails_softly() {
        let dir = tempfile::tempdir().unwrap();
        let mut git = GitCheckpointer::new(dir.path(), "origin", "main");
        let err = git.checkpoint(&request()).unwrap_err();
        assert!(!err.is_fatal());
    }
}
