use std::path::Path;
use std::process::{Command, Output};

use anyhow::{bail, Context, Result};
use chrono::Local;
use spdlog::info;

use crate::config::Config;

pub enum DeployOutcome {
    Deployed { site_url: String },
    NoChanges,
}

/// Stages, commits and pushes the blog checkout.
///
/// A commit that reports "nothing to commit" is a benign no-op; any other
/// commit failure surfaces git's stderr. Failures while staging or
/// pushing are fatal.
pub fn deploy(config: &Config, message: Option<String>) -> Result<DeployOutcome> {
    let blog_dir = config.paths.blog_dir.as_path();
    let message = message.unwrap_or_else(default_message);

    info!("Staging changes in {}", blog_dir.to_str().unwrap());
    let add = git(blog_dir, &["add", "-A"])?;
    if !add.status.success() {
        bail!("git add failed: {}", stderr_of(&add));
    }

    info!("Committing: {}", message);
    let commit = git(blog_dir, &["commit", "-m", &message])?;
    if !commit.status.success() {
        if stdout_of(&commit).contains("nothing to commit") {
            info!("Nothing to commit");
            return Ok(DeployOutcome::NoChanges);
        }
        bail!("git commit failed: {}", stderr_of(&commit));
    }

    info!("Pushing to {} {}", config.deploy.remote, config.deploy.branch);
    let push = git(blog_dir, &["push", config.deploy.remote.as_str(), config.deploy.branch.as_str()])?;
    if !push.status.success() {
        bail!("git push failed: {}", stderr_of(&push));
    }

    Ok(DeployOutcome::Deployed { site_url: config.site.url.clone() })
}

// Runs git inside the blog dir. The working directory of the calling
// process is left untouched.
fn git(blog_dir: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .args(args)
        .current_dir(blog_dir)
        .output()
        .with_context(|| format!("Failed to execute `git {}`", args.join(" ")))
}

fn default_message() -> String {
    format!("Update blog - {}", Local::now().format("%Y-%m-%d %H:%M"))
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    #[test]
    fn test_default_message_format() {
        let message = default_message();
        let re = Regex::new(r"^Update blog - \d{4}-\d{2}-\d{2} \d{2}:\d{2}$").unwrap();
        assert!(re.is_match(&message), "unexpected message: {}", message);
    }

    #[test]
    fn test_git_in_missing_dir_fails() {
        let res = git(Path::new("/nonexistent/blog"), &["status"]);
        assert!(res.is_err());
    }
}
