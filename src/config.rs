use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

pub const CFG_FILE_NAME: &str = "blogctl.toml";

const CONFIG_SAMPLE: &str = r#"# Root of the static site checkout. The posts live in <blog_dir>/_posts
# and drafts in <blog_dir>/_drafts. A leading "~" expands to the home dir.
[paths]
blog_dir = "~/blog"

[site]
url = "https://example.github.io/blog"
# If absent, the OS user real name is used
# author = "Your Name"

[deploy]
remote = "origin"
branch = "main"

# [log]
# level = "Info"
# log_to_console = true
# location = "~/blog/blogctl.log"
"#;

#[derive(Deserialize)]
pub struct Paths {
    pub blog_dir: PathBuf,
}

impl Paths {
    pub fn posts_dir(&self) -> PathBuf {
        self.blog_dir.join("_posts")
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.blog_dir.join("_drafts")
    }
}

#[derive(Deserialize)]
pub struct Site {
    pub url: String,
    pub author: Option<String>,
}

impl Site {
    /// Author to stamp on new posts. Falls back to the OS user when the
    /// config does not name one.
    pub fn author_name(&self) -> String {
        if let Some(ref author) = self.author {
            return author.clone();
        }
        get_user_name()
    }
}

#[derive(Deserialize)]
pub struct Deploy {
    pub remote: String,
    pub branch: String,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub site: Site,
    pub deploy: Deploy,
    pub log: Option<Log>,
}

fn get_user_name() -> String {
    let name = whoami::realname();
    if name.is_empty() {
        return whoami::username();
    }
    name
}

fn parse_path(path: PathBuf) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(stripped);
        }
    }
    path
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.to_str().unwrap(), e))),
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        blog_dir: parse_path(cfg.paths.blog_dir),
    };

    Ok(cfg)
}

fn get_config_path() -> Option<PathBuf> {
    let exe_path = env::current_exe().unwrap();
    let exe_dir = exe_path.parent().unwrap();
    let cur_dir = env::current_dir().unwrap();

    if exe_dir.join(CFG_FILE_NAME).exists() {
        return Some(exe_dir.join(CFG_FILE_NAME));
    }

    if cur_dir.join(CFG_FILE_NAME).exists() {
        return Some(cur_dir.join(CFG_FILE_NAME));
    }

    let cfg_dir = dirs::config_dir().expect("Could not find user config dir");
    if cfg_dir.join(CFG_FILE_NAME).exists() {
        return Some(cfg_dir.join(CFG_FILE_NAME));
    }

    None
}

pub fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = cfg_path.unwrap_or(match get_config_path() {
        None => return Err("Could not find blogctl configuration. Run blogctl init to create one.".to_string()),
        Some(x) => x,
    });

    match read_config(&config_path) {
        Ok(config) => Ok(config),
        Err(e) => Err(e.to_string()),
    }
}

/// Writes a sample configuration to the given path, or to the user config
/// dir when none is given. Returns the path written to.
pub fn generate_cfg(config_path: Option<PathBuf>) -> io::Result<PathBuf> {
    let path: PathBuf = if let Some(path) = config_path {
        path
    } else {
        let cfg_dir = dirs::config_dir().expect("Could not find user config dir");
        cfg_dir.join(CFG_FILE_NAME)
    };

    let mut file = fs::File::create(&path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_TOML: &str = r#"
[paths]
blog_dir = "/home/alex/blog"

[site]
url = "https://alex.github.io/blog"
author = "Alex"

[deploy]
remote = "origin"
branch = "main"
"#;

    #[test]
    fn test_parse_config() {
        let cfg: Config = toml::from_str::<Config>(CONFIG_TOML).unwrap();
        assert_eq!(cfg.paths.blog_dir, PathBuf::from("/home/alex/blog"));
        assert_eq!(cfg.paths.posts_dir(), PathBuf::from("/home/alex/blog/_posts"));
        assert_eq!(cfg.paths.drafts_dir(), PathBuf::from("/home/alex/blog/_drafts"));
        assert_eq!(cfg.site.url, "https://alex.github.io/blog");
        assert_eq!(cfg.site.author_name(), "Alex");
        assert_eq!(cfg.deploy.remote, "origin");
        assert_eq!(cfg.deploy.branch, "main");
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_sample_config_parses() {
        let cfg: Config = toml::from_str::<Config>(CONFIG_SAMPLE).unwrap();
        assert_eq!(cfg.deploy.remote, "origin");
    }

    #[test]
    fn test_author_falls_back_to_os_user() {
        let site = Site { url: "https://example.org".to_string(), author: None };
        assert!(!site.author_name().is_empty());
    }

    #[test]
    fn test_parse_path_expands_home() {
        let expanded = parse_path(PathBuf::from("~/blog"));
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("blog"));
    }

    #[test]
    fn test_read_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = generate_cfg(Some(dir.path().join(CFG_FILE_NAME))).unwrap();
        let cfg = read_config(&cfg_path).unwrap();
        assert!(cfg.paths.blog_dir.ends_with("blog"));
    }

    #[test]
    fn test_read_config_missing_file() {
        let res = read_config(&PathBuf::from("/nonexistent/blogctl.toml"));
        assert!(res.is_err());
    }
}
