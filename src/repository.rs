use std::fmt::{self, Display, Formatter, Write};
use std::path::{Path, PathBuf};
use std::{fs, io};

use chrono::{DateTime, FixedOffset, Local};
use spdlog::info;

use crate::config::Config;
use crate::front_matter::FrontMatter;
use crate::post_list::{file_name_of, PostList};
use crate::text_utils::{draft_slug, make_excerpt, rewrite_margin_notes, slugify};

pub const DEFAULT_TAG: &str = "general";
pub const THOUGHT_TAGS: [&str; 2] = ["thoughts", "notes"];
pub const SERIES_TAG: &str = "series";
pub const DRAFT_TAG: &str = "draft";

pub struct CreatedPost {
    pub file_name: String,
}

pub struct RepoStats {
    pub total_posts: usize,
    pub latest_post: Option<String>,
    pub oldest_post: Option<String>,
    pub site_url: String,
}

impl Display for RepoStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Total posts: {}\nLatest: {}\nOldest: {}\nLive URL: {}",
               self.total_posts,
               self.latest_post.as_deref().unwrap_or("None"),
               self.oldest_post.as_deref().unwrap_or("None"),
               self.site_url,
        )
    }
}

/// Manages the post files of one blog checkout.
///
/// All writes are whole-file overwrites. Filenames derive from the
/// creation date plus the title slug, so a second post with the same
/// title on the same day replaces the first one.
pub struct PostRepository {
    posts_dir: PathBuf,
    drafts_dir: PathBuf,
    author: String,
    site_url: String,
}

impl PostRepository {
    pub fn new(config: &Config) -> Self {
        PostRepository {
            posts_dir: config.paths.posts_dir(),
            drafts_dir: config.paths.drafts_dir(),
            author: config.site.author_name(),
            site_url: config.site.url.clone(),
        }
    }

    pub fn create_post(&self, title: &str, content: &str, tags: Option<Vec<String>>,
                       margin_notes: bool) -> io::Result<CreatedPost> {
        let date = Local::now().fixed_offset();
        let (file_name, document) = self.compose_post(title, content, tags, margin_notes, &date);
        self.write_post(&self.posts_dir, &file_name, &document)?;
        Ok(CreatedPost { file_name })
    }

    pub fn quick_thought(&self, thought: &str) -> io::Result<CreatedPost> {
        let date = Local::now().fixed_offset();
        let (file_name, document) = self.compose_thought(thought, &date);
        self.write_post(&self.posts_dir, &file_name, &document)?;
        Ok(CreatedPost { file_name })
    }

    pub fn create_series(&self, series_name: &str, title: &str, content: &str,
                         part: u32) -> io::Result<CreatedPost> {
        let date = Local::now().fixed_offset();
        let (file_name, document) = self.compose_series(series_name, title, content, part, &date);
        self.write_post(&self.posts_dir, &file_name, &document)?;
        Ok(CreatedPost { file_name })
    }

    pub fn create_draft(&self, title: &str, outline: &str) -> io::Result<CreatedPost> {
        let date = Local::now().fixed_offset();
        let (file_name, document) = self.compose_draft(title, outline, &date);
        if !self.drafts_dir.exists() {
            fs::create_dir_all(&self.drafts_dir)?;
        }
        self.write_post(&self.drafts_dir, &file_name, &document)?;
        Ok(CreatedPost { file_name })
    }

    /// Builds the filename and full document of a post without touching
    /// the filesystem.
    pub fn compose_post(&self, title: &str, content: &str, tags: Option<Vec<String>>,
                        margin_notes: bool, date: &DateTime<FixedOffset>) -> (String, String) {
        let file_name = format!("{}-{}.md", date.format("%Y-%m-%d"), slugify(title));

        let content = if margin_notes {
            rewrite_margin_notes(content)
        } else {
            content.to_string()
        };

        // The excerpt reflects the processed body, margin note markup included
        let excerpt = make_excerpt(&content);

        let tags = match tags {
            Some(tags) if !tags.is_empty() => tags,
            _ => vec![DEFAULT_TAG.to_string()],
        };

        let header = FrontMatter {
            title: title.to_string(),
            date: *date,
            tags,
            author: self.author.clone(),
            excerpt: Some(excerpt),
            published: None,
        };

        (file_name, header.render_document(&content))
    }

    pub fn compose_thought(&self, thought: &str, date: &DateTime<FixedOffset>) -> (String, String) {
        let file_name = format!("{}-thought-{}.md", date.format("%Y-%m-%d"), date.format("%H%M%S"));

        let header = FrontMatter {
            title: format!("Thought: {}", date.format("%Y/%m/%d")),
            date: *date,
            tags: THOUGHT_TAGS.iter().map(|t| t.to_string()).collect(),
            author: self.author.clone(),
            excerpt: None,
            published: None,
        };

        (file_name, header.render_document(thought))
    }

    pub fn compose_series(&self, series_name: &str, title: &str, content: &str, part: u32,
                          date: &DateTime<FixedOffset>) -> (String, String) {
        let full_title = format!("{} - Part {}: {}", series_name, part, title);
        let tags = vec![series_name.to_string(), SERIES_TAG.to_string()];

        // Series membership is purely textual: a navigation fragment on
        // top of the body, no structured metadata
        let full_content = format!("{}{}", render_series_nav(series_name), content);

        self.compose_post(&full_title, &full_content, Some(tags), false, date)
    }

    pub fn compose_draft(&self, title: &str, outline: &str, date: &DateTime<FixedOffset>) -> (String, String) {
        let file_name = format!("draft-{}-{}.md", date.format("%Y%m%d"), draft_slug(title));

        let header = FrontMatter {
            title: title.to_string(),
            date: *date,
            tags: vec![DRAFT_TAG.to_string()],
            author: self.author.clone(),
            excerpt: None,
            published: Some(false),
        };

        (file_name, header.render_document(&render_draft_body(title, outline)))
    }

    pub fn list_recent(&self, count: usize) -> io::Result<Vec<String>> {
        let entries = self.post_list().retrieve_by_modified()?;
        Ok(entries.into_iter()
            .take(count)
            .map(|(path, _)| file_name_of(&path))
            .collect())
    }

    pub fn search(&self, keyword: &str) -> io::Result<Vec<String>> {
        let keyword = keyword.to_lowercase();
        let mut matches = vec![];
        for path in self.post_list().retrieve_files()? {
            let content = fs::read_to_string(&path)?;
            if content.to_lowercase().contains(&keyword) {
                matches.push(file_name_of(&path));
            }
        }
        matches.sort();
        Ok(matches)
    }

    pub fn stats(&self) -> io::Result<RepoStats> {
        let entries = self.post_list().retrieve_by_modified()?;
        Ok(RepoStats {
            total_posts: entries.len(),
            latest_post: entries.first().map(|(path, _)| file_name_of(path)),
            oldest_post: entries.last().map(|(path, _)| file_name_of(path)),
            site_url: self.site_url.clone(),
        })
    }

    fn post_list(&self) -> PostList {
        PostList { posts_dir: self.posts_dir.clone() }
    }

    fn write_post(&self, dir: &Path, file_name: &str, document: &str) -> io::Result<()> {
        let path = dir.join(file_name);
        info!("Writing {}", path.to_str().unwrap());
        fs::write(&path, document)
    }
}

fn render_series_nav(series_name: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "This post is part of the series: **{}**", series_name);
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "[View all parts of the series](/tags/#{})", series_name.replace(' ', "-"));
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);

    buf
}

fn render_draft_body(title: &str, outline: &str) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "# {}", title);
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## Outline:");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "{}", outline);
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "---");
    let _ = write!(&mut buf, "*This is a draft - complete it before publishing*");

    buf
}
