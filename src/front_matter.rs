use std::fmt::Write;

use chrono::{DateTime, FixedOffset};

/// Front matter block of a post file.
///
/// Example of a rendered block:
/// ---
/// layout: post
/// title: "What I learned after 20+ years of software development"
/// date: 2024-02-27 06:20:53 +0000
/// tags: [career, software]
/// author: Alex
/// excerpt: "Someone asked me this question today..."
/// ---
pub struct FrontMatter {
    pub title: String,
    pub date: DateTime<FixedOffset>,
    pub tags: Vec<String>,
    pub author: String,
    pub excerpt: Option<String>,
    pub published: Option<bool>,
}

impl FrontMatter {
    pub fn render(&self) -> String {
        let mut buf = String::new();

        let _ = writeln!(&mut buf, "---");
        let _ = writeln!(&mut buf, "layout: post");
        let _ = writeln!(&mut buf, "title: \"{}\"", self.title);
        let _ = writeln!(&mut buf, "date: {}", self.date.format("%Y-%m-%d %H:%M:%S %z"));
        let _ = writeln!(&mut buf, "tags: [{}]", self.tags.join(", "));
        let _ = writeln!(&mut buf, "author: {}", self.author);
        if let Some(ref excerpt) = self.excerpt {
            let _ = writeln!(&mut buf, "excerpt: \"{}\"", excerpt);
        }
        if let Some(published) = self.published {
            let _ = writeln!(&mut buf, "published: {}", published);
        }
        let _ = writeln!(&mut buf, "---");

        buf
    }

    /// Full file contents: front matter, a blank line, then the body.
    pub fn render_document(&self, body: &str) -> String {
        format!("{}\n{}\n", self.render(), body)
    }
}
