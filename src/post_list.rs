use std::path::{Path, PathBuf};
use std::time::SystemTime;
use std::{fs, io};

pub struct PostList {
    pub posts_dir: PathBuf,
}

impl PostList {
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        let entries = fs::read_dir(self.posts_dir.as_path())?;
        for entry in entries {
            if let Ok(entry) = entry {
                if let Ok(file_type) = entry.file_type() {
                    if !file_type.is_file() {
                        continue;
                    }
                    let file_name = entry.file_name();
                    if let Some(file_name) = file_name.to_str() {
                        if file_name.ends_with(".md") {
                            posts.push(entry.path());
                        }
                    }
                }
            }
        }
        Ok(posts)
    }

    /// Post paths paired with their modification time, newest first.
    pub fn retrieve_by_modified(&self) -> io::Result<Vec<(PathBuf, SystemTime)>> {
        let files = self.retrieve_files()?;
        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            let modified = fs::metadata(&path)?.modified()?;
            entries.push((path, modified));
        }
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(entries)
    }
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name().unwrap().to_str().unwrap().to_string()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    pub fn touch(dir: &Path, name: &str, mtime_secs: u64) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "content").unwrap();
        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs))
            .unwrap();
        path
    }

    #[test]
    fn test_retrieve_files_keeps_md_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "2024-01-01-one.md", 100);
        touch(dir.path(), "notes.txt", 200);
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let post_list = PostList { posts_dir: dir.path().to_path_buf() };
        let files = post_list.retrieve_files().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(file_name_of(&files[0]), "2024-01-01-one.md");
    }

    #[test]
    fn test_retrieve_by_modified_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "oldest.md", 100);
        touch(dir.path(), "newest.md", 300);
        touch(dir.path(), "middle.md", 200);

        let post_list = PostList { posts_dir: dir.path().to_path_buf() };
        let entries = post_list.retrieve_by_modified().unwrap();
        let names: Vec<String> = entries.iter().map(|(path, _)| file_name_of(path)).collect();
        assert_eq!(names, ["newest.md", "middle.md", "oldest.md"]);
    }

    #[test]
    fn test_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let post_list = PostList { posts_dir: dir.path().to_path_buf() };
        assert!(post_list.retrieve_by_modified().unwrap().is_empty());
    }

    #[test]
    fn test_missing_dir_propagates_error() {
        let post_list = PostList { posts_dir: PathBuf::from("/nonexistent/posts") };
        assert!(post_list.retrieve_files().is_err());
    }
}
