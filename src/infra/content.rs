//! Content loading: posts and pages from TOML documents on disk.
//!
//! Layout: `<dir>/posts/*.toml` and `<dir>/pages/*.toml`. Timestamps are
//! RFC 3339 strings; a missing or unparseable `modified_at` degrades to
//! "unknown" (the Last-Modified decision then reports the current time)
//! instead of refusing to boot.

use std::path::Path;

use serde::Deserialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{info, warn};

use crate::domain::entities::{PageRecord, PostRecord};

use super::error::InfraError;

#[derive(Debug, Deserialize)]
struct RawPost {
    slug: String,
    title: String,
    body_html: String,
    published_at: String,
    #[serde(default)]
    modified_at: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    slug: String,
    title: String,
    body_html: String,
    #[serde(default)]
    modified_at: Option<String>,
}

/// Load the whole content directory. A missing directory yields an empty
/// site; a malformed document is a boot error naming the file.
pub fn load_content(dir: &Path) -> Result<(Vec<PostRecord>, Vec<PageRecord>), InfraError> {
    let posts = load_documents(&dir.join("posts"), parse_post)?;
    let pages = load_documents(&dir.join("pages"), parse_page)?;

    info!(
        target = "lacquer::content",
        directory = %dir.display(),
        posts = posts.len(),
        pages = pages.len(),
        "content loaded"
    );

    Ok((posts, pages))
}

fn load_documents<T>(
    dir: &Path,
    parse: fn(&Path, &str) -> Result<T, InfraError>,
) -> Result<Vec<T>, InfraError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => return Err(error.into()),
    };

    let mut records = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            continue;
        }
        let document = std::fs::read_to_string(&path)?;
        records.push(parse(&path, &document)?);
    }
    Ok(records)
}

fn parse_post(path: &Path, document: &str) -> Result<PostRecord, InfraError> {
    let raw: RawPost = toml::from_str(document).map_err(|error| malformed(path, &error))?;

    let published_at = OffsetDateTime::parse(&raw.published_at, &Rfc3339).map_err(|error| {
        InfraError::content(format!(
            "`{}`: published_at `{}` is not RFC 3339: {error}",
            path.display(),
            raw.published_at
        ))
    })?;

    Ok(PostRecord {
        modified_at: parse_modified_at(path, raw.modified_at.as_deref()),
        slug: raw.slug,
        title: raw.title,
        body_html: raw.body_html,
        published_at,
        tags: raw.tags,
    })
}

fn parse_page(path: &Path, document: &str) -> Result<PageRecord, InfraError> {
    let raw: RawPage = toml::from_str(document).map_err(|error| malformed(path, &error))?;

    Ok(PageRecord {
        modified_at: parse_modified_at(path, raw.modified_at.as_deref()),
        slug: raw.slug,
        title: raw.title,
        body_html: raw.body_html,
    })
}

fn parse_modified_at(path: &Path, value: Option<&str>) -> Option<OffsetDateTime> {
    let value = value?;
    match OffsetDateTime::parse(value, &Rfc3339) {
        Ok(instant) => Some(instant),
        Err(error) => {
            warn!(
                target = "lacquer::content",
                path = %path.display(),
                modified_at = value,
                error = %error,
                "unparseable modification time ignored"
            );
            None
        }
    }
}

fn malformed(path: &Path, error: &toml::de::Error) -> InfraError {
    InfraError::content(format!("`{}` is malformed: {error}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn write(dir: &Path, name: &str, document: &str) {
        std::fs::create_dir_all(dir).expect("mkdir");
        std::fs::write(dir.join(name), document).expect("write");
    }

    #[test]
    fn missing_directory_is_an_empty_site() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (posts, pages) = load_content(&dir.path().join("nope")).expect("load");
        assert!(posts.is_empty());
        assert!(pages.is_empty());
    }

    #[test]
    fn loads_posts_and_pages() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            &dir.path().join("posts"),
            "hello.toml",
            r#"
slug = "hello"
title = "Hello"
body_html = "<p>hi</p>"
published_at = "2024-01-10T09:00:00Z"
modified_at = "2024-01-15T10:00:00Z"
tags = ["caching"]
"#,
        );
        write(
            &dir.path().join("pages"),
            "about.toml",
            r#"
slug = "about"
title = "About"
body_html = "<p>about</p>"
"#,
        );

        let (posts, pages) = load_content(dir.path()).expect("load");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello");
        assert_eq!(
            posts[0].modified_at,
            Some(datetime!(2024-01-15 10:00:00 UTC))
        );
        assert_eq!(pages.len(), 1);
        assert!(pages[0].modified_at.is_none());
    }

    #[test]
    fn bad_modified_at_degrades_to_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            &dir.path().join("posts"),
            "odd.toml",
            r#"
slug = "odd"
title = "Odd"
body_html = "<p>odd</p>"
published_at = "2024-01-10T09:00:00Z"
modified_at = "last tuesday"
"#,
        );

        let (posts, _) = load_content(dir.path()).expect("load");
        assert!(posts[0].modified_at.is_none());
    }

    #[test]
    fn bad_published_at_is_a_boot_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(
            &dir.path().join("posts"),
            "bad.toml",
            r#"
slug = "bad"
title = "Bad"
body_html = "<p>bad</p>"
published_at = "yesterday"
"#,
        );

        assert!(load_content(dir.path()).is_err());
    }

    #[test]
    fn non_toml_files_are_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        write(&dir.path().join("posts"), "notes.txt", "not content");
        let (posts, _) = load_content(dir.path()).expect("load");
        assert!(posts.is_empty());
    }
}
