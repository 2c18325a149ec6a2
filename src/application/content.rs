//! Read-side queries over the loaded content set.

use std::collections::BTreeMap;

use crate::domain::entities::{PageRecord, PostRecord};

/// In-memory content set, indexed once at startup.
pub struct ContentService {
    posts: Vec<PostRecord>,
    pages: Vec<PageRecord>,
    posts_by_slug: BTreeMap<String, usize>,
    pages_by_slug: BTreeMap<String, usize>,
}

impl ContentService {
    pub fn new(mut posts: Vec<PostRecord>, pages: Vec<PageRecord>) -> Self {
        // Newest first on every listing surface.
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let posts_by_slug = posts
            .iter()
            .enumerate()
            .map(|(index, post)| (post.slug.clone(), index))
            .collect();
        let pages_by_slug = pages
            .iter()
            .enumerate()
            .map(|(index, page)| (page.slug.clone(), index))
            .collect();

        Self {
            posts,
            pages,
            posts_by_slug,
            pages_by_slug,
        }
    }

    pub fn recent_posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn post_by_slug(&self, slug: &str) -> Option<&PostRecord> {
        self.posts_by_slug.get(slug).map(|&index| &self.posts[index])
    }

    pub fn page_by_slug(&self, slug: &str) -> Option<&PageRecord> {
        self.pages_by_slug.get(slug).map(|&index| &self.pages[index])
    }

    pub fn posts_with_tag(&self, tag: &str) -> Vec<&PostRecord> {
        self.posts
            .iter()
            .filter(|post| post.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// Posts published in a `YYYY-MM` month, newest first.
    pub fn posts_in_month(&self, month: &str) -> Vec<&PostRecord> {
        self.posts
            .iter()
            .filter(|post| {
                let date = post.published_at.date();
                format!("{:04}-{:02}", date.year(), u8::from(date.month())) == month
            })
            .collect()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn post(slug: &str, published: time::OffsetDateTime, tags: &[&str]) -> PostRecord {
        PostRecord {
            slug: slug.to_string(),
            title: slug.to_string(),
            body_html: format!("<p>{slug}</p>"),
            published_at: published,
            modified_at: Some(published),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn service() -> ContentService {
        ContentService::new(
            vec![
                post("older", datetime!(2024-01-10 09:00:00 UTC), &["caching"]),
                post("newer", datetime!(2024-02-05 09:00:00 UTC), &["ops"]),
            ],
            vec![PageRecord {
                slug: "about".to_string(),
                title: "About".to_string(),
                body_html: "<p>about</p>".to_string(),
                modified_at: None,
            }],
        )
    }

    #[test]
    fn recent_posts_newest_first() {
        let service = service();
        let slugs: Vec<_> = service.recent_posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["newer", "older"]);
    }

    #[test]
    fn lookup_by_slug() {
        let service = service();
        assert!(service.post_by_slug("older").is_some());
        assert!(service.post_by_slug("missing").is_none());
        assert!(service.page_by_slug("about").is_some());
    }

    #[test]
    fn tag_filter_matches_exactly() {
        let service = service();
        let tagged = service.posts_with_tag("caching");
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].slug, "older");
    }

    #[test]
    fn month_filter_uses_published_date() {
        let service = service();
        let january = service.posts_in_month("2024-01");
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].slug, "older");
        assert!(service.posts_in_month("2023-12").is_empty());
    }
}
