//! Cache-Control decision.

use crate::domain::classification::PageContext;

use super::config::PolicyConfig;

/// Directive for authenticated responses: they may carry principal-specific
/// content and must never be retained by a shared cache.
pub const AUTHENTICATED_CACHE_CONTROL: &str = "no-cache, must-revalidate, max-age=0";

/// Decide the `Cache-Control` value for a response.
///
/// Anonymous responses get `s-maxage=<ttl>` with the TTL selected by page
/// class; a TTL of zero is emitted as `s-maxage=0` rather than omitted, so
/// the upstream cache is told explicitly not to retain the page.
pub fn cache_control(config: &PolicyConfig, ctx: &PageContext) -> String {
    if ctx.authenticated {
        return AUTHENTICATED_CACHE_CONTROL.to_string();
    }
    format!("s-maxage={}", config.ttl_for(ctx.class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::PageClass;

    fn config() -> PolicyConfig {
        PolicyConfig {
            homepage_ttl: 600,
            single_ttl: 3600,
            archive_ttl: 1800,
            default_ttl: 300,
            etag_enabled: false,
            last_modified_enabled: false,
            emoji_scripts_enabled: true,
        }
    }

    #[test]
    fn authenticated_never_shared_cached() {
        for class in [
            PageClass::Home,
            PageClass::Single,
            PageClass::Archive,
            PageClass::Other,
        ] {
            let ctx = PageContext::new(class, true);
            assert_eq!(
                cache_control(&config(), &ctx),
                "no-cache, must-revalidate, max-age=0"
            );
        }
    }

    #[test]
    fn anonymous_ttl_per_classification() {
        let cases = [
            (PageClass::Home, "s-maxage=600"),
            (PageClass::Single, "s-maxage=3600"),
            (PageClass::Archive, "s-maxage=1800"),
            (PageClass::Other, "s-maxage=300"),
        ];
        for (class, expected) in cases {
            let ctx = PageContext::new(class, false);
            assert_eq!(cache_control(&config(), &ctx), expected);
        }
    }

    #[test]
    fn zero_ttl_is_emitted_not_omitted() {
        let mut config = config();
        config.homepage_ttl = 0;
        let ctx = PageContext::new(PageClass::Home, false);
        assert_eq!(cache_control(&config, &ctx), "s-maxage=0");
    }

    #[test]
    fn ttl_renders_base_ten_without_padding() {
        let mut config = config();
        config.default_ttl = 86400;
        let ctx = PageContext::new(PageClass::Other, false);
        assert_eq!(cache_control(&config, &ctx), "s-maxage=86400");
    }
}
