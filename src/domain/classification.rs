//! Page classification: the page-type category a response belongs to.
//!
//! Every public route resolves to exactly one [`PageClass`]; the caching
//! policy selects its TTL from it. Handlers record the classification on the
//! response so the header pipeline can read it after rendering.

use time::OffsetDateTime;

/// Page-type category used to select a shared-cache duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageClass {
    /// The front page (`/`).
    Home,
    /// A single post or a static page.
    Single,
    /// A listing: tag index or month archive.
    Archive,
    /// Everything else, including not-found responses.
    #[default]
    Other,
}

impl PageClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageClass::Home => "home",
            PageClass::Single => "single",
            PageClass::Archive => "archive",
            PageClass::Other => "other",
        }
    }
}

/// Everything the header policy needs to know about the page being served.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub class: PageClass,
    pub authenticated: bool,
    /// Last content modification, UTC. Only present for `Single` content
    /// with a known modification time.
    pub modified_at: Option<OffsetDateTime>,
}

impl PageContext {
    pub fn new(class: PageClass, authenticated: bool) -> Self {
        Self {
            class,
            authenticated,
            modified_at: None,
        }
    }

    pub fn with_modified_at(mut self, modified_at: Option<OffsetDateTime>) -> Self {
        self.modified_at = modified_at;
        self
    }
}

/// Response-extension marker attached by route handlers and consumed by the
/// caching-header middleware. Responses without one (fallbacks, health
/// probes) are classified `Other`.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub class: PageClass,
    pub modified_at: Option<OffsetDateTime>,
}

impl Classified {
    pub fn new(class: PageClass) -> Self {
        Self {
            class,
            modified_at: None,
        }
    }

    pub fn single(modified_at: Option<OffsetDateTime>) -> Self {
        Self {
            class: PageClass::Single,
            modified_at,
        }
    }
}
