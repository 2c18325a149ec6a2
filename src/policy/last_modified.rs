//! Last-Modified decision.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset, error::Format};

use crate::domain::classification::{PageClass, PageContext};

/// RFC 1123 HTTP-date, always rendered in UTC: `Tue, 15 Jan 2024 10:00:00 GMT`.
const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Format an instant as an HTTP-date. Stored timestamps without a zone are
/// interpreted as UTC upstream of this call; whatever offset arrives here is
/// normalized back to UTC before formatting.
pub fn http_date(instant: OffsetDateTime) -> Result<String, Format> {
    instant.to_offset(UtcOffset::UTC).format(&HTTP_DATE)
}

/// Decide the `Last-Modified` value for a response.
///
/// Single content with a known modification time reports that time; every
/// other page reports `now`, degrading to "always fresh". Conditional-GET
/// evaluation of the inbound request is not handled here; the header only
/// feeds the upstream cache's revalidation.
pub fn last_modified(ctx: &PageContext, now: OffsetDateTime) -> Result<String, Format> {
    match (ctx.class, ctx.modified_at) {
        (PageClass::Single, Some(modified_at)) => http_date(modified_at),
        _ => http_date(now),
    }
}
