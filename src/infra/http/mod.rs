mod admin;
mod middleware;
mod public;

pub use admin::{AdminState, build_admin_router};
pub use middleware::{RequestContext, log_responses, set_request_context};
pub use public::{HttpState, build_public_router};
