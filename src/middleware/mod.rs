pub mod cors;
pub mod extract;
pub mod response;

pub use extract::{EntityId, JsonBody, PageQuery};
pub use response::{envelope_bare_errors, ApiResponse, ApiResult};
