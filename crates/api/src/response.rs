//! Response envelope for admin list endpoints.
//!
//! Entity CRUD endpoints return the entity bare; list endpoints under
//! `/admin` wrap their payload as `{ "data": [...] }` so pagination metadata
//! can be added later without breaking clients.

use serde::Serialize;

/// The `{ "data": T }` list envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
