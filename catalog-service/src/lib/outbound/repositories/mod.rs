//! Document store adapters for the generic repository port.

use chrono::SecondsFormat;
use chrono::Utc;

pub mod memory;
pub mod mongo;

pub use memory::MemoryRepository;
pub use mongo::connect;
pub use mongo::MongoRepository;

/// Current instant as stored in `created_at` / `updated_at`.
///
/// RFC 3339 with microsecond precision, UTC.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
