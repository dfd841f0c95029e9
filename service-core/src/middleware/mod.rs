pub mod panic;
pub mod tracing;

pub use self::panic::handle_panic;
pub use self::tracing::{REQUEST_ID_HEADER, request_id_middleware, request_span};
