mod envelope;
pub use self::envelope::{Envelope, Paginated};
