mod common;
pub use self::common::{Pagination, Query, QueryPairs, SortDirection};
