mod common;
pub use self::common::{Query, QueryCommon, SortDirection};

mod table;
pub use self::table::{Filter, Table, TableQuery};
