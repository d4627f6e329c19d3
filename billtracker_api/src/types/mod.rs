mod date;
pub use self::date::{month_key, parse_date};

mod bill;
pub use self::bill::{Bill, BillID};

mod person;
pub use self::person::{PeopleID, Person};

mod sponsor;
pub use self::sponsor::{Sponsor, PRIMARY_SPONSOR_POSITION};

mod history;
pub use self::history::History;

mod rollcall;
pub use self::rollcall::{RollCallID, Rollcall, Vote};
