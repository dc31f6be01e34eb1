mod call_record;

pub use call_record::{CallRecord, RawRow, CALL_TIME_FORMAT};
