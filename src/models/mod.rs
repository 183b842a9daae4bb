pub mod advisory;
pub mod alert_record;
pub mod family;
pub mod parsed_alert;

pub use advisory::{FeedPayload, RawAdvisory};
pub use alert_record::{AlertBase, AlertRecord, AlertRow, NaturalKey};
pub use family::{AlertFamily, RecordKind};
pub use parsed_alert::{AlertFields, ParsedAlert};
