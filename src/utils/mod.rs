pub mod time;

pub use time::{date_from_epoch_seconds, format_iso, months_ago, today_utc};
