mod machine;
mod service;

pub use machine::{Machine, NewMachine};
pub use service::{NewService, Service};

use chrono::{NaiveDateTime, Timelike, Utc};

/// Current UTC time truncated to the microsecond precision the schema stores.
pub fn timestamp_now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();

    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}
