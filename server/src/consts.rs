use std::time::Duration;

// Year slices fetched at the same time in the all-time mode
pub const BATCH_CONCURRENCY: usize = 3;

pub const YEAR_QUERY_MAX_RETRIES: u32 = 3;
pub const YEAR_QUERY_BASE_DELAY: Duration = Duration::from_millis(1000);

// Error messages
pub const NOT_FOUND_MESSAGE: &str = "Not found";
pub const NO_CREDENTIALS_MESSAGE: &str = "No credentials configured";
