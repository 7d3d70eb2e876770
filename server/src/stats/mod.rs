mod aggregate;
mod batch;
mod composer;
mod executor;
mod service;
mod year;

pub use aggregate::aggregate;
pub use batch::run_batched;
pub use composer::UserInfoComposer;
pub use executor::CredentialRotatingExecutor;
pub use service::{GithubRepository, GithubStatsService};
pub use year::{backoff_delay, RetryPolicy, YearOutcome, YearRangeFetcher};
