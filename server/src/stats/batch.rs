use std::future::Future;

use futures::future::join_all;

/// Runs `op` over `items` in consecutive groups of `concurrency` items.
///
/// Items of a group run concurrently and the next group starts only after the
/// whole previous group is done. Results are returned in the input order.
pub async fn run_batched<I, T, R, F, Fut>(items: I, concurrency: usize, op: F) -> Vec<R>
where
    I: IntoIterator<Item = T>,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let concurrency = concurrency.max(1);
    let mut items = items.into_iter().peekable();
    let mut results = Vec::new();

    while items.peek().is_some() {
        let group: Vec<Fut> = items.by_ref().take(concurrency).map(&op).collect();
        results.extend(join_all(group).await);
    }

    results
}
