//! Timed emission of a finite sequence.
//!
//! [`paced`] yields one item, waits a fixed interval, and repeats until the
//! source is exhausted. Every item, the first included, is preceded by the
//! delay. The stream owns its source, so dropping it (a disconnected SSE
//! client) drops the pending sleep and nothing further is produced.

use std::time::Duration;

use futures::stream::{self, Stream};

/// Emit `items` one by one, each after `delay`.
pub fn paced<I>(items: I, delay: Duration) -> impl Stream<Item = I::Item> + Send + 'static
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
{
    stream::unfold(items.into_iter(), move |mut iter| async move {
        let item = iter.next()?;
        tokio::time::sleep(delay).await;
        Some((item, iter))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::StreamExt;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_items_are_spaced_by_delay() {
        let start = Instant::now();
        let mut stream = Box::pin(paced(vec!["a", "b", "c"], Duration::from_secs(1)));

        for (expected, secs) in [("a", 1), ("b", 2), ("c", 3)] {
            assert_eq!(stream.next().await, Some(expected));
            let elapsed = start.elapsed();
            assert!(elapsed >= Duration::from_secs(secs), "{expected} came early: {elapsed:?}");
            assert!(elapsed < Duration::from_secs(secs + 1), "{expected} came late: {elapsed:?}");
        }

        assert_eq!(stream.next().await, None);
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_source_completes_immediately() {
        let start = Instant::now();
        let items: Vec<u32> = paced(Vec::<u32>::new(), Duration::from_secs(1)).collect().await;
        assert!(items.is_empty());
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_stream_stops_emission() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let source = (0..1000).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut stream = Box::pin(paced(source, Duration::from_secs(1)));
        assert_eq!(stream.next().await, Some(0));
        assert_eq!(stream.next().await, Some(1));
        drop(stream);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(pulled.load(Ordering::SeqCst), 2);
    }
}
