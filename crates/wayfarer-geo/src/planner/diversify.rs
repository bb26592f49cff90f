//! Round-robin selection across buckets.

use super::interests::Bucket;
use std::collections::{BTreeMap, VecDeque};

/// Picks up to `per_day` items, cycling through [`Bucket::ALL`] so that a
/// day mixes categories. Items keep their relative order within a bucket.
pub fn diversify<T, F>(items: Vec<T>, per_day: usize, bucket_of: F) -> Vec<T>
where
    F: Fn(&T) -> Bucket,
{
    let mut queues: BTreeMap<Bucket, VecDeque<T>> = BTreeMap::new();
    let available = items.len();
    for item in items {
        queues.entry(bucket_of(&item)).or_default().push_back(item);
    }

    let mut out = Vec::with_capacity(per_day.min(available));
    while out.len() < per_day && queues.values().any(|q| !q.is_empty()) {
        for bucket in Bucket::ALL {
            if out.len() >= per_day {
                break;
            }
            if let Some(item) = queues.get_mut(&bucket).and_then(VecDeque::pop_front) {
                out.push(item);
            }
        }
    }
    out
}
