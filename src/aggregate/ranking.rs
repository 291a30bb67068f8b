use std::cmp::Ordering;

use crate::aggregate::Bucket;

/// Buckets ordered by profit, highest first.
///
/// The sort is stable: buckets with equal profit keep their original key
/// order, which for products is the order they first appeared in the input.
pub fn rank_by_profit(buckets: &[Bucket]) -> Vec<&Bucket> {
    let mut ranked: Vec<&Bucket> = buckets.iter().collect();
    ranked.sort_by(|a, b| b.profit.cmp(&a.profit));
    ranked
}

/// The `n` most profitable buckets.
pub fn top_n(buckets: &[Bucket], n: usize) -> Vec<&Bucket> {
    rank_by_profit(buckets).into_iter().take(n).collect()
}

/// The `n` least profitable buckets, in ranking order (the last one is the weakest).
pub fn bottom_n(buckets: &[Bucket], n: usize) -> Vec<&Bucket> {
    let ranked = rank_by_profit(buckets);
    let start = ranked.len().saturating_sub(n);
    ranked[start..].to_vec()
}

/// The bucket with the greatest value under `compare`; the earliest bucket wins ties.
pub fn argmax_by<F>(buckets: &[Bucket], mut compare: F) -> Option<&Bucket>
where
    F: FnMut(&Bucket, &Bucket) -> Ordering,
{
    buckets.iter().fold(None, |best, bucket| match best {
        Some(current) if compare(bucket, current) != Ordering::Greater => Some(current),
        _ => Some(bucket)
    })
}
