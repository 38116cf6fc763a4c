//! Inversion counting by divide-and-conquer merge.
//!
//! An inversion is a pair of positions `i < j` with `seq[i] > seq[j]`. Equal
//! values never count. Every entry point runs one merge sort on a working copy
//! and reports, at each merge step, the still-unmerged left run that a smaller
//! right element overtakes.

use std::ops::ControlFlow;

/// Number of inversions in `seq`, O(n log n).
pub fn count_inversions<T: Ord + Clone>(seq: &[T]) -> u64 {
    let mut count = 0u64;
    let _ = merge_sort_reporting(seq, &mut |overtaken: &[T], _: &T| {
        count += overtaken.len() as u64;
        ControlFlow::Continue(())
    });
    count
}

/// All inverted value pairs `(seq[i], seq[j])` with `i < j`, `seq[i] > seq[j]`.
///
/// O(n log n + K) for K inversions. Pair order is unspecified.
pub fn inversion_pairs<T: Ord + Clone>(seq: &[T]) -> Vec<(T, T)> {
    let mut out = Vec::new();
    let _ = try_for_each_inversion(seq, |big, smaller| {
        out.push((big.clone(), smaller.clone()));
        ControlFlow::Continue(())
    });
    out
}

/// Feed inverted pairs `(bigger, smaller)` to `visit` until it breaks.
///
/// Same order as `inversion_pairs`. Stopping early skips the remaining merges,
/// so finding the first inversion costs at most one full sort.
pub fn try_for_each_inversion<T, F>(seq: &[T], mut visit: F) -> ControlFlow<()>
where
    T: Ord + Clone,
    F: FnMut(&T, &T) -> ControlFlow<()>,
{
    merge_sort_reporting(seq, &mut |overtaken: &[T], smaller: &T| {
        overtaken.iter().try_for_each(|big| visit(big, smaller))
    })
}

fn merge_sort_reporting<T, F>(seq: &[T], on_cross: &mut F) -> ControlFlow<()>
where
    T: Ord + Clone,
    F: FnMut(&[T], &T) -> ControlFlow<()>,
{
    let mut work = seq.to_vec();
    let mut buf = Vec::with_capacity(work.len());
    sort_rec(&mut work, &mut buf, on_cross)
}

fn sort_rec<T, F>(v: &mut [T], buf: &mut Vec<T>, on_cross: &mut F) -> ControlFlow<()>
where
    T: Ord + Clone,
    F: FnMut(&[T], &T) -> ControlFlow<()>,
{
    let n = v.len();
    if n < 2 {
        return ControlFlow::Continue(());
    }
    let mid = n / 2;
    {
        let (left, right) = v.split_at_mut(mid);
        sort_rec(left, buf, on_cross)?;
        sort_rec(right, buf, on_cross)?;
    }
    buf.clear();
    let (mut i, mut j) = (0usize, mid);
    while i < mid && j < n {
        if v[i] <= v[j] {
            buf.push(v[i].clone());
            i += 1;
        } else {
            // v[j] jumps ahead of every remaining left element
            on_cross(&v[i..mid], &v[j])?;
            buf.push(v[j].clone());
            j += 1;
        }
    }
    buf.extend_from_slice(&v[i..mid]);
    buf.extend_from_slice(&v[j..n]);
    v.clone_from_slice(buf);
    ControlFlow::Continue(())
}
