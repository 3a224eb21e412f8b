//! Optional rayon fan-out over an index range.

/// Maps `f` over `0..n`, in parallel when the `parallel` feature is enabled
/// and `parallel` is set. Results are returned in index order either way.
pub(crate) fn map_indexed<T, F>(n: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            return (0..n).into_par_iter().map(f).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    (0..n).map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_indexed_keeps_order() {
        let seq = map_indexed(100, false, |i| i * i);
        let par = map_indexed(100, true, |i| i * i);
        assert_eq!(seq, par);
        assert_eq!(seq[7], 49);
    }
}
