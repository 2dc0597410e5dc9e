use std::cmp::Ordering;

use crate::value::SortKey;

/// A row's key paired with its position before sorting.
pub type Keyed = (Option<SortKey>, usize);

/// Nulls sort after every value whichever way the column runs; remaining
/// ties fall back to the original row index.
pub fn compare(a: &Keyed, b: &Keyed, descending: bool) -> Ordering {
    let by_key = match (&a.0, &b.0) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let natural = x.cmp_natural(y);
            if descending {
                natural.reverse()
            } else {
                natural
            }
        }
    };
    by_key.then(a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(keys: &[Option<i64>], descending: bool) -> Vec<usize> {
        let mut keyed: Vec<Keyed> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.map(SortKey::Int), i))
            .collect();
        keyed.sort_by(|a, b| compare(a, b, descending));
        keyed.into_iter().map(|(_, i)| i).collect()
    }

    #[test]
    fn test_nulls_last_both_ways() {
        let keys = [Some(3), None, Some(1)];
        assert_eq!(sorted(&keys, false), vec![2, 0, 1]);
        assert_eq!(sorted(&keys, true), vec![0, 2, 1]);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let keys = [Some(1), Some(0), Some(1), None, None];
        assert_eq!(sorted(&keys, false), vec![1, 0, 2, 3, 4]);
        assert_eq!(sorted(&keys, true), vec![0, 2, 1, 3, 4]);
    }
}
