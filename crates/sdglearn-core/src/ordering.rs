//! The builder's drag-reorder primitive.
//!
//! Both modules (within an SDG) and sections (within a module) are ordered
//! lists that must stay dense after any edit. A drag from index `from` to
//! index `to` removes the item at the source, inserts it at the target, and
//! renumbers sequentially from 0. Moving an item onto its own index is a
//! no-op.

use thiserror::Error;

/// Error for an out-of-range move.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("index {index} out of range for {len} items")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Move the item at `from` to `to`, shifting everything in between.
///
/// Returns `Ok(true)` when the list changed, `Ok(false)` for the same-index
/// no-op. Indices past the end are rejected rather than clamped so the
/// builder surfaces a real error instead of silently dropping a drag.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<bool, OutOfRange> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(OutOfRange { index, len });
        }
    }
    if from == to {
        return Ok(false);
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(true)
}

/// Renumber an ordered list densely from 0 using the given setter.
///
/// ```
/// # use sdglearn_core::ordering::renumber;
/// let mut xs = vec![(0, "a"), (4, "b"), (9, "c")];
/// renumber(&mut xs, |item, n| item.0 = n);
/// assert_eq!(xs, vec![(0, "a"), (1, "b"), (2, "c")]);
/// ```
pub fn renumber<T>(items: &mut [T], mut set_order: impl FnMut(&mut T, i64)) {
    for (n, item) in items.iter_mut().enumerate() {
        set_order(item, n as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered(n: usize) -> Vec<(i64, char)> {
        (0..n).map(|i| (i as i64, (b'a' + i as u8) as char)).collect()
    }

    #[test]
    fn test_move_forward_renumbers_densely() {
        let mut items = ordered(5);
        assert_eq!(move_item(&mut items, 1, 3), Ok(true));
        renumber(&mut items, |item, n| item.0 = n);

        let labels: String = items.iter().map(|(_, c)| *c).collect();
        assert_eq!(labels, "acdbe");
        let orders: Vec<i64> = items.iter().map(|(o, _)| *o).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_move_backward() {
        let mut items = ordered(4);
        assert_eq!(move_item(&mut items, 3, 0), Ok(true));
        let labels: String = items.iter().map(|(_, c)| *c).collect();
        assert_eq!(labels, "dabc");
    }

    #[test]
    fn test_same_index_is_noop() {
        let mut items = ordered(3);
        assert_eq!(move_item(&mut items, 1, 1), Ok(false));
        let labels: String = items.iter().map(|(_, c)| *c).collect();
        assert_eq!(labels, "abc");
    }

    #[test]
    fn test_out_of_range_from() {
        let mut items = ordered(3);
        assert_eq!(
            move_item(&mut items, 3, 0),
            Err(OutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_out_of_range_to() {
        let mut items = ordered(3);
        assert_eq!(
            move_item(&mut items, 0, 5),
            Err(OutOfRange { index: 5, len: 3 })
        );
    }

    #[test]
    fn test_empty_list_rejects_any_move() {
        let mut items: Vec<(i64, char)> = Vec::new();
        assert!(move_item(&mut items, 0, 0).is_err());
    }

    #[test]
    fn test_adjacent_swap() {
        let mut items = ordered(2);
        assert_eq!(move_item(&mut items, 0, 1), Ok(true));
        let labels: String = items.iter().map(|(_, c)| *c).collect();
        assert_eq!(labels, "ba");
    }
}
