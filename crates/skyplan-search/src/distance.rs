use skyplan_core::Cell;

use crate::frontier::Cost;

/// Manhattan (L1) distance between two cells: the cost of the cheapest
/// 4-connected route on an obstacle-free grid.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> Cost {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Cell::new(-2, 3);
        let b = Cell::new(4, -1);
        assert_eq!(manhattan(a, b), 10);
        assert_eq!(manhattan(b, a), 10);
        assert_eq!(manhattan(a, a), 0);
    }
}
