use skyplan_core::Cell;

/// Whether three cells lie on one line.
///
/// Uses the integer area determinant, so the test is exact. Terms are
/// widened to `i128`, which holds the determinant for any `i32` inputs.
#[inline]
pub fn collinear(p1: Cell, p2: Cell, p3: Cell) -> bool {
    let (r1, r2, r3) = (i128::from(p1.row), i128::from(p2.row), i128::from(p3.row));
    let (c1, c2, c3) = (i128::from(p1.col), i128::from(p2.col), i128::from(p3.col));
    let det = r1 * (c2 - c3) + r2 * (c3 - c1) + r3 * (c1 - c2);
    det == 0
}

/// Drop every interior cell that is collinear with the last kept cell and
/// the following cell. Endpoints are always kept.
pub fn prune_collinear(cells: &[Cell]) -> Vec<Cell> {
    let mut out: Vec<Cell> = Vec::with_capacity(cells.len());
    for (i, &c) in cells.iter().enumerate() {
        let interior = i > 0 && i + 1 < cells.len();
        if interior {
            let prev = out[out.len() - 1];
            if collinear(prev, c, cells[i + 1]) {
                continue;
            }
        }
        out.push(c);
    }
    out
}
