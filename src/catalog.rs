/// Number of shape ids, including the reserved empty id 0.
pub const SHAPE_COUNT: usize = 20;

/// The seven tetromino families. Ids within one family share a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    O,
    I,
    J,
    L,
    S,
    Z,
    T,
}

// (row offset, col offset) pairs relative to the anchor cell. The anchor is
// not required to be at (0,0); offsets are non-negative and pairwise
// distinct within one shape.
const CELLS: [&[(i64, i64)]; SHAPE_COUNT] = [
    &[], // 0 is reserved
    &[(0, 0), (0, 1), (1, 0), (1, 1)], // 1 = O
    &[(0, 0), (0, 1), (0, 2), (0, 3)], // 2 = I
    &[(0, 0), (1, 0), (2, 0), (3, 0)], // 3 = I
    &[(0, 1), (1, 1), (2, 1), (2, 0)], // 4 = J
    &[(0, 0), (0, 1), (0, 2), (1, 2)], // 5 = J
    &[(0, 0), (0, 1), (1, 0), (2, 0)], // 6 = J
    &[(0, 0), (1, 0), (1, 1), (1, 2)], // 7 = J
    &[(0, 0), (0, 1), (1, 1), (2, 1)], // 8 = L
    &[(1, 0), (1, 1), (1, 2), (0, 2)], // 9 = L
    &[(0, 0), (1, 0), (2, 0), (2, 1)], // 10 = L
    &[(0, 0), (0, 1), (0, 2), (1, 0)], // 11 = L
    &[(0, 1), (0, 2), (1, 0), (1, 1)], // 12 = S
    &[(0, 0), (1, 0), (1, 1), (2, 1)], // 13 = S
    &[(0, 0), (0, 1), (1, 1), (1, 2)], // 14 = Z
    &[(0, 1), (1, 1), (1, 0), (2, 0)], // 15 = Z
    &[(0, 0), (0, 1), (0, 2), (1, 1)], // 16 = T
    &[(0, 0), (1, 0), (2, 0), (1, 1)], // 17 = T
    &[(0, 1), (1, 0), (1, 1), (1, 2)], // 18 = T
    &[(1, 0), (0, 1), (1, 1), (2, 1)], // 19 = T
];

/// Cell offsets of one placed shape. Empty for id 0.
///
/// `id` must be below [`SHAPE_COUNT`]; validated grids guarantee this.
pub fn cells(id: u8) -> &'static [(i64, i64)] {
    CELLS[id as usize]
}

/// Whether `(dy, dx)` is one of the shape's own cell offsets.
pub fn contains(id: u8, dy: i64, dx: i64) -> bool {
    CELLS[id as usize].iter().any(|&(y, x)| y == dy && x == dx)
}

/// Family of a shape id, `None` for the reserved id 0.
pub fn family(id: u8) -> Option<Family> {
    match id {
        1 => Some(Family::O),
        2 | 3 => Some(Family::I),
        4..=7 => Some(Family::J),
        8..=11 => Some(Family::L),
        12 | 13 => Some(Family::S),
        14 | 15 => Some(Family::Z),
        16..=19 => Some(Family::T),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_id_is_empty() {
        assert!(cells(0).is_empty());
        assert_eq!(family(0), None);
    }

    #[test]
    fn every_shape_has_four_distinct_nonnegative_cells() {
        for id in 1..SHAPE_COUNT as u8 {
            let cells = cells(id);
            assert_eq!(cells.len(), 4, "shape {id}");
            for (i, &(y, x)) in cells.iter().enumerate() {
                assert!(y >= 0 && x >= 0, "shape {id} offset ({y},{x})");
                for &other in &cells[i + 1..] {
                    assert_ne!((y, x), other, "shape {id} repeats an offset");
                }
            }
        }
    }

    #[test]
    fn family_sizes_match_the_catalog() {
        let count = |family: Family| {
            (1..SHAPE_COUNT as u8)
                .filter(|&id| self::family(id) == Some(family))
                .count()
        };
        assert_eq!(count(Family::O), 1);
        assert_eq!(count(Family::I), 2);
        assert_eq!(count(Family::J), 4);
        assert_eq!(count(Family::L), 4);
        assert_eq!(count(Family::S), 2);
        assert_eq!(count(Family::Z), 2);
        assert_eq!(count(Family::T), 4);
    }

    #[test]
    fn membership_matches_the_cell_list() {
        for id in 1..SHAPE_COUNT as u8 {
            for &(dy, dx) in cells(id) {
                assert!(contains(id, dy, dx));
            }
            assert!(!contains(id, -1, -1));
            assert!(!contains(id, 4, 4));
        }
    }
}
