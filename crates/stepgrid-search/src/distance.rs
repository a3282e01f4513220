use stepgrid_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_and_zero_on_self() {
        let a = Point::new(1, 4);
        let b = Point::new(5, 2);
        assert_eq!(manhattan(a, b), 6);
        assert_eq!(manhattan(b, a), 6);
        assert_eq!(manhattan(a, a), 0);
    }
}
