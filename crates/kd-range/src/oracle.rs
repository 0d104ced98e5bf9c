//! Linear-scan reference for validating range queries.

use crate::{Point, Rect2D};

/// Returns the points inside `rect` widened by `eps`, by checking every point.
///
/// Uses the same inclusive boundary rule as the trees, so for any point set
/// the result equals a tree query up to ordering.
pub fn brute_force<'a, I>(points: I, rect: &Rect2D, eps: f64) -> Vec<Point>
where
    I: IntoIterator<Item = &'a Point>,
{
    let window = rect.inflated(eps);
    points
        .into_iter()
        .filter(|p| window.contains(p.position()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PointId;
    use nalgebra::Point2;

    #[test]
    fn scans_inclusively() {
        let points: Vec<Point> = [(2.0, 3.0), (8.0, 1.0), (9.0, 6.0)]
            .iter()
            .zip(0u64..)
            .map(|(&(x, y), id)| Point::new(PointId(id), Point2::new(x, y)))
            .collect();
        let rect = Rect2D::new(0.0, 8.0, 0.0, 5.0).unwrap();

        let found = brute_force(&points, &rect, 0.0);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].id(), PointId(1));

        assert!(brute_force(&points, &Rect2D::new(20.0, 30.0, 0.0, 1.0).unwrap(), 0.0).is_empty());
    }
}
