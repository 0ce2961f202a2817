//! Point-in-polygon hit testing for lasso selection.

/// Return the original indices of points whose rendered position falls
/// strictly inside `polygon`.
///
/// `positions` is an interleaved x,y buffer; only the first `npoint` vertex
/// pairs are tested (trailing vertices such as axis lines are ignored).
/// `order` maps render slot to original data index, so a depth-sorted frame
/// reports the indices the caller actually loaded. Slots beyond `order` map
/// to themselves.
///
/// A polygon with fewer than 3 vertices is degenerate and selects nothing.
/// Containment is decided by crossing-number parity, with an axis-aligned
/// bounding-box test to skip obviously-outside points first.
#[must_use]
pub fn points_in_polygon(
    positions: &[f32],
    npoint: usize,
    polygon: &[[f32; 2]],
    order: &[usize],
) -> Vec<usize> {
    if polygon.len() < 3 {
        return Vec::new();
    }
    debug_assert!(positions.len() >= npoint * 2);

    let (min_x, max_x, min_y, max_y) = polygon.iter().fold(
        (f32::MAX, f32::MIN, f32::MAX, f32::MIN),
        |(lx, hx, ly, hy), &[x, y]| (lx.min(x), hx.max(x), ly.min(y), hy.max(y)),
    );

    let mut matched = Vec::new();
    for slot in 0..npoint {
        let x = positions[slot * 2];
        let y = positions[slot * 2 + 1];
        if x < min_x || x > max_x || y < min_y || y > max_y {
            continue;
        }
        if contains(polygon, x, y) {
            matched.push(order.get(slot).copied().unwrap_or(slot));
        }
    }
    matched
}

/// Crossing-number parity test against a closed polygon.
fn contains(polygon: &[[f32; 2]], x: f32, y: f32) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let [xi, yi] = polygon[i];
        let [xj, yj] = polygon[j];
        if (yi > y) != (yj > y) {
            let x_cross = xi + (y - yi) * (xj - xi) / (yj - yi);
            if x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<[f32; 2]> {
        vec![[10.0, 10.0], [100.0, 10.0], [100.0, 100.0], [10.0, 100.0]]
    }

    // An L shape whose notch is the quadrant of its bounding box where both
    // coordinates exceed 50.
    fn l_shape() -> Vec<[f32; 2]> {
        vec![
            [10.0, 10.0],
            [100.0, 10.0],
            [100.0, 50.0],
            [50.0, 50.0],
            [50.0, 100.0],
            [10.0, 100.0],
        ]
    }

    fn identity_order(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_square_inside_and_outside() {
        let positions = [50.0, 50.0, 150.0, 150.0];
        let matched = points_in_polygon(&positions, 2, &square(), &identity_order(2));
        assert_eq!(matched, vec![0]);
    }

    #[test]
    fn test_concave_notch_is_excluded() {
        // (75, 75) sits in the notch of the L; the others are solidly inside.
        let positions = [75.0, 75.0, 25.0, 25.0, 75.0, 25.0];
        let matched = points_in_polygon(&positions, 3, &l_shape(), &identity_order(3));
        assert_eq!(matched, vec![1, 2]);
    }

    #[test]
    fn test_degenerate_polygon_selects_nothing() {
        let positions = [50.0, 50.0];
        assert!(points_in_polygon(&positions, 1, &[], &[0]).is_empty());
        assert!(points_in_polygon(&positions, 1, &[[0.0, 0.0], [100.0, 100.0]], &[0]).is_empty());
    }

    #[test]
    fn test_trailing_vertices_are_ignored() {
        // Second vertex pair is inside the square but beyond npoint.
        let positions = [150.0, 150.0, 50.0, 50.0];
        let matched = points_in_polygon(&positions, 1, &square(), &identity_order(1));
        assert!(matched.is_empty());
    }

    #[test]
    fn test_order_maps_render_slots_to_original_indices() {
        // Slot 0 was drawn from original index 2 after depth sorting.
        let positions = [50.0, 50.0, 150.0, 150.0];
        let matched = points_in_polygon(&positions, 2, &square(), &[2, 0]);
        assert_eq!(matched, vec![2]);
    }

    #[test]
    fn test_bbox_prefilter_agrees_with_full_test() {
        let poly = l_shape();
        for (x, y) in [(5.0, 5.0), (120.0, 50.0), (49.0, 49.0), (51.0, 49.0)] {
            let positions = [x, y];
            let brute = contains(&poly, x, y);
            let matched = points_in_polygon(&positions, 1, &poly, &[0]);
            assert_eq!(!matched.is_empty(), brute);
        }
    }
}
