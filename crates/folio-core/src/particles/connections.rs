//! Proximity links between particles
//!
//! The plain pass checks every unordered pair, O(n²): 1225 checks for the
//! default 50 particles. Past a few hundred particles that stops fitting in a
//! frame, so [`grid_pairs`] buckets points into a uniform grid with
//! cells at least as large as the link radius and only compares
//! neighbouring cells. Both produce the same links in the same order.

/// Grid cells allowed per point; cells grow when the field would need more
const CELLS_PER_POINT: usize = 4;

/// A line to draw between particles `a` and `b` (`a < b`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub alpha: f64,
}

/// Alpha of a link at `distance`, `None` at or beyond `radius`
///
/// Fades linearly from `max_alpha` at distance 0 to nothing at the radius.
#[inline]
pub fn link_alpha(distance: f64, radius: f64, max_alpha: f64) -> Option<f64> {
    if distance < radius {
        Some(max_alpha * (1.0 - distance / radius))
    } else {
        None
    }
}

#[inline]
fn distance(p: (f64, f64), q: (f64, f64)) -> f64 {
    (p.0 - q.0).hypot(p.1 - q.1)
}

fn link(points: &[(f64, f64)], a: usize, b: usize, radius: f64, max_alpha: f64) -> Option<Connection> {
    let d = distance(points[a], points[b]);
    link_alpha(d, radius, max_alpha).map(|alpha| Connection {
        a,
        b,
        distance: d,
        alpha,
    })
}

/// Every linked pair, checking all n(n-1)/2 pairs
pub fn brute_force_pairs(points: &[(f64, f64)], radius: f64, max_alpha: f64) -> Vec<Connection> {
    let mut links = Vec::new();
    if radius <= 0.0 {
        return links;
    }
    for a in 0..points.len() {
        for b in (a + 1)..points.len() {
            if let Some(c) = link(points, a, b, radius, max_alpha) {
                links.push(c);
            }
        }
    }
    links
}

/// Every linked pair, using a uniform grid over a `width` x `height` field
///
/// The cell count stays within a small multiple of the point count, however
/// large the field or small the radius.
pub fn grid_pairs(
    points: &[(f64, f64)],
    radius: f64,
    max_alpha: f64,
    width: f64,
    height: f64,
) -> Vec<Connection> {
    if !radius.is_finite() || radius <= 0.0 || points.is_empty() {
        return Vec::new();
    }

    let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
    let cell = grid_cell_size(points.len(), radius, width, height);
    let cols = (width / cell).floor() as usize + 1;
    let rows = (height / cell).floor() as usize + 1;
    let cell_of = |p: (f64, f64)| -> (usize, usize) {
        let cx = ((p.0 / cell).floor().max(0.0) as usize).min(cols - 1);
        let cy = ((p.1 / cell).floor().max(0.0) as usize).min(rows - 1);
        (cx, cy)
    };

    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); cols * rows];
    for (i, p) in points.iter().enumerate() {
        let (cx, cy) = cell_of(*p);
        buckets[cy * cols + cx].push(i);
    }

    let mut links = Vec::new();
    for (a, p) in points.iter().enumerate() {
        let (cx, cy) = cell_of(*p);
        for ny in cy.saturating_sub(1)..=(cy + 1).min(rows - 1) {
            for nx in cx.saturating_sub(1)..=(cx + 1).min(cols - 1) {
                for &b in &buckets[ny * cols + nx] {
                    if b > a {
                        if let Some(c) = link(points, a, b, radius, max_alpha) {
                            links.push(c);
                        }
                    }
                }
            }
        }
    }

    links.sort_by_key(|c| (c.a, c.b));
    links
}

/// Smallest cell size of at least `radius` that keeps the grid within
/// `CELLS_PER_POINT` cells per point
fn grid_cell_size(points: usize, radius: f64, width: f64, height: f64) -> f64 {
    let max_cells = (points.saturating_mul(CELLS_PER_POINT)).max(4) as f64;
    let cells = |size: f64| ((width / size).floor() + 1.0) * ((height / size).floor() + 1.0);
    let mut size = radius;
    while cells(size) > max_cells {
        size *= 2.0;
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_link_alpha_boundaries() {
        assert_eq!(link_alpha(0.0, 120.0, 0.1), Some(0.1));
        assert_eq!(link_alpha(120.0, 120.0, 0.1), None);
        assert_eq!(link_alpha(130.0, 120.0, 0.1), None);
        let mid = link_alpha(60.0, 120.0, 0.1).unwrap();
        assert!((mid - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_exactly_at_radius_is_not_connected() {
        let points = [(0.0, 0.0), (120.0, 0.0), (0.0, 0.0)];
        let links = brute_force_pairs(&points, 120.0, 0.1);
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 2));
        assert_eq!(links[0].alpha, 0.1);
    }

    #[test]
    fn test_grid_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        let (w, h) = (1920.0, 1080.0);
        let points: Vec<(f64, f64)> = (0..400)
            .map(|_| (rng.random::<f64>() * w, rng.random::<f64>() * h))
            .collect();

        let brute = brute_force_pairs(&points, 120.0, 0.1);
        let grid = grid_pairs(&points, 120.0, 0.1, w, h);
        assert!(!brute.is_empty());
        assert_eq!(brute, grid);
    }

    #[test]
    fn test_grid_handles_edges_and_stray_points() {
        let points = [(0.0, 0.0), (800.0, 600.0), (790.0, 595.0), (-5.0, 10.0)];
        let brute = brute_force_pairs(&points, 120.0, 0.1);
        let grid = grid_pairs(&points, 120.0, 0.1, 800.0, 600.0);
        assert_eq!(brute, grid);
    }

    #[test]
    fn test_non_positive_radius_links_nothing() {
        let points = [(0.0, 0.0), (0.0, 0.0)];
        assert!(brute_force_pairs(&points, 0.0, 0.1).is_empty());
        assert!(grid_pairs(&points, -1.0, 0.1, 10.0, 10.0).is_empty());
        assert!(grid_pairs(&points, f64::NAN, 0.1, 10.0, 10.0).is_empty());
    }

    #[test]
    fn test_tiny_radius_keeps_grid_small() {
        let mut rng = StdRng::seed_from_u64(3);
        let points: Vec<(f64, f64)> = (0..300)
            .map(|_| (rng.random::<f64>() * 800.0, rng.random::<f64>() * 600.0))
            .collect();
        let cell = grid_cell_size(points.len(), 0.001, 800.0, 600.0);
        let cells = ((800.0 / cell).floor() + 1.0) * ((600.0 / cell).floor() + 1.0);
        assert!(cells <= (300 * CELLS_PER_POINT) as f64);

        assert_eq!(
            grid_pairs(&points, 0.001, 0.1, 800.0, 600.0),
            brute_force_pairs(&points, 0.001, 0.1)
        );
    }

    #[test]
    fn test_huge_field_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(5);
        let (w, h) = (1.0e9, 1.0e9);
        let mut points: Vec<(f64, f64)> = (0..250)
            .map(|_| (rng.random::<f64>() * w, rng.random::<f64>() * h))
            .collect();
        // A cluster so some links exist
        points.extend((0..20).map(|i| (500.0 + i as f64, 500.0)));

        let grid = grid_pairs(&points, 120.0, 0.1, w, h);
        assert!(!grid.is_empty());
        assert_eq!(grid, brute_force_pairs(&points, 120.0, 0.1));
    }
}
