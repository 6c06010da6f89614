//! Target acquisition and area queries.
//!
//! Both towers (picking enemies) and enemies (picking towers) use the same
//! linear nearest-in-range scan. Callers pass candidates in a stable order;
//! on equal distance the first-encountered candidate wins.

use rampart_core::types::Position;

/// Nearest candidate with `distance <= range`, together with its distance.
pub fn nearest_in_range<T>(
    origin: &Position,
    range: f64,
    candidates: impl IntoIterator<Item = (T, Position)>,
) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;
    for (candidate, position) in candidates {
        let distance = origin.distance_to(&position);
        if distance > range {
            continue;
        }
        // Strictly closer only, so earlier candidates keep ties.
        if best.as_ref().is_none_or(|(_, d)| distance < *d) {
            best = Some((candidate, distance));
        }
    }
    best
}

/// Every candidate with `distance <= radius` of `center`, in input order.
pub fn within_radius<T>(
    center: &Position,
    radius: f64,
    candidates: impl IntoIterator<Item = (T, Position)>,
) -> Vec<T> {
    candidates
        .into_iter()
        .filter(|(_, position)| center.distance_to(position) <= radius)
        .map(|(candidate, _)| candidate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn picks_nearest_in_range() {
        let origin = at(0.0, 0.0);
        let candidates = vec![(1, at(90.0, 0.0)), (2, at(30.0, 0.0)), (3, at(150.0, 0.0))];
        let (id, distance) = nearest_in_range(&origin, 100.0, candidates).unwrap();
        assert_eq!(id, 2);
        assert_eq!(distance, 30.0);
    }

    #[test]
    fn ignores_out_of_range() {
        let origin = at(0.0, 0.0);
        let candidates = vec![(1, at(100.5, 0.0))];
        assert!(nearest_in_range(&origin, 100.0, candidates).is_none());
    }

    #[test]
    fn boundary_is_in_range() {
        let origin = at(0.0, 0.0);
        let candidates = vec![(1, at(0.0, 100.0))];
        assert_eq!(nearest_in_range(&origin, 100.0, candidates).map(|(id, _)| id), Some(1));
    }

    #[test]
    fn ties_go_to_first_encountered() {
        let origin = at(0.0, 0.0);
        let candidates = vec![(7, at(0.0, 50.0)), (3, at(50.0, 0.0)), (9, at(-50.0, 0.0))];
        assert_eq!(nearest_in_range(&origin, 100.0, candidates).map(|(id, _)| id), Some(7));
    }

    #[test]
    fn radius_query_keeps_order() {
        let center = at(100.0, 100.0);
        let candidates = vec![
            ('a', at(100.0, 140.0)),
            ('b', at(200.0, 100.0)),
            ('c', at(60.0, 100.0)),
        ];
        assert_eq!(within_radius(&center, 50.0, candidates), vec!['a', 'c']);
    }
}
