/// Euclidean distance between two equally sized slices.
///
/// PRECONDITION: `a` and `b` have the same length.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Wrap an angle in degrees into the half-open interval `(-180, 180]`.
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle - 360.0 * ((angle + 180.0) / 360.0).floor();
    // floor maps +180 onto -180; the interval is closed at +180
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_degrees() {
        assert_relative_eq!(wrap_degrees(290.0), -70.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_degrees(180.0), 180.0);
        assert_relative_eq!(wrap_degrees(-180.0), 180.0);
        assert_relative_eq!(wrap_degrees(540.0), 180.0);
        assert_relative_eq!(wrap_degrees(-190.0), 170.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_degrees(0.0), 0.0);
    }

    #[test]
    fn test_euclidean_distance() {
        assert_relative_eq!(euclidean_distance(&[0.0, 3.0], &[4.0, 0.0]), 5.0);
    }
}
