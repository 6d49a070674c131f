//! Where the closing "kick" of a race starts, for strategy copy.

/// Describe the final kick segment for a race of `distance_km`.
pub fn kick_distance(distance_km: f64) -> &'static str {
    if distance_km >= 42.0 {
        "final 10km"
    } else if distance_km >= 21.0 {
        "final 5km"
    } else if distance_km >= 10.0 {
        "final 2km"
    } else {
        "final 1km"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marathon() {
        assert_eq!(kick_distance(42.195), "final 10km");
        assert_eq!(kick_distance(42.0), "final 10km");
    }

    #[test]
    fn test_half_boundary_inclusive() {
        assert_eq!(kick_distance(21.0), "final 5km");
        assert_eq!(kick_distance(21.0975), "final 5km");
        assert_eq!(kick_distance(41.99), "final 5km");
    }

    #[test]
    fn test_10k() {
        assert_eq!(kick_distance(10.0), "final 2km");
        assert_eq!(kick_distance(20.9), "final 2km");
    }

    #[test]
    fn test_short_races() {
        assert_eq!(kick_distance(5.0), "final 1km");
        assert_eq!(kick_distance(0.0), "final 1km");
        assert_eq!(kick_distance(9.99), "final 1km");
    }
}
