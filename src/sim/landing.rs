//! Touchdown evaluation and scoring

use glam::Vec2;

use crate::consts::{MAX_SCORE, SAFE_LANDING_ROTATION, SAFE_LANDING_VELOCITY};

/// Result of checking the craft against the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingOutcome {
    /// Still above the surface
    Airborne,
    /// On the surface; `success` is false for a crash
    Touchdown { success: bool, score: u32 },
}

/// Evaluate the craft's state against the surface.
///
/// Returns `Airborne` whenever there is altitude left. At altitude zero the
/// touchdown is judged on both velocity axes and the attitude; the caller is
/// responsible for acting on a `Touchdown` only once.
pub fn evaluate(altitude: f32, velocity: Vec2, rotation_degrees: f32) -> LandingOutcome {
    if altitude > 0.0 {
        return LandingOutcome::Airborne;
    }

    let v_vertical = velocity.y.abs();
    let v_horizontal = velocity.x.abs();
    let rotation = rotation_degrees.abs();

    let success = v_vertical <= SAFE_LANDING_VELOCITY
        && v_horizontal <= SAFE_LANDING_VELOCITY
        && rotation <= SAFE_LANDING_ROTATION;

    LandingOutcome::Touchdown {
        success,
        score: score(v_vertical, v_horizontal, rotation),
    }
}

/// Score a touchdown: linear penalties on total speed and attitude, each
/// reaching zero at its safety boundary. A crash scores zero.
fn score(v_vertical: f32, v_horizontal: f32, rotation: f32) -> u32 {
    if v_vertical > SAFE_LANDING_VELOCITY
        || v_horizontal > SAFE_LANDING_VELOCITY
        || rotation > SAFE_LANDING_ROTATION
    {
        return 0;
    }

    let velocity_score =
        (1.0 - (v_vertical + v_horizontal) / (SAFE_LANDING_VELOCITY * 2.0)).max(0.0);
    let rotation_score = (1.0 - rotation / SAFE_LANDING_ROTATION).max(0.0);

    (MAX_SCORE as f32 * velocity_score * rotation_score).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airborne_above_surface() {
        assert_eq!(
            evaluate(50.0, Vec2::ZERO, 0.0),
            LandingOutcome::Airborne
        );
        assert_eq!(
            evaluate(f32::MIN_POSITIVE, Vec2::new(5.0, -19.0), 90.0),
            LandingOutcome::Airborne
        );
    }

    #[test]
    fn test_perfect_landing_scores_max() {
        let outcome = evaluate(0.0, Vec2::new(0.0, 1.0), 0.0);
        assert_eq!(
            outcome,
            LandingOutcome::Touchdown {
                success: true,
                score: 750
            }
        );

        // Zero velocity, zero rotation is the theoretical maximum
        assert_eq!(
            evaluate(0.0, Vec2::ZERO, 0.0),
            LandingOutcome::Touchdown {
                success: true,
                score: MAX_SCORE
            }
        );
    }

    #[test]
    fn test_hard_impact_is_a_crash() {
        assert_eq!(
            evaluate(0.0, Vec2::new(5.0, 5.0), 0.0),
            LandingOutcome::Touchdown {
                success: false,
                score: 0
            }
        );
    }

    #[test]
    fn test_excess_rotation_is_a_crash() {
        assert_eq!(
            evaluate(0.0, Vec2::new(0.0, 1.0), 30.0),
            LandingOutcome::Touchdown {
                success: false,
                score: 0
            }
        );
    }

    #[test]
    fn test_boundary_landing_succeeds_with_zero_score() {
        // Both axes exactly at the safe bound: within limits, but the linear
        // velocity penalty bottoms out.
        let outcome = evaluate(
            0.0,
            Vec2::new(SAFE_LANDING_VELOCITY, -SAFE_LANDING_VELOCITY),
            0.0,
        );
        assert_eq!(
            outcome,
            LandingOutcome::Touchdown {
                success: true,
                score: 0
            }
        );
    }

    #[test]
    fn test_rotation_scales_score_linearly() {
        // Half the safe attitude halves the rotation factor
        let outcome = evaluate(0.0, Vec2::ZERO, SAFE_LANDING_ROTATION / 2.0);
        assert_eq!(
            outcome,
            LandingOutcome::Touchdown {
                success: true,
                score: MAX_SCORE / 2
            }
        );
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let a = evaluate(0.0, Vec2::new(1.0, -1.5), -10.0);
        let b = evaluate(0.0, Vec2::new(1.0, -1.5), -10.0);
        assert_eq!(a, b);
    }
}
