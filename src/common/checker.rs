//! This file defines some functions that checks some pre-conditions
//! E.g., the domain of learner parameters.


/// Check the number of passes over the training data.
#[inline(always)]
pub(crate) fn check_iterations(iterations: usize) {
    assert!(iterations > 0, "the number of iterations must be positive");
}


/// Check the aggressiveness parameter of passive-aggressive updates.
#[inline(always)]
pub(crate) fn check_aggressiveness(c: f64) {
    assert!(
        c >= 0f64 && !c.is_nan(),
        "aggressiveness must be non-negative. got {c}."
    );
}


/// Check the attachment threshold.
#[inline(always)]
pub(crate) fn check_threshold(threshold: f64) {
    assert!(threshold.is_finite(), "threshold must be finite. got {threshold}.");
}


/// Check the size of an n-best list.
#[inline(always)]
pub(crate) fn check_nbest(k: usize) {
    assert!(k > 0, "an n-best list holds at least one structure");
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterations_success() {
        check_iterations(1);
        check_iterations(50);
    }

    #[test]
    #[should_panic]
    fn test_iterations_failure() {
        check_iterations(0);
    }

    #[test]
    fn test_aggressiveness_success() {
        check_aggressiveness(0f64);
        check_aggressiveness(0.5);
        check_aggressiveness(f64::INFINITY);
    }

    #[test]
    #[should_panic]
    fn test_aggressiveness_failure_01() {
        check_aggressiveness(-0.0001);
    }

    #[test]
    #[should_panic]
    fn test_aggressiveness_failure_02() {
        check_aggressiveness(f64::NAN);
    }

    #[test]
    #[should_panic]
    fn test_threshold_failure() {
        check_threshold(f64::NAN);
    }
}
