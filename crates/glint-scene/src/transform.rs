//! Keyed transform sequences for animatable entities.

use serde::Serialize;

use glint_math::Transform;

/// One transform keyed to a point in time, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformStep {
    /// Key time in seconds.
    pub time: f64,
    /// Row-major 4x4 matrix.
    pub matrix: [f64; 16],
}

/// An ordered sequence of keyed transforms.
///
/// Static entities carry a single step at time 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransformSequence {
    steps: Vec<TransformStep>,
}

impl TransformSequence {
    /// An empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transform at a key time, replacing any step already keyed
    /// to exactly that time.
    pub fn set_transform(&mut self, time: f64, transform: &Transform) {
        let matrix = transform.to_row_major();
        match self.steps.iter_mut().find(|step| step.time == time) {
            Some(step) => step.matrix = matrix,
            None => self.steps.push(TransformStep { time, matrix }),
        }
    }

    /// The keyed steps in insertion order.
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }

    /// Whether no transform has been keyed.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_transform_keys_a_step() {
        let mut seq = TransformSequence::new();
        seq.set_transform(0.0, &Transform::identity());
        assert_eq!(seq.steps().len(), 1);
        assert_eq!(seq.steps()[0].time, 0.0);
        assert_eq!(seq.steps()[0].matrix[0], 1.0);
        assert_eq!(seq.steps()[0].matrix[5], 1.0);
    }

    #[test]
    fn same_time_replaces_in_place() {
        let mut seq = TransformSequence::new();
        seq.set_transform(0.0, &Transform::identity());
        seq.set_transform(1.0, &Transform::identity());
        seq.set_transform(0.0, &Transform::translation(5.0, 0.0, 0.0));
        assert_eq!(seq.steps().len(), 2);
        assert_eq!(seq.steps()[0].time, 0.0);
        assert_eq!(seq.steps()[0].matrix[3], 5.0);
        assert_eq!(seq.steps()[1].time, 1.0);
    }

    #[test]
    fn serializes_as_step_array() {
        let mut seq = TransformSequence::new();
        seq.set_transform(0.0, &Transform::identity());
        let json = serde_json::to_string(&seq).unwrap();
        assert!(json.starts_with(r#"[{"time":0.0,"matrix":[1.0,"#));
    }
}
