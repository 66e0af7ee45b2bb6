use serde::{Deserialize, Serialize};

/// Vehicle and perception values served by `/telemetry`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub speed_mps: f64,
    pub cones: Vec<Cone>,
}

impl TelemetrySnapshot {
    /// Fixed values served until a live perception feed is wired in.
    pub fn seed() -> Self {
        Self {
            speed_mps: 12.3,
            cones: vec![
                Cone::new(3.2, 1.1, "blue"),
                Cone::new(6.8, -0.7, "yellow"),
            ],
        }
    }
}

/// A track-boundary marker in the vehicle frame: metres, `x` forward,
/// `y` to the left of the vehicle reference point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub x: f64,
    pub y: f64,
    /// Classifier label as reported, e.g. `blue` or `yellow`. Not a closed set.
    pub color: String,
}

impl Cone {
    pub fn new(x: f64, y: f64, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            color: color.into(),
        }
    }
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_serializes_in_field_order() {
        let body = serde_json::to_string(&TelemetrySnapshot::seed()).unwrap();
        assert_eq!(
            body,
            r#"{"speed_mps":12.3,"cones":[{"x":3.2,"y":1.1,"color":"blue"},{"x":6.8,"y":-0.7,"color":"yellow"}]}"#
        );
    }

    #[test]
    fn unlisted_color_round_trips() {
        let wire = r#"{"x":1.5,"y":-2.0,"color":"large_orange"}"#;
        let cone = serde_json::from_str::<Cone>(wire).unwrap();
        assert_eq!(cone, Cone::new(1.5, -2.0, "large_orange"));
        assert_eq!(serde_json::to_string(&cone).unwrap(), wire);
    }
}
