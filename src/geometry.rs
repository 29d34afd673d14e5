//! Viewing geometry: depth bounds and per-sample stereo separation.

use thiserror::Error;

pub const DEFAULT_X_DPI: f64 = 75.0;
pub const DEFAULT_SEPARATION_FACTOR: f64 = 0.7;
pub const DEFAULT_EYE_SEPARATION_INCHES: f64 = 2.5;
pub const DEFAULT_OBSERVER_DISTANCE_INCHES: f64 = 12.0;

/// Physical viewing parameters, in the units the user supplies them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    /// Horizontal resolution of the target medium, dots per inch.
    pub x_dpi: f64,
    /// Stereo separation factor in `[0, 1)`; controls how far the nearest
    /// depicted point sits in front of the screen plane.
    pub separation_factor: f64,
    /// Distance between the observer's eyes, inches.
    pub eye_separation_inches: f64,
    /// Distance between the observer and the screen, inches.
    pub observer_distance_inches: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        RenderParams {
            x_dpi: DEFAULT_X_DPI,
            separation_factor: DEFAULT_SEPARATION_FACTOR,
            eye_separation_inches: DEFAULT_EYE_SEPARATION_INCHES,
            observer_distance_inches: DEFAULT_OBSERVER_DISTANCE_INCHES,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("separation factor must lie in [0, 1), got {0}")]
    SeparationFactor(f64),
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

/// Pixel-space viewing geometry derived once per run from [`RenderParams`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    observer_distance: f64,
    eye_separation: f64,
    max_depth: f64,
    min_depth: f64,
}

impl Geometry {
    /// Validates the parameters and computes the virtual depth bounds.
    pub fn new(params: &RenderParams) -> Result<Self, ParamError> {
        if !(0.0..1.0).contains(&params.separation_factor) {
            return Err(ParamError::SeparationFactor(params.separation_factor));
        }
        for &(name, value) in &[
            ("x_dpi", params.x_dpi),
            ("eye_separation_inches", params.eye_separation_inches),
            (
                "observer_distance_inches",
                params.observer_distance_inches,
            ),
        ] {
            if !(value > 0.0) {
                return Err(ParamError::NonPositive { name, value });
            }
        }

        let observer_distance = params.x_dpi * params.observer_distance_inches;
        let eye_separation = params.x_dpi * params.eye_separation_inches;
        let max_depth = observer_distance;
        let min_depth = (params.separation_factor * max_depth * observer_distance)
            / ((1.0 - params.separation_factor) * max_depth + observer_distance);
        Ok(Geometry {
            observer_distance,
            eye_separation,
            max_depth,
            min_depth,
        })
    }

    /// Stereo separation in pixels for an 8-bit depth sample.
    ///
    /// Brighter samples are nearer to the observer and separate less. The
    /// sample is scaled by 256, not 255, so a sample of 255 never quite
    /// reaches `min_depth`; the visible geometry depends on this.
    pub fn separation(&self, depth: u8) -> usize {
        let feature_z =
            self.max_depth - (depth as f64 / 256.0) * (self.max_depth - self.min_depth);
        (self.eye_separation * feature_z / (self.observer_distance + feature_z)) as usize
    }

    pub fn min_depth(&self) -> f64 {
        self.min_depth
    }

    pub fn max_depth(&self) -> f64 {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth_bounds() {
        let g = Geometry::new(&RenderParams::default()).unwrap();
        assert_eq!(g.max_depth(), 900.0);
        assert!((g.min_depth() - 484.6153846).abs() < 1e-6);
    }

    #[test]
    fn separation_extremes_at_defaults() {
        let g = Geometry::new(&RenderParams::default()).unwrap();
        // Far plane: feature_z == max_depth == observer_distance, so the
        // separation is half the 187.5 px eye separation, truncated.
        assert_eq!(g.separation(0), 93);
        assert_eq!(g.separation(255), 65);
    }

    #[test]
    fn separation_is_nonnegative_and_monotone() {
        let g = Geometry::new(&RenderParams {
            separation_factor: 0.9,
            ..RenderParams::default()
        })
        .unwrap();
        let mut prev = g.separation(0);
        for d in 1..=255u8 {
            let s = g.separation(d);
            assert!(s <= prev, "separation must not grow with depth sample");
            prev = s;
        }
    }

    #[test]
    fn rejects_separation_factor_of_one() {
        let params = RenderParams {
            separation_factor: 1.0,
            ..RenderParams::default()
        };
        assert_eq!(
            Geometry::new(&params),
            Err(ParamError::SeparationFactor(1.0))
        );
    }

    #[test]
    fn rejects_negative_separation_factor() {
        let params = RenderParams {
            separation_factor: -0.25,
            ..RenderParams::default()
        };
        assert!(Geometry::new(&params).is_err());
    }

    #[test]
    fn rejects_nonpositive_distances() {
        for (field, params) in [
            (
                "x_dpi",
                RenderParams {
                    x_dpi: 0.0,
                    ..RenderParams::default()
                },
            ),
            (
                "observer_distance_inches",
                RenderParams {
                    observer_distance_inches: -12.0,
                    ..RenderParams::default()
                },
            ),
            (
                "eye_separation_inches",
                RenderParams {
                    eye_separation_inches: 0.0,
                    ..RenderParams::default()
                },
            ),
        ] {
            match Geometry::new(&params) {
                Err(ParamError::NonPositive { name, .. }) => assert_eq!(name, field),
                other => panic!("expected NonPositive error for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn zero_separation_factor_is_valid() {
        // f == 0 collapses min_depth to the screen plane but stays legal.
        let g = Geometry::new(&RenderParams {
            separation_factor: 0.0,
            ..RenderParams::default()
        })
        .unwrap();
        assert_eq!(g.min_depth(), 0.0);
        assert!(g.separation(255) > 0);
    }
}
