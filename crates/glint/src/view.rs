//! View auto-framing from model bounds and viewing angles.

use log::warn;

use glint_db::Tally;
use glint_math::{BoundingBox, Point3, Transform};

use crate::error::{RenderError, Result};
use crate::settings::RenderSettings;

/// View diameter substituted when the fitted size collapses to zero.
pub const FALLBACK_VIEW_SIZE: f64 = 2.0;

/// Derived view placement for one render.
///
/// Computed once from the aggregate model bounds and the viewing angles,
/// consumed immediately by camera placement, never persisted.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// View rotation with the half view size in the homogeneous slot.
    pub rot_scale: Transform,
    /// Model space to view space.
    pub model_to_view: Transform,
    /// View space back to model space.
    pub view_to_model: Transform,
    /// View diameter in model units.
    pub view_size: f64,
    /// Eye point in model space.
    pub eye_point: Point3,
}

/// Compute the view placement that frames the model bounds at the given
/// azimuth and elevation.
///
/// The rotation maps model space into the fixed view convention through
/// Euler angles `(270 + elevation, 0, 270 - azimuth)` degrees. The view
/// diameter is the padded bounding-box diagonal magnitude, widened by the
/// aspect ratio when it exceeds one, unless `view_size_override` supplies
/// it directly. Either way a non-positive or non-normal diameter falls
/// back to [`FALLBACK_VIEW_SIZE`]. The eye point is `(0, 0, eye_backoff)`
/// in view space, carried back into model space with a homogeneous divide.
///
/// Requires live geometry: zero solids or zero regions is fatal, as is a
/// singular model-to-view matrix.
pub fn auto_frame(
    tally: &Tally,
    model_bounds: &BoundingBox,
    settings: &RenderSettings,
) -> Result<ViewState> {
    if tally.solids == 0 {
        return Err(RenderError::NoSolids);
    }
    if tally.regions == 0 {
        return Err(RenderError::NoRegions);
    }

    let mut bounds = *model_bounds;
    if bounds.clamp_infinite() {
        warn!("infinite model bounds? setting a unit fallback");
    }
    bounds.pad_to_grid();

    let mut rot_scale = Transform::rotation_euler_deg(
        270.0 + settings.elevation,
        0.0,
        270.0 - settings.azimuth,
    );

    let center = bounds.center();
    let to_eye = Transform::translation(-center.x, -center.y, -center.z);

    let mut view_size = match settings.view_size_override {
        Some(size) => size,
        None => {
            let mut size = bounds.diagonal().norm();
            // Widen instead of clipping when the image is wider than tall.
            if settings.aspect > 1.0 {
                size *= settings.aspect;
            }
            size
        }
    };
    if view_size <= 0.0 || !view_size.is_normal() {
        warn!("degenerate view size {view_size}, falling back to {FALLBACK_VIEW_SIZE}");
        view_size = FALLBACK_VIEW_SIZE;
    }

    rot_scale.set_homogeneous_scale(0.5 * view_size);
    let model_to_view = rot_scale.then(&to_eye);
    let view_to_model = model_to_view.inverse().ok_or(RenderError::SingularView)?;
    let eye_point = view_to_model.apply_point(&Point3::new(0.0, 0.0, settings.eye_backoff));

    Ok(ViewState {
        rot_scale,
        model_to_view,
        view_to_model,
        view_size,
        eye_point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1.0e-9;

    fn live_tally() -> Tally {
        Tally {
            solids: 1,
            regions: 1,
        }
    }

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    /// Eye direction for a centered box: spherical coordinates of the
    /// azimuth/elevation pair.
    fn eye_direction(azimuth: f64, elevation: f64) -> [f64; 3] {
        let (az, el) = (azimuth.to_radians(), elevation.to_radians());
        [el.cos() * az.cos(), el.cos() * az.sin(), el.sin()]
    }

    #[test]
    fn frames_symmetric_box_at_default_angles() {
        let settings = RenderSettings::default();
        let view = auto_frame(&live_tally(), &unit_box(), &settings).unwrap();

        let expected_size = 2.0 * 3.0_f64.sqrt();
        assert!((view.view_size - expected_size).abs() < EPS);
        assert!((view.rot_scale.matrix[(3, 3)] - 0.5 * expected_size).abs() < EPS);

        // Eye sits eye_backoff view units from the center, which is
        // eye_backoff * view_size / 2 model units along the view direction.
        let dist = settings.eye_backoff * view.view_size / 2.0;
        let dir = eye_direction(settings.azimuth, settings.elevation);
        assert!((view.eye_point.x - dist * dir[0]).abs() < EPS);
        assert!((view.eye_point.y - dist * dir[1]).abs() < EPS);
        assert!((view.eye_point.z - dist * dir[2]).abs() < EPS);

        let norm = view.eye_point.coords.norm();
        assert!((norm - 6.0_f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn transforms_are_mutual_inverses() {
        let view = auto_frame(&live_tally(), &unit_box(), &RenderSettings::default()).unwrap();
        let round_trip = view.model_to_view.then(&view.view_to_model);
        for row in 0..4 {
            for col in 0..4 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert!((round_trip.matrix[(row, col)] - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn eye_is_offset_from_padded_box_center() {
        let settings = RenderSettings::default();
        let bounds = BoundingBox::new(Point3::new(0.2, 0.2, 0.2), Point3::new(0.8, 0.8, 0.8));
        let view = auto_frame(&live_tally(), &bounds, &settings).unwrap();

        // Grid padding widens the box to [0,1]^3 before framing.
        assert!((view.view_size - 3.0_f64.sqrt()).abs() < EPS);
        let dist = settings.eye_backoff * view.view_size / 2.0;
        let dir = eye_direction(settings.azimuth, settings.elevation);
        assert!((view.eye_point.x - (0.5 + dist * dir[0])).abs() < EPS);
        assert!((view.eye_point.y - (0.5 + dist * dir[1])).abs() < EPS);
        assert!((view.eye_point.z - (0.5 + dist * dir[2])).abs() < EPS);
    }

    #[test]
    fn missing_geometry_is_fatal() {
        let settings = RenderSettings::default();
        let no_solids = Tally {
            solids: 0,
            regions: 1,
        };
        assert!(matches!(
            auto_frame(&no_solids, &unit_box(), &settings),
            Err(RenderError::NoSolids)
        ));

        let no_regions = Tally {
            solids: 3,
            regions: 0,
        };
        assert!(matches!(
            auto_frame(&no_regions, &unit_box(), &settings),
            Err(RenderError::NoRegions)
        ));
    }

    #[test]
    fn infinite_axis_is_clamped_before_framing() {
        let settings = RenderSettings::default();
        let bounds = BoundingBox::new(
            Point3::new(-1.0e38, -2.0, -2.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        let view = auto_frame(&live_tally(), &bounds, &settings).unwrap();

        // Only the min X coordinate collapses to the unit fallback, so the
        // framed box is [-1,2] x [-2,2] x [-2,2].
        let expected = (9.0_f64 + 16.0 + 16.0).sqrt();
        assert!((view.view_size - expected).abs() < EPS);
        assert!(view.eye_point.coords.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn degenerate_box_falls_back_to_fixed_size() {
        let settings = RenderSettings::default();
        let bounds = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0));
        let view = auto_frame(&live_tally(), &bounds, &settings).unwrap();
        assert_eq!(view.view_size, FALLBACK_VIEW_SIZE);
    }

    #[test]
    fn override_bypasses_the_fit_but_not_the_zero_guard() {
        let mut settings = RenderSettings::default();
        settings.view_size_override = Some(10.0);
        let view = auto_frame(&live_tally(), &unit_box(), &settings).unwrap();
        assert_eq!(view.view_size, 10.0);
        assert!((view.rot_scale.matrix[(3, 3)] - 5.0).abs() < EPS);

        settings.view_size_override = Some(0.0);
        let view = auto_frame(&live_tally(), &unit_box(), &settings).unwrap();
        assert_eq!(view.view_size, FALLBACK_VIEW_SIZE);
    }

    #[test]
    fn wide_aspect_scales_the_view_size() {
        let mut settings = RenderSettings::default();
        settings.aspect = 2.0;
        let view = auto_frame(&live_tally(), &unit_box(), &settings).unwrap();
        assert!((view.view_size - 4.0 * 3.0_f64.sqrt()).abs() < EPS);

        // Tall images keep the autoscaled diameter unchanged.
        settings.aspect = 0.5;
        let view = auto_frame(&live_tally(), &unit_box(), &settings).unwrap();
        assert!((view.view_size - 2.0 * 3.0_f64.sqrt()).abs() < EPS);
    }
}
