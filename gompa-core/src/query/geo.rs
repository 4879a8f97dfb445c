//! Fixed linear placement of map markers.
//!
//! This is a screen-space approximation tuned for the region around 28°N
//! 88°E, not a map projection. Sites missing either coordinate get no marker.

use gompa_model::{HeritageSite, SiteId};
use serde::Serialize;

const ORIGIN_LON: f64 = 88.0;
const ORIGIN_LAT: f64 = 28.0;
const X_SCALE: f64 = 800.0;
const Y_SCALE: f64 = 600.0;
const X_OFFSET: f64 = 200.0;
const Y_OFFSET: f64 = 100.0;

const EDGE_MARGIN: f64 = 50.0;
const RIGHT_MARGIN: f64 = 100.0;
const MAX_Y: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerPlacement {
    pub site_id: SiteId,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// Unclamped screen position for a coordinate pair.
pub fn project(latitude: f64, longitude: f64) -> (f64, f64) {
    let x = (longitude - ORIGIN_LON) * X_SCALE + X_OFFSET;
    let y = (ORIGIN_LAT - latitude) * Y_SCALE + Y_OFFSET;
    (x, y)
}

fn clamp_to_viewport(x: f64, y: f64, viewport_width: f64) -> (f64, f64) {
    // max(min(..)) rather than f64::clamp: a narrow viewport must not panic.
    let x = EDGE_MARGIN.max(x.min(viewport_width - RIGHT_MARGIN));
    let y = EDGE_MARGIN.max(y.min(MAX_Y));
    (x, y)
}

/// One marker per mappable site, in input order.
pub fn place_markers<'a, I>(sites: I, viewport_width: f64) -> Vec<MarkerPlacement>
where
    I: IntoIterator<Item = &'a HeritageSite>,
{
    sites
        .into_iter()
        .filter_map(|site| {
            let (lat, lon) = site.coordinates()?;
            let (x, y) = project(lat, lon);
            let (x, y) = clamp_to_viewport(x, y, viewport_width);
            Some(MarkerPlacement {
                site_id: site.id,
                name: site.name.clone(),
                x,
                y,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fixtures::site;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn projects_with_fixed_transform() {
        let (x, y) = project(27.5, 88.5);
        assert!(close(x, 600.0));
        assert!(close(y, 400.0));
    }

    #[test]
    fn placements_are_clamped_to_the_viewport() {
        let mut far_east = site("Far East", "Edge", None);
        far_east.latitude = Some(26.0);
        far_east.longitude = Some(90.0);

        let markers = place_markers([&far_east], 1024.0);
        assert_eq!(markers.len(), 1);
        assert!(close(markers[0].x, 924.0));
        assert!(close(markers[0].y, 500.0));
    }

    #[test]
    fn lower_bound_wins_on_tiny_viewports() {
        let mut s = site("North", "Top", None);
        s.latitude = Some(29.0);
        s.longitude = Some(88.5);

        let markers = place_markers([&s], 80.0);
        assert!(close(markers[0].x, 50.0));
        assert!(close(markers[0].y, 50.0));
    }

    #[test]
    fn sites_without_both_coordinates_are_skipped() {
        let mut half = site("Half", "Somewhere", None);
        half.latitude = Some(27.3);
        let mut whole = site("Whole", "Somewhere", None);
        whole.latitude = Some(27.3);
        whole.longitude = Some(88.6);

        let sites = vec![half, whole];
        let markers = place_markers(&sites, 1280.0);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "Whole");
    }
}
