// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use super::Georeferenced;
use crate::convert::{line_string_to_polyline, polyline_to_line_string};
use crate::error::{Error, Result};
use crate::geometry::{Plane, Polyline, Transform};
use crate::gis::LineString;
use crate::projection::ProjectionSystem;
use serde::{Deserialize, Serialize};

/// A georeferenced polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLineString {
    polyline: Polyline,
    projection: ProjectionSystem,
}

impl GeoLineString {
    /// Fails with `InvalidArgument` when the polyline has no non-degenerate segment
    pub fn new(polyline: Polyline, projection: ProjectionSystem) -> Result<Self> {
        if !polyline.is_valid() {
            return Err(Error::invalid("polyline", "polyline is not valid"));
        }
        Ok(Self {
            polyline,
            projection,
        })
    }

    pub fn from_gis(line_string: &LineString, source_basis: Plane) -> Self {
        Self {
            polyline: line_string_to_polyline(line_string),
            projection: ProjectionSystem::new(line_string.srid, source_basis),
        }
    }

    pub fn polyline(&self) -> &Polyline {
        &self.polyline
    }

    pub fn into_polyline(self) -> Polyline {
        self.polyline
    }

    pub fn to_gis(&self) -> Result<LineString> {
        polyline_to_line_string(&self.polyline, &self.projection)
    }
}

impl Georeferenced for GeoLineString {
    fn projection_system(&self) -> &ProjectionSystem {
        &self.projection
    }

    fn transform(&mut self, xform: &Transform) {
        self.polyline.transform(xform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_invalid_polyline_rejected() {
        let degenerate = Polyline::new(vec![Point3::origin(), Point3::origin()]);
        assert!(matches!(
            GeoLineString::new(degenerate, ProjectionSystem::world(4326)),
            Err(Error::InvalidArgument { name: "polyline", .. })
        ));
    }

    #[test]
    fn test_translation_basis_moves_every_vertex() {
        let basis = Plane::new(Point3::new(100.0, 200.0, 0.0), Vector3::x(), Vector3::y());
        let pl = Polyline::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)]);
        let mut line = GeoLineString::new(pl, ProjectionSystem::new(2263, basis)).unwrap();
        line.to_target_basis();
        assert_eq!(line.polyline().points[0], Point3::new(100.0, 200.0, 0.0));
        assert_eq!(line.polyline().points[1], Point3::new(101.0, 201.0, 0.0));

        let gis = line.to_gis().unwrap();
        assert_eq!(gis.srid, 2263);
        assert_eq!(gis.num_points(), 2);
    }
}
