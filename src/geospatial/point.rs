// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use super::Georeferenced;
use crate::convert::{point_to_location, to_point3d};
use crate::geometry::{Plane, Transform};
use crate::gis;
use crate::projection::ProjectionSystem;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A georeferenced point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    location: Point3<f64>,
    projection: ProjectionSystem,
}

impl GeoPoint {
    pub fn new(location: Point3<f64>, projection: ProjectionSystem) -> Self {
        Self {
            location,
            projection,
        }
    }

    /// Takes the SRID from the GIS point
    pub fn from_gis(point: &gis::Point, source_basis: Plane) -> Self {
        Self::new(
            to_point3d(&point.coordinate),
            ProjectionSystem::new(point.srid, source_basis),
        )
    }

    pub fn location(&self) -> &Point3<f64> {
        &self.location
    }

    pub fn to_gis(&self) -> gis::Point {
        point_to_location(&self.location, &self.projection)
    }
}

impl Georeferenced for GeoPoint {
    fn projection_system(&self) -> &ProjectionSystem {
        &self.projection
    }

    fn transform(&mut self, xform: &Transform) {
        self.location = xform.apply_point(&self.location);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gis::Coordinate;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_from_gis_takes_srid_and_coerces_nan() {
        let gp = gis::Point::new(Coordinate::xy(10.0, 20.0), 2263);
        let point = GeoPoint::from_gis(&gp, Plane::world_xy());
        assert_eq!(point.projection_system().srid(), 2263);
        assert_eq!(point.location(), &Point3::new(10.0, 20.0, 0.0));
        assert_eq!(point.to_gis().srid, 2263);
    }

    #[test]
    fn test_target_then_source_basis() {
        let basis = Plane::new(Point3::new(5.0, 5.0, 0.0), Vector3::y(), -Vector3::x());
        let mut point =
            GeoPoint::new(Point3::new(1.0, 0.0, 0.0), ProjectionSystem::new(4326, basis));
        point.to_target_basis();
        assert_relative_eq!(*point.location(), Point3::new(5.0, 6.0, 0.0), epsilon = 1e-12);
        point.to_source_basis().unwrap();
        assert_relative_eq!(*point.location(), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }
}
