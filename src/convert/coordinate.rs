// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Single point conversion between the CAD and GIS models

use crate::gis::{Coordinate, Point};
use crate::projection::ProjectionSystem;
use nalgebra::Point3;

/// Copies x, y and z unchanged
pub fn to_coordinate(point: &Point3<f64>) -> Coordinate {
    Coordinate::new(point.x, point.y, point.z)
}

/// CAD point from a GIS coordinate; NaN ordinates become 0.0
pub fn to_point3d(coordinate: &Coordinate) -> Point3<f64> {
    let finite = |v: f64| if v.is_nan() { 0.0 } else { v };
    Point3::new(finite(coordinate.x), finite(coordinate.y), finite(coordinate.z))
}

/// SRID-tagged GIS point at a CAD location
pub fn point_to_location(point: &Point3<f64>, proj: &ProjectionSystem) -> Point {
    proj.factory().create_point(to_coordinate(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_ordinates_become_zero() {
        let p = to_point3d(&Coordinate::new(f64::NAN, 2.5, f64::NAN));
        assert_eq!(p, Point3::new(0.0, 2.5, 0.0));

        let p = to_point3d(&Coordinate::xy(1.0, 2.0));
        assert_eq!(p, Point3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_coordinate_copies_fields() {
        let p = Point3::new(-1.5, 1e9, 3.0);
        let c = to_coordinate(&p);
        assert_eq!((c.x, c.y, c.z), (-1.5, 1e9, 3.0));
        assert_eq!(to_point3d(&c), p);
    }

    #[test]
    fn test_location_carries_srid() {
        let proj = ProjectionSystem::world(2263);
        let loc = point_to_location(&Point3::new(1.0, 2.0, 3.0), &proj);
        assert_eq!(loc.srid, 2263);
        assert_eq!(loc.z(), 3.0);
    }
}
