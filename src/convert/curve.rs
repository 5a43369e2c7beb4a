// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polylines to line strings and linear rings, and back

use super::coordinate::{to_coordinate, to_point3d};
use crate::error::{Error, Result};
use crate::geometry::Polyline;
use crate::gis::{CoordinateSequence, LineString, LinearRing};
use crate::projection::ProjectionSystem;

pub fn polyline_to_sequence(polyline: &Polyline) -> CoordinateSequence {
    polyline.iter().map(to_coordinate).collect()
}

/// Line string with the polyline's vertices in order.
/// Fails with `InvalidArgument` for fewer than two points.
pub fn polyline_to_line_string(polyline: &Polyline, proj: &ProjectionSystem) -> Result<LineString> {
    sequence_to_line_string(polyline_to_sequence(polyline), proj)
}

/// Linear ring from a closed polyline
pub fn polyline_to_linear_ring(polyline: &Polyline, proj: &ProjectionSystem) -> Result<LinearRing> {
    if !polyline.is_closed() {
        return Err(Error::invalid("polyline", "polyline is not closed"));
    }
    proj.factory()
        .create_linear_ring(polyline_to_sequence(polyline))
}

pub fn sequence_to_line_string(
    sequence: CoordinateSequence,
    proj: &ProjectionSystem,
) -> Result<LineString> {
    proj.factory().create_line_string(sequence)
}

pub fn line_string_to_polyline(line_string: &LineString) -> Polyline {
    line_string.coordinates().iter().map(to_point3d).collect()
}

pub fn linear_ring_to_polyline(ring: &LinearRing) -> Polyline {
    ring.coordinates().iter().map(to_point3d).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn square() -> Polyline {
        Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ])
    }

    #[test]
    fn test_line_string_round_trip() {
        let proj = ProjectionSystem::world(4326);
        let pl = Polyline::new(vec![Point3::new(0.1, 0.2, 0.3), Point3::new(-4.0, 5.5, 6.0)]);
        let ls = polyline_to_line_string(&pl, &proj).unwrap();
        assert_eq!(ls.srid, 4326);
        assert_eq!(line_string_to_polyline(&ls), pl);
    }

    #[test]
    fn test_single_point_polyline_is_rejected() {
        let proj = ProjectionSystem::world(4326);
        let pl = Polyline::new(vec![Point3::new(1.0, 1.0, 1.0)]);
        assert!(matches!(
            polyline_to_line_string(&pl, &proj),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_open_polyline_is_not_a_ring() {
        let proj = ProjectionSystem::world(4326);
        let mut open = square();
        open.points.pop();
        match polyline_to_linear_ring(&open, &proj) {
            Err(Error::InvalidArgument { name, reason }) => {
                assert_eq!(name, "polyline");
                assert_eq!(reason, "polyline is not closed");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_closed_polyline_ring_round_trip() {
        let proj = ProjectionSystem::world(2249);
        let ring = polyline_to_linear_ring(&square(), &proj).unwrap();
        assert_eq!(ring.srid, 2249);
        assert_eq!(ring.num_points(), 5);
        assert_eq!(linear_ring_to_polyline(&ring), square());
    }
}
