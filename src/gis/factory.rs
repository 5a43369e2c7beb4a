// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

use super::{
    Coordinate, CoordinateSequence, Geometry, GeometryCollection, LineString, LinearRing,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, PrecisionModel,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Builds geometries sharing one precision model and SRID.
///
/// Every coordinate passing through the factory is snapped with the
/// precision model, and every geometry it returns carries the factory SRID.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryFactory {
    pub precision_model: PrecisionModel,
    pub srid: i32,
}

impl GeometryFactory {
    pub fn new(precision_model: PrecisionModel, srid: i32) -> Self {
        Self {
            precision_model,
            srid,
        }
    }

    pub fn with_srid(srid: i32) -> Self {
        Self::new(PrecisionModel::Floating, srid)
    }

    fn precise(&self, c: Coordinate) -> Coordinate {
        let pm = &self.precision_model;
        Coordinate::new(pm.make_precise(c.x), pm.make_precise(c.y), pm.make_precise(c.z))
    }

    fn precise_sequence(&self, coordinates: CoordinateSequence) -> CoordinateSequence {
        if matches!(self.precision_model, PrecisionModel::Floating) {
            return coordinates;
        }
        coordinates.iter().map(|c| self.precise(*c)).collect()
    }

    pub fn create_point(&self, coordinate: Coordinate) -> Point {
        Point::new(self.precise(coordinate), self.srid)
    }

    pub fn create_line_string(&self, coordinates: CoordinateSequence) -> Result<LineString> {
        LineString::new(self.precise_sequence(coordinates), self.srid)
    }

    pub fn create_linear_ring(&self, coordinates: CoordinateSequence) -> Result<LinearRing> {
        LinearRing::new(self.precise_sequence(coordinates), self.srid)
    }

    /// Polygon from rings; ring SRIDs are replaced with the factory SRID
    pub fn create_polygon(&self, exterior: LinearRing, interiors: Vec<LinearRing>) -> Polygon {
        let srid = self.srid;
        let retag = |mut ring: LinearRing| {
            ring.srid = srid;
            ring
        };
        Polygon::new(
            retag(exterior),
            interiors.into_iter().map(retag).collect(),
            srid,
        )
    }

    /// Member SRIDs are replaced with the factory SRID, as for the
    /// other multi-geometries
    pub fn create_multi_point(&self, mut points: Vec<Point>) -> MultiPoint {
        for point in &mut points {
            point.srid = self.srid;
        }
        MultiPoint {
            points,
            srid: self.srid,
        }
    }

    pub fn create_multi_line_string(&self, mut line_strings: Vec<LineString>) -> MultiLineString {
        for line_string in &mut line_strings {
            line_string.srid = self.srid;
        }
        MultiLineString {
            line_strings,
            srid: self.srid,
        }
    }

    pub fn create_multi_polygon(&self, mut polygons: Vec<Polygon>) -> MultiPolygon {
        for polygon in &mut polygons {
            polygon.set_srid(self.srid);
        }
        MultiPolygon {
            polygons,
            srid: self.srid,
        }
    }

    pub fn create_geometry_collection(&self, geometries: Vec<Geometry>) -> GeometryCollection {
        GeometryCollection {
            geometries,
            srid: self.srid,
        }
    }
}
