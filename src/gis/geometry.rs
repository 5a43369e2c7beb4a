// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SRID-tagged GIS geometries: points, line strings, rings and polygons

use super::{Coordinate, CoordinateSequence};
use crate::error::{Error, Result};
use geo::{Area, Winding};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub coordinate: Coordinate,
    pub srid: i32,
}

impl Point {
    pub fn new(coordinate: Coordinate, srid: i32) -> Self {
        Self { coordinate, srid }
    }

    pub fn x(&self) -> f64 {
        self.coordinate.x
    }

    pub fn y(&self) -> f64 {
        self.coordinate.y
    }

    pub fn z(&self) -> f64 {
        self.coordinate.z
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCurve {
    coordinates: CoordinateSequence,
    #[serde(default)]
    srid: i32,
}

/// Open or closed sequence of at least two coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct LineString {
    coordinates: CoordinateSequence,
    pub srid: i32,
}

impl LineString {
    pub fn new(coordinates: CoordinateSequence, srid: i32) -> Result<Self> {
        if coordinates.len() < 2 {
            return Err(Error::invalid(
                "coordinates",
                format!(
                    "invalid number of points in LineString (found {} - must be >= 2)",
                    coordinates.len()
                ),
            ));
        }
        Ok(Self { coordinates, srid })
    }

    pub fn coordinates(&self) -> &CoordinateSequence {
        &self.coordinates
    }

    pub fn num_points(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_closed(&self) -> bool {
        self.coordinates.is_closed()
    }

    pub fn length(&self) -> f64 {
        self.coordinates
            .as_slice()
            .windows(2)
            .map(|w| (w[1].x - w[0].x).hypot(w[1].y - w[0].y))
            .sum()
    }
}

impl TryFrom<RawCurve> for LineString {
    type Error = Error;

    fn try_from(raw: RawCurve) -> Result<Self> {
        Self::new(raw.coordinates, raw.srid)
    }
}

/// Closed line string of at least four coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct LinearRing {
    coordinates: CoordinateSequence,
    pub srid: i32,
}

impl LinearRing {
    pub fn new(coordinates: CoordinateSequence, srid: i32) -> Result<Self> {
        if coordinates.len() < 4 {
            return Err(Error::invalid(
                "coordinates",
                format!(
                    "invalid number of points in LinearRing (found {} - must be >= 4)",
                    coordinates.len()
                ),
            ));
        }
        if !coordinates.is_closed() {
            return Err(Error::invalid(
                "coordinates",
                "points of LinearRing do not form a closed linestring",
            ));
        }
        Ok(Self { coordinates, srid })
    }

    pub fn coordinates(&self) -> &CoordinateSequence {
        &self.coordinates
    }

    pub fn num_points(&self) -> usize {
        self.coordinates.len()
    }

    /// Counter-clockwise in the XY plane
    pub fn is_ccw(&self) -> bool {
        self.coordinates.to_geo().is_ccw()
    }

    pub fn reverse(&mut self) {
        self.coordinates.reverse();
    }

    /// Planar XY area enclosed by the ring
    pub fn area(&self) -> f64 {
        geo::Polygon::new(self.coordinates.to_geo(), vec![]).unsigned_area()
    }
}

impl TryFrom<RawCurve> for LinearRing {
    type Error = Error;

    fn try_from(raw: RawCurve) -> Result<Self> {
        Self::new(raw.coordinates, raw.srid)
    }
}

/// Exterior ring with zero or more hole rings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: LinearRing,
    #[serde(default)]
    pub interiors: Vec<LinearRing>,
    pub srid: i32,
}

impl Polygon {
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>, srid: i32) -> Self {
        Self {
            exterior,
            interiors,
            srid,
        }
    }

    pub fn exterior_ring(&self) -> &LinearRing {
        &self.exterior
    }

    pub fn interior_rings(&self) -> &[LinearRing] {
        &self.interiors
    }

    pub fn num_interior_rings(&self) -> usize {
        self.interiors.len()
    }

    /// Planar XY area: exterior minus holes
    pub fn area(&self) -> f64 {
        self.to_geo().unsigned_area()
    }

    pub fn to_geo(&self) -> geo::Polygon<f64> {
        geo::Polygon::new(
            self.exterior.coordinates.to_geo(),
            self.interiors.iter().map(|r| r.coordinates.to_geo()).collect(),
        )
    }

    /// Tag the polygon and every ring with `srid`
    pub fn set_srid(&mut self, srid: i32) {
        self.srid = srid;
        self.exterior.srid = srid;
        for hole in &mut self.interiors {
            hole.srid = srid;
        }
    }

    /// Copy with the exterior counter-clockwise and holes clockwise in XY
    pub fn oriented(&self) -> Self {
        let mut out = self.clone();
        if !out.exterior.is_ccw() {
            out.exterior.reverse();
        }
        for hole in &mut out.interiors {
            if hole.is_ccw() {
                hole.reverse();
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint {
    pub points: Vec<Point>,
    pub srid: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLineString {
    pub line_strings: Vec<LineString>,
    pub srid: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
    pub srid: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    pub geometries: Vec<Geometry>,
    pub srid: i32,
}

/// Any GIS geometry value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// OGC geometry type name
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::LinearRing(_) => "LinearRing",
            Self::Polygon(_) => "Polygon",
            Self::MultiPoint(_) => "MultiPoint",
            Self::MultiLineString(_) => "MultiLineString",
            Self::MultiPolygon(_) => "MultiPolygon",
            Self::GeometryCollection(_) => "GeometryCollection",
        }
    }

    pub fn srid(&self) -> i32 {
        match self {
            Self::Point(g) => g.srid,
            Self::LineString(g) => g.srid,
            Self::LinearRing(g) => g.srid,
            Self::Polygon(g) => g.srid,
            Self::MultiPoint(g) => g.srid,
            Self::MultiLineString(g) => g.srid,
            Self::MultiPolygon(g) => g.srid,
            Self::GeometryCollection(g) => g.srid,
        }
    }

    /// Number of component geometries; 1 for single geometries
    pub fn num_geometries(&self) -> usize {
        match self {
            Self::MultiPoint(g) => g.points.len(),
            Self::MultiLineString(g) => g.line_strings.len(),
            Self::MultiPolygon(g) => g.polygons.len(),
            Self::GeometryCollection(g) => g.geometries.len(),
            _ => 1,
        }
    }
}

macro_rules! impl_from_geometry {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Geometry {
                fn from(g: $variant) -> Self {
                    Self::$variant(g)
                }
            }
        )*
    };
}

impl_from_geometry!(
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);
