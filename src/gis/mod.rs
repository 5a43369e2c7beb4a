// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! GIS geometry model - SRID-tagged points, line strings, rings and polygons

mod coordinate;
mod factory;
mod geometry;
mod precision;

pub use coordinate::{Coordinate, CoordinateSequence};
pub use factory::GeometryFactory;
pub use geometry::{
    Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
pub use precision::PrecisionModel;
