// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Antelope
//!
//! Conversion between a CAD boundary representation (points, polylines and
//! planar patches bounded by outer and inner loops) and a GIS ring model
//! (SRID-tagged points, line strings and polygons), plus projection systems
//! that relate a geometry's local placement frame to georeferenced space.

pub mod config;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod geospatial;
pub mod gis;
pub mod kernel;
pub mod logging;
pub mod projection;

pub use error::{Error, Result};
pub use geometry::{Brep, Curve, Plane, Polyline, Transform};
pub use geospatial::{
    to_geospatial, GeoCollection, GeoGeometry, GeoLineString, GeoPoint, GeoShape, Georeferenced,
};
pub use kernel::Kernel;
pub use projection::{lookup_reference_system, CoordinateSystem, ProjectionSystem};
