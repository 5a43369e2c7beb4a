// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Dispatch from GIS geometries to georeferenced CAD wrappers

use super::{GeoCollection, GeoLineString, GeoPoint, GeoShape, Georeferenced};
use crate::error::{Error, Result};
use crate::geometry::{Plane, Transform};
use crate::gis::{Geometry, Point};
use crate::projection::ProjectionSystem;
use serde::{Deserialize, Serialize};

/// Every georeferenced shape a GIS geometry can become
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "geometry")]
pub enum GeoGeometry {
    Point(GeoPoint),
    LineString(GeoLineString),
    Shape(GeoShape),
    MultiPoint(GeoCollection<GeoPoint>),
    MultiLineString(GeoCollection<GeoLineString>),
    MultiShape(GeoCollection<GeoShape>),
}

/// Wrap a GIS geometry, with the SRID taken from the geometry and
/// `source_basis` as the local frame.
///
/// `None` passes through as `Ok(None)`. Polygons and rings are rebuilt as
/// planar patches at `tolerance`. Members of a multi-geometry take the
/// container's SRID. A multi-geometry with exactly one member becomes the
/// single wrapper. Heterogeneous collections are rejected with
/// `UnsupportedGeometryType`.
pub fn to_geospatial(
    geometry: Option<&Geometry>,
    source_basis: &Plane,
    tolerance: f64,
) -> Result<Option<GeoGeometry>> {
    let Some(geometry) = geometry else {
        return Ok(None);
    };
    let basis = *source_basis;
    let fallback = ProjectionSystem::new(geometry.srid(), basis);
    log::trace!("wrapping {} (SRID {})", geometry.geometry_type(), geometry.srid());

    let wrapped = match geometry {
        Geometry::Point(p) => GeoGeometry::Point(GeoPoint::from_gis(p, basis)),
        Geometry::LineString(ls) => GeoGeometry::LineString(GeoLineString::from_gis(ls, basis)),
        Geometry::LinearRing(ring) => {
            GeoGeometry::Shape(GeoShape::from_ring(ring, basis, tolerance)?)
        }
        Geometry::Polygon(polygon) => {
            GeoGeometry::Shape(GeoShape::from_polygon(polygon, basis, tolerance)?)
        }
        Geometry::MultiPoint(multi) => {
            let members = multi
                .points
                .iter()
                .map(|p| {
                    let point = Point { srid: multi.srid, ..*p };
                    GeoPoint::from_gis(&point, basis)
                })
                .collect();
            condense(members, fallback, GeoGeometry::Point, GeoGeometry::MultiPoint)?
        }
        Geometry::MultiLineString(multi) => {
            let members = multi
                .line_strings
                .iter()
                .map(|ls| {
                    let mut line_string = ls.clone();
                    line_string.srid = multi.srid;
                    GeoLineString::from_gis(&line_string, basis)
                })
                .collect();
            condense(
                members,
                fallback,
                GeoGeometry::LineString,
                GeoGeometry::MultiLineString,
            )?
        }
        Geometry::MultiPolygon(multi) => {
            let members = multi
                .polygons
                .iter()
                .map(|p| {
                    let mut polygon = p.clone();
                    polygon.set_srid(multi.srid);
                    GeoShape::from_polygon(&polygon, basis, tolerance)
                })
                .collect::<Result<Vec<_>>>()?;
            condense(members, fallback, GeoGeometry::Shape, GeoGeometry::MultiShape)?
        }
        Geometry::GeometryCollection(_) => {
            return Err(Error::UnsupportedGeometryType(
                geometry.geometry_type().to_string(),
            ))
        }
    };
    Ok(Some(wrapped))
}

/// One member collapses to `single`; none keeps the container's projection
fn condense<T: Georeferenced>(
    mut members: Vec<T>,
    fallback: ProjectionSystem,
    single: fn(T) -> GeoGeometry,
    multi: fn(GeoCollection<T>) -> GeoGeometry,
) -> Result<GeoGeometry> {
    match members.len() {
        0 => Ok(multi(GeoCollection::with_projection(members, fallback))),
        1 => Ok(single(members.remove(0))),
        _ => Ok(multi(GeoCollection::new(members)?)),
    }
}

impl GeoGeometry {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::Shape(_) => "Shape",
            Self::MultiPoint(_) => "MultiPoint",
            Self::MultiLineString(_) => "MultiLineString",
            Self::MultiShape(_) => "MultiShape",
        }
    }

    /// Back to a GIS geometry tagged with this wrapper's SRID
    pub fn to_gis(&self) -> Result<Geometry> {
        Ok(match self {
            Self::Point(g) => g.to_gis().into(),
            Self::LineString(g) => g.to_gis()?.into(),
            Self::Shape(g) => g.to_gis()?.into(),
            Self::MultiPoint(g) => g.to_gis().into(),
            Self::MultiLineString(g) => g.to_gis()?.into(),
            Self::MultiShape(g) => g.to_gis()?.into(),
        })
    }
}

impl Georeferenced for GeoGeometry {
    fn projection_system(&self) -> &ProjectionSystem {
        match self {
            Self::Point(g) => g.projection_system(),
            Self::LineString(g) => g.projection_system(),
            Self::Shape(g) => g.projection_system(),
            Self::MultiPoint(g) => g.projection_system(),
            Self::MultiLineString(g) => g.projection_system(),
            Self::MultiShape(g) => g.projection_system(),
        }
    }

    fn transform(&mut self, xform: &Transform) {
        match self {
            Self::Point(g) => g.transform(xform),
            Self::LineString(g) => g.transform(xform),
            Self::Shape(g) => g.transform(xform),
            Self::MultiPoint(g) => g.transform(xform),
            Self::MultiLineString(g) => g.transform(xform),
            Self::MultiShape(g) => g.transform(xform),
        }
    }
}
