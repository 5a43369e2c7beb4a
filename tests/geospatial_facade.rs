// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! GIS geometries wrapped as georeferenced CAD geometry

use antelope::gis::{Coordinate, Geometry, GeometryFactory, LinearRing};
use antelope::{
    to_geospatial, Error, GeoCollection, GeoGeometry, GeoPoint, Georeferenced, Plane,
    ProjectionSystem,
};
use anyhow::Result;
use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

const TOL: f64 = 1e-3;

fn square(factory: &GeometryFactory, x0: f64, size: f64) -> Result<LinearRing> {
    Ok(factory.create_linear_ring(
        vec![
            Coordinate::xy(x0, 0.0),
            Coordinate::xy(x0 + size, 0.0),
            Coordinate::xy(x0 + size, size),
            Coordinate::xy(x0, size),
            Coordinate::xy(x0, 0.0),
        ]
        .into(),
    )?)
}

#[test]
fn test_line_string_to_target_and_back() -> Result<()> {
    let factory = GeometryFactory::with_srid(2263);
    let ls = factory.create_line_string(
        vec![Coordinate::new(0.0, 0.0, 0.0), Coordinate::new(3.0, 4.0, 0.0)].into(),
    )?;
    let basis = Plane::new(Point3::new(10.0, 0.0, 0.0), Vector3::y(), -Vector3::x());

    let Some(GeoGeometry::LineString(mut line)) =
        to_geospatial(Some(&Geometry::LineString(ls.clone())), &basis, TOL)?
    else {
        panic!("expected a line string");
    };
    assert_eq!(line.projection_system().srid(), 2263);

    line.to_target_basis();
    assert_relative_eq!(line.polyline().points[1], Point3::new(6.0, 3.0, 0.0), epsilon = 1e-12);

    line.to_source_basis()?;
    let back = line.to_gis()?;
    assert_eq!(back.srid, 2263);
    assert_relative_eq!(back.coordinates().as_slice()[1].x, 3.0, epsilon = 1e-12);
    assert_relative_eq!(back.coordinates().as_slice()[1].y, 4.0, epsilon = 1e-12);

    Ok(())
}

#[test]
fn test_polygon_becomes_shape() -> Result<()> {
    let factory = GeometryFactory::with_srid(4326);
    let polygon = factory.create_polygon(square(&factory, 0.0, 10.0)?, vec![]);
    let wrapped = to_geospatial(Some(&polygon.into()), &Plane::world_xy(), TOL)?;
    match wrapped {
        Some(GeoGeometry::Shape(shape)) => {
            assert_relative_eq!(shape.brep().area(TOL), 100.0, epsilon = 1e-9);
            assert_eq!(shape.to_gis()?.srid, 4326);
        }
        other => panic!("expected a shape, got {:?}", other.map(|g| g.kind())),
    }
    Ok(())
}

#[test]
fn test_multi_polygon_shares_projection() -> Result<()> {
    let factory = GeometryFactory::with_srid(2249);
    let multi = factory.create_multi_polygon(vec![
        factory.create_polygon(square(&factory, 0.0, 1.0)?, vec![]),
        factory.create_polygon(square(&factory, 5.0, 2.0)?, vec![]),
    ]);
    let wrapped = to_geospatial(Some(&multi.into()), &Plane::world_xy(), TOL)?
        .ok_or_else(|| anyhow::anyhow!("no geometry"))?;
    let GeoGeometry::MultiShape(shapes) = &wrapped else {
        panic!("expected a multi shape, got {}", wrapped.kind());
    };
    assert_eq!(shapes.len(), 2);
    assert_eq!(wrapped.projection_system().srid(), 2249);

    let gis = wrapped.to_gis()?;
    assert_eq!(gis.geometry_type(), "MultiPolygon");
    assert_eq!(gis.num_geometries(), 2);
    Ok(())
}

#[test]
fn test_mixed_srid_members_take_container_srid() -> Result<()> {
    let a = GeometryFactory::with_srid(4326).create_point(Coordinate::xy(0.0, 0.0));
    let b = GeometryFactory::with_srid(2263).create_point(Coordinate::xy(1.0, 1.0));
    let mut multi = GeometryFactory::with_srid(2249).create_multi_point(vec![a, b]);
    multi.points[1].srid = 2263;
    let wrapped = to_geospatial(Some(&multi.into()), &Plane::world_xy(), TOL)?
        .ok_or_else(|| anyhow::anyhow!("no geometry"))?;
    let GeoGeometry::MultiPoint(points) = &wrapped else {
        panic!("expected a multi point, got {}", wrapped.kind());
    };
    assert!(points.iter().all(|p| p.projection_system().srid() == 2249));
    Ok(())
}

#[test]
fn test_disagreeing_members_are_rejected() -> Result<()> {
    let a = GeoPoint::new(Point3::origin(), ProjectionSystem::world(4326));
    let b = GeoPoint::new(Point3::origin(), ProjectionSystem::world(2263));
    let err = GeoCollection::new(vec![a, b]).unwrap_err();
    assert!(matches!(err, Error::ProjectionMismatch { .. }));
    Ok(())
}

#[test]
fn test_geometry_collection_is_unsupported() -> Result<()> {
    let factory = GeometryFactory::with_srid(4326);
    let point = factory.create_point(Coordinate::xy(0.0, 0.0));
    let collection = factory.create_geometry_collection(vec![point.into()]);
    let err = to_geospatial(Some(&collection.into()), &Plane::world_xy(), TOL).unwrap_err();
    assert!(err.to_string().contains("GeometryCollection"));
    Ok(())
}

#[test]
fn test_wrapped_geometry_serializes() -> Result<()> {
    let factory = GeometryFactory::with_srid(4326);
    let point: Geometry = factory.create_point(Coordinate::new(1.0, 2.0, 3.0)).into();
    let wrapped = to_geospatial(Some(&point), &Plane::world_xy(), TOL)?;
    let json = serde_json::to_string(&wrapped)?;
    let back: Option<GeoGeometry> = serde_json::from_str(&json)?;
    assert_eq!(back, wrapped);
    Ok(())
}
