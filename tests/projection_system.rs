// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Projection system equality, basis transforms and catalog lookup

use antelope::projection::{lookup_reference_system, CoordinateSystemKind};
use antelope::{Error, Plane, ProjectionSystem};
use anyhow::Result;
use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vector(rng: &mut StdRng) -> Vector3<f64> {
    Vector3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    )
}

fn random_basis(rng: &mut StdRng) -> Plane {
    loop {
        let origin = Point3::from(random_vector(rng) * 1e4);
        let plane = Plane::new(origin, random_vector(rng), random_vector(rng));
        if plane.is_valid() {
            return plane;
        }
    }
}

#[test]
fn test_basis_round_trip_is_identity() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(2249);

    for _ in 0..100 {
        let proj = ProjectionSystem::new(4326, random_basis(&mut rng));
        let forward = proj.forward_transform();
        let inverse = proj.inverse_transform()?;
        let p = Point3::from(random_vector(&mut rng) * 500.0);
        assert_relative_eq!(inverse.apply_point(&forward.apply_point(&p)), p, epsilon = 1e-6);
        assert!(inverse.compose(&forward).is_identity(1e-9));
    }

    Ok(())
}

#[test]
fn test_equality_properties() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(2263);
    let basis = random_basis(&mut rng);
    let a = ProjectionSystem::new(2263, basis);
    let b = ProjectionSystem::new(2263, basis);

    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_ne!(a, ProjectionSystem::new(2249, basis));

    let mut moved = basis;
    moved.origin.x += 1e-9;
    assert_ne!(a, ProjectionSystem::new(2263, moved));

    Ok(())
}

#[test]
fn test_degenerate_basis() -> Result<()> {
    let flat = Plane::new(Point3::origin(), Vector3::x(), Vector3::x() * 2.0);
    assert!(!flat.is_valid());
    let proj = ProjectionSystem::new(4326, flat);
    assert!(matches!(proj.inverse_transform(), Err(Error::NonInvertibleBasis)));
    Ok(())
}

#[test]
fn test_catalog_lookup() -> Result<()> {
    let wgs84 = lookup_reference_system(4326)?;
    assert_eq!(wgs84.kind, CoordinateSystemKind::Geographic);
    assert_eq!(wgs84.name, "WGS 84");

    let long_island = lookup_reference_system(2263)?;
    assert!(long_island.name.contains("New York Long Island"));
    assert_eq!(long_island.parameter("central_meridian"), Some(-74.0));

    let massachusetts = lookup_reference_system(2249)?;
    assert!(massachusetts.name.contains("Massachusetts"));
    assert_eq!(massachusetts.epsg_code(), Some(2249));

    assert!(matches!(
        lookup_reference_system(9999),
        Err(Error::UnknownSrid(9999))
    ));

    Ok(())
}
