// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Best-effort patch cleanup and self-intersection detection

use antelope::geometry::{
    clean_brep, create_planar_breps, curve_self_intersections, Brep, BrepFace, IntersectionEvent,
};
use antelope::{Curve, Polyline};
use anyhow::Result;
use approx::assert_relative_eq;
use nalgebra::Point3;

const TOL: f64 = 1e-3;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Curve {
    Curve::Polyline(Polyline::new(vec![
        Point3::new(x0, y0, 0.0),
        Point3::new(x1, y0, 0.0),
        Point3::new(x1, y1, 0.0),
        Point3::new(x0, y1, 0.0),
        Point3::new(x0, y0, 0.0),
    ]))
}

fn faces(curves: &[Curve]) -> Vec<BrepFace> {
    create_planar_breps(curves, TOL)
        .into_iter()
        .flat_map(|b| b.faces)
        .collect()
}

#[test]
fn test_adjacent_faces_merge() -> Result<()> {
    let brep = Brep::new(faces(&[rect(0.0, 0.0, 5.0, 5.0), rect(5.0, 0.0, 10.0, 5.0)]));
    assert_eq!(brep.face_count(), 2);

    let cleaned =
        clean_brep(&brep, false, true, TOL).ok_or_else(|| anyhow::anyhow!("clean failed"))?;
    assert_eq!(cleaned.face_count(), 1);
    assert_relative_eq!(cleaned.area(TOL), 50.0, epsilon = 1e-6);
    // the input is untouched
    assert_eq!(brep.face_count(), 2);
    Ok(())
}

#[test]
fn test_clean_without_options_keeps_faces() -> Result<()> {
    let brep = Brep::new(faces(&[rect(0.0, 0.0, 5.0, 5.0), rect(5.0, 0.0, 10.0, 5.0)]));
    let cleaned =
        clean_brep(&brep, false, false, TOL).ok_or_else(|| anyhow::anyhow!("clean failed"))?;
    assert_eq!(cleaned.face_count(), 2);
    Ok(())
}

#[test]
fn test_empty_brep_cannot_be_cleaned() -> Result<()> {
    assert!(clean_brep(&Brep::default(), true, true, TOL).is_none());
    Ok(())
}

#[test]
fn test_self_intersections_are_located() -> Result<()> {
    let bowtie = Curve::Polyline(Polyline::new(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(10.0, 10.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(0.0, 10.0, 0.0),
        Point3::new(0.0, 0.0, 0.0),
    ]));
    let events = curve_self_intersections(&bowtie, TOL);
    assert_eq!(events.len(), 1);
    match events.iter().next() {
        Some(IntersectionEvent::Point { point, .. }) => {
            assert_relative_eq!(*point, Point3::new(5.0, 5.0, 0.0), epsilon = 1e-9);
        }
        other => panic!("unexpected event {:?}", other),
    }

    assert!(curve_self_intersections(&rect(0.0, 0.0, 1.0, 1.0), TOL).is_empty());
    Ok(())
}
