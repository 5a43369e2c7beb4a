// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conversions between the CAD geometry model and the GIS model

pub mod boundary;
pub mod coordinate;
pub mod curve;
pub mod solid;

pub use boundary::{brep_to_polygon, extract_hole_loops, extract_outer_loop, extract_polyline};
pub use coordinate::{point_to_location, to_coordinate, to_point3d};
pub use curve::{
    line_string_to_polyline, linear_ring_to_polyline, polyline_to_linear_ring,
    polyline_to_line_string, polyline_to_sequence, sequence_to_line_string,
};
pub use solid::{polygon_to_brep, ring_to_brep};
