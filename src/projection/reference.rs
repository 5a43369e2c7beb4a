// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Coordinate system definitions materialized from well-known text

use super::wkt::{parse_wkt, WktNode, WktValue};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystemKind {
    Geographic,
    Projected,
}

/// `AUTHORITY["EPSG","4326"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spheroid {
    pub name: String,
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
    pub authority: Option<Authority>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datum {
    pub name: String,
    pub spheroid: Spheroid,
    /// Bursa-Wolf parameters from `TOWGS84`, when present
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_wgs84: Vec<f64>,
    pub authority: Option<Authority>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimeMeridian {
    pub name: String,
    pub longitude: f64,
    pub authority: Option<Authority>,
}

/// Angular or linear unit with its conversion factor to radians or metres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    pub factor: f64,
    pub authority: Option<Authority>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub name: String,
    pub direction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicSystem {
    pub name: String,
    pub datum: Datum,
    pub prime_meridian: PrimeMeridian,
    pub angular_unit: Unit,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub axes: Vec<Axis>,
    pub authority: Option<Authority>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub name: String,
    pub parameters: BTreeMap<String, f64>,
}

/// A parsed geographic or projected coordinate system.
///
/// The source WKT is kept verbatim so the definition can be handed to an
/// external projection library unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    pub kind: CoordinateSystemKind,
    pub name: String,
    pub geographic: GeographicSystem,
    pub projection: Option<Projection>,
    pub linear_unit: Option<Unit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub axes: Vec<Axis>,
    pub authority: Option<Authority>,
    pub wkt: String,
}

impl CoordinateSystem {
    pub fn from_wkt(wkt: &str) -> Result<Self> {
        let root = parse_wkt(wkt)?;
        match root.keyword.as_str() {
            "GEOGCS" => {
                let geographic = geographic_system(&root)?;
                Ok(Self {
                    kind: CoordinateSystemKind::Geographic,
                    name: geographic.name.clone(),
                    axes: geographic.axes.clone(),
                    authority: geographic.authority.clone(),
                    geographic,
                    projection: None,
                    linear_unit: None,
                    wkt: wkt.to_string(),
                })
            }
            "PROJCS" => {
                let projection = root.require("PROJECTION")?;
                let parameters = root
                    .children("PARAMETER")
                    .map(|p| -> Result<(String, f64)> {
                        Ok((p.name_or_err()?, p.number_or_err(0)?))
                    })
                    .collect::<Result<BTreeMap<_, _>>>()?;
                Ok(Self {
                    kind: CoordinateSystemKind::Projected,
                    name: root.name_or_err()?,
                    geographic: geographic_system(root.require("GEOGCS")?)?,
                    projection: Some(Projection {
                        name: projection.name_or_err()?,
                        parameters,
                    }),
                    linear_unit: root.child("UNIT").map(unit).transpose()?,
                    axes: axes(&root),
                    authority: authority(&root),
                    wkt: wkt.to_string(),
                })
            }
            other => Err(Error::Wkt(format!(
                "unsupported coordinate system type {}",
                other
            ))),
        }
    }

    /// EPSG code from the top-level authority, if it is EPSG
    pub fn epsg_code(&self) -> Option<i32> {
        self.authority
            .as_ref()
            .filter(|a| a.name.eq_ignore_ascii_case("EPSG"))
            .and_then(|a| a.code.parse().ok())
    }

    pub fn is_projected(&self) -> bool {
        self.kind == CoordinateSystemKind::Projected
    }

    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.projection
            .as_ref()
            .and_then(|p| p.parameters.get(name).copied())
    }

    /// Materialize this definition with PROJ
    #[cfg(feature = "proj")]
    pub fn to_proj(&self) -> Result<proj::Proj> {
        proj::Proj::new(&self.wkt)
            .map_err(|e| Error::Projection(format!("failed to create projection from WKT: {}", e)))
    }
}

fn geographic_system(node: &WktNode) -> Result<GeographicSystem> {
    let datum = node.require("DATUM")?;
    let spheroid = datum.require("SPHEROID")?;
    let primem = node.require("PRIMEM")?;
    Ok(GeographicSystem {
        name: node.name_or_err()?,
        datum: Datum {
            name: datum.name_or_err()?,
            spheroid: Spheroid {
                name: spheroid.name_or_err()?,
                semi_major_axis: spheroid.number_or_err(0)?,
                inverse_flattening: spheroid.number_or_err(1)?,
                authority: authority(spheroid),
            },
            to_wgs84: datum
                .child("TOWGS84")
                .map(|t| (0..7).filter_map(|i| t.number(i)).collect())
                .unwrap_or_default(),
            authority: authority(datum),
        },
        prime_meridian: PrimeMeridian {
            name: primem.name_or_err()?,
            longitude: primem.number_or_err(0)?,
            authority: authority(primem),
        },
        angular_unit: unit(node.require("UNIT")?)?,
        axes: axes(node),
        authority: authority(node),
    })
}

fn unit(node: &WktNode) -> Result<Unit> {
    Ok(Unit {
        name: node.name_or_err()?,
        factor: node.number_or_err(0)?,
        authority: authority(node),
    })
}

fn axes(node: &WktNode) -> Vec<Axis> {
    node.children("AXIS")
        .filter_map(|a| {
            Some(Axis {
                name: a.name()?.to_string(),
                direction: a.ident(0)?.to_ascii_uppercase(),
            })
        })
        .collect()
}

fn authority(node: &WktNode) -> Option<Authority> {
    let auth = node.child("AUTHORITY")?;
    let mut texts = auth.values.iter().filter_map(|v| match v {
        WktValue::Text(s) => Some(s.clone()),
        WktValue::Number(x) => Some(x.to_string()),
        _ => None,
    });
    Some(Authority {
        name: texts.next()?,
        code: texts.next()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAD83_LI: &str = r#"PROJCS["NAD83 / New York Long Island (ftUS)",GEOGCS["NAD83",DATUM["North_American_Datum_1983",SPHEROID["GRS 1980",6378137,298.257222101,AUTHORITY["EPSG","7019"]],TOWGS84[0,0,0,0,0,0,0],AUTHORITY["EPSG","6269"]],PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["EPSG","4269"]],PROJECTION["Lambert_Conformal_Conic_2SP"],PARAMETER["central_meridian",-74],PARAMETER["false_easting",984250.0000000002],UNIT["US survey foot",0.3048006096012192,AUTHORITY["EPSG","9003"]],AXIS["X",EAST],AXIS["Y",NORTH],AUTHORITY["EPSG","2263"]]"#;

    #[test]
    fn test_projected_system() {
        let cs = CoordinateSystem::from_wkt(NAD83_LI).unwrap();
        assert!(cs.is_projected());
        assert_eq!(cs.epsg_code(), Some(2263));
        assert_eq!(
            cs.geographic.authority.as_ref().map(|a| a.code.as_str()),
            Some("4269")
        );
        assert_eq!(cs.geographic.datum.to_wgs84.len(), 7);
        assert_eq!(cs.parameter("central_meridian"), Some(-74.0));
        assert_eq!(cs.linear_unit.as_ref().map(|u| u.name.as_str()), Some("US survey foot"));
        assert_eq!(cs.axes.len(), 2);
        assert_eq!(cs.axes[0].direction, "EAST");
    }

    #[test]
    fn test_geographic_requires_datum() {
        let err = CoordinateSystem::from_wkt(r#"GEOGCS["broken",UNIT["degree",0.01745]]"#);
        assert!(matches!(err, Err(Error::Wkt(_))));
    }

    #[test]
    fn test_unsupported_type() {
        assert!(CoordinateSystem::from_wkt(r#"VERT_CS["height"]"#).is_err());
    }
}
