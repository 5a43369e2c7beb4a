// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Reference system catalog keyed by SRID

use super::CoordinateSystem;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const WGS84: &str = r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563,AUTHORITY["EPSG","7030"]],AUTHORITY["EPSG","6326"]],PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["EPSG","4326"]]"#;

pub const NAD83_NEW_YORK_LONG_ISLAND_FTUS: &str = r#"PROJCS["NAD83 / New York Long Island (ftUS)",GEOGCS["NAD83",DATUM["North_American_Datum_1983",SPHEROID["GRS 1980",6378137,298.257222101,AUTHORITY["EPSG","7019"]],TOWGS84[0,0,0,0,0,0,0],AUTHORITY["EPSG","6269"]],PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["EPSG","4269"]],PROJECTION["Lambert_Conformal_Conic_2SP"],PARAMETER["standard_parallel_1",41.03333333333333],PARAMETER["standard_parallel_2",40.66666666666666],PARAMETER["latitude_of_origin",40.16666666666666],PARAMETER["central_meridian",-74],PARAMETER["false_easting",984250.0000000002],PARAMETER["false_northing",0],UNIT["US survey foot",0.3048006096012192,AUTHORITY["EPSG","9003"]],AXIS["X",EAST],AXIS["Y",NORTH],AUTHORITY["EPSG","2263"]]"#;

pub const NAD83_MASSACHUSETTS_MAINLAND_FTUS: &str = r#"PROJCS["NAD83 / Massachusetts Mainland (ftUS)",GEOGCS["NAD83",DATUM["North_American_Datum_1983",SPHEROID["GRS 1980",6378137,298.257222101,AUTHORITY["EPSG","7019"]],TOWGS84[0,0,0,0,0,0,0],AUTHORITY["EPSG","6269"]],PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],AUTHORITY["EPSG","4269"]],PROJECTION["Lambert_Conformal_Conic_2SP"],PARAMETER["standard_parallel_1",42.68333333333333],PARAMETER["standard_parallel_2",41.71666666666667],PARAMETER["latitude_of_origin",41],PARAMETER["central_meridian",-71.5],PARAMETER["false_easting",656166.667],PARAMETER["false_northing",2460625],UNIT["US survey foot",0.3048006096012192,AUTHORITY["EPSG","9003"]],AXIS["X",EAST],AXIS["Y",NORTH],AUTHORITY["EPSG","2249"]]"#;

/// Built-in SRID to WKT table
pub const REFERENCE_SYSTEMS: &[(i32, &str)] = &[
    (4326, WGS84),
    (2263, NAD83_NEW_YORK_LONG_ISLAND_FTUS),
    (2249, NAD83_MASSACHUSETTS_MAINLAND_FTUS),
];

/// WKT of a built-in reference system
pub fn lookup_wkt(srid: i32) -> Option<&'static str> {
    REFERENCE_SYSTEMS
        .iter()
        .find(|(code, _)| *code == srid)
        .map(|(_, wkt)| *wkt)
}

/// Parse the built-in definition for `srid`
pub fn lookup_reference_system(srid: i32) -> Result<CoordinateSystem> {
    let wkt = lookup_wkt(srid).ok_or(Error::UnknownSrid(srid))?;
    CoordinateSystem::from_wkt(wkt)
}

/// A configured SRID definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSystemEntry {
    pub srid: i32,
    pub wkt: String,
}

/// Built-in reference systems plus injected entries.
///
/// Injected entries shadow built-in ones with the same SRID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceCatalog {
    entries: BTreeMap<i32, String>,
}

impl Default for ReferenceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceCatalog {
    pub fn builtin() -> Self {
        Self {
            entries: REFERENCE_SYSTEMS
                .iter()
                .map(|(srid, wkt)| (*srid, wkt.to_string()))
                .collect(),
        }
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = &'a ReferenceSystemEntry>) -> Self {
        let mut catalog = Self::builtin();
        for entry in entries {
            catalog.insert(entry.srid, entry.wkt.clone());
        }
        catalog
    }

    pub fn insert(&mut self, srid: i32, wkt: String) {
        if self.entries.insert(srid, wkt).is_some() {
            log::debug!("reference system {} overridden", srid);
        }
    }

    pub fn contains(&self, srid: i32) -> bool {
        self.entries.contains_key(&srid)
    }

    pub fn wkt(&self, srid: i32) -> Option<&str> {
        self.entries.get(&srid).map(String::as_str)
    }

    pub fn srids(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, srid: i32) -> Result<CoordinateSystem> {
        let wkt = self.wkt(srid).ok_or(Error::UnknownSrid(srid))?;
        CoordinateSystem::from_wkt(wkt)
    }

    /// PROJ transformation between two catalog entries
    #[cfg(feature = "proj")]
    pub fn transformer(&self, from: i32, to: i32) -> Result<proj::Proj> {
        let from_wkt = self.wkt(from).ok_or(Error::UnknownSrid(from))?;
        let to_wkt = self.wkt(to).ok_or(Error::UnknownSrid(to))?;
        proj::Proj::new_known_crs(from_wkt, to_wkt, None).map_err(|e| {
            Error::Projection(format!("failed to create transformation {} -> {}: {}", from, to, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_matches_its_authority() {
        for (srid, _) in REFERENCE_SYSTEMS {
            let cs = lookup_reference_system(*srid).unwrap();
            assert_eq!(cs.epsg_code(), Some(*srid), "SRID {}", srid);
        }
    }

    #[test]
    fn test_wgs84_is_geographic() {
        let cs = lookup_reference_system(4326).unwrap();
        assert!(!cs.is_projected());
        assert_eq!(cs.geographic.datum.spheroid.semi_major_axis, 6378137.0);
    }

    #[test]
    fn test_unknown_srid() {
        assert!(matches!(
            lookup_reference_system(9999),
            Err(Error::UnknownSrid(9999))
        ));
        assert!(lookup_wkt(0).is_none());
    }

    #[test]
    fn test_injected_entries_shadow_builtins() {
        let entries = vec![
            ReferenceSystemEntry {
                srid: 4326,
                wkt: r#"GEOGCS["Custom",DATUM["D",SPHEROID["S",6378137,298.257223563]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]]"#.into(),
            },
            ReferenceSystemEntry {
                srid: 9999,
                wkt: WGS84.into(),
            },
        ];
        let catalog = ReferenceCatalog::with_entries(&entries);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.lookup(4326).unwrap().name, "Custom");
        assert!(catalog.contains(9999));
        assert!(matches!(catalog.lookup(1234), Err(Error::UnknownSrid(1234))));
    }
}
