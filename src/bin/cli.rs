// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Antelope CLI

use anyhow::{bail, Context, Result};
use antelope::config::Settings;
use antelope::convert::linear_ring_to_polyline;
use antelope::gis::Geometry;
use antelope::{logging, Brep, Curve, Georeferenced, Kernel, Plane};
use clap::{Parser, Subcommand};
use colored::Colorize;
use nalgebra::{Point3, Vector3};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "antelope")]
#[command(about = "Antelope - CAD boundary reps to GIS rings and back", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./antelope.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List known reference systems
    Catalog,

    /// Print the parsed reference system for an SRID as JSON
    Lookup {
        srid: i32,
    },

    /// Wrap a GIS geometry JSON document as georeferenced CAD geometry
    Convert {
        /// GIS geometry JSON file
        input: PathBuf,

        /// Source basis origin
        #[arg(long, value_parser = parse_triple, default_value = "0,0,0")]
        origin: [f64; 3],

        /// Source basis x direction
        #[arg(long, value_parser = parse_triple, default_value = "1,0,0")]
        x_axis: [f64; 3],

        /// Source basis y direction
        #[arg(long, value_parser = parse_triple, default_value = "0,1,0")]
        y_axis: [f64; 3],

        /// Move the result from the source basis into the world frame
        #[arg(long)]
        target: bool,
    },

    /// Rebuild a planar patch from a polygon or ring JSON document
    Patch {
        /// GIS polygon or ring JSON file
        input: PathBuf,

        /// Run best-effort cleanup on the rebuilt patch
        #[arg(long)]
        clean: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    }
    logging::init_with_level(settings.logging.level_filter());
    let kernel = Kernel::with_settings(settings);

    match cli.command {
        Commands::Catalog => catalog_command(&kernel, cli.verbose),
        Commands::Lookup { srid } => lookup_command(&kernel, srid),
        Commands::Convert {
            input,
            origin,
            x_axis,
            y_axis,
            target,
        } => {
            let basis = Plane::new(
                Point3::from(origin),
                Vector3::from(x_axis),
                Vector3::from(y_axis),
            );
            convert_command(&kernel, &input, basis, target)
        }
        Commands::Patch { input, clean } => patch_command(&kernel, &input, clean, cli.verbose),
        Commands::Version => {
            println!("Antelope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn parse_triple(s: &str) -> std::result::Result<[f64; 3], String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{}: {}", p, e)))
        .collect::<std::result::Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(format!("expected x,y,z but got {}", s)),
    }
}

fn read_geometry(path: &Path) -> Result<Geometry> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read geometry file: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse geometry file: {:?}", path))
}

fn catalog_command(kernel: &Kernel, verbose: bool) -> Result<()> {
    let catalog = kernel.catalog();
    for srid in catalog.srids() {
        match catalog.lookup(srid) {
            Ok(cs) => {
                println!("{:>6}  {}", srid.to_string().bold(), cs.name);
                if verbose {
                    if let Some(projection) = &cs.projection {
                        println!("        projection: {}", projection.name);
                    }
                    println!("        datum: {}", cs.geographic.datum.name);
                }
            }
            Err(e) => println!("{:>6}  {} {}", srid.to_string().bold(), "invalid:".red(), e),
        }
    }
    Ok(())
}

fn lookup_command(kernel: &Kernel, srid: i32) -> Result<()> {
    match kernel.reference_system(srid) {
        Ok(cs) => {
            println!("{}", serde_json::to_string_pretty(&cs)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(1);
        }
    }
}

fn convert_command(kernel: &Kernel, input: &Path, basis: Plane, target: bool) -> Result<()> {
    if !basis.is_valid() {
        bail!("source basis axes are parallel or zero-length");
    }
    let geometry = read_geometry(input)?;
    let Some(mut wrapped) = kernel.georeference(Some(&geometry), &basis)? else {
        bail!("no geometry in {:?}", input);
    };
    if target {
        wrapped.to_target_basis();
    }
    println!("{}", serde_json::to_string_pretty(&wrapped)?);
    Ok(())
}

fn patch_command(kernel: &Kernel, input: &Path, clean: bool, verbose: bool) -> Result<()> {
    let geometry = read_geometry(input)?;
    let (brep, exterior) = match &geometry {
        Geometry::Polygon(polygon) => (kernel.polygon_to_brep(polygon)?, polygon.exterior_ring()),
        Geometry::LinearRing(ring) => (kernel.ring_to_brep(ring)?, ring),
        other => bail!("expected a Polygon or LinearRing, found {}", other.geometry_type()),
    };

    let crossings = kernel.self_intersections(&Curve::Polyline(linear_ring_to_polyline(exterior)));
    if !crossings.is_empty() {
        println!(
            "{} exterior ring has {} self-intersections",
            "Warning:".yellow(),
            crossings.len()
        );
    }

    let brep = if clean {
        match kernel.clean(&brep, false, true) {
            Some(cleaned) => cleaned,
            None => {
                println!("{} cleanup failed, keeping the rebuilt patch", "Warning:".yellow());
                brep
            }
        }
    } else {
        brep
    };

    report_patch(kernel, &brep, verbose)
}

fn report_patch(kernel: &Kernel, brep: &Brep, verbose: bool) -> Result<()> {
    let tolerance = kernel.tolerance();
    println!("{} rebuilt planar patch", "Success:".green());
    println!("  Faces: {}", brep.face_count());
    println!("  Loops: {}", brep.loops().count());
    println!("  Area:  {:.6}", brep.area(tolerance));
    if verbose {
        println!("{}", serde_json::to_string_pretty(brep)?);
    }
    Ok(())
}
