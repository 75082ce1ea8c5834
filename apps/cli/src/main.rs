// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Kno-IFC - converts a Knoholem building fixture into an ifcOWL graph.
//!
//! ```text
//! kno-ifc <fixture.json> [output.nt]
//! ```
//!
//! The fixture holds the rooms result document and, per room IRI, its
//! sensors result document (SPARQL 1.1 JSON results). Settings come from
//! `KNO_IFC_*` environment variables; log verbosity from `RUST_LOG`.
//!
//! When an output path is given, the converted rooms are written there as
//! N-Triples, including when some rooms failed.
//!
//! Exits with status 1 when any room failed to convert.

use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;

use anyhow::{bail, Context};
use kno_ifc_core::{ConversionConfig, Converter, StaticSource};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,kno_ifc_core=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: kno-ifc <fixture.json> [output.nt]");
    };
    let output = args.next();

    let config = ConversionConfig::from_env();
    tracing::info!(
        fixture = %path,
        wall_height = %config.wall_height,
        output_namespace = %config.output_namespace,
        parallel = config.parallel,
        "Starting Kno-IFC"
    );

    let source = StaticSource::from_path(&path)
        .with_context(|| format!("failed to load fixture {}", path))?;

    let converter = Converter::new(config);
    let mut graph = converter.new_graph();
    let report = converter
        .convert(&source, &mut graph)
        .context("conversion aborted")?;

    for room in &report.rooms {
        tracing::info!(
            room = %room.name,
            walls = room.walls,
            sensors = room.sensors,
            nodes = room.nodes,
            "Room"
        );
    }
    for (class, count) in graph.class_counts() {
        tracing::info!(class = %class, count, "Nodes");
    }
    for failure in &report.failures {
        tracing::error!(room = %failure.room, error = %failure.error, "Room failed");
    }

    if let Some(output) = &output {
        let file = File::create(output)
            .with_context(|| format!("failed to create output file {}", output))?;
        let triples = graph
            .write_ntriples(BufWriter::new(file))
            .with_context(|| format!("failed to write {}", output))?;
        tracing::info!(output = %output, triples, "Wrote graph");
    }

    tracing::info!(
        converted = report.rooms.len(),
        failed = report.failures.len(),
        walls = report.walls(),
        sensors = report.sensors(),
        nodes = graph.len(),
        "Done"
    );

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
