use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use wave_catalog::reconcile;
use wave_cli::config::{FileConfig, Settings};
use wave_ingest::{
    JsonMetadataExtractor, MetadataExtractor, discover_waves, exclude_path, extract_all,
    load_annotations, select_waves,
};
use wave_model::WaveSet;
use wave_output::{CatalogSink, FileSink, publish_catalog};

use crate::cli::{BuildArgs, WaveArgs};
use crate::types::{BuildResult, Publication, WaveSummary};

pub fn run_build(args: &BuildArgs, config: Option<&Path>) -> Result<BuildResult> {
    let settings = Settings::merge(FileConfig::discover(config)?, args.overrides())?;
    let reference = settings.reference()?.clone();
    let build_span = info_span!("build", reference = %reference);
    let _build_guard = build_span.enter();
    let start = Instant::now();

    // =========================================================================
    // Stage 1: Discover and order waves
    // =========================================================================
    let waves = discover_waves(&settings.input_dir)
        .with_context(|| format!("discover waves in {}", settings.input_dir.display()))?;
    let waves = exclude_path(waves, &settings.output);
    let waves = select_waves(waves, &reference, &settings.retain)?;

    // =========================================================================
    // Stage 2: Extract per-wave metadata and annotations
    // =========================================================================
    let files = extract_all(&JsonMetadataExtractor, &waves)?;
    let annotations = match &settings.annotations {
        Some(path) => load_annotations(path)
            .with_context(|| format!("load annotations {}", path.display()))?,
        None => BTreeMap::new(),
    };

    // =========================================================================
    // Stage 3: Reconcile
    // =========================================================================
    let wave_set = WaveSet::new(&reference, files)?;
    let catalog = reconcile(&wave_set, &annotations);

    // =========================================================================
    // Stage 4: Publish
    // =========================================================================
    let publication = if args.dry_run {
        debug!("dry run; catalog not written");
        None
    } else {
        let sink = FileSink::new(&settings.output);
        let outcome = publish_catalog(&catalog, settings.render, &sink)?;
        Some(Publication {
            location: sink.location(),
            outcome,
        })
    };

    info!(
        wave_count = catalog.files.len(),
        variable_count = catalog.variable_count(),
        duration_ms = start.elapsed().as_millis(),
        "build complete"
    );
    Ok(BuildResult {
        input_dir: settings.input_dir,
        catalog,
        render: settings.render,
        annotation_count: annotations.len(),
        publication,
    })
}

pub fn run_waves(args: &WaveArgs, config: Option<&Path>) -> Result<Vec<WaveSummary>> {
    let settings = Settings::merge(FileConfig::discover(config)?, args.overrides())?;
    let waves = discover_waves(&settings.input_dir)
        .with_context(|| format!("discover waves in {}", settings.input_dir.display()))?;
    let waves = exclude_path(waves, &settings.output);
    // Without a reference the listing order is shown as-is.
    let waves = match settings.reference_opt() {
        Some(reference) => select_waves(waves, reference, &settings.retain)?,
        None => waves,
    };
    let extractor = JsonMetadataExtractor;
    waves
        .into_iter()
        .map(|wave| -> Result<WaveSummary> {
            let metadata = extractor.extract(&wave.id, &wave.path)?;
            Ok(WaveSummary {
                is_reference: settings.reference_opt() == Some(&wave.id),
                column_count: metadata.column_count(),
                labeled_count: metadata.labels.len(),
                id: wave.id,
                path: wave.path,
            })
        })
        .collect()
}
