use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace, warn};

use keyjoin_engine::{
    MergeOptions, OutputDelimiter, compute_eligible, load_sources, sample_keys, seeded_rng,
    write_merged,
};
use keyjoin_ingest::{
    DuplicatePolicy, GroupRules, LoadOptions, classify, expand_inputs, file_stem,
    read_header_line,
};

use crate::cli::{DuplicatesArg, GroupArgs, InspectArgs, MergeArgs, OutputDelimiterArg};
use crate::logging::redact_value;
use crate::types::{MergeResult, SourceSummary};

pub fn run_merge(args: &MergeArgs) -> Result<MergeResult> {
    let options = merge_options(args)?;
    let inputs = expand_inputs(&args.inputs).context("expand inputs")?;

    // =========================================================================
    // Stage 1: Load - classify and index every input file
    // =========================================================================
    let load_span = info_span!("load", file_count = inputs.len());
    let load_start = Instant::now();
    let sources = load_span
        .in_scope(|| load_sources(&inputs, &options.load))
        .context("load sources")?;
    info!(
        file_count = sources.len(),
        duration_ms = load_start.elapsed().as_millis(),
        "load complete"
    );
    let summaries: Vec<SourceSummary> = sources.iter().map(SourceSummary::from_source).collect();

    // =========================================================================
    // Stage 2: Eligibility - required intersection, grouped union
    // =========================================================================
    let eligibility_start = Instant::now();
    let eligible = info_span!("eligibility").in_scope(|| compute_eligible(&sources));
    let eligible_count = eligible.len();
    info!(
        eligible = eligible_count,
        duration_ms = eligibility_start.elapsed().as_millis(),
        "eligibility complete"
    );

    let mut result = MergeResult {
        output: args.output.clone(),
        wrote_output: false,
        sources: summaries,
        eligible: eligible_count,
        requested: options.sample_size,
        written: 0,
        seed: options.seed,
    };
    if eligible.is_empty() {
        warn!("no key is shared across the input files");
        return Ok(result);
    }

    // =========================================================================
    // Stage 3: Sample - uniform subset without replacement
    // =========================================================================
    let sample = info_span!("sample", requested = options.sample_size).in_scope(|| {
        let mut rng = seeded_rng(options.seed);
        sample_keys(eligible, options.sample_size, &mut rng)
    });
    for key in &sample {
        trace!(key = redact_value(key), "sampled key");
    }

    if args.dry_run {
        info!(sampled = sample.len(), "dry run, output not written");
        result.written = sample.len();
        return Ok(result);
    }

    // =========================================================================
    // Stage 4: Write - merged header and one record per sampled key
    // =========================================================================
    let write_span = info_span!("write", output = %args.output.display());
    let write_start = Instant::now();
    let written = write_span
        .in_scope(|| {
            write_merged(
                &args.output,
                options.output_delimiter,
                &sources,
                &sample,
            )
        })
        .with_context(|| format!("write {}", args.output.display()))?;
    info!(
        file_count = sources.len(),
        eligible = eligible_count,
        written,
        duration_ms = write_start.elapsed().as_millis(),
        "merge complete"
    );

    result.written = written;
    result.wrote_output = true;
    Ok(result)
}

/// Classifies each input from its header line only.
pub fn run_inspect(args: &InspectArgs) -> Result<Vec<SourceSummary>> {
    let groups = group_rules(&args.groups)?;
    let inputs = expand_inputs(&args.inputs).context("expand inputs")?;
    let mut summaries = Vec::with_capacity(inputs.len());
    for path in inputs {
        let header_line = read_header_line(&path)
            .with_context(|| format!("read header: {}", path.display()))?
            .unwrap_or_default();
        let schema = classify(&path, &header_line, &groups);
        summaries.push(SourceSummary::from_schema(file_stem(&path), &schema));
    }
    Ok(summaries)
}

pub fn merge_options(args: &MergeArgs) -> Result<MergeOptions> {
    let load = LoadOptions::default()
        .with_groups(group_rules(&args.groups)?)
        .with_duplicates(match args.duplicates {
            DuplicatesArg::Merge => DuplicatePolicy::Merge,
            DuplicatesArg::Last => DuplicatePolicy::KeepLast,
        });
    Ok(MergeOptions::default()
        .with_sample_size(args.sample_size)
        .with_seed(args.seed)
        .with_output_delimiter(match args.output_delimiter {
            OutputDelimiterArg::Comma => OutputDelimiter::Comma,
            OutputDelimiterArg::Tab => OutputDelimiter::Tab,
        })
        .with_load(load))
}

pub fn group_rules(args: &GroupArgs) -> Result<GroupRules> {
    let mut rules = GroupRules::default().with_infer_from_names(!args.no_name_groups);
    for entry in &args.group {
        rules = rules.with_override(entry)?;
    }
    for stem in &args.required {
        rules = rules.with_required(stem.as_str());
    }
    Ok(rules)
}

