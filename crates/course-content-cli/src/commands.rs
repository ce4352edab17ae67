use std::io::Write;

use anyhow::{Context, Result};
use course_content_engine::{
    BUNDLED_CONTENT, BlockType, SearchIndex, ValidationReport, find_lesson, iter_blocks_of_type,
    iter_lessons, parse_str, scan_content_files, validate_file,
};

use crate::source::ContentSource;

/// Validate the source and print its report(s).
///
/// Returns whether everything was valid.
pub fn validate(source: &ContentSource, json: bool, out: &mut impl Write) -> Result<bool> {
    let reports = collect_reports(source)?;
    let all_valid = reports.iter().all(|(_, report)| report.valid);

    match reports.as_slice() {
        [(_, report)] if !source_is_dir(source) => {
            if json {
                serde_json::to_writer_pretty(&mut *out, report)?;
                writeln!(out)?;
            } else {
                write!(out, "{report}")?;
            }
        }
        _ if json => {
            let by_file: serde_json::Map<_, _> = reports
                .iter()
                .map(|(name, report)| Ok((name.clone(), serde_json::to_value(report)?)))
                .collect::<Result<_>>()?;
            serde_json::to_writer_pretty(&mut *out, &by_file)?;
            writeln!(out)?;
        }
        _ => {
            for (name, report) in &reports {
                write!(out, "{name}: {report}")?;
            }
        }
    }

    log::debug!(
        "validated {} source(s), {} invalid",
        reports.len(),
        reports.iter().filter(|(_, r)| !r.valid).count()
    );
    Ok(all_valid)
}

fn source_is_dir(source: &ContentSource) -> bool {
    matches!(source, ContentSource::Path(path) if path.is_dir())
}

fn collect_reports(source: &ContentSource) -> Result<Vec<(String, ValidationReport)>> {
    match source {
        ContentSource::Bundled => {
            let tree = parse_str(BUNDLED_CONTENT)?;
            Ok(vec![(source.to_string(), course_content_engine::validate(&tree))])
        }
        ContentSource::Path(path) if path.is_dir() => scan_content_files(path)?
            .into_iter()
            .map(|file| {
                let report = validate_file(&file)
                    .with_context(|| format!("Failed to validate {}", file.display()))?;
                Ok((file.display().to_string(), report))
            })
            .collect(),
        ContentSource::Path(path) => {
            let report = validate_file(path)
                .with_context(|| format!("Failed to validate {}", path.display()))?;
            Ok(vec![(path.display().to_string(), report)])
        }
    }
}

pub fn lessons(source: &ContentSource, out: &mut impl Write) -> Result<bool> {
    let tree = source.load_tree()?;
    for lesson in iter_lessons(&tree) {
        writeln!(out, "{}\t{}", lesson.path(), lesson.lesson.title)?;
    }
    Ok(true)
}

pub fn blocks(source: &ContentSource, block_type: BlockType, out: &mut impl Write) -> Result<bool> {
    let tree = source.load_tree()?;
    for block in iter_blocks_of_type(&tree, block_type) {
        writeln!(
            out,
            "{}\t{}\t{}",
            block.path(),
            block.block.id(),
            block.block.title()
        )?;
    }
    Ok(true)
}

/// Print matching lessons; no match counts as failure, like grep
pub fn search(source: &ContentSource, query: &str, out: &mut impl Write) -> Result<bool> {
    let tree = source.load_tree()?;
    let index = SearchIndex::build(&tree);
    let results = index.search(query);
    for address in &results {
        let title = find_lesson(&tree, address)
            .map(|l| l.lesson.title.as_str())
            .unwrap_or_default();
        writeln!(out, "{address}\t{title}")?;
    }
    Ok(!results.is_empty())
}
