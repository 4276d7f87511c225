use crate::caps::Capabilities;
use crate::engine::{invert, plan, BlockWidth, PlanSummary};
use crate::error::Result;
use crate::file::{read_file, write_file};
use std::path::{Path, PathBuf};

/// Bytes shown on each side of the verbose hex preview
const PREVIEW_BYTES: usize = 16;

/// Options for the scramble command
#[derive(Debug, Clone, Default)]
pub struct ScrambleOptions {
    /// Write here instead of back over the input
    pub output: Option<PathBuf>,
    /// Upper bound on the block width
    pub max_width: Option<BlockWidth>,
    pub verbose: bool,
}

/// What a scramble run did
#[derive(Debug, Clone)]
pub struct ScrambleReport {
    pub output: PathBuf,
    pub bytes: usize,
    pub plan: PlanSummary,
}

/// Read `input`, invert it, and write it back (or to `options.output`)
///
/// Nothing is written when the input cannot be read.
pub fn scramble_file(
    input: &Path,
    options: &ScrambleOptions,
    caps: &Capabilities,
) -> Result<ScrambleReport> {
    let caps = match options.max_width {
        Some(max) => caps.restrict(max),
        None => *caps,
    };

    let mut data = read_file(input)?;
    let summary = plan(data.len(), &caps).summary();

    if options.verbose {
        for ext in caps.extensions() {
            println!("[?]: {} supported, may use as optimization", ext.to_uppercase());
        }
        println!("Plan: {}", describe_plan(&summary));
        println!("Head before: {}", preview(&data));
    }

    invert(&mut data, &caps);

    if options.verbose {
        println!("Head after:  {}", preview(&data));
    }

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| input.to_path_buf());
    write_file(&output, &data)?;

    Ok(ScrambleReport {
        output,
        bytes: data.len(),
        plan: summary,
    })
}

/// "3 blocks (32 B x 2, 4 B x 1)", widest first
pub fn describe_plan(summary: &PlanSummary) -> String {
    if summary.blocks == 0 {
        return "0 blocks".to_string();
    }
    let parts: Vec<String> = summary
        .per_width
        .iter()
        .rev()
        .map(|(width, count)| format!("{} B x {}", width, count))
        .collect();
    format!("{} blocks ({})", summary.blocks, parts.join(", "))
}

fn preview(data: &[u8]) -> String {
    let head = &data[..data.len().min(PREVIEW_BYTES)];
    if head.is_empty() {
        "(empty)".to_string()
    } else {
        hex::encode(head)
    }
}
