use crate::caps::Capabilities;
use crate::engine::{plan, BlockWidth, PlanSummary};
use crate::error::Result;
use crate::file::read_file;
use serde::Serialize;
use std::path::Path;

/// Options for the info command
#[derive(Debug, Clone, Default)]
pub struct InfoOptions {
    pub max_width: Option<BlockWidth>,
    /// Emit JSON instead of text
    pub json: bool,
}

/// Capability and plan report, as printed by `info --json`
#[derive(Debug, Clone, Serialize)]
pub struct InfoReport {
    pub arch: &'static str,
    pub backend: &'static str,
    pub extensions: Vec<&'static str>,
    pub capabilities: Capabilities,
    pub max_step_width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanSummary>,
}

pub fn info_report(
    file: Option<&Path>,
    options: &InfoOptions,
    caps: &Capabilities,
) -> Result<InfoReport> {
    let caps = match options.max_width {
        Some(max) => caps.restrict(max),
        None => *caps,
    };

    let summary = match file {
        Some(path) => {
            let length = read_file(path)?.len();
            Some(plan(length, &caps).summary())
        }
        None => None,
    };

    Ok(InfoReport {
        arch: std::env::consts::ARCH,
        backend: caps.backend().name(),
        extensions: caps.extensions(),
        capabilities: caps,
        max_step_width: caps.max_step_width(),
        plan: summary,
    })
}

/// Display the capability descriptor and, given a file, its block plan
pub fn show_info(file: Option<&Path>, options: &InfoOptions, caps: &Capabilities) -> Result<String> {
    let report = info_report(file, options, caps)?;

    if options.json {
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        return Ok(json);
    }

    let mut output = String::new();

    output.push_str("Fob Capability Information\n");
    output.push_str("==========================\n\n");

    output.push_str(&format!("Architecture: {}\n", report.arch));
    output.push_str(&format!("Backend: {}\n", report.backend));
    let extensions = if report.extensions.is_empty() {
        "none".to_string()
    } else {
        report.extensions.join(", ")
    };
    output.push_str(&format!("Vector extensions: {}\n", extensions));
    output.push_str(&format!("128-bit blocks: {}\n", yes_no(report.capabilities.supports128())));
    output.push_str(&format!("256-bit blocks: {}\n", yes_no(report.capabilities.supports256())));
    output.push_str(&format!("Max step width: {} bytes\n", report.max_step_width));

    if let (Some(path), Some(summary)) = (file, &report.plan) {
        output.push('\n');
        output.push_str("Block Plan:\n");
        output.push_str(&format!("  File: {}\n", path.display()));
        output.push_str(&format!("  Size: {}\n", format_size(summary.length as u64)));
        output.push_str(&format!("  Total blocks: {}\n", summary.blocks));
        for (width, count) in summary.per_width.iter().rev() {
            output.push_str(&format!("  {:>2}-byte blocks: {}\n", width, count));
        }
    }

    Ok(output)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
