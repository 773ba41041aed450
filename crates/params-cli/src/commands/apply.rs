//! Apply command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;
use params_core::DocumentFormat;
use params_fs::NormalizedPath;
use params_fs::io::{read_text, write_text};
use similar::TextDiff;

use crate::context::Context;
use crate::error::Result;

/// Where the substituted descriptor goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyTarget {
    Stdout,
    File(PathBuf),
    Diff,
}

/// Substitute parameters into `descriptor` and emit the result.
///
/// The descriptor itself is never modified unless it is also the output
/// file.
pub async fn run_apply(ctx: &Context, descriptor: &Path, target: ApplyTarget) -> Result<()> {
    let path = NormalizedPath::new(ctx.cwd.to_native().join(descriptor));
    let format = DocumentFormat::from_path(&path)?;
    let original = format.parse(&read_text(&path)?)?;

    let applied = ctx
        .orchestrator
        .resolve_and_apply(&ctx.cwd, ctx.branch_override.clone(), &original)
        .await?;
    let rendered = format.render(&applied.document)?;

    match target {
        ApplyTarget::Stdout => print!("{rendered}"),
        ApplyTarget::File(output) => {
            let output = NormalizedPath::new(ctx.cwd.to_native().join(output));
            write_text(&output, &rendered)?;
            eprintln!(
                "{} {} ({} parameters, branch {})",
                "Wrote".green().bold(),
                output,
                applied.resolution.parameters.len(),
                applied.resolution.branch.name.cyan()
            );
        }
        ApplyTarget::Diff => {
            let before = format.render(&original)?;
            print!("{}", unified_diff(path.as_str(), &before, &rendered));
        }
    }
    Ok(())
}

/// Unified diff between two renderings; empty when they are equal.
fn unified_diff(name: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }
    let diff = TextDiff::from_lines(before, after);
    diff.unified_diff()
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_shows_only_changed_lines() {
        let diff = unified_diff(
            "serverless.yml",
            "service: app-((env))\nregion: eu\n",
            "service: app-prod\nregion: eu\n",
        );

        assert!(diff.contains("--- a/serverless.yml"));
        assert!(diff.contains("-service: app-((env))"));
        assert!(diff.contains("+service: app-prod"));
        assert!(!diff.contains("-region"));
    }

    #[test]
    fn identical_renderings_produce_no_diff() {
        assert_eq!(unified_diff("a.json", "{}\n", "{}\n"), "");
    }
}
