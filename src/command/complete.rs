//! Shell completion passthrough with kubecolor's flags mixed in.
//!
//! Shells complete `kubectl` by running `kubectl __complete <args> <partial>`
//! and reading one candidate per line, followed by a `:<directive>` line.
//! When the partial word is a flag, kubecolor's own flags are offered too.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use super::KubectlExit;
use crate::config::{Config, FlagKind, FLAGS};

/// Cobra's "do not add a space after the completion" directive.
pub const DIRECTIVE_NO_SPACE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompleteOutput {
    pub candidates: Vec<Candidate>,
    pub directive: u32,
}

impl CompleteOutput {
    /// Parse kubectl's `__complete` output.
    pub fn parse(s: &str) -> Self {
        let mut output = Self::default();
        for line in s.lines() {
            if let Some(code) = line.strip_prefix(':') {
                output.directive = code.trim().parse().unwrap_or(0);
                break;
            }
            if line.is_empty() {
                continue;
            }
            let (name, description) = line.split_once('\t').unwrap_or((line, ""));
            output.candidates.push(Candidate {
                name: name.to_string(),
                description: description.to_string(),
            });
        }
        output
    }

    pub fn render(&self, with_descriptions: bool) -> String {
        let mut out = String::new();
        for candidate in &self.candidates {
            if with_descriptions && !candidate.description.is_empty() {
                out.push_str(&format!("{}\t{}\n", candidate.name, candidate.description));
            } else {
                out.push_str(&format!("{}\n", candidate.name));
            }
        }
        out.push_str(&format!(":{}\n", self.directive));
        out
    }
}

/// Kubecolor flags starting with `partial`, plus the directive they need.
///
/// A lone match on a flag that takes a value gets `=` appended so the shell
/// can continue with the value.
pub fn flag_candidates(partial: &str) -> (Vec<Candidate>, u32) {
    let mut directive = 0;
    let mut wants_value = false;
    let mut candidates: Vec<Candidate> = FLAGS
        .iter()
        .filter(|f| f.name.starts_with(partial))
        .map(|f| {
            if f.kind == FlagKind::RequiredValue {
                directive = DIRECTIVE_NO_SPACE;
                wants_value = true;
            }
            Candidate {
                name: f.name.to_string(),
                description: f.description.to_string(),
            }
        })
        .collect();
    if candidates.len() == 1 && wants_value {
        candidates[0].name.push('=');
    }
    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    (candidates, directive)
}

/// Merge kubecolor flags into kubectl's candidates for `partial`.
pub fn merge_completions(kubectl_output: &str, partial: &str) -> CompleteOutput {
    let mut output = CompleteOutput::parse(kubectl_output);
    let (flags, directive) = flag_candidates(partial);
    output.candidates.extend(flags);
    if directive != 0 {
        output.directive = directive;
    }

    let prefix = match partial.split_once('=') {
        Some((_, after)) if partial.starts_with('-') => after,
        _ => partial,
    };
    output.candidates.retain(|c| c.name.starts_with(prefix));
    output
}

/// Run `kubectl __complete` and print its candidates, adding kubecolor
/// flags when completing a flag.
pub fn inject_completions(raw_args: &[String], config: &Config) -> Result<()> {
    let partial = raw_args.last().map(String::as_str).unwrap_or("");
    let with_descriptions = config
        .args_passthrough
        .first()
        .map_or(true, |a| a != "__completeNoDesc");

    let mut kubectl_args = config.args_passthrough.clone();
    // a removed kubecolor flag still needs kubectl to complete flags
    if kubectl_args.last().map(String::as_str) != Some(partial) {
        kubectl_args.push("-".to_string());
    }

    let output = Command::new(&config.kubectl)
        .args(&kubectl_args)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .output()
        .with_context(|| format!("Failed to run {} __complete", config.kubectl))?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    tracing::debug!(args = ?kubectl_args, output = %stdout, "ran __complete");

    let mut out = std::io::stdout().lock();
    if !output.status.success() {
        out.write_all(&output.stdout)?;
        return Err(KubectlExit::from_status(output.status).into());
    }

    if !partial.starts_with('-') {
        out.write_all(&output.stdout)?;
        return Ok(());
    }
    let merged = merge_completions(&stdout, partial);
    out.write_all(merged.render(with_descriptions).as_bytes())?;
    Ok(())
}
