//! kubectl plugin discovery.
//!
//! kubectl resolves `kubectl foo-bar baz` by looking for executables named
//! `kubectl-foo_bar-baz`, then `kubectl-foo_bar`, on `PATH`. The same search
//! decides whether an unknown first argument is a plugin or a typo.

use std::env;
use std::path::{Path, PathBuf};

/// Capability to find a plugin executable by its name without the
/// `kubectl-` prefix.
pub trait PluginLookup {
    fn lookup(&self, name: &str) -> Option<PathBuf>;
}

/// Searches `PATH` the way kubectl's default plugin handler does.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathPluginLookup;

const PLUGIN_PREFIX: &str = "kubectl";

impl PluginLookup for PathPluginLookup {
    fn lookup(&self, name: &str) -> Option<PathBuf> {
        find_executable(&format!("{}-{}", PLUGIN_PREFIX, name))
    }
}

/// First executable named `file_name` in a `PATH` directory.
pub fn find_executable(file_name: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(file_name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// True when the leading non-flag arguments name an installed plugin.
///
/// Dashes inside an argument become underscores and arguments are joined
/// with dashes; the longest name is tried first.
pub fn is_plugin(args: &[String], lookup: &dyn PluginLookup) -> bool {
    let mut names: Vec<String> = args
        .iter()
        .take_while(|arg| !arg.starts_with('-'))
        .map(|arg| arg.replace('-', "_"))
        .collect();

    while !names.is_empty() {
        if lookup.lookup(&names.join("-")).is_some() {
            return true;
        }
        names.pop();
    }
    false
}
