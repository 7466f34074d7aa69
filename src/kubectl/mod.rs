//! Understanding the kubectl command line being wrapped.
//!
//! kubecolor never parses kubectl's arguments fully; it only looks for the
//! subcommand and the handful of flags that change the output format.

mod plugin;
mod subcommand;

pub use plugin::{find_executable, is_plugin, PathPluginLookup, PluginLookup};
pub use subcommand::{
    inspect_subcommand_info, parse_arg_flag, OutputFormat, Subcommand, SubcommandInfo,
};
