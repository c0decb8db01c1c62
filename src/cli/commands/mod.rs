//! One module per subcommand; each exposes an `execute` entry point.

pub mod asset;
pub mod audit_cmd;
pub mod completions;
pub mod folder;
pub mod init;
pub mod login;
pub mod note;
pub mod passwd;
pub mod version;
