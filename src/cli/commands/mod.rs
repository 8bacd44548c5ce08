//! Command implementations, one module per subcommand.

pub mod add;
pub mod audit_cmd;
pub mod delete;
pub mod edit;
pub mod export;
pub mod generate;
pub mod init;
pub mod list;
pub mod show;
