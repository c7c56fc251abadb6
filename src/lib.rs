//! userdir - An in-memory user directory service
//!
//! The [`directory`] engine owns the user collection; [`http_server`] exposes
//! it as REST/JSON; [`cli`] wires configuration, logging and the runtime.

pub mod cli;
pub mod directory;
pub mod http_server;
pub mod observability;
