// src/lib.rs
// jira-mcp - Multi-tenant MCP server for Jira Cloud

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod auth;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod http;
pub mod mcp;
pub mod web;

pub use error::{JiraError, Result};
