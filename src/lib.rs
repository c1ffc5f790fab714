//! Configuration loader for the JWM window manager.
//!
//! Turns a `.jwmrc` markup file (plus everything it includes) into a single
//! [`config::WmConfig`]. Problems in the file never stop the load; each one
//! becomes a [`diagnostics::Diagnostic`] and the offending element is
//! skipped. Only two conditions are fatal: includes nested too deeply, and
//! no root configuration file that can be opened.
//!
//! The crate is organised in four layers:
//!
//! - **[`lexer`]**, **[`tree`]**: markup text to an owned tag tree
//! - **[`include`]**, **[`exec`]**: include resolution, files and `exec:` generators
//! - **[`dispatch`]** and the section builders ([`menu`], [`keys`], [`style`],
//!   [`feel`], [`group`], [`tray`]): tag tree to configuration
//! - **[`loader`]**: root file selection, walk, and the [`validate`] passes
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod feel;
pub mod group;
pub mod include;
pub mod keys;
pub mod lexer;
pub mod loader;
pub mod logging;
pub mod menu;
pub mod style;
pub mod tray;
pub mod tree;
pub mod validate;
