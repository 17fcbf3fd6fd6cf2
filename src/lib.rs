//! A small line-oriented command engine.
//!
//! Each input line is classified into exactly one execution mode (plain
//! command, pipeline, redirection, `;` sequence, `&&`/`||` chain, background
//! job or one of the compound file operators) and driven to completion on a
//! single thread, with all concurrency coming from child processes.

pub mod builtin;
pub mod classify;
pub mod compound;
pub mod conditional;
pub mod config;
pub mod error;
pub mod eval;
pub mod fd;
pub mod global;
pub mod job;
pub mod launch;
pub mod parser;
pub mod pipeline;
pub mod redirect;
pub mod sequence;
pub mod types;


pub use config::Config;
pub use error::{Error, Result};
pub use eval::{eval, Flow};
pub use global::State;
