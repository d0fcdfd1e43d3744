//! # CLI Module
//!
//! Command-line front end for a small demo application built on the
//! [`Engine`](crate::Engine).
//!
//! ## Commands
//!
//! ### `serve`
//!
//! ```bash
//! cweb serve --addr 127.0.0.1:9999 --templates ./templates --static ./public --token s3cret
//! ```
//!
//! - `--addr <ADDR>` - Listen address (default `127.0.0.1:9999`, env `CWEB_ADDR`)
//! - `--templates <DIR>` - Load HTML templates and mount `GET /page/:name`
//! - `--static <DIR>` - Serve files under `/static/*filepath`
//! - `--token <TOKEN>` - Protect `/admin` with an `Authorization` token
//!
//! ### `routes`
//!
//! Print the demo application's route table, one `METHOD pattern` per line.

mod commands;


pub use commands::{demo_engine, run_cli, Cli, Commands};
