//! tsc process runner.
//!
//! This crate resolves and invokes the TypeScript compiler as an opaque
//! subprocess. The binary is expected in the workspace `node_modules/.bin`;
//! under Yarn PnP, where no binary is materialized on disk, the invocation
//! goes through `yarn tsc` instead.
//!
//! # Example
//!
//! ```ignore
//! use camino::Utf8Path;
//! use tsc_runner::{run_tsc, uses_pnp};
//!
//! #[tokio::main]
//! async fn main() {
//!     let root = Utf8Path::new("/path/to/project");
//!     let args = vec!["--noEmit".to_string()];
//!     let result = run_tsc(&args, root, uses_pnp(root)).await.unwrap();
//!     println!("tsc exited with {}", result.exit_code);
//! }
//! ```

mod runner;

pub use runner::{run_tsc, tsc_binary_path, uses_pnp, SpawnResult, TscError};
