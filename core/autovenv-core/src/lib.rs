//! # autovenv-core
//!
//! Core library for autovenv: automatic activation and deactivation of a
//! Python virtual environment as the working directory changes.
//!
//! A session walks upward from the current directory - stopping at home
//! inside the user's tree, at the root elsewhere - looking for a `.venv`
//! marker directory. When one is found and nothing is active, the
//! environment is activated and the session takes ownership; when the
//! session leaves the marked tree, it deactivates only what it owns. A
//! manually activated environment is never touched.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency.
//! - **Not thread-safe**: One session per shell; sessions never share state.
//! - **Graceful degradation**: Missing config returns defaults, a missing
//!   marker is a normal outcome, and failed primitives are retried on the
//!   next prompt.
//! - **No globals**: All state lives in an explicit controller value, so
//!   independent sessions can coexist in one process.

// Public modules
pub mod boundary;
pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod hooks;
pub mod locator;
pub mod ownership;

// Re-export commonly used items at crate root
pub use boundary::Boundary;
pub use config::{load_config, AutovenvConfig};
pub use controller::{LifecycleController, SessionOptions, Transition};
pub use environment::{new_script_handle, Environment, ScriptHandle, ShellEnvironment, ShellScript};
pub use error::{AutovenvError, Result};
pub use hooks::{HookRegistry, HookResult};
pub use locator::{find_marker, DEFAULT_MARKER};
pub use ownership::Ownership;
