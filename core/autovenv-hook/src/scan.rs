//! Per-prompt lifecycle scan.
//!
//! Called by shell precmd hooks with the current directory. Rebuilds the
//! session from the shell's exported state (`VIRTUAL_ENV` for the probe,
//! `AUTOVENV_OWNED` for ownership), runs one controller step, and prints
//! the resulting shell code. A step that changes nothing prints nothing,
//! so spurious triggers cost one upward walk and no eval.
//!
//! ## Performance
//!
//! The shell waits for this output before drawing the prompt, so the
//! whole scan is a handful of stat calls plus one config read.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use autovenv_core::{
    config, new_script_handle, AutovenvConfig, LifecycleController, ScriptHandle, SessionOptions,
    ShellEnvironment, Transition,
};
use thiserror::Error;

/// Environment variable round-tripping the ownership flag between prompt
/// invocations. Exported by the emitted script, read back on the next scan;
/// its lifetime is the shell session.
pub const OWNED_VAR: &str = "AUTOVENV_OWNED";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Home directory could not be determined")]
    NoHome,
}

/// Shell-session state captured from the process environment.
pub struct ShellState {
    pub virtual_env: Option<String>,
    pub owned: bool,
}

impl ShellState {
    pub fn capture() -> Self {
        Self {
            virtual_env: std::env::var("VIRTUAL_ENV").ok(),
            owned: std::env::var(OWNED_VAR).map(|v| v == "1").unwrap_or(false),
        }
    }
}

// MARK: - Public API

pub fn run(path: &str, pid: u32) -> Result<(), ScanError> {
    let home = dirs::home_dir().ok_or(ScanError::NoHome)?;
    let config = config::load_config();
    let state = ShellState::capture();

    if let Some(script) = scan_once(path, &home, &config, &state) {
        tracing::debug!(pid, cwd = %path, "Emitting lifecycle script");
        println!("{script}");
    } else {
        tracing::debug!(pid, cwd = %path, "No transition");
    }
    Ok(())
}

/// Runs one controller step and returns the script to eval, or `None`
/// when the step changed nothing.
pub fn scan_once(
    cwd: &str,
    home: &Path,
    config: &AutovenvConfig,
    state: &ShellState,
) -> Option<String> {
    // Canonicalize once up front; the walk itself is plain path
    // arithmetic, so a symlinked home and its target resolve to the same
    // ancestor chain.
    let cwd = canonicalized(Path::new(cwd));
    let home = canonicalized(home);

    let script = new_script_handle();
    let env = ShellEnvironment::new(state.virtual_env.as_deref(), Rc::clone(&script));
    let options = SessionOptions {
        home,
        root: PathBuf::from("/"),
        marker: config.marker.clone(),
        initially_owned: state.owned,
    };
    let mut controller = LifecycleController::new(env, options);
    register_config_hooks(&mut controller, config, &script);

    match controller.on_prompt(&cwd) {
        Transition::Activated(_) => script.borrow_mut().push(format!("export {OWNED_VAR}=1")),
        Transition::Deactivated => script.borrow_mut().push(format!("export {OWNED_VAR}=0")),
        Transition::NoChange => return None,
    }
    let rendered = script.borrow().render();
    Some(rendered)
}

/// Registers the configured shell snippets as hooks that append to the
/// emitted script, preserving registration order.
fn register_config_hooks(
    controller: &mut LifecycleController<ShellEnvironment>,
    config: &AutovenvConfig,
    script: &ScriptHandle,
) {
    for (i, snippet) in config.on_activate.iter().enumerate() {
        let sink = Rc::clone(script);
        let line = snippet.clone();
        controller
            .hooks_mut()
            .add_activate_hook(format!("config:on_activate[{i}]"), move || {
                sink.borrow_mut().push(line.clone());
                Ok(())
            });
    }
    for (i, snippet) in config.on_deactivate.iter().enumerate() {
        let sink = Rc::clone(script);
        let line = snippet.clone();
        controller
            .hooks_mut()
            .add_deactivate_hook(format!("config:on_deactivate[{i}]"), move || {
                sink.borrow_mut().push(line.clone());
                Ok(())
            });
    }
}

pub(crate) fn canonicalized(path: &Path) -> PathBuf {
    // canonicalize fails on non-existent paths; fall back to the input
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
