//! The environment collaborator seam.
//!
//! The lifecycle controller never touches an environment directly; it
//! talks to an [`Environment`] implementation. [`ShellEnvironment`] is the
//! production one: a child process cannot mutate its parent shell, so it
//! buffers the exact shell lines the host shell must eval and probes the
//! `VIRTUAL_ENV` value captured at process start.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::error::{AutovenvError, Result};

/// External environment subsystem as seen by the controller.
///
/// `probe_active` reports whether *some* environment is currently active,
/// ours or not. Activation and deactivation are fallible; the controller
/// treats their success as a precondition for changing ownership.
pub trait Environment {
    fn probe_active(&self) -> bool;
    fn activate(&mut self, marker: &Path) -> Result<()>;
    fn deactivate(&mut self) -> Result<()>;
}

/// Ordered shell lines accumulated during one controller step, printed to
/// stdout afterwards for the host shell to eval.
#[derive(Debug, Default)]
pub struct ShellScript {
    lines: Vec<String>,
}

impl ShellScript {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Shared handle to the script buffer.
///
/// Single-threaded by design, like the rest of the session state; hook
/// callbacks hold clones of the same handle so their output interleaves
/// with activation lines in execution order.
pub type ScriptHandle = Rc<RefCell<ShellScript>>;

pub fn new_script_handle() -> ScriptHandle {
    Rc::new(RefCell::new(ShellScript::default()))
}

/// Environment implementation that emits commands for the host shell.
///
/// Activation sources `<marker>/bin/activate`; deactivation calls the
/// `deactivate` function that script defines. The probe starts from the
/// captured `VIRTUAL_ENV` value and tracks the state the emitted script
/// will produce once evaled, so a re-probe after a step sees the intended
/// post-eval state.
pub struct ShellEnvironment {
    script: ScriptHandle,
    active: bool,
}

impl ShellEnvironment {
    /// `virtual_env` is the raw `VIRTUAL_ENV` value at process start;
    /// empty counts as inactive, matching shell truthiness.
    pub fn new(virtual_env: Option<&str>, script: ScriptHandle) -> Self {
        Self {
            script,
            active: virtual_env.is_some_and(|v| !v.is_empty()),
        }
    }
}

impl Environment for ShellEnvironment {
    fn probe_active(&self) -> bool {
        self.active
    }

    fn activate(&mut self, marker: &Path) -> Result<()> {
        let activate_script = marker.join("bin").join("activate");
        if !activate_script.is_file() {
            return Err(AutovenvError::ActivationFailed {
                path: marker.to_path_buf(),
                details: "missing bin/activate script".to_string(),
            });
        }

        self.script
            .borrow_mut()
            .push(format!("source '{}'", activate_script.display()));
        self.active = true;
        Ok(())
    }

    fn deactivate(&mut self) -> Result<()> {
        self.script.borrow_mut().push("deactivate");
        self.active = false;
        Ok(())
    }
}
