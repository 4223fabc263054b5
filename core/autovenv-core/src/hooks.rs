//! User-registered callbacks fired after lifecycle transitions.
//!
//! Two independent lists, one per transition direction. Registration is
//! append-only for the session: no removal, no de-duplication, constant
//! time. Invocation runs every callback in registration order; a failing
//! hook is logged and skipped so the remaining hooks still run - the
//! state transition has already committed by the time hooks fire, and a
//! misbehaving user hook must not leave the lifecycle inconsistent.

/// Result type for hook callbacks. Hooks report failure as a plain
/// message; the registry logs it and moves on.
pub type HookResult = Result<(), String>;

type HookFn = Box<dyn FnMut() -> HookResult>;

struct NamedHook {
    name: String,
    callback: HookFn,
}

/// Ordered activation and deactivation callback lists for one session.
#[derive(Default)]
pub struct HookRegistry {
    on_activate: Vec<NamedHook>,
    on_deactivate: Vec<NamedHook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a callback to run after each activation.
    ///
    /// The name is only used for diagnostics; registering the same name
    /// twice registers two hooks.
    pub fn add_activate_hook(
        &mut self,
        name: impl Into<String>,
        callback: impl FnMut() -> HookResult + 'static,
    ) {
        self.on_activate.push(NamedHook {
            name: name.into(),
            callback: Box::new(callback),
        });
    }

    /// Appends a callback to run after each deactivation.
    pub fn add_deactivate_hook(
        &mut self,
        name: impl Into<String>,
        callback: impl FnMut() -> HookResult + 'static,
    ) {
        self.on_deactivate.push(NamedHook {
            name: name.into(),
            callback: Box::new(callback),
        });
    }

    /// Runs all activation hooks in registration order.
    pub fn run_activate_hooks(&mut self) {
        run_all(&mut self.on_activate, "activate");
    }

    /// Runs all deactivation hooks in registration order.
    pub fn run_deactivate_hooks(&mut self) {
        run_all(&mut self.on_deactivate, "deactivate");
    }

    pub fn activate_hook_count(&self) -> usize {
        self.on_activate.len()
    }

    pub fn deactivate_hook_count(&self) -> usize {
        self.on_deactivate.len()
    }
}

fn run_all(hooks: &mut [NamedHook], phase: &str) {
    for hook in hooks {
        if let Err(details) = (hook.callback)() {
            tracing::warn!(hook = %hook.name, phase, %details, "Hook failed");
        }
    }
}
