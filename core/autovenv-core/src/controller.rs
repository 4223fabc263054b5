//! The lifecycle decision logic, run once per prompt.
//!
//! Two booleans drive every decision: `probe` (is some environment
//! active) and `owned` (did we activate it).
//!
//! ```text
//! probe owned  marker   decision
//! true  false  any    → no-op: a manually activated environment is
//!                       never touched
//! false any    found  → activate; on success take ownership, fire
//!                       activation hooks
//! true  true   found  → no-op: already in the right state
//! true  true   none   → deactivate; on success release ownership, fire
//!                       deactivation hooks
//! false any    none   → no-op
//! ```
//!
//! The entry point is idempotent: re-invoking it with unchanged state
//! performs no activation or deactivation and fires no hooks, so a
//! trigger broader than "directory changed" (every prompt) is fine.
//!
//! All state is held by the controller value itself - no globals - so
//! independent sessions can coexist in one process.

use std::path::{Path, PathBuf};

use crate::boundary;
use crate::environment::Environment;
use crate::hooks::HookRegistry;
use crate::locator::{self, DEFAULT_MARKER};
use crate::ownership::Ownership;

/// Per-session settings fixed at construction.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Canonicalized home directory; ceiling for walks inside the user tree.
    pub home: PathBuf,
    /// Ceiling for walks outside the user tree.
    pub root: PathBuf,
    /// Marker directory name to search for.
    pub marker: String,
    /// Ownership carried over from earlier in the same shell session.
    pub initially_owned: bool,
}

impl SessionOptions {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            root: PathBuf::from("/"),
            marker: DEFAULT_MARKER.to_string(),
            initially_owned: false,
        }
    }
}

/// What a controller step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Activated(PathBuf),
    Deactivated,
    NoChange,
}

/// One session's lifecycle state machine.
pub struct LifecycleController<E: Environment> {
    env: E,
    ownership: Ownership,
    hooks: HookRegistry,
    home: PathBuf,
    root: PathBuf,
    marker: String,
}

impl<E: Environment> LifecycleController<E> {
    pub fn new(env: E, options: SessionOptions) -> Self {
        Self {
            env,
            ownership: Ownership::new(options.initially_owned),
            hooks: HookRegistry::new(),
            home: options.home,
            root: options.root,
            marker: options.marker,
        }
    }

    /// Registry for user hooks; callers register before the first step.
    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    pub fn is_owned(&self) -> bool {
        self.ownership.is_owned()
    }

    pub fn environment(&self) -> &E {
        &self.env
    }

    /// Runs one decision step against the current working directory.
    ///
    /// Invoke at session start and then on every prompt. Failures of the
    /// external activate/deactivate primitives are reported and absorbed;
    /// the next prompt retries naturally.
    pub fn on_prompt(&mut self, cwd: &Path) -> Transition {
        let probe = self.env.probe_active();
        let owned = self.ownership.is_owned();

        if probe && !owned {
            tracing::debug!("Manually activated environment present; leaving it alone");
            return Transition::NoChange;
        }

        let stop = boundary::resolve(cwd, &self.home, &self.root);
        match locator::find_marker(cwd, &stop, &self.marker) {
            Some(marker_path) => {
                if probe {
                    // Our environment is already active for this tree.
                    return Transition::NoChange;
                }
                self.try_activate(marker_path)
            }
            None => {
                if owned && probe {
                    self.try_deactivate()
                } else {
                    Transition::NoChange
                }
            }
        }
    }

    fn try_activate(&mut self, marker_path: PathBuf) -> Transition {
        match self.env.activate(&marker_path) {
            Ok(()) => {
                self.ownership.set_owned();
                tracing::debug!(marker = %marker_path.display(), "Activated environment");
                self.hooks.run_activate_hooks();
                Transition::Activated(marker_path)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Activation failed; will retry on next prompt");
                Transition::NoChange
            }
        }
    }

    fn try_deactivate(&mut self) -> Transition {
        match self.env.deactivate() {
            Ok(()) => {
                self.ownership.clear_owned();
                tracing::debug!("Deactivated environment");
                self.hooks.run_deactivate_hooks();
                Transition::Deactivated
            }
            Err(err) => {
                // Only release ownership once the environment is confirmed
                // gone; releasing it while something is still active would
                // make a later step mistake our environment for a manual one.
                if self.env.probe_active() {
                    tracing::warn!(
                        error = %err,
                        "Deactivation failed and environment still active; keeping ownership"
                    );
                } else {
                    self.ownership.clear_owned();
                    tracing::warn!(
                        error = %err,
                        "Deactivation reported failure but environment is gone; releasing ownership"
                    );
                }
                Transition::NoChange
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AutovenvError;
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::tempdir;

    /// Scripted environment that records primitive calls.
    #[derive(Default)]
    struct MockEnvironment {
        active: bool,
        fail_activate: bool,
        fail_deactivate: bool,
        /// When a failed deactivate still tears the environment down.
        deactivate_fails_but_clears: bool,
        calls: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Environment for MockEnvironment {
        fn probe_active(&self) -> bool {
            self.active
        }

        fn activate(&mut self, marker: &Path) -> crate::error::Result<()> {
            self.calls.borrow_mut().push("activate");
            if self.fail_activate {
                return Err(AutovenvError::ActivationFailed {
                    path: marker.to_path_buf(),
                    details: "scripted failure".to_string(),
                });
            }
            self.active = true;
            Ok(())
        }

        fn deactivate(&mut self) -> crate::error::Result<()> {
            self.calls.borrow_mut().push("deactivate");
            if self.fail_deactivate {
                if self.deactivate_fails_but_clears {
                    self.active = false;
                }
                return Err(AutovenvError::DeactivationFailed {
                    details: "scripted failure".to_string(),
                });
            }
            self.active = false;
            Ok(())
        }
    }

    fn controller_in(
        home: &Path,
        env: MockEnvironment,
    ) -> LifecycleController<MockEnvironment> {
        LifecycleController::new(env, SessionOptions::new(home))
    }

    fn make_marker(dir: &Path) -> PathBuf {
        let marker = dir.join(DEFAULT_MARKER);
        fs::create_dir_all(&marker).unwrap();
        marker
    }

    #[test]
    fn activates_when_marker_found_and_nothing_active() {
        let temp = tempdir().unwrap();
        let marker = make_marker(temp.path());
        let mut controller = controller_in(temp.path(), MockEnvironment::default());

        let transition = controller.on_prompt(temp.path());

        assert_eq!(transition, Transition::Activated(marker));
        assert!(controller.is_owned());
    }

    #[test]
    fn second_prompt_in_same_directory_is_a_no_op() {
        let temp = tempdir().unwrap();
        make_marker(temp.path());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let env = MockEnvironment {
            calls: Rc::clone(&calls),
            ..Default::default()
        };
        let mut controller = controller_in(temp.path(), env);

        controller.on_prompt(temp.path());
        let transition = controller.on_prompt(temp.path());

        assert_eq!(transition, Transition::NoChange);
        assert_eq!(*calls.borrow(), vec!["activate"]);
    }

    #[test]
    fn deactivates_when_leaving_marked_tree() {
        let temp = tempdir().unwrap();
        make_marker(temp.path().join("project").as_path());
        let project = temp.path().join("project");
        fs::create_dir_all(temp.path().join("elsewhere")).unwrap();
        let mut controller = controller_in(temp.path(), MockEnvironment::default());

        controller.on_prompt(&project);
        assert!(controller.is_owned());

        let transition = controller.on_prompt(&temp.path().join("elsewhere"));
        assert_eq!(transition, Transition::Deactivated);
        assert!(!controller.is_owned());
    }

    #[test]
    fn never_touches_manually_activated_environment() {
        let temp = tempdir().unwrap();
        make_marker(temp.path());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let env = MockEnvironment {
            active: true,
            calls: Rc::clone(&calls),
            ..Default::default()
        };
        let mut controller = controller_in(temp.path(), env);

        let transition = controller.on_prompt(temp.path());

        assert_eq!(transition, Transition::NoChange);
        assert!(!controller.is_owned());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn manual_environment_survives_unmarked_directory_too() {
        let temp = tempdir().unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let env = MockEnvironment {
            active: true,
            calls: Rc::clone(&calls),
            ..Default::default()
        };
        let mut controller = controller_in(temp.path(), env);

        let transition = controller.on_prompt(temp.path());

        assert_eq!(transition, Transition::NoChange);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn no_marker_and_nothing_active_is_a_no_op() {
        let temp = tempdir().unwrap();
        let mut controller = controller_in(temp.path(), MockEnvironment::default());

        assert_eq!(controller.on_prompt(temp.path()), Transition::NoChange);
        assert!(!controller.is_owned());
    }

    #[test]
    fn activation_failure_leaves_ownership_clear() {
        let temp = tempdir().unwrap();
        make_marker(temp.path());
        let env = MockEnvironment {
            fail_activate: true,
            ..Default::default()
        };
        let mut controller = controller_in(temp.path(), env);

        let transition = controller.on_prompt(temp.path());

        assert_eq!(transition, Transition::NoChange);
        assert!(!controller.is_owned());
    }

    #[test]
    fn failed_activation_retries_on_next_prompt() {
        let temp = tempdir().unwrap();
        make_marker(temp.path());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let env = MockEnvironment {
            fail_activate: true,
            calls: Rc::clone(&calls),
            ..Default::default()
        };
        let mut controller = controller_in(temp.path(), env);

        controller.on_prompt(temp.path());
        controller.on_prompt(temp.path());

        assert_eq!(*calls.borrow(), vec!["activate", "activate"]);
    }

    #[test]
    fn deactivation_failure_keeps_ownership_while_still_active() {
        let temp = tempdir().unwrap();
        let env = MockEnvironment {
            active: true,
            fail_deactivate: true,
            ..Default::default()
        };
        let mut controller = LifecycleController::new(
            env,
            SessionOptions {
                initially_owned: true,
                ..SessionOptions::new(temp.path())
            },
        );

        let transition = controller.on_prompt(temp.path());

        assert_eq!(transition, Transition::NoChange);
        assert!(controller.is_owned());
    }

    #[test]
    fn deactivation_failure_releases_ownership_when_probe_confirms_gone() {
        let temp = tempdir().unwrap();
        let env = MockEnvironment {
            active: true,
            fail_deactivate: true,
            deactivate_fails_but_clears: true,
            ..Default::default()
        };
        let mut controller = LifecycleController::new(
            env,
            SessionOptions {
                initially_owned: true,
                ..SessionOptions::new(temp.path())
            },
        );

        controller.on_prompt(temp.path());

        assert!(!controller.is_owned());
    }

    #[test]
    fn stale_ownership_without_active_environment_reactivates() {
        // Prior deactivation happened outside this system: owned carried
        // over as true but nothing is active. A marked directory should
        // activate normally.
        let temp = tempdir().unwrap();
        let marker = make_marker(temp.path());
        let mut controller = LifecycleController::new(
            MockEnvironment::default(),
            SessionOptions {
                initially_owned: true,
                ..SessionOptions::new(temp.path())
            },
        );

        let transition = controller.on_prompt(temp.path());

        assert_eq!(transition, Transition::Activated(marker));
        assert!(controller.is_owned());
    }

    #[test]
    fn hooks_fire_once_per_transition_in_order() {
        let temp = tempdir().unwrap();
        make_marker(temp.path().join("project").as_path());
        let project = temp.path().join("project");
        fs::create_dir_all(temp.path().join("plain")).unwrap();
        let mut controller = controller_in(temp.path(), MockEnvironment::default());

        let log = Rc::new(RefCell::new(Vec::new()));
        for tag in ["a1", "a2"] {
            let log = Rc::clone(&log);
            controller.hooks_mut().add_activate_hook(tag, move || {
                log.borrow_mut().push(tag);
                Ok(())
            });
        }
        let log_d = Rc::clone(&log);
        controller.hooks_mut().add_deactivate_hook("d1", move || {
            log_d.borrow_mut().push("d1");
            Ok(())
        });

        controller.on_prompt(&project);
        controller.on_prompt(&project); // idempotent: no duplicate firing
        controller.on_prompt(&temp.path().join("plain"));

        assert_eq!(*log.borrow(), vec!["a1", "a2", "d1"]);
    }
}
