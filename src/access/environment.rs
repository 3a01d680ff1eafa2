//! Process environment: current directory, exit code, user and variables

use crate::extension::{encapsulate, Extension, Operation};
use crate::{VfsError, VfsResult};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The parts of the process environment application code may depend on
pub trait Environment: Debug + Send + Sync {
    fn current_directory(&self) -> VfsResult<String>;
    fn set_current_directory(&self, path: &str) -> VfsResult<()>;
    fn exit_code(&self) -> i32;
    fn set_exit_code(&self, code: i32);
    fn user_name(&self) -> String;
    fn variable(&self, name: &str) -> Option<String>;
    fn set_variable(&self, name: &str, value: &str);
}

/// A simulated environment that never touches the process
#[derive(Debug)]
pub struct MemoryEnvironment {
    state: Mutex<MemoryEnvironmentState>,
}

#[derive(Debug)]
struct MemoryEnvironmentState {
    current_directory: String,
    exit_code: i32,
    user_name: String,
    variables: HashMap<String, String>,
}

impl MemoryEnvironment {
    pub fn new(current_directory: impl Into<String>) -> Self {
        MemoryEnvironment {
            state: Mutex::new(MemoryEnvironmentState {
                current_directory: current_directory.into(),
                exit_code: 0,
                user_name: "Administrator".to_string(),
                variables: HashMap::new(),
            }),
        }
    }

    pub fn with_user_name(self, user_name: impl Into<String>) -> Self {
        self.state().user_name = user_name.into();
        self
    }

    fn state(&self) -> MutexGuard<'_, MemoryEnvironmentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryEnvironment {
    fn default() -> Self {
        Self::new(r"c:\")
    }
}

impl Environment for MemoryEnvironment {
    fn current_directory(&self) -> VfsResult<String> {
        Ok(self.state().current_directory.clone())
    }

    fn set_current_directory(&self, path: &str) -> VfsResult<()> {
        crate::path::check_path(path)
            .map_err(|err| err.with_context(|| "Could not set current directory"))?;
        self.state().current_directory = path.to_string();
        Ok(())
    }

    fn exit_code(&self) -> i32 {
        self.state().exit_code
    }

    fn set_exit_code(&self, code: i32) {
        self.state().exit_code = code;
    }

    fn user_name(&self) -> String {
        self.state().user_name.clone()
    }

    fn variable(&self, name: &str) -> Option<String> {
        self.state().variables.get(name).cloned()
    }

    fn set_variable(&self, name: &str, value: &str) {
        self.state()
            .variables
            .insert(name.to_string(), value.to_string());
    }
}

/// The environment of the running process
///
/// The exit code is only recorded here; it is up to the application to hand
/// it to `std::process::exit`.
#[derive(Debug, Default)]
pub struct SystemEnvironment {
    exit_code: AtomicI32,
}

impl SystemEnvironment {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Environment for SystemEnvironment {
    fn current_directory(&self) -> VfsResult<String> {
        let directory = std::env::current_dir().map_err(|err| {
            VfsError::from(err).with_context(|| "Could not get current directory")
        })?;
        Ok(directory.to_string_lossy().into_owned())
    }

    fn set_current_directory(&self, path: &str) -> VfsResult<()> {
        std::env::set_current_dir(path).map_err(|err| {
            VfsError::from(err)
                .with_path(path)
                .with_context(|| "Could not set current directory")
        })
    }

    fn exit_code(&self) -> i32 {
        self.exit_code.load(Ordering::SeqCst)
    }

    fn set_exit_code(&self, code: i32) {
        self.exit_code.store(code, Ordering::SeqCst);
    }

    fn user_name(&self) -> String {
        std::env::var("USERNAME")
            .or_else(|_| std::env::var("USER"))
            .unwrap_or_default()
    }

    fn variable(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn set_variable(&self, name: &str, value: &str) {
        std::env::set_var(name, value);
    }
}

/// An [`Environment`] whose calls are reported to the registered extensions
///
/// Calls that cannot fail still fire `begin` and `end`.
#[derive(Debug, Clone)]
pub struct EnvironmentAccess {
    environment: Arc<dyn Environment>,
    extensions: Vec<Arc<dyn Extension>>,
}

impl EnvironmentAccess {
    pub fn new(environment: Arc<dyn Environment>, extensions: Vec<Arc<dyn Extension>>) -> Self {
        EnvironmentAccess {
            environment,
            extensions,
        }
    }

    fn run<T: Debug>(
        &self,
        name: &'static str,
        arguments: &[&str],
        f: impl FnOnce() -> VfsResult<T>,
    ) -> VfsResult<T> {
        encapsulate(&self.extensions, Operation::new(name, arguments), f)
    }
}

impl Environment for EnvironmentAccess {
    fn current_directory(&self) -> VfsResult<String> {
        self.run("current_directory", &[], || self.environment.current_directory())
    }

    fn set_current_directory(&self, path: &str) -> VfsResult<()> {
        self.run("set_current_directory", &[path], || {
            self.environment.set_current_directory(path)
        })
    }

    fn exit_code(&self) -> i32 {
        self.run("exit_code", &[], || Ok(self.environment.exit_code()))
            .unwrap_or_default()
    }

    fn set_exit_code(&self, code: i32) {
        let _ = self.run("set_exit_code", &[code.to_string().as_str()], || {
            self.environment.set_exit_code(code);
            Ok(())
        });
    }

    fn user_name(&self) -> String {
        self.run("user_name", &[], || Ok(self.environment.user_name()))
            .unwrap_or_default()
    }

    fn variable(&self, name: &str) -> Option<String> {
        self.run("variable", &[name], || Ok(self.environment.variable(name)))
            .unwrap_or_default()
    }

    fn set_variable(&self, name: &str, value: &str) {
        let _ = self.run("set_variable", &[name], || {
            self.environment.set_variable(name, value);
            Ok(())
        });
    }
}
