//! Observers notified around every facade operation
//!
//! [`encapsulate`] runs an operation between the `begin`, `end` and `fail`
//! hooks of each registered [`Extension`]. The hooks never see the file
//! system itself, only the operation name, its path arguments and the
//! outcome.

use crate::{VfsError, VfsResult};
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

/// Describes one facade call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    name: &'static str,
    paths: Vec<String>,
}

impl Operation {
    pub fn new(name: &'static str, paths: &[&str]) -> Self {
        Operation {
            name,
            paths: paths.iter().map(|path| path.to_string()).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.paths.join(", "))
    }
}

/// Cross-cutting hooks fired around each operation
///
/// All hooks default to doing nothing. `fail` receives the current error and
/// returns the error to hand on, so an extension may substitute it.
pub trait Extension: Debug + Send + Sync {
    fn begin(&self, _operation: &Operation) {}

    fn end(&self, _operation: &Operation, _result: &dyn Debug) {}

    fn fail(&self, _operation: &Operation, error: VfsError) -> VfsError {
        error
    }
}

/// Runs `f` wrapped in the hooks of `extensions`
///
/// `begin` fires on every extension in order before `f` runs. On success
/// every extension sees `end` with the result. On failure the error is
/// passed through every extension's `fail` in order and whatever comes out
/// of the last one is returned.
pub fn encapsulate<T, F>(extensions: &[Arc<dyn Extension>], operation: Operation, f: F) -> VfsResult<T>
where
    T: Debug,
    F: FnOnce() -> VfsResult<T>,
{
    for extension in extensions {
        extension.begin(&operation);
    }
    match f() {
        Ok(result) => {
            for extension in extensions {
                extension.end(&operation, &result);
            }
            Ok(result)
        }
        Err(error) => Err(extensions
            .iter()
            .fold(error, |error, extension| extension.fail(&operation, error))),
    }
}

/// Logs every operation through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingExtension;

impl Extension for LoggingExtension {
    fn begin(&self, operation: &Operation) {
        log::debug!("{} started", operation);
    }

    fn end(&self, operation: &Operation, _result: &dyn Debug) {
        log::debug!("{} succeeded", operation);
    }

    fn fail(&self, operation: &Operation, error: VfsError) -> VfsError {
        log::warn!("{} failed: {}", operation, error);
        error
    }
}
