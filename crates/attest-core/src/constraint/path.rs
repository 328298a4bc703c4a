//! File system constraints.

use std::fs;
use std::path::Path;

use super::{Constraint, ConstraintResult, Describe};
use crate::message::format_value;

#[derive(Debug, Clone, Copy, Default)]
pub struct FileExistsConstraint;

impl Describe for FileExistsConstraint {
    fn description(&self) -> String {
        "file exists".to_string()
    }
}

impl<T: AsRef<Path> + ?Sized> Constraint<T> for FileExistsConstraint {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let path = actual.as_ref();
        ConstraintResult::new(self, format_value(path), path.is_file())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryExistsConstraint;

impl Describe for DirectoryExistsConstraint {
    fn description(&self) -> String {
        "directory exists".to_string()
    }
}

impl<T: AsRef<Path> + ?Sized> Constraint<T> for DirectoryExistsConstraint {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let path = actual.as_ref();
        ConstraintResult::new(self, format_value(path), path.is_dir())
    }
}

/// Satisfied by an existing directory with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryEmptyConstraint;

impl Describe for DirectoryEmptyConstraint {
    fn description(&self) -> String {
        "an empty directory".to_string()
    }
}

impl<T: AsRef<Path> + ?Sized> Constraint<T> for DirectoryEmptyConstraint {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let path = actual.as_ref();
        match fs::read_dir(path) {
            Ok(mut entries) => {
                let is_empty = entries.next().is_none();
                ConstraintResult::new(self, format_value(path), is_empty)
            }
            Err(err) => ConstraintResult::new(self, format_value(path), false)
                .with_detail(format!("Directory could not be read: {}", err)),
        }
    }
}

resolves_to_self!(
    [] FileExistsConstraint,
    [] DirectoryExistsConstraint,
    [] DirectoryEmptyConstraint,
);
