//! `FileAssert` and `DirectoryAssert`.

use std::fs;
use std::path::Path;

use attest_core::constraint::{Constraint, ConstraintResult, Describe, ResolveConstraint};
use attest_core::{is, AssertResult, AssertionError, ConstraintExt, Message};

use crate::assert::Assert;
use crate::context::TestExecutionContext;

/// Byte-for-byte comparison with the contents of an expected file.
#[derive(Debug, Clone)]
struct ContentsEqualConstraint {
    expected_path: String,
    expected: Vec<u8>,
}

impl Describe for ContentsEqualConstraint {
    fn description(&self) -> String {
        format!("contents of {}", self.expected_path)
    }

    fn display_name(&self) -> String {
        "FileContentsEqual".to_string()
    }
}

impl Constraint<FileContents> for ContentsEqualConstraint {
    fn apply_to(&self, actual: &FileContents) -> ConstraintResult {
        let actual_text = format!("contents of {}", actual.path);
        if actual.bytes == self.expected {
            return ConstraintResult::new(self, actual_text, true);
        }

        let offset = self
            .expected
            .iter()
            .zip(&actual.bytes)
            .position(|(e, a)| e != a)
            .unwrap_or_else(|| self.expected.len().min(actual.bytes.len()));
        let detail = if self.expected.len() == actual.bytes.len() {
            format!(
                "Stream lengths are both {}. Streams differ at offset {}.",
                self.expected.len(),
                offset
            )
        } else {
            format!(
                "Expected Stream length {} but was {}.",
                self.expected.len(),
                actual.bytes.len()
            )
        };
        ConstraintResult::new(self, actual_text, false).with_detail(detail)
    }
}

impl ResolveConstraint<FileContents> for ContentsEqualConstraint {
    type Resolved = Self;

    fn resolve(self) -> AssertResult<Self> {
        Ok(self)
    }
}

#[derive(Debug)]
struct FileContents {
    path: String,
    bytes: Vec<u8>,
}

impl FileContents {
    fn read(path: &Path) -> AssertResult<Self> {
        if !path.is_file() {
            return Err(AssertionError::InvalidArgument(format!(
                "File not found: {}",
                path.display()
            )));
        }
        let bytes = fs::read(path).map_err(|err| {
            let reason = format!("{} could not be read: {}", path.display(), err);
            AssertionError::InvalidArgument(reason)
        })?;
        Ok(Self {
            path: format!("{:?}", path),
            bytes,
        })
    }
}

/// Assertions about files.
#[derive(Debug, Clone, Copy)]
pub struct FileAssert;

impl FileAssert {
    #[track_caller]
    pub fn exists<'m, P>(
        ctx: &TestExecutionContext,
        path: &P,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        P: AsRef<Path> + ?Sized,
    {
        Assert::that(ctx, path, is::existing_file(), message)
    }

    #[track_caller]
    pub fn does_not_exist<'m, P>(
        ctx: &TestExecutionContext,
        path: &P,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        P: AsRef<Path> + ?Sized,
    {
        Assert::that(ctx, path, is::not(is::existing_file()), message)
    }

    /// Compares file contents byte for byte.
    ///
    /// A missing or unreadable file is a usage error, not an assertion failure.
    #[track_caller]
    pub fn are_equal<'m>(
        ctx: &TestExecutionContext,
        expected: impl AsRef<Path>,
        actual: impl AsRef<Path>,
        message: impl Into<Message<'m>>,
    ) -> AssertResult {
        let expected = FileContents::read(expected.as_ref())?;
        let actual = FileContents::read(actual.as_ref())?;
        let constraint = ContentsEqualConstraint {
            expected_path: expected.path,
            expected: expected.bytes,
        };
        Assert::that(ctx, &actual, constraint, message)
    }
}

/// Assertions about directories.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryAssert;

impl DirectoryAssert {
    #[track_caller]
    pub fn exists<'m, P>(
        ctx: &TestExecutionContext,
        path: &P,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        P: AsRef<Path> + ?Sized,
    {
        Assert::that(ctx, path, is::existing_directory(), message)
    }

    #[track_caller]
    pub fn does_not_exist<'m, P>(
        ctx: &TestExecutionContext,
        path: &P,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        P: AsRef<Path> + ?Sized,
    {
        Assert::that(ctx, path, is::not(is::existing_directory()), message)
    }

    #[track_caller]
    pub fn is_empty<'m, P>(
        ctx: &TestExecutionContext,
        path: &P,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        P: AsRef<Path> + ?Sized,
    {
        Assert::that(ctx, path, is::empty_directory(), message)
    }

    #[track_caller]
    pub fn is_not_empty<'m, P>(
        ctx: &TestExecutionContext,
        path: &P,
        message: impl Into<Message<'m>>,
    ) -> AssertResult
    where
        P: AsRef<Path> + ?Sized,
    {
        let constraint = is::existing_directory().and(is::not(is::empty_directory()));
        Assert::that(ctx, path, constraint, message)
    }
}
