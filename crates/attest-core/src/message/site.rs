//! User messages and call-site capture.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

/// Optional user text attached to an assertion.
///
/// The lazy form is only evaluated when the assertion fails, so expensive
/// formatting costs nothing on the passing path.
#[derive(Default)]
pub enum Message<'a> {
    #[default]
    Empty,
    Text(Cow<'a, str>),
    Lazy(Box<dyn FnOnce() -> String + 'a>),
}

impl<'a> Message<'a> {
    pub fn lazy<F>(f: F) -> Self
    where
        F: FnOnce() -> String + 'a,
    {
        Message::Lazy(Box::new(f))
    }

    /// Produces the text, running a lazy closure if there is one.
    pub fn resolve(self) -> String {
        match self {
            Message::Empty => String::new(),
            Message::Text(text) => text.into_owned(),
            Message::Lazy(f) => f(),
        }
    }
}

impl fmt::Debug for Message<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Empty => f.write_str("Message::Empty"),
            Message::Text(text) => f.debug_tuple("Message::Text").field(text).finish(),
            Message::Lazy(_) => f.write_str("Message::Lazy(..)"),
        }
    }
}

impl From<()> for Message<'_> {
    fn from(_: ()) -> Self {
        Message::Empty
    }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(text: &'a str) -> Self {
        Message::Text(Cow::Borrowed(text))
    }
}

impl From<String> for Message<'_> {
    fn from(text: String) -> Self {
        Message::Text(Cow::Owned(text))
    }
}

impl<'a> From<Option<&'a str>> for Message<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(Message::Empty, Message::from)
    }
}

/// Source text and location of an assertion call.
///
/// Populated by the `assert_that!` macro family; plain function calls only
/// know their location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallSite {
    pub actual_expression: Option<&'static str>,
    pub constraint_expression: Option<&'static str>,
    pub location: Option<&'static Location<'static>>,
}

impl CallSite {
    pub fn new(actual_expression: &'static str, constraint_expression: &'static str) -> Self {
        Self {
            actual_expression: Some(actual_expression),
            constraint_expression: Some(constraint_expression),
            location: None,
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    /// Records the caller's location unless one is already set.
    #[track_caller]
    pub fn here(self) -> Self {
        if self.location.is_some() {
            self
        } else {
            self.with_location(Location::caller())
        }
    }

    /// Both expression texts, when the call site captured them.
    pub fn expressions(&self) -> Option<(&'static str, &'static str)> {
        self.actual_expression.zip(self.constraint_expression)
    }

    /// `file:line`, if known.
    pub fn location_text(&self) -> Option<String> {
        self.location
            .map(|location| format!("{}:{}", location.file(), location.line()))
    }
}
