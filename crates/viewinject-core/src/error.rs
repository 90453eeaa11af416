use std::fmt::{self, Display};

///
/// ErrorTree
///
/// Ordered collection of validation messages. Child trees are folded in
/// under a route prefix so nested problems keep their location.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn add(&mut self, message: impl ToString) {
        self.messages.push(message.to_string());
    }

    /// Fold a child tree in, prefixing each message with `route`.
    pub fn add_child(&mut self, route: &str, child: Self) {
        for message in child.messages {
            self.messages.push(format!("{route}: {message}"));
        }
    }

    /// Record the error side of a validation result, if any.
    pub fn add_result(&mut self, result: Result<(), String>) {
        if let Err(message) = result {
            self.messages.push(message);
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.messages.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Push a formatted message onto an [`ErrorTree`].
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {{
        $errs.add(format!($($arg)*));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        assert!(ErrorTree::new().result().is_ok());
    }

    #[test]
    fn child_messages_are_routed() {
        let mut child = ErrorTree::new();
        err!(child, "name `{}` is reserved", "class");

        let mut errs = ErrorTree::new();
        errs.add("top level problem");
        errs.add_child("class `com.example.Foo`", child);

        let err = errs.result().expect_err("tree with messages should fail");
        assert_eq!(err.len(), 2);
        assert_eq!(
            err.to_string(),
            "top level problem; class `com.example.Foo`: name `class` is reserved"
        );
    }

    #[test]
    fn add_result_only_keeps_failures() {
        let mut errs = ErrorTree::new();
        errs.add_result(Ok(()));
        errs.add_result(Err("bad".to_string()));

        assert_eq!(errs.len(), 1);
        assert_eq!(errs.to_string(), "bad");
    }
}
