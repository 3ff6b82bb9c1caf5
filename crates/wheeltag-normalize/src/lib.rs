//! Escaping of distribution name and version components for wheel filenames.

use std::borrow::Cow;
use std::fmt;

/// A free-form distribution name or version component of a wheel filename.
///
/// The component is carried verbatim: no validation, no case folding, and no
/// version-scheme parsing. Callers that hand us `UNKNOWN` or an empty string
/// get exactly that back. The only transformation is applied on rendering,
/// where runs of characters outside alphanumerics, `_`, and `.` are escaped
/// down to a single `_`, per the wheel filename convention.
///
/// See: <https://packaging.python.org/en/latest/specifications/binary-distribution-format/#escaping-and-unicode>
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DistInfoName(String);

impl DistInfoName {
    /// Create a component from a free-form string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Escape the component for embedding in a wheel filename.
    ///
    /// `my-pkg`, `my--pkg`, and `my pkg` all escape to `my_pkg`; a component
    /// that needs no escaping is borrowed as-is.
    pub fn as_escaped(&self) -> Cow<'_, str> {
        if let Some(position) = self.0.find(|character| !Self::is_safe(character)) {
            let mut escaped = String::with_capacity(self.0.len());
            escaped.push_str(&self.0[..position]);

            let mut in_run = false;
            for character in self.0[position..].chars() {
                if Self::is_safe(character) {
                    escaped.push(character);
                    in_run = false;
                } else if !in_run {
                    escaped.push('_');
                    in_run = true;
                }
            }

            Cow::Owned(escaped)
        } else {
            Cow::Borrowed(self.0.as_str())
        }
    }

    fn is_safe(character: char) -> bool {
        character.is_alphanumeric() || character == '_' || character == '.'
    }
}

impl From<&str> for DistInfoName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DistInfoName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for DistInfoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for DistInfoName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::DistInfoName;

    #[test]
    fn unchanged() {
        let unchanged = ["UNKNOWN", "mypkg", "0.0.0", "1.2.3", "my_pkg", ""];
        for input in unchanged {
            let name = DistInfoName::new(input);
            assert_eq!(name.as_escaped(), input);
            assert!(matches!(name.as_escaped(), Cow::Borrowed(_)));
        }
    }

    #[test]
    fn escaped() {
        let escaped = [
            ("my-pkg", "my_pkg"),
            ("my--pkg", "my_pkg"),
            ("my pkg", "my_pkg"),
            ("my!demo+pkg", "my_demo_pkg"),
            ("1.0-alpha", "1.0_alpha"),
            ("1.2.3+local", "1.2.3_local"),
            ("-", "_"),
        ];
        for (input, expected) in escaped {
            assert_eq!(DistInfoName::new(input).as_escaped(), expected);
        }
    }

    #[test]
    fn no_case_folding() {
        // Unlike package-name normalization, filename escaping preserves case.
        assert_eq!(DistInfoName::new("Django").as_escaped(), "Django");
    }
}
