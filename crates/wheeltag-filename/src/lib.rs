//! The filename a built wheel is stamped with.

use std::fmt::{Display, Formatter};

use wheeltag_normalize::DistInfoName;
use wheeltag_tags::Tag;

/// The filename of a wheel, encoding the distribution name, version, and
/// compatibility tag.
///
/// The name and version components are free-form and escaped on rendering;
/// the tag is rendered exactly as resolved (or overridden).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WheelFilename {
    pub name: DistInfoName,
    pub version: DistInfoName,
    pub tag: Tag,
}

impl WheelFilename {
    /// Create a wheel filename from its components.
    pub fn new(
        name: impl Into<DistInfoName>,
        version: impl Into<DistInfoName>,
        tag: Tag,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            tag,
        }
    }

    /// The escaped `{name}-{version}` stem of the filename.
    pub fn dist_name(&self) -> String {
        format!("{}-{}", self.name.as_escaped(), self.version.as_escaped())
    }
}

impl Display for WheelFilename {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}.whl", self.dist_name(), self.tag)
    }
}

#[cfg(test)]
mod tests {
    use wheeltag_tags::Tag;

    use super::WheelFilename;

    #[test]
    fn basic() {
        let filename = WheelFilename::new(
            "mypkg",
            "1.2.3",
            Tag::new("cp310", "cp310", "linux_x86_64"),
        );
        insta::assert_snapshot!(filename, @"mypkg-1.2.3-cp310-cp310-linux_x86_64.whl");
    }

    #[test]
    fn defaults() {
        // The CLI's fallback name and version pass through unmodified.
        let filename = WheelFilename::new(
            "UNKNOWN",
            "0.0.0",
            Tag::new("cp312", "cp312", "win_amd64"),
        );
        insta::assert_snapshot!(filename, @"UNKNOWN-0.0.0-cp312-cp312-win_amd64.whl");
    }

    #[test]
    fn platform_override() {
        let tag = Tag::new("cp310", "cp310", "macosx_14_0_arm64").with_platform("linux_x86_64");
        let filename = WheelFilename::new("mypkg", "1.2.3", tag);
        insta::assert_snapshot!(filename, @"mypkg-1.2.3-cp310-cp310-linux_x86_64.whl");
    }

    #[test]
    fn escaping() {
        let filename = WheelFilename::new(
            "my-pkg",
            "1.0-alpha",
            Tag::new("pp310", "pypy310_pp73", "linux_aarch64"),
        );
        insta::assert_snapshot!(filename, @"my_pkg-1.0_alpha-pp310-pypy310_pp73-linux_aarch64.whl");
    }

    #[test]
    fn empty_components() {
        // Empty name and version are passed through, not rejected.
        let filename = WheelFilename::new("", "", Tag::new("cp311", "cp311", "win32"));
        insta::assert_snapshot!(filename, @"--cp311-cp311-win32.whl");
    }

    #[test]
    fn idempotent() {
        let make = || {
            WheelFilename::new("mypkg", "1.2.3", Tag::new("cp310", "cp310", "linux_x86_64"))
                .to_string()
        };
        assert_eq!(make(), make());
    }
}
