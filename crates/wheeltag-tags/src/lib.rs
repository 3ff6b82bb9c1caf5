//! The `(python, abi, platform)` compatibility tag a binary wheel carries.

use std::fmt;
use std::str::FromStr;

use wheeltag_platform::{Arch, Os, Platform, PlatformError};

#[derive(Debug, thiserror::Error)]
pub enum TagsError {
    #[error(transparent)]
    PlatformError(#[from] PlatformError),
    #[error("Unsupported implementation: {0}")]
    UnsupportedImplementation(String),
    #[error("Unknown implementation: {0}")]
    UnknownImplementation(String),
}

/// The three-part compatibility tag for a single wheel, e.g. `cp311-cp311-linux_x86_64`.
///
/// This is always the tag of a platform-specific (binary) wheel: the platform
/// component is resolved for the concrete host, never `any`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tag {
    python: String,
    abi: String,
    platform: String,
}

impl Tag {
    /// Create a tag from its three components.
    pub fn new(
        python: impl Into<String>,
        abi: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            python: python.into(),
            abi: abi.into(),
            platform: platform.into(),
        }
    }

    /// Returns the tag for the given Python implementation (e.g., `cpython`), version,
    /// and platform.
    pub fn from_env(
        platform: &Platform,
        python_version: (u8, u8),
        implementation_name: &str,
        implementation_version: (u8, u8),
    ) -> Result<Self, TagsError> {
        let implementation = Implementation::from_str(implementation_name)?;
        Ok(Self {
            python: implementation.language_tag(python_version),
            abi: implementation.abi_tag(python_version, implementation_version),
            platform: platform_tag(platform)?,
        })
    }

    /// Replace the platform component with a caller-provided tag, verbatim.
    #[must_use]
    pub fn with_platform(self, platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            ..self
        }
    }

    /// Return the language implementation tag (e.g., `cp311`).
    pub fn python(&self) -> &str {
        &self.python
    }

    /// Return the ABI tag (e.g., `cp311` or `abi3`).
    pub fn abi(&self) -> &str {
        &self.abi
    }

    /// Return the platform tag (e.g., `linux_x86_64`).
    pub fn platform(&self) -> &str {
        &self.platform
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.python, self.abi, self.platform)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Implementation {
    CPython,
    PyPy,
}

impl Implementation {
    /// Returns the "language implementation and version tag" for the current implementation and
    /// Python version (e.g., `cp39` or `pp39`).
    pub fn language_tag(self, python_version: (u8, u8)) -> String {
        match self {
            // Ex) `cp39`
            Implementation::CPython => format!("cp{}{}", python_version.0, python_version.1),
            // Ex) `pp39`
            Implementation::PyPy => format!("pp{}{}", python_version.0, python_version.1),
        }
    }

    pub fn abi_tag(self, python_version: (u8, u8), implementation_version: (u8, u8)) -> String {
        match self {
            // Ex) `cp39`
            Implementation::CPython => {
                if python_version.1 <= 7 {
                    format!("cp{}{}m", python_version.0, python_version.1)
                } else {
                    format!("cp{}{}", python_version.0, python_version.1)
                }
            }
            // Ex) `pypy39_pp73`
            Implementation::PyPy => format!(
                "pypy{}{}_pp{}{}",
                python_version.0,
                python_version.1,
                implementation_version.0,
                implementation_version.1
            ),
        }
    }
}

impl FromStr for Implementation {
    type Err = TagsError;

    fn from_str(s: &str) -> Result<Self, TagsError> {
        match s {
            // Known and supported implementations.
            "cpython" => Ok(Self::CPython),
            "pypy" => Ok(Self::PyPy),
            // Known but unsupported implementations.
            "python" => Err(TagsError::UnsupportedImplementation(s.to_string())),
            "ironpython" => Err(TagsError::UnsupportedImplementation(s.to_string())),
            "jython" => Err(TagsError::UnsupportedImplementation(s.to_string())),
            // Unknown implementations.
            _ => Err(TagsError::UnknownImplementation(s.to_string())),
        }
    }
}

/// Returns the native platform tag for the given [`Platform`] (e.g., `linux_x86_64`,
/// `macosx_11_0_arm64`, or `win_amd64`).
///
/// This is the single tag a freshly built binary wheel is stamped with, not
/// the list of tags the platform can install.
pub fn platform_tag(platform: &Platform) -> Result<String, PlatformError> {
    let os = platform.os();
    let arch = platform.arch();

    let platform_tag = match (os, arch) {
        (Os::Linux, _) => format!("linux_{arch}"),
        (Os::Macos { major, minor }, Arch::X86_64 | Arch::Aarch64) => {
            let (major, minor) = match major {
                // Prior to Mac OS 11, each yearly release of Mac OS bumped the "minor" version
                // number. The major version was always 10.
                10 => (*major, *minor),
                // Starting with Mac OS 11, each yearly release bumps the major version number.
                // The minor versions are now the midyear updates, which the tag pins to zero.
                value if *value >= 11 => (*major, 0),
                _ => {
                    return Err(PlatformError::OsVersionDetectionError(format!(
                        "Unsupported macOS version: {major}",
                    )));
                }
            };
            let binary_format = if arch == Arch::Aarch64 {
                "arm64".to_string()
            } else {
                arch.to_string()
            };
            format!("macosx_{major}_{minor}_{binary_format}")
        }
        (Os::Windows, Arch::X86) => "win32".to_string(),
        (Os::Windows, Arch::X86_64) => "win_amd64".to_string(),
        (Os::Windows, Arch::Aarch64) => "win_arm64".to_string(),
        (
            Os::FreeBsd { release }
            | Os::NetBsd { release }
            | Os::OpenBsd { release }
            | Os::Dragonfly { release }
            | Os::Haiku { release },
            _,
        ) => {
            let release = release.replace(['.', '-'], "_");
            format!(
                "{}_{}_{}",
                os.to_string().to_lowercase(),
                release,
                arch
            )
        }
        (Os::Illumos { release, arch }, _) => {
            // See https://github.com/python/cpython/blob/46c8d915715aa2bd4d697482aa051fe974d440e1/Lib/sysconfig.py#L722-L730
            if let Some((major, other)) = release.split_once('_') {
                let major_ver: u64 = major.parse().map_err(|err| {
                    PlatformError::OsVersionDetectionError(format!(
                        "illumos major version is not a number: {err}"
                    ))
                })?;
                if major_ver >= 5 {
                    // SunOS 5 == Solaris 2
                    let os = "solaris".to_string();
                    let release = format!("{}_{}", major_ver - 3, other);
                    let arch = format!("{arch}_64bit");
                    return Ok(format!("{os}_{release}_{arch}"));
                }
            }

            let os = os.to_string().to_lowercase();
            format!("{os}_{release}_{arch}")
        }
        _ => {
            return Err(PlatformError::OsVersionDetectionError(format!(
                "Unsupported operating system and architecture combination: {os} {arch}"
            )));
        }
    };
    Ok(platform_tag)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use wheeltag_platform::{Arch, Os, Platform};

    use super::{platform_tag, Implementation, Tag, TagsError};

    #[test]
    fn cpython_tags() {
        let implementation = Implementation::CPython;
        assert_eq!(implementation.language_tag((3, 10)), "cp310");
        assert_eq!(implementation.abi_tag((3, 10), (3, 10)), "cp310");
        // The historical `m` ABI suffix was dropped in Python 3.8.
        assert_eq!(implementation.abi_tag((3, 7), (3, 7)), "cp37m");
    }

    #[test]
    fn pypy_tags() {
        let implementation = Implementation::PyPy;
        assert_eq!(implementation.language_tag((3, 10)), "pp310");
        assert_eq!(implementation.abi_tag((3, 10), (7, 3)), "pypy310_pp73");
    }

    #[test]
    fn unsupported_implementations() {
        assert!(matches!(
            Implementation::from_str("jython"),
            Err(TagsError::UnsupportedImplementation(_))
        ));
        assert!(matches!(
            Implementation::from_str("rustpython"),
            Err(TagsError::UnknownImplementation(_))
        ));
    }

    #[test]
    fn linux_platform_tag() {
        let platform = Platform::new(Os::Linux, Arch::X86_64);
        assert_eq!(platform_tag(&platform).unwrap(), "linux_x86_64");
        let platform = Platform::new(Os::Linux, Arch::Aarch64);
        assert_eq!(platform_tag(&platform).unwrap(), "linux_aarch64");
    }

    #[test]
    fn macos_platform_tag() {
        // Yearly releases bump the major version from macOS 11 on; the tag
        // pins the minor version to zero.
        let platform = Platform::new(Os::Macos { major: 14, minor: 5 }, Arch::Aarch64);
        assert_eq!(platform_tag(&platform).unwrap(), "macosx_14_0_arm64");
        // The old 10.x scheme keeps the real minor version.
        let platform = Platform::new(
            Os::Macos {
                major: 10,
                minor: 15,
            },
            Arch::X86_64,
        );
        assert_eq!(platform_tag(&platform).unwrap(), "macosx_10_15_x86_64");
    }

    #[test]
    fn windows_platform_tags() {
        assert_eq!(
            platform_tag(&Platform::new(Os::Windows, Arch::X86)).unwrap(),
            "win32"
        );
        assert_eq!(
            platform_tag(&Platform::new(Os::Windows, Arch::X86_64)).unwrap(),
            "win_amd64"
        );
        assert_eq!(
            platform_tag(&Platform::new(Os::Windows, Arch::Aarch64)).unwrap(),
            "win_arm64"
        );
    }

    #[test]
    fn freebsd_platform_tag() {
        let platform = Platform::new(
            Os::FreeBsd {
                release: "13.2-RELEASE".to_string(),
            },
            Arch::X86_64,
        );
        assert_eq!(
            platform_tag(&platform).unwrap(),
            "freebsd_13_2_RELEASE_x86_64"
        );
    }

    #[test]
    fn unsupported_platform() {
        let platform = Platform::new(Os::Windows, Arch::S390X);
        assert!(platform_tag(&platform).is_err());
    }

    #[test]
    fn tag_from_env() {
        let platform = Platform::new(Os::Linux, Arch::X86_64);
        let tag = Tag::from_env(&platform, (3, 10), "cpython", (3, 10)).unwrap();
        assert_eq!(tag.to_string(), "cp310-cp310-linux_x86_64");
    }

    #[test]
    fn platform_override_is_verbatim() {
        let platform = Platform::new(Os::Windows, Arch::X86_64);
        let tag = Tag::from_env(&platform, (3, 12), "cpython", (3, 12)).unwrap();
        let tag = tag.with_platform("manylinux2014_x86_64");
        // The override replaces the detected platform without any validation.
        assert_eq!(tag.to_string(), "cp312-cp312-manylinux2014_x86_64");
    }
}
