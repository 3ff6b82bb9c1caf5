use anyhow::Result;
use tracing::debug;

use wheeltag_filename::WheelFilename;
use wheeltag_interpreter::{find_default_python, find_requested_python, Interpreter};
use wheeltag_platform::Platform;
use wheeltag_tags::Tag;

use crate::commands::ExitStatus;

/// Compute and print the filename a binary wheel would carry.
///
/// The wheel is always treated as platform-specific: the tag is resolved for
/// the detected interpreter and host, never `py3-none-any`.
pub(crate) fn wheel_name(
    name: &str,
    version: &str,
    plat_name: Option<&str>,
    python: Option<&str>,
) -> Result<ExitStatus> {
    let platform = Platform::current()?;

    // Detect the Python interpreter whose implementation and ABI tags apply.
    let executable = match python {
        Some(request) => find_requested_python(request)?,
        None => find_default_python()?,
    };
    let interpreter = Interpreter::query(&executable)?;
    debug!(
        "Using Python {}.{} at {}",
        interpreter.python_version().0,
        interpreter.python_version().1,
        interpreter.sys_executable().display()
    );

    let tag = Tag::from_env(
        &platform,
        interpreter.python_version(),
        interpreter.implementation_name(),
        interpreter.implementation_version(),
    )?;
    let tag = match plat_name {
        Some(plat_name) => tag.with_platform(plat_name),
        None => tag,
    };

    let filename = WheelFilename::new(name, version, tag);
    #[allow(clippy::print_stdout)]
    {
        println!("{filename}");
    }

    Ok(ExitStatus::Success)
}
