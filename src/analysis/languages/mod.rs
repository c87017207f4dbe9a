//! Language front-end implementations.

mod python;

pub use python::PythonFrontend;

use super::LanguageFrontend;
use once_cell::sync::OnceCell;

/// Static storage for the Python front-end.
static PYTHON_FRONTEND: OnceCell<PythonFrontend> = OnceCell::new();

/// Register all available language front-ends.
///
/// Call this once at startup before analysis.
/// This is idempotent - calling it multiple times is safe.
pub fn register_frontends() {
    PYTHON_FRONTEND.get_or_init(PythonFrontend::new);
}

/// Get a front-end for the given file extension.
///
/// Returns None if no front-end is registered for the extension.
pub fn frontend_for_extension(ext: &str) -> Option<&'static dyn LanguageFrontend> {
    // Ensure front-ends are registered
    register_frontends();

    match ext {
        "py" => PYTHON_FRONTEND
            .get()
            .map(|f| f as &'static dyn LanguageFrontend),
        _ => None,
    }
}

/// All file extensions with a registered front-end.
pub fn supported_extensions() -> &'static [&'static str] {
    &["py"]
}
