//! Centralized constants for the configuration crate.
//!
//! Key names live here so the loader, validation, and error messages agree
//! on spelling and on declaration order.

// =============================================================================
// Required Keys
// =============================================================================

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Environment variable holding the GitHub access token.
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Environment variable holding the shared student secret.
pub const STUDENT_SECRET: &str = "STUDENT_SECRET";

/// Environment variable holding the GitHub account name.
pub const GITHUB_USERNAME: &str = "GITHUB_USERNAME";

/// Every required key, in declaration order.
///
/// Validation reports missing keys in this order.
pub const REQUIRED_KEYS: [&str; 4] = [
    GEMINI_API_KEY,
    GITHUB_TOKEN,
    STUDENT_SECRET,
    GITHUB_USERNAME,
];

// =============================================================================
// Override File
// =============================================================================

/// File name of the local override file.
pub const DOTENV_FILE_NAME: &str = ".env";

/// File name of the committed template users copy to create the override file.
pub const DOTENV_EXAMPLE_FILE_NAME: &str = ".env.example";

/// Setting this variable to `1` or `true` skips override file loading.
pub const DOTENV_DISABLED: &str = "DOTENV_DISABLED";
