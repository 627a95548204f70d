use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Analysis finished and output was written
    Success = 0,
    /// Any failure raised by the analysis (missing target file, cache write error, ...)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for dependency and reference analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("package.json not found from: {path}\n\n💡 Hint: Run inside a Node project or pass the project directory explicitly")]
    ManifestNotFound { path: PathBuf },

    #[error("Failed to parse manifest: {path}\nDetails: {details}\n\n💡 Hint: Please verify that package.json contains valid JSON")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Failed to parse lockfile: {path}\nDetails: {details}")]
    LockfileParseError { path: PathBuf, details: String },

    #[error("Failed to load dependency cache: {path}\nDetails: {details}\n\n💡 Hint: Delete the cache file to rebuild it")]
    CacheError { path: PathBuf, details: String },

    #[error("Failed to write dependency cache: {path}\nDetails: {details}\n\n💡 Hint: Please verify that you have write permissions for the cache directory")]
    CacheWriteError { path: PathBuf, details: String },

    #[error("Target file not found: {path}\n\n💡 Hint: Pass a path relative to the current directory; the extension may be omitted")]
    TargetFileMissing { path: PathBuf },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}
