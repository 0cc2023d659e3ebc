use std::path::PathBuf;

/// Fatal errors raised while planning or generating.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A generator reached a class whose origin file was never planned.
    #[error(
        "File doesn't exist: no output file was planned for `{class}` (declared in {})",
        origin.display()
    )]
    PlanningViolation { class: String, origin: PathBuf },

    /// A generator looked up a class it never generated.
    #[error("`{class}` has no generated counterpart")]
    NotGenerated { class: String },

    /// A generated declaration could not be found in the workspace.
    #[error("generated declaration `{path}` is missing from {}", file.display())]
    MissingDeclaration { path: String, file: PathBuf },

    /// A planned output already exists on disk.
    #[error("{} already exists (use --force to overwrite it)", path.display())]
    FileExists { path: PathBuf },

    /// Two origin files would be generated into the same output file.
    #[error(
        "{} would be generated from both {} and {}",
        path.display(),
        first.display(),
        second.display()
    )]
    PathConflict {
        path: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
}
