use crate::common::error::MirrorError;
use std::path::PathBuf;

/// repomirror全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use repomirror::common::result::MirrorResult;
/// use repomirror::common::error::MirrorError;
///
/// fn example_function() -> MirrorResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> MirrorResult<()> {
///     Err(MirrorError::internal_error("Something went wrong"))
/// }
/// ```
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Optionのエラー変換ヘルパー
pub trait OptionExt<T> {
    /// Option値をValidationErrorに変換する
    ///
    /// # Examples
    ///
    /// ```
    /// use repomirror::common::result::{MirrorResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: MirrorResult<String> = none_value.ok_or_validation_error("token", "required");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> MirrorResult<T>;

    /// Option値をConfigErrorに変換する
    fn ok_or_config_error(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> MirrorResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_validation_error(
        self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> MirrorResult<T> {
        self.ok_or_else(|| MirrorError::validation_error(field, message, None))
    }

    fn ok_or_config_error(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> MirrorResult<T> {
        self.ok_or_else(|| MirrorError::config_error(message, path))
    }
}

/// Resultのエラー変換ヘルパー
pub trait ResultExt<T> {
    /// IOエラーをパス付きのFileSystemErrorに変換する
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> MirrorResult<T>;
}

impl<T> ResultExt<T> for Result<T, std::io::Error> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> MirrorResult<T> {
        self.map_err(|e| MirrorError::filesystem_error_with_source(message, path, e))
    }
}
