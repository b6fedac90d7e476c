use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ミラー対象のローカルリポジトリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// リモート側で使うリポジトリ名
    pub name: String,

    /// ローカルの絶対パス（設定の`root`を基準に解決済み）
    pub path: PathBuf,
}

impl Repository {
    /// 新しいRepositoryインスタンスを作成
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// ローカルパスを取得
    pub fn path(&self) -> &Path {
        &self.path
    }
}
