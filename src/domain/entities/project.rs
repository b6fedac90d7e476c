use serde::{Deserialize, Serialize};

/// プロジェクト
///
/// リポジトリを束ねる論理的なグループ。プロバイダによってはコンテナオブジェクト
/// （Bitbucketのプロジェクト等）として使われる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// プロジェクト名
    pub name: String,

    /// プロジェクトキー（例: "LB"）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Project {
    /// 新しいProjectインスタンスを作成
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
        }
    }

    /// プロジェクトキーを設定
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}
