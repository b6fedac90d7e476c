use super::{project::Project, repository::Repository};

/// ミラージョブ
///
/// 1つのリポジトリとその所属プロジェクトの組。設定された全プロバイダへ
/// ミラーされる。作成後は変更されず、ちょうど1つのワーカーに消費される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorJob {
    /// ミラーするリポジトリ
    pub repository: Repository,

    /// 所属プロジェクト
    pub project: Project,
}

impl MirrorJob {
    /// 新しいMirrorJobインスタンスを作成
    pub fn new(repository: Repository, project: Project) -> Self {
        Self {
            repository,
            project,
        }
    }

    /// リポジトリ名
    pub fn repo_name(&self) -> &str {
        &self.repository.name
    }
}
