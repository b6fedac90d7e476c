use super::{mirror_config::MirrorConfig, project::Project, repository::Repository};
use std::path::PathBuf;

/// プロジェクトと所属リポジトリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// プロジェクト
    pub project: Project,

    /// 宣言順のリポジトリ
    pub repositories: Vec<Repository>,
}

impl ProjectConfig {
    /// 新しいProjectConfigを作成
    pub fn new(project: Project, repositories: Vec<Repository>) -> Self {
        Self {
            project,
            repositories,
        }
    }
}

/// 検証済みの設定全体
///
/// 全てのリポジトリパスは存在するディレクトリの絶対パスに解決済み。
#[derive(Debug, Clone)]
pub struct MirrorsConfig {
    /// 相対パス解決の基準ディレクトリ
    pub root: PathBuf,

    /// プロジェクト一覧
    pub projects: Vec<ProjectConfig>,

    /// ミラー先プロバイダ一覧
    pub mirrors: Vec<MirrorConfig>,
}

impl MirrorsConfig {
    /// 新しいMirrorsConfigを作成
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            projects: Vec::new(),
            mirrors: Vec::new(),
        }
    }

    /// プロジェクトを追加
    pub fn with_project(mut self, project: ProjectConfig) -> Self {
        self.projects.push(project);
        self
    }

    /// ミラー先を追加
    pub fn with_mirror(mut self, mirror: MirrorConfig) -> Self {
        self.mirrors.push(mirror);
        self
    }

    /// 全リポジトリ数
    pub fn repository_count(&self) -> usize {
        self.projects.iter().map(|p| p.repositories.len()).sum()
    }
}
