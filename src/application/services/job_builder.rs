use crate::domain::entities::{mirror_job::MirrorJob, mirrors_config::MirrorsConfig};

/// ジョブビルダー
///
/// 検証済み設定をプロジェクト順・リポジトリ宣言順のMirrorJob列に平坦化する。
/// 重複は除去しない（複数プロジェクトに同名リポジトリがあればジョブも重複する）。
#[derive(Debug, Clone, Default)]
pub struct JobBuilder {
    /// 対象プロジェクト名（空なら全て）
    projects: Vec<String>,
}

impl JobBuilder {
    /// 新しいJobBuilderを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 対象プロジェクトを絞り込む
    pub fn with_projects(mut self, projects: Vec<String>) -> Self {
        self.projects = projects;
        self
    }

    /// ジョブ列を構築
    pub fn build(&self, config: &MirrorsConfig) -> Vec<MirrorJob> {
        config
            .projects
            .iter()
            .filter(|p| self.projects.is_empty() || self.projects.contains(&p.project.name))
            .flat_map(|p| {
                p.repositories
                    .iter()
                    .map(move |repo| MirrorJob::new(repo.clone(), p.project.clone()))
            })
            .collect()
    }
}
