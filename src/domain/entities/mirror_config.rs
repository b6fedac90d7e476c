use crate::domain::value_objects::provider_kind::ProviderKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ミラー先プロバイダの設定
///
/// 設定ファイルの`mirrors[]`の1エントリ。ロード後は全ワーカーから読み取り専用で共有される。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// プロバイダ名（github, bitbucket, gitea/codeberg, sourcehut）
    pub name: String,

    /// ユーザー名（Bitbucketの認証、SourceHutのアクセス権付与に使用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// APIトークン
    pub token: String,

    /// 組織名（github, gitea, sourcehut）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    /// チーム名（bitbucket）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    /// 作成したリポジトリに付与するチームID（github）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,

    /// APIエンドポイントの上書き
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// プッシュ先ホストの上書き
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_host: Option<String>,
}

impl MirrorConfig {
    /// 新しいMirrorConfigインスタンスを作成
    pub fn new(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            username: None,
            token: token.into(),
            organization: None,
            team: None,
            team_id: None,
            api_url: None,
            git_host: None,
        }
    }

    /// ユーザー名を設定
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// 組織名を設定
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// チーム名を設定
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// チームIDを設定
    pub fn with_team_id(mut self, team_id: u64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// APIエンドポイントを設定
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// プッシュ先ホストを設定
    pub fn with_git_host(mut self, git_host: impl Into<String>) -> Self {
        self.git_host = Some(git_host.into());
        self
    }

    /// プロバイダ種別を解決する（未知の名前の場合はNone）
    pub fn kind(&self) -> Option<ProviderKind> {
        self.name.parse().ok()
    }

    /// プロバイダ種別ごとのグループ設定値を取得
    ///
    /// Bitbucketは`team`、それ以外は`organization`を読む。空文字列は未設定扱い。
    pub fn group(&self, kind: ProviderKind) -> Option<&str> {
        let value = match kind {
            ProviderKind::Bitbucket => self.team.as_deref(),
            _ => self.organization.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// APIエンドポイント（上書きがなければデフォルト）
    pub fn api_url(&self, kind: ProviderKind) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| kind.default_api_url())
            .trim_end_matches('/')
    }

    /// プッシュ先ホスト（上書きがなければデフォルト）
    pub fn git_host(&self, kind: ProviderKind) -> &str {
        self.git_host
            .as_deref()
            .unwrap_or_else(|| kind.default_git_host())
    }
}

// トークンをログに出さない
impl fmt::Debug for MirrorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MirrorConfig")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("organization", &self.organization)
            .field("team", &self.team)
            .field("team_id", &self.team_id)
            .field("api_url", &self.api_url)
            .field("git_host", &self.git_host)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_depends_on_provider_kind() {
        let config = MirrorConfig::new("bitbucket", "secret").with_organization("acme");
        assert_eq!(config.group(ProviderKind::Bitbucket), None);
        assert_eq!(config.group(ProviderKind::GitHub), Some("acme"));

        let config = config.with_team("acme-team");
        assert_eq!(config.group(ProviderKind::Bitbucket), Some("acme-team"));
    }

    #[test]
    fn test_blank_group_is_unset() {
        let config = MirrorConfig::new("github", "secret").with_organization("  ");
        assert_eq!(config.group(ProviderKind::GitHub), None);
    }

    #[test]
    fn test_api_url_defaults_and_override() {
        let config = MirrorConfig::new("codeberg", "secret");
        assert_eq!(config.api_url(ProviderKind::Gitea), "https://codeberg.org/api/v1");

        let config = config.with_api_url("https://git.example.com/api/v1/");
        assert_eq!(config.api_url(ProviderKind::Gitea), "https://git.example.com/api/v1");
    }

    #[test]
    fn test_git_host_override() {
        let config = MirrorConfig::new("gitea", "secret").with_git_host("git.example.com");
        assert_eq!(config.git_host(ProviderKind::Gitea), "git.example.com");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = MirrorConfig::new("github", "ghp_supersecret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ghp_supersecret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = "name: github\ntoken: abc\norganization: acme\nteam_id: 42\n";
        let config: MirrorConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.kind(), Some(ProviderKind::GitHub));
        assert_eq!(config.team_id, Some(42));
        assert_eq!(config.organization.as_deref(), Some("acme"));
    }
}
