use std::fmt;

/// SSH push target of a mirrored repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteUrl(String);

impl RemoteUrl {
    /// リモートURLを組み立てる
    ///
    /// `group`がプロバイダ固有の個人名前空間マーカーで始まる場合は`.git`を付けない。
    ///
    /// ```
    /// use repomirror::domain::value_objects::remote_url::RemoteUrl;
    ///
    /// let url = RemoteUrl::build("github.com", "acme", "libfoo", None);
    /// assert_eq!(url.as_str(), "git@github.com:acme/libfoo.git");
    ///
    /// let url = RemoteUrl::build("git.sr.ht", "~alice", "libbaz", Some("~"));
    /// assert_eq!(url.as_str(), "git@git.sr.ht:~alice/libbaz");
    /// ```
    pub fn build(host: &str, group: &str, repo_name: &str, marker: Option<&str>) -> Self {
        let personal = marker.map_or(false, |m| !m.is_empty() && group.starts_with(m));
        let suffix = if personal { "" } else { ".git" };
        Self(format!("git@{}:{}/{}{}", host, group, repo_name, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RemoteUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
