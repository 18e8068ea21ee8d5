//! GitHub repository reference parsing.

/// The only host repository references may point at.
pub const GITHUB_HOST: &str = "github.com";

/// Owner and name of a GitHub repository, parsed from a user-supplied reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentifier {
    /// User or organization owning the repository.
    pub owner: String,
    /// Repository name without any `.git` suffix.
    pub name: String,
}

impl RepositoryIdentifier {
    /// Parses a repository reference.
    ///
    /// Supported forms:
    /// - `https://github.com/{owner}/{name}`
    /// - `http://github.com/{owner}/{name}`
    /// - `{user}@github.com:{owner}/{name}`
    ///
    /// HTTP forms may end in `.git`, a trailing `/`, or both; the SSH form may end in
    /// `.git`. Segments are limited to ASCII letters, digits, `_`, `.` and `-`.
    ///
    /// # Returns
    /// - `Some(RepositoryIdentifier)` - The reference matched one of the forms
    /// - `None` - Any other host, scheme or path shape
    ///
    /// # Example
    /// ```
    /// use forkcache::server::util::repository::RepositoryIdentifier;
    ///
    /// let repo = RepositoryIdentifier::parse("git@github.com:acme/widget.git").unwrap();
    /// assert_eq!(repo.full_name(), "acme/widget");
    /// ```
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        let parsed = parse_http(reference).or_else(|| parse_ssh(reference));

        if parsed.is_none() {
            tracing::debug!(reference, "Failed to parse repository reference");
        }

        parsed
    }

    /// `owner/name`, the form used as the cache key.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    fn from_parts(owner: &str, name: &str) -> Option<Self> {
        if !is_valid_segment(owner) || !is_valid_segment(name) {
            return None;
        }

        let name = strip_git_suffix(name);
        if name.is_empty() {
            return None;
        }

        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

fn parse_http(reference: &str) -> Option<RepositoryIdentifier> {
    let rest = reference
        .strip_prefix("https://")
        .or_else(|| reference.strip_prefix("http://"))?;
    let path = rest.strip_prefix(GITHUB_HOST)?.strip_prefix('/')?;
    let path = path.strip_suffix('/').unwrap_or(path);
    let (owner, name) = path.split_once('/')?;

    RepositoryIdentifier::from_parts(owner, name)
}

fn parse_ssh(reference: &str) -> Option<RepositoryIdentifier> {
    let (user, rest) = reference.split_once('@')?;
    if !is_valid_segment(user) {
        return None;
    }

    let path = rest.strip_prefix(GITHUB_HOST)?.strip_prefix(':')?;
    let (owner, name) = path.split_once('/')?;

    RepositoryIdentifier::from_parts(owner, name)
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'))
}

// Segments are ASCII by now, so byte slicing is on char boundaries
fn strip_git_suffix(name: &str) -> &str {
    match name.len().checked_sub(4) {
        Some(split) if name[split..].eq_ignore_ascii_case(".git") => &name[..split],
        _ => name,
    }
}
