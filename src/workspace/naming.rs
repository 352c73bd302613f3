//! Workspace name derivation.

use crate::types::Workspace;
use std::collections::HashSet;

/// Derive a repository name from a git URL.
///
/// Scheme URLs (`https://host/owner/repo.git`) use the final path segment;
/// scp-style URLs (`user@host:owner/repo.git`) use the second segment after
/// the colon. A trailing `.git` is stripped. Anything unparseable falls back
/// to `"workspace"`.
pub fn extract_repo_name(git_url: &str) -> String {
    let name = if git_url.contains("://") {
        git_url.rsplit('/').next().map(strip_git_suffix)
    } else if git_url.contains('@') {
        git_url
            .split_once(':')
            .and_then(|(_, path)| path.split('/').nth(1))
            .map(strip_git_suffix)
    } else {
        None
    };
    match name {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => "workspace".to_string(),
    }
}

fn strip_git_suffix(segment: &str) -> &str {
    segment.strip_suffix(".git").unwrap_or(segment)
}

/// Return `base` if no existing workspace carries that exact name, else the
/// first free `base2`, `base3`, ... Deterministic linear probe.
pub fn generate_unique_name(base: &str, existing: &[Workspace]) -> String {
    let taken: HashSet<&str> = existing.iter().map(|w| w.name.as_str()).collect();
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut counter = 2u64;
    loop {
        let candidate = format!("{}{}", base, counter);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn workspace(name: &str) -> Workspace {
        Workspace {
            id: format!("id-{}", name),
            name: name.to_string(),
            projects: Vec::new(),
            target: String::new(),
            info: String::new(),
        }
    }

    #[test]
    fn extracts_from_https_url() {
        assert_eq!(extract_repo_name("https://github.com/user/repo.git"), "repo");
        assert_eq!(extract_repo_name("https://github.com/user/repo"), "repo");
    }

    #[test]
    fn extracts_from_scp_style_url() {
        assert_eq!(extract_repo_name("git@github.com:user/repo.git"), "repo");
        assert_eq!(extract_repo_name("git@gitlab.example.com:team/tool"), "tool");
    }

    #[test]
    fn malformed_input_falls_back_to_workspace() {
        assert_eq!(extract_repo_name("not a url"), "workspace");
        assert_eq!(extract_repo_name(""), "workspace");
        assert_eq!(extract_repo_name("git@host:ownerless"), "workspace");
        assert_eq!(extract_repo_name("https://github.com/user/repo/"), "workspace");
    }

    #[test]
    fn unique_name_returns_base_when_free() {
        assert_eq!(generate_unique_name("repo", &[]), "repo");
        assert_eq!(
            generate_unique_name("repo", &[workspace("other")]),
            "repo"
        );
    }

    #[test]
    fn unique_name_probes_from_two() {
        let existing = [workspace("repo"), workspace("repo2")];
        assert_eq!(generate_unique_name("repo", &existing), "repo3");
    }

    #[test]
    fn unique_name_fills_gaps() {
        let existing = [workspace("repo"), workspace("repo3")];
        assert_eq!(generate_unique_name("repo", &existing), "repo2");
    }

    proptest! {
        #[test]
        fn unique_name_never_collides(
            base in "[a-z]{1,8}",
            suffixes in prop::collection::hash_set(0u64..20, 0..10)
        ) {
            let existing: Vec<Workspace> = suffixes
                .iter()
                .map(|n| {
                    if *n == 0 {
                        workspace(&base)
                    } else {
                        workspace(&format!("{}{}", base, n))
                    }
                })
                .collect();
            let name = generate_unique_name(&base, &existing);
            prop_assert!(existing.iter().all(|w| w.name != name));
        }
    }
}
