use crate::ir::{AuthRequirement, ResolvedSecurity};

/// Drop OAuth schemes when `remove_oauth` is set. Returns `None` only when
/// filtering emptied a non-empty list; an empty input stays `Some([])`.
pub fn filter_securities(
    securities: Vec<ResolvedSecurity>,
    remove_oauth: bool,
) -> Option<Vec<ResolvedSecurity>> {
    if !remove_oauth || securities.is_empty() {
        return Some(securities);
    }

    let kept: Vec<ResolvedSecurity> = securities
        .into_iter()
        .filter(|s| !s.scheme.is_oauth())
        .collect();
    if kept.is_empty() { None } else { Some(kept) }
}

/// Classify the schemes declared by `owner` (an operation id, or the
/// document) after filtering.
pub fn auth_requirement(
    owner: &str,
    declared: Vec<ResolvedSecurity>,
    remove_oauth: bool,
) -> AuthRequirement {
    if declared.is_empty() {
        return AuthRequirement::None;
    }

    let names: Vec<String> = declared.iter().map(|s| s.name.clone()).collect();
    match filter_securities(declared, remove_oauth) {
        Some(schemes) => {
            let dropped = names.len() - schemes.len();
            if dropped > 0 {
                log::debug!("{owner}: removed {dropped} OAuth scheme(s)");
            }
            AuthRequirement::Schemes { schemes }
        }
        None => {
            log::warn!(
                "{owner}: every security scheme is OAuth ({}); generating it without authentication",
                names.join(", ")
            );
            AuthRequirement::Stripped { removed: names }
        }
    }
}
