//! Path surface of the site: the selector and `/invitation/{id}`.

use std::fmt;

use url::form_urlencoded;

pub const DETAIL_SEGMENT: &str = "invitation";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: list of every invitation.
    Selector,
    /// `/invitation/{id}`; `id` is `None` for a bare `/invitation`.
    Invitation { id: Option<String> },
    /// Anything else under the base path.
    Other(String),
}

impl Route {
    pub fn invitation(id: impl Into<String>) -> Self {
        Route::Invitation {
            id: Some(id.into()),
        }
    }

    /// Parses a browser path (query and fragment are ignored).
    ///
    /// `base_path` is stripped when the path lives under it.
    pub fn parse(path: &str, base_path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let base = normalize_base(base_path);
        let local = if base.is_empty() {
            path
        } else if path == base {
            ""
        } else {
            path.strip_prefix(base)
                .filter(|rest| rest.starts_with('/'))
                .unwrap_or(path)
        };

        let segments: Vec<&str> = local.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Selector,
            [DETAIL_SEGMENT] => Route::Invitation { id: None },
            [DETAIL_SEGMENT, id] => Route::Invitation {
                id: Some(decode_segment(id)),
            },
            _ => Route::Other(format!("/{}", segments.join("/"))),
        }
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, Route::Invitation { .. })
    }

    pub fn invitation_id(&self) -> Option<&str> {
        match self {
            Route::Invitation { id } => id.as_deref(),
            _ => None,
        }
    }

    /// Path relative to the site root, without the base path.
    pub fn local_path(&self) -> String {
        match self {
            Route::Selector => "/".to_string(),
            Route::Invitation { id: Some(id) } => {
                format!("/{DETAIL_SEGMENT}/{}", urlencoding::encode(id))
            }
            Route::Invitation { id: None } => format!("/{DETAIL_SEGMENT}"),
            Route::Other(path) => path.clone(),
        }
    }

    pub fn to_path(&self, base_path: &str) -> String {
        let base = normalize_base(base_path);
        match self {
            Route::Selector if !base.is_empty() => format!("{base}/"),
            _ => format!("{base}{}", self.local_path()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.local_path())
    }
}

pub fn detail_path(base_path: &str, id: &str) -> String {
    Route::invitation(id).to_path(base_path)
}

/// `"/invitation_project/"` → `"/invitation_project"`, `"/"` → `""`.
pub fn normalize_base(base_path: &str) -> &str {
    base_path.trim().trim_end_matches('/')
}

/// Looks up one parameter in a query string (with or without the leading `?`).
pub fn query_param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn decode_segment(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/invitation_project";

    #[test]
    fn parses_paths_under_base() {
        assert_eq!(Route::parse("/invitation_project", BASE), Route::Selector);
        assert_eq!(Route::parse("/invitation_project/", BASE), Route::Selector);
        assert_eq!(
            Route::parse("/invitation_project/invitation/Arely-America?admin=x", BASE),
            Route::invitation("Arely-America")
        );
        assert_eq!(
            Route::parse("/invitation_project/invitation/", BASE),
            Route::Invitation { id: None }
        );
        assert_eq!(
            Route::parse("/invitation_project/admin/panel", BASE),
            Route::Other("/admin/panel".to_string())
        );
    }

    #[test]
    fn parses_paths_without_base() {
        assert_eq!(Route::parse("/", "/"), Route::Selector);
        assert_eq!(
            Route::parse("/invitation/Sof%C3%ADa", ""),
            Route::invitation("Sofía")
        );
        assert_eq!(
            Route::parse("/invitation_projectX/invitation/a", BASE),
            Route::Other("/invitation_projectX/invitation/a".to_string())
        );
    }

    #[test]
    fn formats_paths() {
        assert_eq!(detail_path(BASE, "Arely-America"), "/invitation_project/invitation/Arely-America");
        assert_eq!(Route::Selector.to_path(BASE), "/invitation_project/");
        assert_eq!(Route::Selector.to_path("/"), "/");
        assert_eq!(detail_path("", "Sofía"), "/invitation/Sof%C3%ADa");
    }

    #[test]
    fn reads_query_parameters() {
        assert_eq!(query_param("?admin=zeus-access&x=1", "admin").as_deref(), Some("zeus-access"));
        assert_eq!(query_param("x=1&admin=a%20b", "admin").as_deref(), Some("a b"));
        assert_eq!(query_param("", "admin"), None);
        assert_eq!(query_param("?admin", "admin").as_deref(), Some(""));
    }

    #[test]
    fn query_values_use_form_encoding() {
        assert_eq!(query_param("?admin=zeus+access", "admin").as_deref(), Some("zeus access"));
        assert_eq!(query_param("?%61dmin=zeus-access", "admin").as_deref(), Some("zeus-access"));
        assert_eq!(query_param("?admin=first&admin=second", "admin").as_deref(), Some("first"));
        assert_eq!(query_param("?administrator=x", "admin"), None);
    }
}
