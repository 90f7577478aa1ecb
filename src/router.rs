use std::collections::HashMap;

/// The two pages of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail { id: String },
}

impl Route {
    /// Maps `""`/`"/"` to the list and `issues/:id` to the detail page. No other paths exist.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_start_matches('/');

        if trimmed.is_empty() {
            return Some(Route::List);
        }

        let segments: Vec<&str> = trimmed.trim_end_matches('/').split('/').collect();
        match segments.as_slice() {
            ["issues", id] if !id.is_empty() => {
                let id = urlencoding::decode(id).ok()?.into_owned();
                Some(Route::Detail { id })
            }
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail { id } => format!("/issues/{}", urlencoding::encode(id)),
        }
    }

    /// Parameters bound by the route, as read by the page it selects.
    pub fn params(&self) -> RouteParams {
        let mut params = RouteParams::default();
        if let Route::Detail { id } = self {
            params.insert("id", id);
        }
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    values: HashMap<String, String>,
}

impl RouteParams {
    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_routes_to_list() {
        assert_eq!(Route::parse(""), Some(Route::List));
        assert_eq!(Route::parse("/"), Some(Route::List));
    }

    #[test]
    fn test_issue_path_routes_to_detail() {
        assert_eq!(
            Route::parse("issues/42"),
            Some(Route::Detail { id: "42".to_string() })
        );
        assert_eq!(
            Route::parse("/issues/abc-def/"),
            Some(Route::Detail { id: "abc-def".to_string() })
        );
    }

    #[test]
    fn test_unknown_paths_have_no_route() {
        assert_eq!(Route::parse("issues"), None);
        assert_eq!(Route::parse("issues/"), None);
        assert_eq!(Route::parse("issues/1/edit"), None);
        assert_eq!(Route::parse("settings"), None);
    }

    #[test]
    fn test_path_round_trip_with_encoding() {
        let route = Route::Detail { id: "a b".to_string() };
        assert_eq!(route.path(), "/issues/a%20b");
        assert_eq!(Route::parse(&route.path()), Some(route));
    }

    #[test]
    fn test_params_expose_id() {
        let route = Route::Detail { id: "7".to_string() };
        assert_eq!(route.params().get("id"), Some("7"));
        assert_eq!(Route::List.params().get("id"), None);
    }
}
