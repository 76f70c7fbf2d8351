//! Client-side route table

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// Email campaign list
    EmailCampaigns,
    /// One campaign's email dashboard
    EmailDashboard(String),
    LinkedinDashboard,
}

impl Route {
    /// Parse a path. Anything unrecognized lands on the home view.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["email-dashboard"] => Route::EmailCampaigns,
            ["email-dashboard", id] => match urlencoding::decode(id) {
                Ok(id) if !id.trim().is_empty() => Route::EmailDashboard(id.into_owned()),
                _ => Route::Home,
            },
            ["linkedin-dashboard"] => Route::LinkedinDashboard,
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::EmailCampaigns => "/email-dashboard".to_string(),
            Route::EmailDashboard(id) => format!("/email-dashboard/{}", urlencoding::encode(id)),
            Route::LinkedinDashboard => "/linkedin-dashboard".to_string(),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/email-dashboard"), Route::EmailCampaigns);
        assert_eq!(Route::parse("/email-dashboard/"), Route::EmailCampaigns);
        assert_eq!(
            Route::parse("/email-dashboard/ce377a89?tab=stats"),
            Route::EmailDashboard("ce377a89".into())
        );
        assert_eq!(Route::parse("/linkedin-dashboard"), Route::LinkedinDashboard);
    }

    #[test]
    fn unknown_paths_fall_back_to_home() {
        assert_eq!(Route::parse("/settings"), Route::Home);
        assert_eq!(Route::parse("/email-dashboard/a/b"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn paths_round_trip_through_encoding() {
        let route = Route::EmailDashboard("id with space".into());
        assert_eq!(route.path(), "/email-dashboard/id%20with%20space");
        assert_eq!(Route::parse(&route.path()), route);
    }
}
