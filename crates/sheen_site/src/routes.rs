//! Route table
//!
//! Two pages plus a not-found view. Paths may carry the deployment base
//! path, a trailing slash, a query string or a `#section` anchor; the
//! anchor selects the section to scroll to after navigation.

use crate::sections::SectionKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A page of the site
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Landing,
    Portfolio,
    NotFound,
}

impl Route {
    /// Every routable page, in menu order
    pub const ALL: [Route; 2] = [Route::Landing, Route::Portfolio];

    /// Canonical path, `None` for the not-found view
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Route::Landing => Some("/"),
            Route::Portfolio => Some("/portfolio"),
            Route::NotFound => None,
        }
    }

    /// Sections mounted for this page, top to bottom
    pub fn sections(&self) -> &'static [SectionKind] {
        match self {
            Route::Landing => &[
                SectionKind::Hero,
                SectionKind::Services,
                SectionKind::Reviews,
                SectionKind::About,
                SectionKind::Contact,
            ],
            Route::Portfolio => &[SectionKind::Portfolio, SectionKind::Contact],
            Route::NotFound => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Landing => "landing",
            Route::Portfolio => "portfolio",
            Route::NotFound => "not_found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved navigation target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    /// Section anchor (`/#services` → `services`)
    pub anchor: Option<String>,
}

/// Resolves paths against the route table
#[derive(Clone, Debug)]
pub struct Router {
    base_path: String,
}

impl Router {
    pub fn new(base_path: impl Into<String>) -> Self {
        let base = base_path.into();
        let trimmed = base.trim_end_matches('/');
        Self {
            base_path: if trimmed.is_empty() {
                "/".to_string()
            } else {
                trimmed.to_string()
            },
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn resolve(&self, path: &str) -> Location {
        let (path, anchor) = match path.split_once('#') {
            Some((path, anchor)) => (path, Some(anchor)),
            None => (path, None),
        };
        let path = path.split('?').next().unwrap_or_default();

        let path = if self.base_path == "/" {
            path
        } else {
            match path.strip_prefix(self.base_path.as_str()) {
                Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                _ => {
                    return Location {
                        route: Route::NotFound,
                        anchor: None,
                    }
                }
            }
        };

        let normalized = path.trim_end_matches('/');
        let route = match normalized {
            "" => Route::Landing,
            "/portfolio" => Route::Portfolio,
            _ => Route::NotFound,
        };

        Location {
            route,
            anchor: anchor
                .filter(|a| !a.is_empty() && route != Route::NotFound)
                .map(str::to_string),
        }
    }

    /// Link for a route under the base path
    pub fn href(&self, route: Route) -> Option<String> {
        let path = route.path()?;
        if self.base_path == "/" {
            return Some(path.to_string());
        }
        Some(match path {
            "/" => format!("{}/", self.base_path),
            other => format!("{}{}", self.base_path, other),
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}
