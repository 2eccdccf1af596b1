//! Release routing - maps an upstream version tag to a build target
//!
//! This is the decision logic of cbs-publish: given a tag like "v3.0.5",
//! derive its version series ("v3") and look that series up in the
//! hand-maintained mapping table from the configuration. A series with no
//! entry is a hard error; building into a guessed target would corrupt a
//! release channel, so resolution never falls back to a default.

use std::collections::HashMap;
use std::fmt;

use crate::config::MappingEntry;
use crate::error::{CbsPublishError, Result};

/// A coarse version grouping derived from an upstream tag (e.g. "v3")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionSeries(String);

impl VersionSeries {
    /// Derive the series from a raw tag string.
    ///
    /// Strips a leading 'v'/'V' and takes the major version component.
    /// Well-formed tags ("v3.0.5", "v3.1.0-rc.1") parse as semver; loose
    /// upstream tags like "v3.0.0rc7" are not valid semver, so those fall
    /// back to the leading numeric component.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let clean = tag.trim_start_matches('v').trim_start_matches('V');

        if let Ok(version) = semver::Version::parse(clean) {
            return Ok(VersionSeries(format!("v{}", version.major)));
        }

        let loose = regex::Regex::new(r"^(\d+)(?:[.\-].*)?$")
            .map_err(|e| CbsPublishError::version(format!("Invalid series pattern: {}", e)))?;
        match loose.captures(clean) {
            Some(caps) => Ok(VersionSeries(format!("v{}", &caps[1]))),
            None => Err(CbsPublishError::version(format!(
                "Cannot derive a version series from tag '{}'",
                tag
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a resolved tag goes: one build target, plus the release-channel
/// tags applied to the build afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Remote build environment to submit into (e.g. "storage7-ceph-jewel-el7")
    pub target: String,
    /// Downstream channel tags, applied in order after a successful build
    pub candidates: Vec<String>,
}

/// Result of resolving a tag against the mapping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub tag: String,
    pub series: VersionSeries,
    pub route: Route,
}

/// The series-to-target mapping table, read-only once built
#[derive(Debug, Clone)]
pub struct Router {
    routes: HashMap<VersionSeries, Route>,
}

impl Router {
    /// Build the routing table from configured mapping entries.
    ///
    /// Two entries for the same series would make resolution ambiguous, so
    /// duplicates are rejected here rather than left to surprise at runtime.
    pub fn from_entries(entries: &[MappingEntry]) -> Result<Self> {
        let mut routes = HashMap::new();

        for entry in entries {
            let series = VersionSeries(entry.series.clone());
            let route = Route {
                target: entry.target.clone(),
                candidates: entry.candidates.clone(),
            };
            if routes.insert(series, route).is_some() {
                return Err(CbsPublishError::config(format!(
                    "Duplicate mapping for series '{}'",
                    entry.series
                )));
            }
        }

        Ok(Router { routes })
    }

    /// Resolve a raw upstream tag to its build target and candidate tags.
    ///
    /// Pure over the table: same tag in, same resolution out. An unknown
    /// series fails with [CbsPublishError::UnmappedSeries] so the caller
    /// aborts before any build is submitted.
    pub fn resolve(&self, tag: &str) -> Result<Resolution> {
        let series = VersionSeries::from_tag(tag)?;

        match self.routes.get(&series) {
            Some(route) => Ok(Resolution {
                tag: tag.to_string(),
                series,
                route: route.clone(),
            }),
            None => Err(CbsPublishError::UnmappedSeries {
                series: series.0,
                tag: tag.to_string(),
            }),
        }
    }

    /// Configured series names, sorted for display
    pub fn series_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Look up the route for a series name, if one is configured
    pub fn route_for(&self, series: &str) -> Option<&Route> {
        self.routes.get(&VersionSeries(series.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(series: &str, target: &str, candidates: &[&str]) -> MappingEntry {
        MappingEntry {
            series: series.to_string(),
            target: target.to_string(),
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_series_from_tag() {
        assert_eq!(VersionSeries::from_tag("v3.0.5").unwrap().as_str(), "v3");
        assert_eq!(VersionSeries::from_tag("V2.4.1").unwrap().as_str(), "v2");
        assert_eq!(VersionSeries::from_tag("3.1.0").unwrap().as_str(), "v3");
    }

    #[test]
    fn test_series_from_loose_tag() {
        // rc suffix glued to the patch digit is not valid semver
        assert_eq!(VersionSeries::from_tag("v3.0.0rc7").unwrap().as_str(), "v3");
        assert_eq!(VersionSeries::from_tag("v2.1").unwrap().as_str(), "v2");
    }

    #[test]
    fn test_series_from_semver_prerelease() {
        assert_eq!(
            VersionSeries::from_tag("v4.0.0-rc.1").unwrap().as_str(),
            "v4"
        );
    }

    #[test]
    fn test_series_from_garbage_tag() {
        assert!(VersionSeries::from_tag("nightly").is_err());
        assert!(VersionSeries::from_tag("").is_err());
        assert!(VersionSeries::from_tag("v").is_err());
    }

    #[test]
    fn test_resolve_mapped_series() {
        let router = Router::from_entries(&[entry(
            "v3",
            "storage7-ceph-jewel-el7",
            &["storage7-ceph-luminous-candidate"],
        )])
        .unwrap();

        let res = router.resolve("v3.0.5").unwrap();
        assert_eq!(res.series.as_str(), "v3");
        assert_eq!(res.route.target, "storage7-ceph-jewel-el7");
        assert_eq!(
            res.route.candidates,
            vec!["storage7-ceph-luminous-candidate".to_string()]
        );
    }

    #[test]
    fn test_resolve_unmapped_series_fails() {
        let router =
            Router::from_entries(&[entry("v3", "storage7-ceph-jewel-el7", &[])]).unwrap();

        let err = router.resolve("v4.1.0").unwrap_err();
        assert!(err.is_unmapped_series());
        assert!(err.to_string().contains("v4"));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let router = Router::from_entries(&[entry(
            "v2",
            "storage7-ceph-jewel-el7",
            &["jewel-candidate"],
        )])
        .unwrap();

        let first = router.resolve("v2.4.1").unwrap();
        let second = router.resolve("v2.4.1").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_series_rejected() {
        let result = Router::from_entries(&[
            entry("v3", "target-a", &[]),
            entry("v3", "target-b", &[]),
        ]);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Duplicate mapping"));
    }

    #[test]
    fn test_shared_target_resolves_independently() {
        let router = Router::from_entries(&[
            entry("v2", "storage7-ceph-el7", &["jewel-candidate"]),
            entry("v3", "storage7-ceph-el7", &["luminous-candidate"]),
        ])
        .unwrap();

        let v2 = router.resolve("v2.0.0").unwrap();
        let v3 = router.resolve("v3.0.0").unwrap();
        assert_eq!(v2.route.target, v3.route.target);
        assert_eq!(v2.route.candidates, vec!["jewel-candidate".to_string()]);
        assert_eq!(v3.route.candidates, vec!["luminous-candidate".to_string()]);
    }

    #[test]
    fn test_series_names_sorted() {
        let router = Router::from_entries(&[
            entry("v3", "b", &[]),
            entry("v2", "a", &[]),
        ])
        .unwrap();

        assert_eq!(router.series_names(), vec!["v2", "v3"]);
    }
}
