//! Location values as they arrive on the wire
//!
//! Servers occasionally send locations with a missing `uri` or `range`, which
//! the strict lsp-types structs cannot represent. These lenient variants keep
//! such entries decodable so they can be skipped one by one.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{Location, LocationLink, Range, Url};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartialLocation {
    #[serde(default)]
    pub uri: Option<Url>,
    #[serde(default)]
    pub range: Option<Range>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialLocationLink {
    #[serde(default)]
    pub origin_selection_range: Option<Range>,
    #[serde(default)]
    pub target_uri: Option<Url>,
    #[serde(default)]
    pub target_range: Option<Range>,
    #[serde(default)]
    pub target_selection_range: Option<Range>,
}

impl PartialLocation {
    /// Returns the complete location, if both fields are present
    pub fn complete(&self) -> Option<Location> {
        match (&self.uri, self.range) {
            (Some(uri), Some(range)) => Some(Location::new(uri.clone(), range)),
            _ => None,
        }
    }
}

impl From<Location> for PartialLocation {
    fn from(location: Location) -> Self {
        Self {
            uri: Some(location.uri),
            range: Some(location.range),
        }
    }
}

impl From<LocationLink> for PartialLocationLink {
    fn from(link: LocationLink) -> Self {
        Self {
            origin_selection_range: link.origin_selection_range,
            target_uri: Some(link.target_uri),
            target_range: Some(link.target_range),
            target_selection_range: Some(link.target_selection_range),
        }
    }
}

/// Maps a link's target onto a plain location.
///
/// Returns `None` when the target URI or target range is absent.
pub fn link_to_location(link: &PartialLocationLink) -> Option<Location> {
    let uri = link.target_uri.clone()?;
    let range = link.target_range?;
    Some(Location::new(uri, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Position;

    fn uri() -> Url {
        Url::parse("file:///src/A.kt").unwrap()
    }

    fn range() -> Range {
        Range::new(Position::new(3, 4), Position::new(3, 9))
    }

    #[test]
    fn link_to_location_copies_target_uri_and_range() {
        let link = PartialLocationLink {
            origin_selection_range: Some(Range::default()),
            target_uri: Some(uri()),
            target_range: Some(range()),
            target_selection_range: Some(Range::default()),
        };

        assert_eq!(link_to_location(&link), Some(Location::new(uri(), range())));
    }

    #[test]
    fn link_to_location_returns_none_without_target_uri() {
        let link = PartialLocationLink {
            target_range: Some(range()),
            ..Default::default()
        };

        assert_eq!(link_to_location(&link), None);
    }

    #[test]
    fn link_to_location_returns_none_without_target_range() {
        let link = PartialLocationLink {
            target_uri: Some(uri()),
            ..Default::default()
        };

        assert_eq!(link_to_location(&link), None);
    }

    #[test]
    fn link_to_location_ignores_selection_ranges() {
        let strict = LocationLink {
            origin_selection_range: None,
            target_uri: uri(),
            target_range: range(),
            target_selection_range: Range::new(Position::new(3, 5), Position::new(3, 6)),
        };

        let location = link_to_location(&strict.into()).unwrap();

        assert_eq!(location.range, range());
    }

    #[test]
    fn partial_location_link_decodes_missing_fields() {
        let link: PartialLocationLink =
            serde_json::from_str(r#"{"targetUri": "file:///src/A.kt"}"#).unwrap();

        assert_eq!(link.target_uri, Some(uri()));
        assert_eq!(link.target_range, None);
    }

    #[test]
    fn complete_requires_both_fields() {
        let partial = PartialLocation {
            uri: Some(uri()),
            range: None,
        };

        assert_eq!(partial.complete(), None);
        assert_eq!(
            PartialLocation::from(Location::new(uri(), range())).complete(),
            Some(Location::new(uri(), range()))
        );
    }
}
