use thiserror::Error;
use uuid::Uuid;

use models::provider;

/// Radius bound applied when a query has an origin but no explicit radius.
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

/// The point proximity is measured from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("lat and lng must be provided together")]
    HalfOrigin,
    #[error("latitude must be within [-90, 90] and longitude within [-180, 180]")]
    OriginOutOfRange,
    #[error("radius must be a finite, non-negative number of kilometers")]
    InvalidRadius,
}

/// A validated search filter. Construction goes through [`SearchQuery::from_parts`]
/// so the pure pipeline never sees a half-specified origin or a bogus radius.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against service name, description
    /// or any skill tag. Trimmed; an empty term means no term filter.
    pub term: Option<String>,
    pub category: Option<Uuid>,
    /// Inclusive lower bound on the rating average.
    pub min_rating: Option<f64>,
    pub origin: Option<GeoPoint>,
    /// Only meaningful together with `origin`. `Some(0.0)` is a literal
    /// zero-kilometer bound, not "unbounded".
    pub radius_km: Option<f64>,
}

impl SearchQuery {
    pub fn from_parts(
        term: Option<String>,
        category: Option<Uuid>,
        min_rating: Option<f64>,
        lat: Option<f64>,
        lng: Option<f64>,
        radius_km: Option<f64>,
    ) -> Result<Self, QueryError> {
        let origin = match (lat, lng) {
            (Some(lat), Some(lng)) => {
                if !lat.is_finite() || !lng.is_finite() || !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                    return Err(QueryError::OriginOutOfRange);
                }
                Some(GeoPoint { lat, lng })
            }
            (None, None) => None,
            _ => return Err(QueryError::HalfOrigin),
        };
        if let Some(radius) = radius_km {
            if !radius.is_finite() || radius < 0.0 {
                return Err(QueryError::InvalidRadius);
            }
        }
        let term = term.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        Ok(Self { term, category, min_rating, origin, radius_km })
    }

    /// Effective radius bound for origin-bounded searches.
    pub fn radius_or_default(&self) -> f64 {
        self.radius_km.unwrap_or(DEFAULT_RADIUS_KM)
    }
}

/// The distance-independent part of the search filter. Geolocation is layered
/// on afterwards by the orchestrator, which needs the computed distance as a
/// sort key anyway.
pub fn matches_query(record: &provider::Model, query: &SearchQuery) -> bool {
    // Only approved providers are ever searchable, whatever the caller asked for
    if !record.is_approved() {
        return false;
    }
    if let Some(category) = query.category {
        if record.category_id != category {
            return false;
        }
    }
    if let Some(term) = &query.term {
        let needle = term.to_lowercase();
        let hit = record.service_name.to_lowercase().contains(&needle)
            || record.description.to_lowercase().contains(&needle)
            || record.skills.iter().any(|s| s.to_lowercase().contains(&needle));
        if !hit {
            return false;
        }
    }
    if let Some(min_rating) = query.min_rating {
        if record.rating_avg < min_rating {
            return false;
        }
    }
    true
}
