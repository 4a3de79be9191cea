//! Proximity search over the provider catalog.
//!
//! Pure and synchronous: predicate filtering, great-circle distance and
//! ordering over an in-memory snapshot of providers. Fetching the snapshot is
//! the repository's concern (`provider_service::search_providers`); nothing
//! here touches the database or mutates a record.

pub mod geo;
pub mod query;

pub use query::{GeoPoint, QueryError, SearchQuery, DEFAULT_RADIUS_KM};

use serde::Serialize;

use models::provider;

/// A matched provider paired with its computed distance from the query
/// origin. The distance lives on this wrapper, never on the record itself, so
/// a cached record can serve concurrent requests with different origins.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub provider: provider::Model,
    #[serde(rename = "distance", skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Filter, annotate and order the catalog for one query.
///
/// Without an origin the filtered records pass through in input order with no
/// distance. With an origin, records missing either coordinate are dropped,
/// the rest are kept when within the radius bound (inclusive) and sorted
/// nearest-first; equal distances keep their input order.
pub fn search(providers: Vec<provider::Model>, query: &SearchQuery) -> Vec<SearchResult> {
    let matched = providers.into_iter().filter(|p| query::matches_query(p, query));

    let Some(origin) = query.origin else {
        return matched.map(|p| SearchResult { provider: p, distance_km: None }).collect();
    };

    let radius_km = query.radius_or_default();
    let mut within: Vec<(f64, provider::Model)> = matched
        .filter_map(|p| {
            let (lat, lng) = p.geolocation()?;
            let d = geo::distance_km(origin.lat, origin.lng, lat, lng);
            (d <= radius_km).then_some((d, p))
        })
        .collect();

    // sort_by is stable, so ties preserve the filtered order
    within.sort_by(|a, b| a.0.total_cmp(&b.0));

    within
        .into_iter()
        .map(|(d, p)| SearchResult { provider: p, distance_km: Some(d) })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use chrono::Utc;
    use models::provider;
    use uuid::Uuid;

    /// An approved provider with a complete profile at (0, 0).
    pub fn approved(service_name: &str) -> provider::Model {
        let now = Utc::now().into();
        provider::Model {
            id: Uuid::new_v4(),
            owner_name: "Asha Verma".into(),
            service_name: service_name.into(),
            description: "General call-outs".into(),
            email: format!("{}@example.com", Uuid::new_v4()),
            phone: "9876500000".into(),
            address: "12 MG Road".into(),
            lat: Some(0.0),
            lng: Some(0.0),
            category_id: Uuid::new_v4(),
            pricing: None,
            rating_avg: 0.0,
            rating_count: 0,
            skills: Vec::new(),
            experience: None,
            status: provider::STATUS_APPROVED.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Longitude (degrees) of a point `km` east of (0, 0) along the equator.
    pub fn lng_at_km(km: f64) -> f64 {
        (km / 6371.0).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::{approved, lng_at_km};
    use super::*;
    use models::provider::STATUS_PENDING;

    fn at_km(service_name: &str, km: f64) -> models::provider::Model {
        let mut p = approved(service_name);
        p.lat = Some(0.0);
        p.lng = Some(lng_at_km(km));
        p
    }

    fn origin_query(radius_km: Option<f64>) -> SearchQuery {
        SearchQuery::from_parts(None, None, None, Some(0.0), Some(0.0), radius_km).unwrap()
    }

    fn names(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.provider.service_name.as_str()).collect()
    }

    #[test]
    fn no_origin_passes_matches_through_in_input_order() {
        let providers = vec![at_km("c", 30.0), at_km("a", 10.0), at_km("b", 20.0)];
        let query = SearchQuery::default();
        let results = search(providers, &query);
        assert_eq!(names(&results), ["c", "a", "b"]);
        assert!(results.iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn origin_sorts_ascending_by_distance() {
        let providers = vec![at_km("c", 30.0), at_km("a", 10.0), at_km("b", 20.0)];
        let results = search(providers, &origin_query(None));
        assert_eq!(names(&results), ["a", "b", "c"]);
        let distances: Vec<f64> = results.iter().map(|r| r.distance_km.unwrap()).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let providers = vec![at_km("far", 30.0), at_km("tie1", 20.0), at_km("tie2", 20.0), at_km("near", 5.0)];
        let results = search(providers, &origin_query(None));
        assert_eq!(names(&results), ["near", "tie1", "tie2", "far"]);
    }

    #[test]
    fn radius_bound_is_inclusive() {
        // Radius set to the exact computed distance of the farthest kept
        // provider, so `<=` vs `<` is what this test pins down.
        let boundary = at_km("boundary", 50.0);
        let (lat, lng) = boundary.geolocation().unwrap();
        let exact = geo::distance_km(0.0, 0.0, lat, lng);

        let providers = vec![at_km("near", 10.0), at_km("close", 49.9), boundary, at_km("outside", 50.1)];
        let results = search(providers, &origin_query(Some(exact)));
        assert_eq!(names(&results), ["near", "close", "boundary"]);
    }

    #[test]
    fn default_radius_is_50_km() {
        let providers = vec![at_km("in", 49.0), at_km("out", 51.0)];
        let results = search(providers, &origin_query(None));
        assert_eq!(names(&results), ["in"]);
    }

    #[test]
    fn zero_radius_keeps_only_the_exact_point() {
        let providers = vec![at_km("here", 0.0), at_km("near", 1.0)];
        let results = search(providers, &origin_query(Some(0.0)));
        assert_eq!(names(&results), ["here"]);
        assert_eq!(results[0].distance_km, Some(0.0));
    }

    #[test]
    fn missing_coordinate_excludes_from_bounded_search_only() {
        let mut half = at_km("half", 1.0);
        half.lng = None;
        let providers = vec![half.clone(), at_km("whole", 2.0)];

        let bounded = search(providers.clone(), &origin_query(None));
        assert_eq!(names(&bounded), ["whole"]);

        // Same record is still returned (distance-less) without an origin
        let unbounded = search(providers, &SearchQuery::default());
        assert_eq!(names(&unbounded), ["half", "whole"]);
        assert!(unbounded[0].distance_km.is_none());
    }

    #[test]
    fn unapproved_records_never_appear() {
        let mut pending = at_km("pending", 1.0);
        pending.status = STATUS_PENDING.to_string();
        let providers = vec![pending.clone(), at_km("ok", 2.0)];

        let results = search(providers.clone(), &origin_query(None));
        assert_eq!(names(&results), ["ok"]);
        let results = search(providers, &SearchQuery::default());
        assert_eq!(names(&results), ["ok"]);
    }

    #[test]
    fn empty_result_is_fine() {
        let query = SearchQuery::from_parts(Some("nothing matches this".into()), None, None, None, None, None).unwrap();
        let results = search(vec![at_km("a", 1.0)], &query);
        assert!(results.is_empty());
    }

    #[test]
    fn results_serialize_with_flattened_record_and_distance() {
        let results = search(vec![at_km("Aqua Flow", 10.0)], &origin_query(None));
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json[0]["service_name"], "Aqua Flow");
        assert!(json[0]["distance"].as_f64().unwrap() > 9.0);

        // No origin: the distance key is omitted entirely
        let results = search(vec![at_km("Aqua Flow", 10.0)], &SearchQuery::default());
        let json = serde_json::to_value(&results).unwrap();
        assert!(json[0].get("distance").is_none());
    }
}
