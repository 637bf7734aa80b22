use crate::{error::ForecastError, model::Place};

/// Pick the best candidate for `query`.
///
/// An exact, case-insensitive name match wins; otherwise the search API's own
/// ordering is trusted and the first candidate is taken.
pub fn resolve(query: &str, candidates: &[Place]) -> Result<Place, ForecastError> {
    let needle = query.trim().to_lowercase();

    candidates
        .iter()
        .find(|p| p.common_name.trim().to_lowercase() == needle)
        .or_else(|| candidates.first())
        .cloned()
        .ok_or_else(|| ForecastError::NoMatch(query.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_beats_list_order() {
        let candidates = vec![Place::named("French Republic"), Place::named("France")];
        let best = resolve("France", &candidates).unwrap();
        assert_eq!(best.common_name, "France");
    }

    #[test]
    fn match_ignores_case_and_surrounding_space() {
        let candidates = vec![Place::named("Niger"), Place::named("Nigeria")];
        let best = resolve("  NIGERIA ", &candidates).unwrap();
        assert_eq!(best.common_name, "Nigeria");
    }

    #[test]
    fn falls_back_to_first_candidate() {
        let candidates = vec![Place::named("United Kingdom"), Place::named("Ukraine")];
        let best = resolve("uk", &candidates).unwrap();
        assert_eq!(best.common_name, "United Kingdom");
    }

    #[test]
    fn empty_candidates_is_no_match() {
        let err = resolve("xyzzy", &[]).unwrap_err();
        assert!(matches!(err, ForecastError::NoMatch(ref q) if q == "xyzzy"));
    }
}
