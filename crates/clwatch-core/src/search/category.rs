//! Category-code resolution for the vehicle search front end.

use crate::SearchError;

/// (vehicle type, seller type) → feed category code.
const CATEGORY_CODES: &[(&str, &str, &str)] = &[
    ("cars-trucks", "all", "cta"),
    ("cars-trucks", "dealer", "ctd"),
    ("cars-trucks", "owner", "cto"),
    ("motorcycles", "all", "mca"),
    ("motorcycles", "dealer", "mcd"),
    ("motorcycles", "owner", "mco"),
];

/// Resolve a (vehicle type, seller type) pair to its category code.
///
/// # Errors
///
/// Returns [`SearchError::UnknownCategory`] if the pair is not in the table.
/// There is no silent fallback to an "all" code; the caller aborts instead.
pub fn category_code(vehicle_type: &str, seller_type: &str) -> Result<&'static str, SearchError> {
    CATEGORY_CODES
        .iter()
        .find(|(vehicle, seller, _)| *vehicle == vehicle_type && *seller == seller_type)
        .map(|(_, _, code)| *code)
        .ok_or_else(|| SearchError::UnknownCategory {
            vehicle_type: vehicle_type.to_owned(),
            seller_type: seller_type.to_owned(),
        })
}

/// Whether a category code belongs to the vehicle taxonomy. Vehicle searches
/// use `auto_make_model` for the free-text query instead of `query`.
#[must_use]
pub fn is_vehicle_category(code: &str) -> bool {
    CATEGORY_CODES.iter().any(|(_, _, known)| *known == code)
}
