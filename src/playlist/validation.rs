use crate::types::{FilterField, GenreFilter, PlaylistFilters, ValidationResult};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;
pub const MAX_TRACK_COUNT: i32 = 100;

pub const GENRE_EMPTY: &str = "genre must include at least one value";
pub const YEAR_ORDER: &str = "yearEnd must be greater than or equal to yearStart";
pub const TRACK_COUNT_LOW: &str = "trackCount must be greater than 0";

fn year_range_message(field: FilterField) -> String {
    format!("{field} must be between {MIN_YEAR} and {MAX_YEAR}")
}

fn track_count_high_message() -> String {
    format!("trackCount must be less than or equal to {MAX_TRACK_COUNT}")
}

/// Checks `filters` against the domain rules. Every rule is evaluated, so all
/// offending fields are reported at once. Absent filters are always valid.
pub fn validate_filters(filters: &PlaylistFilters) -> ValidationResult {
    let mut result = ValidationResult::default();

    if matches!(&filters.genre, Some(GenreFilter::Many(genres)) if genres.is_empty()) {
        result.reject(FilterField::Genre, GENRE_EMPTY);
    }

    let out_of_range = |year: i32| !(MIN_YEAR..=MAX_YEAR).contains(&year);

    if filters.year_start.is_some_and(out_of_range) {
        result.reject(FilterField::YearStart, year_range_message(FilterField::YearStart));
    }

    if filters.year_end.is_some_and(out_of_range) {
        result.reject(FilterField::YearEnd, year_range_message(FilterField::YearEnd));
    }

    // runs after the range checks so the order message wins on yearEnd
    if let Some((start, end)) = filters.year_range() {
        if start > end {
            result.reject(FilterField::YearEnd, YEAR_ORDER);
        }
    }

    match filters.track_count {
        Some(count) if count <= 0 => result.reject(FilterField::TrackCount, TRACK_COUNT_LOW),
        Some(count) if count > MAX_TRACK_COUNT => {
            result.reject(FilterField::TrackCount, track_count_high_message())
        }
        _ => {}
    }

    result
}
