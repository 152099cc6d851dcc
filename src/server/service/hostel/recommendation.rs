//! Preference based scoring of a page of search results for a signed-in student.

use entity::types::{HostelTypePreference, StudentProfile};

use crate::{model::hostel::{HostelDto, RecommendationDto}, server::util::money::round2};

/// Number of recommendations attached to a search page
pub const MAX_RECOMMENDATIONS: usize = 3;
const MAX_REASONS: usize = 3;

const BUDGET_WEIGHT: f64 = 30.0;
const ROOM_TYPE_WEIGHT: f64 = 20.0;
const HOSTEL_TYPE_WEIGHT: f64 = 20.0;
const FACILITY_WEIGHT: f64 = 15.0;
const RATING_WEIGHT: f64 = 10.0;
const DEPARTMENT_BONUS: f64 = 15.0;
const DEPARTMENT_DISTANCE_PENALTY: f64 = 10.0;

/// Rating from which a hostel is called out as highly rated
const HIGHLY_RATED: f64 = 4.0;

fn cheapest_bed(hostel: &HostelDto) -> Option<f64> {
    hostel
        .room_types
        .iter()
        .map(|room_type| room_type.price_per_bed)
        .min_by(f64::total_cmp)
}

fn fits_budget(hostel: &HostelDto, profile: &StudentProfile) -> bool {
    let preferences = &profile.preferences;

    cheapest_bed(hostel)
        .is_some_and(|price| price >= preferences.budget_min && price <= preferences.budget_max)
}

fn offers(hostel: &HostelDto, facility: &str) -> bool {
    hostel
        .facilities
        .iter()
        .any(|offered| offered.eq_ignore_ascii_case(facility))
}

/// Scores a hostel against a student's preferences.
///
/// Budget fit on the cheapest bed, room type, hostel type, the fraction of preferred facilities
/// offered, and the rating contribute fixed weights. A hostel that lists the student's department
/// as nearby within their maximum distance earns a bonus shrinking with the distance.
pub fn score(hostel: &HostelDto, profile: &StudentProfile) -> f64 {
    let preferences = &profile.preferences;
    let mut score = 0.0;

    if fits_budget(hostel, profile) {
        score += BUDGET_WEIGHT;
    }

    if hostel
        .room_types
        .iter()
        .any(|room_type| preferences.room_type.matches(room_type.room_type))
    {
        score += ROOM_TYPE_WEIGHT;
    }

    if preferences.hostel_type.matches(hostel.hostel_type) {
        score += HOSTEL_TYPE_WEIGHT;
    }

    // No preferred facilities contributes nothing
    if !preferences.facilities.is_empty() {
        let matching = preferences
            .facilities
            .iter()
            .filter(|facility| offers(hostel, facility))
            .count();
        score += matching as f64 / preferences.facilities.len() as f64 * FACILITY_WEIGHT;
    }

    score += hostel.ratings.average / 5.0 * RATING_WEIGHT;

    if let Some(department_id) = profile.department_id {
        let max_distance = preferences.max_distance_km;
        let nearby = hostel
            .location
            .nearby_departments
            .iter()
            .find(|nearby| nearby.institution_id == department_id);

        if let Some(nearby) = nearby.filter(|n| max_distance > 0.0 && n.distance_km <= max_distance)
        {
            score += DEPARTMENT_BONUS
                - nearby.distance_km / max_distance * DEPARTMENT_DISTANCE_PENALTY;
        }
    }

    round2(score)
}

/// Up to three short explanations of why a hostel suits the student
pub fn reasons(hostel: &HostelDto, profile: &StudentProfile) -> Vec<String> {
    let preferences = &profile.preferences;
    let prefers = |facility: &str| {
        preferences
            .facilities
            .iter()
            .any(|preferred| preferred.eq_ignore_ascii_case(facility))
    };

    let mut reasons = Vec::new();

    if fits_budget(hostel, profile) {
        reasons.push("Fits your budget perfectly".to_string());
    }
    if hostel.ratings.average >= HIGHLY_RATED {
        reasons.push("Highly rated by students".to_string());
    }
    if prefers("wifi") && offers(hostel, "wifi") {
        reasons.push("Has WiFi as requested".to_string());
    }
    if prefers("mess") && (offers(hostel, "mess") || hostel.mess.available) {
        reasons.push("Mess facility available".to_string());
    }
    if preferences.hostel_type != HostelTypePreference::Any
        && preferences.hostel_type.matches(hostel.hostel_type)
    {
        reasons.push(format!(
            "Perfect match for {} accommodation",
            hostel.hostel_type
        ));
    }

    reasons.truncate(MAX_REASONS);
    reasons
}

/// The best scoring hostels of a page, highest score first
pub fn recommend(hostels: &[HostelDto], profile: &StudentProfile) -> Vec<RecommendationDto> {
    let mut scored: Vec<RecommendationDto> = hostels
        .iter()
        .map(|hostel| RecommendationDto {
            score: score(hostel, profile),
            reasons: reasons(hostel, profile),
            hostel: hostel.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(MAX_RECOMMENDATIONS);
    scored
}
