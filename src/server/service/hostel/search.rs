//! In-memory stages of the hostel search.
//!
//! Text, type, city, and state filters run in SQL. Filters over room types, JSON columns, and
//! coordinates are applied here to the approved candidates, followed by sorting.

use std::cmp::Ordering;

use entity::types::RoomTypePreference;

use crate::{
    model::hostel::{HostelSearchQuery, SearchSort, SortOrder},
    server::{
        model::db::{HostelModel, RoomTypeModel},
        util::{geo::haversine_km, money::round2},
    },
};

/// Radius applied to geographic searches without an explicit radius, in km
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// An approved hostel with its room types, and its distance when the search is geographic.
pub struct Candidate {
    pub hostel: HostelModel,
    pub room_types: Vec<RoomTypeModel>,
    pub distance_km: Option<f64>,
}

impl Candidate {
    fn cheapest_bed(&self) -> Option<f64> {
        self.room_types
            .iter()
            .map(|room_type| room_type.price_per_bed)
            .min_by(f64::total_cmp)
    }
}

/// Search criteria that cannot be expressed in SQL.
pub struct Criteria {
    pub room_type: RoomTypePreference,
    pub facilities: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub university_id: Option<i32>,
    pub department_id: Option<i32>,
    /// Center and radius in km of a geographic search
    pub near: Option<(f64, f64, f64)>,
}

impl From<&HostelSearchQuery> for Criteria {
    fn from(query: &HostelSearchQuery) -> Self {
        let facilities = query
            .facilities
            .as_deref()
            .map(|facilities| {
                facilities
                    .split(',')
                    .map(|facility| facility.trim().to_lowercase())
                    .filter(|facility| !facility.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let near = query.latitude.zip(query.longitude).map(|(latitude, longitude)| {
            let radius = query
                .radius
                .filter(|radius| *radius > 0.0)
                .unwrap_or(DEFAULT_RADIUS_KM);
            (latitude, longitude, radius)
        });

        Self {
            room_type: query.room_type.unwrap_or_default(),
            facilities,
            min_price: query.min_price,
            max_price: query.max_price,
            university_id: query.university_id,
            department_id: query.department_id,
            near,
        }
    }
}

impl Criteria {
    /// Annotates the candidate with its distance and reports whether it passes every filter
    pub fn admit(&self, candidate: &mut Candidate) -> bool {
        let hostel = &candidate.hostel;

        if !candidate
            .room_types
            .iter()
            .any(|room_type| self.room_type.matches(room_type.room_type))
        {
            return false;
        }

        if !self.facilities.iter().all(|wanted| {
            hostel
                .facilities
                .0
                .iter()
                .any(|offered| offered.eq_ignore_ascii_case(wanted))
        }) {
            return false;
        }

        if self.min_price.is_some() || self.max_price.is_some() {
            let in_range = candidate.room_types.iter().any(|room_type| {
                self.min_price.is_none_or(|min| room_type.price_per_bed >= min)
                    && self.max_price.is_none_or(|max| room_type.price_per_bed <= max)
            });
            if !in_range {
                return false;
            }
        }

        if let Some(university_id) = self.university_id {
            if !hostel
                .nearby_universities
                .0
                .iter()
                .any(|nearby| nearby.institution_id == university_id)
            {
                return false;
            }
        }

        if let Some(department_id) = self.department_id {
            if !hostel
                .nearby_departments
                .0
                .iter()
                .any(|nearby| nearby.institution_id == department_id)
            {
                return false;
            }
        }

        if let Some((latitude, longitude, radius)) = self.near {
            let distance = haversine_km(latitude, longitude, hostel.latitude, hostel.longitude);
            if distance > radius {
                return false;
            }
            candidate.distance_km = Some(round2(distance));
        }

        true
    }
}

/// Orders candidates in place.
///
/// Price compares the cheapest bed of each hostel. Distance always puts the nearest first and
/// falls back to the creation date when the search has no coordinates.
pub fn sort(candidates: &mut [Candidate], sort_by: SearchSort, order: SortOrder) {
    let directed = |ordering: Ordering| match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    };

    let by_created = |a: &Candidate, b: &Candidate| {
        a.hostel
            .created_at
            .cmp(&b.hostel.created_at)
            .then(a.hostel.id.cmp(&b.hostel.id))
    };

    match sort_by {
        SearchSort::Distance if candidates.iter().all(|c| c.distance_km.is_some()) => candidates
            .sort_by(|a, b| {
                a.distance_km
                    .unwrap_or_default()
                    .total_cmp(&b.distance_km.unwrap_or_default())
            }),
        SearchSort::Price => candidates.sort_by(|a, b| {
            let price = |c: &Candidate| c.cheapest_bed().unwrap_or(f64::MAX);
            directed(price(a).total_cmp(&price(b)).then_with(|| by_created(a, b)))
        }),
        SearchSort::Rating => candidates.sort_by(|a, b| {
            directed(
                a.hostel
                    .rating_average
                    .total_cmp(&b.hostel.rating_average)
                    .then_with(|| by_created(a, b)),
            )
        }),
        SearchSort::CreatedAt | SearchSort::Distance => {
            candidates.sort_by(|a, b| directed(by_created(a, b)))
        }
    }
}
