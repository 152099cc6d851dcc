//! Hostel listings: owner management, public lookup, and search.

pub mod recommendation;
pub mod search;

use std::collections::{HashMap, HashSet};

use entity::{
    sea_orm_active_enums::{HostelStatus, HostelType, RoomType, UserRole},
    types::{HostelTypePreference, NearbyInstitutions},
};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::{
        api::{PageQuery, PaginationDto},
        hostel::{
            CreateHostelDto, HostelDetailDto, HostelDto, HostelListDto, HostelLocationInputDto,
            HostelSearchQuery, HostelSearchResultDto, MyHostelsQuery, RoomTypeInputDto,
            UpdateHostelDto,
        },
        map::CoordinatesDto,
        notification::HostelModerationEvent,
    },
    server::{
        data::{
            booking::BookingRepository,
            hostel::{room_type::RoomTypeRepository, HostelFilter, HostelRepository, ResolvedLocation},
            institution::{department::DepartmentRepository, university::UniversityRepository},
            user::UserRepository,
        },
        error::{hostel::HostelError, Error},
        model::db::{HostelModel, RoomTypeModel, UserModel},
        service::{
            booking::lifecycle::rooms_for_beds,
            hostel::search::{Candidate, Criteria},
            map::{
                client::MapClient, nearby_institutions, LocatedInstitution, NEARBY_DEPARTMENT_KM,
                NEARBY_UNIVERSITY_KM,
            },
            notification::{NotificationHub, Room, NEW_HOSTEL_SUBMITTED},
        },
    },
};

const DEFAULT_SEARCH_PAGE_SIZE: u64 = 12;
const DEFAULT_OWNER_PAGE_SIZE: u64 = 10;
const SIMILAR_HOSTELS: u64 = 4;

/// Rejects room type lists with a repeated type or more available than total rooms
pub fn validate_room_types(room_types: &[RoomTypeInputDto]) -> Result<(), HostelError> {
    let mut seen = HashSet::new();

    for room_type in room_types {
        if !seen.insert(room_type.room_type) {
            return Err(HostelError::DuplicateRoomType(room_type.room_type));
        }

        let available = room_type.available_rooms.unwrap_or(room_type.total_rooms);
        if available < 0 || available > room_type.total_rooms {
            return Err(HostelError::AvailabilityExceedsTotal(room_type.room_type));
        }
    }

    Ok(())
}

/// Brings a hostel's room tiers in line with owner input without losing rooms held by bookings.
///
/// Tiers are matched by room type and rewritten in place. Rooms held by approved and checked in
/// bookings are recomputed against the new beds per room; omitted availability becomes the
/// rooms not held, and neither the total nor an explicit availability may cut into them. Tiers
/// missing from the input are removed only when nothing holds them.
async fn sync_room_types<C: ConnectionTrait>(
    db: &C,
    hostel_id: i32,
    room_types: Vec<RoomTypeInputDto>,
) -> Result<Vec<RoomTypeModel>, Error> {
    let room_type_repo = RoomTypeRepository::new(db);

    let mut held_beds: HashMap<RoomType, Vec<i32>> = HashMap::new();
    for (room_type, beds) in BookingRepository::new(db)
        .held_beds_for_hostel(hostel_id)
        .await?
    {
        held_beds.entry(room_type).or_default().push(beds);
    }
    let held_rooms = |room_type: RoomType, beds_per_room: i32| -> i32 {
        held_beds.get(&room_type).map_or(0, |beds| {
            beds.iter().map(|&b| rooms_for_beds(b, beds_per_room)).sum()
        })
    };

    let mut existing: HashMap<RoomType, RoomTypeModel> = room_type_repo
        .list_for_hostel(hostel_id)
        .await?
        .into_iter()
        .map(|tier| (tier.room_type, tier))
        .collect();

    let mut synced = Vec::with_capacity(room_types.len());
    for (position, input) in room_types.into_iter().enumerate() {
        let room_type = input.room_type;
        let held = held_rooms(room_type, input.beds_per_room);
        if input.total_rooms < held {
            return Err(HostelError::TotalBelowHeld { room_type, held }.into());
        }

        let free = input.total_rooms - held;
        let available_rooms = input.available_rooms.unwrap_or(free);
        if available_rooms > free {
            return Err(HostelError::AvailabilityExceedsFree { room_type, free }.into());
        }

        match existing.remove(&room_type) {
            Some(tier) => {
                if !room_type_repo
                    .update_in_place(&tier, position as i32, input, available_rooms)
                    .await?
                {
                    return Err(HostelError::RoomTypeConflict(tier.id).into());
                }
            }
            None => {
                room_type_repo
                    .insert(hostel_id, position as i32, input, available_rooms)
                    .await?;
            }
        }
        synced.push(room_type);
    }

    for (room_type, tier) in existing {
        if held_rooms(room_type, tier.beds_per_room) > 0 {
            return Err(HostelError::RoomTypeInUse(room_type).into());
        }
        room_type_repo.delete(tier.id).await?;
    }

    tracing::debug!(hostel_id, room_types = ?synced, "Room types synchronised");

    Ok(room_type_repo.list_for_hostel(hostel_id).await?)
}

fn required_hostel_type(preference: HostelTypePreference) -> Option<HostelType> {
    match preference {
        HostelTypePreference::Any => None,
        HostelTypePreference::Boys => Some(HostelType::Boys),
        HostelTypePreference::Girls => Some(HostelType::Girls),
        HostelTypePreference::Coed => Some(HostelType::Coed),
    }
}

/// Attaches the ordered room types to each hostel
pub async fn to_dtos<C: ConnectionTrait>(
    db: &C,
    hostels: Vec<HostelModel>,
) -> Result<Vec<HostelDto>, Error> {
    let mut room_types = RoomTypeRepository::new(db)
        .list_for_hostels(hostels.iter().map(|h| h.id).collect())
        .await?;

    Ok(hostels
        .into_iter()
        .map(|hostel| {
            let hostel_room_types = room_types.remove(&hostel.id).unwrap_or_default();
            HostelDto::from_parts(hostel, hostel_room_types)
        })
        .collect())
}

pub struct HostelService<'a> {
    db: &'a DatabaseConnection,
    map_client: &'a MapClient,
    notifier: &'a NotificationHub,
}

impl<'a> HostelService<'a> {
    /// Creates a new instance of [`HostelService`]
    pub fn new(
        db: &'a DatabaseConnection,
        map_client: &'a MapClient,
        notifier: &'a NotificationHub,
    ) -> Self {
        Self {
            db,
            map_client,
            notifier,
        }
    }

    /// Coordinates of an address, geocoded unless both coordinates were provided
    async fn coordinates(
        &self,
        location: &HostelLocationInputDto,
    ) -> Result<(CoordinatesDto, Option<String>), Error> {
        if let (Some(latitude), Some(longitude)) = (location.latitude, location.longitude) {
            return Ok((
                CoordinatesDto {
                    latitude,
                    longitude,
                },
                None,
            ));
        }

        let address = format!(
            "{}, {}, {} {}",
            location.address, location.city, location.state, location.pincode
        );

        match self.map_client.geocode(&address).await {
            Ok(geocoded) => Ok((
                CoordinatesDto {
                    latitude: geocoded.latitude,
                    longitude: geocoded.longitude,
                },
                geocoded.place_id,
            )),
            Err(err) => {
                tracing::warn!("Failed to geocode hostel address: {}", err);

                Err(HostelError::LocationUnresolved.into())
            }
        }
    }

    /// Universities and departments near a point, closest first
    async fn nearby(
        &self,
        point: CoordinatesDto,
    ) -> Result<(NearbyInstitutions, NearbyInstitutions), Error> {
        let universities = UniversityRepository::new(self.db).list_located().await?;
        let departments = DepartmentRepository::new(self.db).list_located().await?;

        let nearby_universities = nearby_institutions(
            point,
            universities.iter().filter_map(|u| {
                Some(LocatedInstitution {
                    id: u.id,
                    name: &u.name,
                    latitude: u.latitude?,
                    longitude: u.longitude?,
                })
            }),
            NEARBY_UNIVERSITY_KM,
        );
        let nearby_departments = nearby_institutions(
            point,
            departments.iter().filter_map(|d| {
                Some(LocatedInstitution {
                    id: d.id,
                    name: &d.name,
                    latitude: d.latitude?,
                    longitude: d.longitude?,
                })
            }),
            NEARBY_DEPARTMENT_KM,
        );

        Ok((nearby_universities, nearby_departments))
    }

    async fn resolve(&self, location: &HostelLocationInputDto) -> Result<ResolvedLocation, Error> {
        let (point, place_id) = self.coordinates(location).await?;
        let (nearby_universities, nearby_departments) = self.nearby(point).await?;

        Ok(ResolvedLocation {
            latitude: point.latitude,
            longitude: point.longitude,
            place_id,
            nearby_universities,
            nearby_departments,
        })
    }

    /// Submits a new listing for moderation
    pub async fn create(&self, owner: &UserModel, hostel: CreateHostelDto) -> Result<HostelDto, Error> {
        validate_room_types(&hostel.room_types)?;

        let location = self.resolve(&hostel.location).await?;
        let room_types = hostel.room_types.clone();

        let txn = self.db.begin().await?;

        let created = HostelRepository::new(&txn)
            .create(owner.id, hostel, location)
            .await?;
        let created_room_types = RoomTypeRepository::new(&txn)
            .insert_all(created.id, room_types)
            .await?;

        let user_repo = UserRepository::new(&txn);
        if let Some(owner) = user_repo.get(owner.id).await? {
            let mut profile = owner.owner_profile.unwrap_or_default();
            profile.total_hostels += 1;
            user_repo.set_owner_profile(owner.id, profile).await?;
        }

        txn.commit().await?;

        tracing::info!(hostel_id = created.id, owner_id = owner.id, "Hostel submitted for approval");

        self.notifier
            .publish(
                Room::Admin,
                NEW_HOSTEL_SUBMITTED,
                &HostelModerationEvent {
                    hostel_id: created.id,
                    hostel_name: created.name.clone(),
                    reason: None,
                },
            )
            .await;

        Ok(HostelDto::from_parts(created, created_room_types))
    }

    /// Applies owner edits to one of their hostels.
    ///
    /// A new address is geocoded unless coordinates are supplied, and the cached nearby
    /// institutions are recomputed only when the coordinates actually change.
    pub async fn update(
        &self,
        owner: &UserModel,
        hostel_id: i32,
        mut changes: UpdateHostelDto,
    ) -> Result<HostelDto, Error> {
        let hostel = HostelRepository::new(self.db)
            .get_owned(hostel_id, owner.id)
            .await?
            .ok_or(HostelError::NotFound(hostel_id))?;

        if let Some(room_types) = &changes.room_types {
            validate_room_types(room_types)?;
        }

        let location = match &changes.location {
            Some(input) => {
                let (point, place_id) = self.coordinates(input).await?;
                let moved = point.latitude != hostel.latitude || point.longitude != hostel.longitude;

                if moved {
                    let (nearby_universities, nearby_departments) = self.nearby(point).await?;
                    Some(ResolvedLocation {
                        latitude: point.latitude,
                        longitude: point.longitude,
                        place_id: place_id.or_else(|| hostel.place_id.clone()),
                        nearby_universities,
                        nearby_departments,
                    })
                } else {
                    None
                }
            }
            None => None,
        };

        let room_types = changes.room_types.take();

        let txn = self.db.begin().await?;

        let updated = HostelRepository::new(&txn)
            .update(hostel, changes, location, owner.id)
            .await?;

        let updated_room_types = match room_types {
            Some(room_types) => sync_room_types(&txn, updated.id, room_types).await?,
            None => {
                RoomTypeRepository::new(&txn)
                    .list_for_hostel(updated.id)
                    .await?
            }
        };

        txn.commit().await?;

        tracing::info!(hostel_id = updated.id, "Hostel updated");

        Ok(HostelDto::from_parts(updated, updated_room_types))
    }

    /// Deletes one of the owner's hostels unless it still has active bookings
    pub async fn delete(&self, owner: &UserModel, hostel_id: i32) -> Result<(), Error> {
        let hostel = HostelRepository::new(self.db)
            .get_owned(hostel_id, owner.id)
            .await?
            .ok_or(HostelError::NotFound(hostel_id))?;

        let txn = self.db.begin().await?;

        if BookingRepository::new(&txn)
            .count_active_for_hostel(hostel.id)
            .await?
            > 0
        {
            return Err(HostelError::HasActiveBookings.into());
        }

        HostelRepository::new(&txn).delete(hostel.id).await?;

        let user_repo = UserRepository::new(&txn);
        if let Some(owner) = user_repo.get(owner.id).await? {
            let mut profile = owner.owner_profile.unwrap_or_default();
            profile.total_hostels = (profile.total_hostels - 1).max(0);
            user_repo.set_owner_profile(owner.id, profile).await?;
        }

        txn.commit().await?;

        tracing::info!(hostel_id, owner_id = owner.id, "Hostel deleted");

        Ok(())
    }

    /// Public view of a hostel with similar listings.
    ///
    /// Only approved hostels are public; owners and admins can also view unapproved ones.
    pub async fn get(&self, hostel_id: i32, viewer: Option<&UserModel>) -> Result<HostelDetailDto, Error> {
        let hostel_repo = HostelRepository::new(self.db);

        let hostel = hostel_repo
            .get(hostel_id)
            .await?
            .filter(|hostel| {
                hostel.status == HostelStatus::Approved
                    || viewer.is_some_and(|viewer| {
                        viewer.role == UserRole::Admin || viewer.id == hostel.owner_id
                    })
            })
            .ok_or(HostelError::NotFound(hostel_id))?;

        hostel_repo.increment_views(vec![hostel.id]).await?;

        let similar = hostel_repo.find_similar(&hostel, SIMILAR_HOSTELS).await?;
        let room_types = RoomTypeRepository::new(self.db)
            .list_for_hostel(hostel.id)
            .await?;

        Ok(HostelDetailDto {
            hostel: HostelDto::from_parts(hostel, room_types),
            similar_hostels: to_dtos(self.db, similar).await?,
        })
    }

    pub async fn my_hostels(&self, owner: &UserModel, query: MyHostelsQuery) -> Result<HostelListDto, Error> {
        let (page, limit) = PageQuery::resolve(query.page, query.limit, DEFAULT_OWNER_PAGE_SIZE);

        let (hostels, total) = HostelRepository::new(self.db)
            .list_by_owner(owner.id, query.status, page, limit)
            .await?;

        Ok(HostelListDto {
            hostels: to_dtos(self.db, hostels).await?,
            pagination: PaginationDto::new(page, limit, total),
        })
    }

    /// Searches approved hostels and scores the returned page for signed-in students.
    ///
    /// View counters of the hostels on the returned page are incremented.
    pub async fn search(
        &self,
        query: HostelSearchQuery,
        viewer: Option<&UserModel>,
    ) -> Result<HostelSearchResultDto, Error> {
        let (page, limit) = PageQuery::resolve(query.page, query.limit, DEFAULT_SEARCH_PAGE_SIZE);
        let criteria = Criteria::from(&query);

        let hostel_repo = HostelRepository::new(self.db);
        let hostels = hostel_repo
            .find_approved(HostelFilter {
                search: query.search.as_deref(),
                hostel_type: query.hostel_type.and_then(required_hostel_type),
                city: query.city.as_deref(),
                state: query.state.as_deref(),
            })
            .await?;

        let mut room_types = RoomTypeRepository::new(self.db)
            .list_for_hostels(hostels.iter().map(|h| h.id).collect())
            .await?;

        let mut candidates: Vec<Candidate> = hostels
            .into_iter()
            .map(|hostel| Candidate {
                room_types: room_types.remove(&hostel.id).unwrap_or_default(),
                hostel,
                distance_km: None,
            })
            .filter_map(|mut candidate| criteria.admit(&mut candidate).then_some(candidate))
            .collect();

        search::sort(
            &mut candidates,
            query.sort_by.unwrap_or_default(),
            query.sort_order.unwrap_or_default(),
        );

        let total = candidates.len() as u64;
        let offset = ((page - 1) * limit) as usize;

        let hostels: Vec<HostelDto> = candidates
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .map(|candidate| {
                let mut dto = HostelDto::from_parts(candidate.hostel, candidate.room_types);
                dto.distance_km = candidate.distance_km;
                dto
            })
            .collect();

        hostel_repo
            .increment_views(hostels.iter().map(|h| h.id).collect())
            .await?;

        let recommendations = viewer
            .filter(|viewer| viewer.role == UserRole::Student)
            .and_then(|viewer| viewer.student_profile.as_ref())
            .map(|profile| recommendation::recommend(&hostels, profile))
            .unwrap_or_default();

        Ok(HostelSearchResultDto {
            hostels,
            pagination: PaginationDto::new(page, limit, total),
            recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::RoomType;

    use super::*;

    fn room_type_input(room_type: RoomType, total: i32, available: Option<i32>) -> RoomTypeInputDto {
        RoomTypeInputDto {
            room_type,
            total_rooms: total,
            available_rooms: available,
            beds_per_room: 2,
            price_per_bed: 5000.0,
            security_deposit: 2000.0,
            amenities: Vec::new(),
        }
    }

    /// Expect a repeated room type to be rejected
    #[test]
    fn rejects_duplicate_room_types() {
        let result = validate_room_types(&[
            room_type_input(RoomType::Double, 5, None),
            room_type_input(RoomType::Double, 3, None),
        ]);

        assert!(matches!(result, Err(HostelError::DuplicateRoomType(RoomType::Double))));
    }

    /// Expect more available than total rooms to be rejected
    #[test]
    fn rejects_availability_above_total() {
        let result = validate_room_types(&[room_type_input(RoomType::Single, 5, Some(6))]);

        assert!(matches!(
            result,
            Err(HostelError::AvailabilityExceedsTotal(RoomType::Single))
        ));
        assert!(validate_room_types(&[room_type_input(RoomType::Single, 5, Some(5))]).is_ok());
    }

    mod update {
        use entity::sea_orm_active_enums::{BookingStatus, RoomType};
        use habs_test_utils::prelude::*;

        use crate::{
            model::{
                booking::{RespondAction, RespondBookingDto},
                hostel::{RoomTypeInputDto, UpdateHostelDto},
            },
            server::{
                data::hostel::room_type::RoomTypeRepository,
                error::{hostel::HostelError, Error},
                model::db::UserModel,
                service::{
                    booking::{tests::request, BookingService},
                    hostel::HostelService,
                    map::client::MapClient,
                    notification::NotificationHub,
                },
            },
        };

        fn double(total_rooms: i32, price_per_bed: f64) -> RoomTypeInputDto {
            RoomTypeInputDto {
                room_type: RoomType::Double,
                total_rooms,
                available_rooms: None,
                beds_per_room: 2,
                price_per_bed,
                security_deposit: 4000.0,
                amenities: Vec::new(),
            }
        }

        fn with_room_types(room_types: Vec<RoomTypeInputDto>) -> UpdateHostelDto {
            UpdateHostelDto {
                room_types: Some(room_types),
                ..Default::default()
            }
        }

        /// Approves a 3 bed request on the double tier, holding 2 of its 10 rooms
        async fn approve_three_beds(
            test: &TestContext,
            hub: &NotificationHub,
            owner: &UserModel,
            hostel_id: i32,
        ) -> Result<(), TestError> {
            let student = test.user().insert_student("student@example.com").await?;

            let service = BookingService::new(&test.db, hub);
            let booking = service.create(&student, request(hostel_id, 3, 6)).await.unwrap();
            service
                .respond(
                    owner,
                    booking.id,
                    RespondBookingDto {
                        action: RespondAction::Approve,
                        message: None,
                        counter_offer: None,
                    },
                )
                .await
                .unwrap();

            Ok(())
        }

        /// Expect a price-only edit to keep the rooms held by an approved booking
        #[tokio::test]
        async fn keeps_held_rooms() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let (hostel, before) = test.hostel().insert_approved_hostel(owner.id).await?;

            let hub = NotificationHub::new();
            approve_three_beds(&test, &hub, &owner, hostel.id).await?;

            let map_client = MapClient::new("http://localhost", None, None).unwrap();
            HostelService::new(&test.db, &map_client, &hub)
                .update(&owner, hostel.id, with_room_types(vec![double(10, 6500.0)]))
                .await
                .unwrap();

            let after = RoomTypeRepository::new(&test.db)
                .find(hostel.id, RoomType::Double)
                .await?
                .unwrap();
            assert_eq!(after.id, before.id);
            assert_eq!(after.available_rooms, 8);
            assert_eq!(after.price_per_bed, 6500.0);
            assert!(after.version > before.version);

            Ok(())
        }

        /// Expect totals below the held rooms and removal of a held tier to be rejected
        #[tokio::test]
        async fn rejects_cutting_held_rooms() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let (hostel, _) = test.hostel().insert_approved_hostel(owner.id).await?;

            let hub = NotificationHub::new();
            approve_three_beds(&test, &hub, &owner, hostel.id).await?;

            let map_client = MapClient::new("http://localhost", None, None).unwrap();
            let service = HostelService::new(&test.db, &map_client, &hub);

            let shrunk = service
                .update(&owner, hostel.id, with_room_types(vec![double(1, 6000.0)]))
                .await;
            assert!(matches!(
                shrunk,
                Err(Error::HostelError(HostelError::TotalBelowHeld { held: 2, .. }))
            ));

            let mut over = double(10, 6000.0);
            over.available_rooms = Some(9);
            let overstated = service
                .update(&owner, hostel.id, with_room_types(vec![over]))
                .await;
            assert!(matches!(
                overstated,
                Err(Error::HostelError(HostelError::AvailabilityExceedsFree { free: 8, .. }))
            ));

            let mut single = double(4, 5000.0);
            single.room_type = RoomType::Single;
            single.beds_per_room = 1;
            let removed = service
                .update(&owner, hostel.id, with_room_types(vec![single]))
                .await;
            assert!(matches!(
                removed,
                Err(Error::HostelError(HostelError::RoomTypeInUse(RoomType::Double)))
            ));

            let unchanged = RoomTypeRepository::new(&test.db)
                .list_for_hostel(hostel.id)
                .await?;
            assert_eq!(unchanged.len(), 1);
            assert_eq!(unchanged[0].available_rooms, 8);

            Ok(())
        }

        /// Expect a tier without held rooms to be removed and a new tier added at full availability
        #[tokio::test]
        async fn replaces_unheld_tiers() -> Result<(), TestError> {
            let test = TestBuilder::new().with_booking_tables().build().await?;
            let owner = test.user().insert_owner("owner@example.com").await?;
            let student = test.user().insert_student("student@example.com").await?;
            let (hostel, room_type) = test.hostel().insert_approved_hostel(owner.id).await?;
            test.booking()
                .insert_booking(student.id, &hostel, &room_type, 2, BookingStatus::Cancelled)
                .await?;

            let mut single = double(4, 5000.0);
            single.room_type = RoomType::Single;
            single.beds_per_room = 1;

            let hub = NotificationHub::new();
            let map_client = MapClient::new("http://localhost", None, None).unwrap();
            HostelService::new(&test.db, &map_client, &hub)
                .update(&owner, hostel.id, with_room_types(vec![single]))
                .await
                .unwrap();

            let room_types = RoomTypeRepository::new(&test.db)
                .list_for_hostel(hostel.id)
                .await?;
            assert_eq!(room_types.len(), 1);
            assert_eq!(room_types[0].room_type, RoomType::Single);
            assert_eq!(room_types[0].available_rooms, 4);

            Ok(())
        }
    }
}
