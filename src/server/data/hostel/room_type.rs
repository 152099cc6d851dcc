use std::collections::HashMap;

use entity::{sea_orm_active_enums::RoomType, types::StringList};
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::model::hostel::RoomTypeInputDto;

pub struct RoomTypeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoomTypeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the room types of a newly created hostel, keeping the input order.
    ///
    /// `available_rooms` defaults to `total_rooms` when not provided. Callers validate the
    /// capacity invariant beforehand.
    pub async fn insert_all(
        &self,
        hostel_id: i32,
        room_types: Vec<RoomTypeInputDto>,
    ) -> Result<Vec<entity::hostel_room_type::Model>, DbErr> {
        let mut created = Vec::with_capacity(room_types.len());
        for (position, room_type) in room_types.into_iter().enumerate() {
            let available_rooms = room_type.available_rooms.unwrap_or(room_type.total_rooms);
            created.push(
                self.insert(hostel_id, position as i32, room_type, available_rooms)
                    .await?,
            );
        }

        Ok(created)
    }

    pub async fn insert(
        &self,
        hostel_id: i32,
        position: i32,
        room_type: RoomTypeInputDto,
        available_rooms: i32,
    ) -> Result<entity::hostel_room_type::Model, DbErr> {
        entity::hostel_room_type::ActiveModel {
            hostel_id: ActiveValue::Set(hostel_id),
            position: ActiveValue::Set(position),
            room_type: ActiveValue::Set(room_type.room_type),
            total_rooms: ActiveValue::Set(room_type.total_rooms),
            available_rooms: ActiveValue::Set(available_rooms),
            beds_per_room: ActiveValue::Set(room_type.beds_per_room),
            price_per_bed: ActiveValue::Set(room_type.price_per_bed),
            security_deposit: ActiveValue::Set(room_type.security_deposit),
            amenities: ActiveValue::Set(StringList(room_type.amenities)),
            version: ActiveValue::Set(0),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Rewrites an existing tier from owner input if the row is still at the version it was
    /// read at, bumping the version.
    ///
    /// Returns `false` when a booking changed the tier in between, in which case nothing is
    /// written.
    pub async fn update_in_place(
        &self,
        existing: &entity::hostel_room_type::Model,
        position: i32,
        room_type: RoomTypeInputDto,
        available_rooms: i32,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::HostelRoomType::update_many()
            .set(entity::hostel_room_type::ActiveModel {
                position: ActiveValue::Set(position),
                total_rooms: ActiveValue::Set(room_type.total_rooms),
                available_rooms: ActiveValue::Set(available_rooms),
                beds_per_room: ActiveValue::Set(room_type.beds_per_room),
                price_per_bed: ActiveValue::Set(room_type.price_per_bed),
                security_deposit: ActiveValue::Set(room_type.security_deposit),
                amenities: ActiveValue::Set(StringList(room_type.amenities)),
                version: ActiveValue::Set(existing.version + 1),
                ..Default::default()
            })
            .filter(entity::hostel_room_type::Column::Id.eq(existing.id))
            .filter(entity::hostel_room_type::Column::Version.eq(existing.version))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    pub async fn delete(&self, room_type_id: i32) -> Result<(), DbErr> {
        entity::prelude::HostelRoomType::delete_by_id(room_type_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Room types of a hostel in listing order
    pub async fn list_for_hostel(
        &self,
        hostel_id: i32,
    ) -> Result<Vec<entity::hostel_room_type::Model>, DbErr> {
        entity::prelude::HostelRoomType::find()
            .filter(entity::hostel_room_type::Column::HostelId.eq(hostel_id))
            .order_by_asc(entity::hostel_room_type::Column::Position)
            .all(self.db)
            .await
    }

    /// Room types of several hostels grouped by hostel ID, each group in listing order
    pub async fn list_for_hostels(
        &self,
        hostel_ids: Vec<i32>,
    ) -> Result<HashMap<i32, Vec<entity::hostel_room_type::Model>>, DbErr> {
        if hostel_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let room_types = entity::prelude::HostelRoomType::find()
            .filter(entity::hostel_room_type::Column::HostelId.is_in(hostel_ids))
            .order_by_asc(entity::hostel_room_type::Column::HostelId)
            .order_by_asc(entity::hostel_room_type::Column::Position)
            .all(self.db)
            .await?;

        let mut grouped: HashMap<i32, Vec<_>> = HashMap::new();
        for room_type in room_types {
            grouped.entry(room_type.hostel_id).or_default().push(room_type);
        }

        Ok(grouped)
    }

    /// Finds the room tier of the given type on a hostel
    pub async fn find(
        &self,
        hostel_id: i32,
        room_type: RoomType,
    ) -> Result<Option<entity::hostel_room_type::Model>, DbErr> {
        entity::prelude::HostelRoomType::find()
            .filter(entity::hostel_room_type::Column::HostelId.eq(hostel_id))
            .filter(entity::hostel_room_type::Column::RoomType.eq(room_type))
            .order_by_asc(entity::hostel_room_type::Column::Position)
            .one(self.db)
            .await
    }

    /// Writes a new `available_rooms` value if the row is still at the version it was read at.
    ///
    /// Returns `false` when another writer changed the row in between, in which case nothing is
    /// written.
    pub async fn set_available_rooms(
        &self,
        room_type: &entity::hostel_room_type::Model,
        available_rooms: i32,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::HostelRoomType::update_many()
            .col_expr(
                entity::hostel_room_type::Column::AvailableRooms,
                Expr::value(available_rooms),
            )
            .col_expr(
                entity::hostel_room_type::Column::Version,
                Expr::value(room_type.version + 1),
            )
            .filter(entity::hostel_room_type::Column::Id.eq(room_type.id))
            .filter(entity::hostel_room_type::Column::Version.eq(room_type.version))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
