//! Room listing and member roster cache.
//!
//! Both halves are replaced wholesale: the room list on every listing refresh,
//! the member map on every `room_info_update`. Leaving a room drops both.

use crate::protocol::{Member, MemberMap, RoomSummary};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomCache {
    rooms: Vec<RoomSummary>,
    members: MemberMap,
}

impl RoomCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rooms(&self) -> &[RoomSummary] {
        &self.rooms
    }

    pub fn room(&self, room_id: &str) -> Option<&RoomSummary> {
        self.rooms.iter().find(|room| room.id == room_id)
    }

    /// Replace the room listing. Never merged with the previous one.
    pub fn update_room_list(&mut self, rooms: Vec<RoomSummary>) {
        self.rooms = rooms;
    }

    pub fn members(&self) -> &MemberMap {
        &self.members
    }

    pub fn member(&self, sid: &str) -> Option<&Member> {
        self.members.get(sid)
    }

    pub fn replace_members(&mut self, members: MemberMap) {
        self.members = members;
    }

    pub fn remove_member(&mut self, sid: &str) -> Option<Member> {
        self.members.remove(sid)
    }

    /// A copy of the member map without `sid`. The cache itself is untouched.
    pub fn all_members_except(&self, sid: &str) -> MemberMap {
        let mut others = self.members.clone();
        others.remove(sid);
        others
    }

    /// Listing position of `sid`; stands in for the seat before any player
    /// record exists.
    pub fn member_index_of(&self, sid: &str) -> Option<usize> {
        self.members.position(sid)
    }

    pub fn clear_members(&mut self) {
        self.members = MemberMap::new();
    }

    pub fn clear(&mut self) {
        self.rooms.clear();
        self.clear_members();
    }
}
