use dashmap::{DashMap, DashSet};

/// Transport-level room grouping: `room_id -> {conn_id...}`.
///
/// This map alone decides who receives a room's broadcasts. The durable
/// `current_room` field on the User document is a denormalized hint for
/// roster queries and is never consulted here.
#[derive(Default)]
pub struct RoomGrouping {
    room_to_conns: DashMap<String, DashSet<String>>,
}

impl RoomGrouping {
    pub fn new() -> Self {
        Self {
            room_to_conns: DashMap::new(),
        }
    }

    pub fn join(&self, room_id: &str, conn_id: &str) {
        self.room_to_conns
            .entry(room_id.to_string())
            .or_insert_with(DashSet::new)
            .insert(conn_id.to_string());
    }

    pub fn leave(&self, room_id: &str, conn_id: &str) {
        if let Some(set) = self.room_to_conns.get(room_id) {
            set.remove(conn_id);
            if set.is_empty() {
                drop(set);
                self.room_to_conns.remove(room_id);
            }
        }
    }

    pub fn contains(&self, room_id: &str, conn_id: &str) -> bool {
        self.room_to_conns
            .get(room_id)
            .map(|set| set.contains(conn_id))
            .unwrap_or(false)
    }

    pub fn members(&self, room_id: &str) -> Vec<String> {
        self.room_to_conns
            .get(room_id)
            .map(|set| set.iter().map(|c| c.key().to_string()).collect())
            .unwrap_or_default()
    }

    /// Connection count per grouped room (ops stats).
    pub fn room_counts(&self) -> Vec<(String, usize)> {
        self.room_to_conns
            .iter()
            .map(|e| (e.key().clone(), e.value().len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_leave_membership() {
        let g = RoomGrouping::new();
        g.join("r1", "c1");
        g.join("r1", "c2");

        assert!(g.contains("r1", "c1"));
        let mut members = g.members("r1");
        members.sort();
        assert_eq!(members, vec!["c1".to_string(), "c2".to_string()]);

        g.leave("r1", "c1");
        assert!(!g.contains("r1", "c1"));
        assert_eq!(g.members("r1"), vec!["c2".to_string()]);

        // last member out drops the room entry entirely
        g.leave("r1", "c2");
        assert!(g.room_counts().is_empty());
    }
}
