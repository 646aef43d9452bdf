//! State store: last-known properties for every active network.

use indexmap::IndexMap;

use crate::types::{LinkProperties, NetworkId};

/// Mapping from network id to its last-known link properties.
///
/// Insertion-ordered so that two snapshot builds from an unchanged table
/// iterate identically. The table itself is a plain value; the monitor owns
/// it inside one mutex, which is the single mutual-exclusion domain for the
/// whole notification-to-push pipeline.
#[derive(Debug, Default)]
pub struct LinkTable {
    entries: IndexMap<NetworkId, LinkProperties>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or wholesale-replace the entry for `id`.
    pub fn upsert(&mut self, id: NetworkId, properties: LinkProperties) {
        self.entries.insert(id, properties);
    }

    /// Remove the entry for `id`. Loss notifications for unknown ids are
    /// tolerated; returns whether an entry was actually removed.
    pub fn remove(&mut self, id: NetworkId) -> bool {
        self.entries.shift_remove(&id).is_some()
    }

    pub fn get(&self, id: NetworkId) -> Option<&LinkProperties> {
        self.entries.get(&id)
    }

    /// Point-in-time view sufficient to build one snapshot.
    pub fn entries(&self) -> impl Iterator<Item = (NetworkId, &LinkProperties)> + '_ {
        self.entries.iter().map(|(id, properties)| (*id, properties))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_and_remove_net_effect() {
        let mut table = LinkTable::new();
        let id1 = NetworkId::new(1);
        let id2 = NetworkId::new(2);

        table.upsert(id1, LinkProperties::named("wlan0"));
        table.upsert(id2, LinkProperties::named("rmnet0"));
        assert_eq!(table.len(), 2);

        assert!(table.remove(id1));
        assert_eq!(table.len(), 1);
        assert!(table.get(id1).is_none());
        assert!(table.get(id2).is_some());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut table = LinkTable::new();
        assert!(!table.remove(NetworkId::new(42)));
        assert!(table.is_empty());
    }

    #[test]
    fn test_upsert_replaces_wholesale() {
        let mut table = LinkTable::new();
        let id = NetworkId::new(7);

        table.upsert(id, LinkProperties::named("wlan0").with_address("192.168.1.5", 24));
        table.upsert(id, LinkProperties::named("wlan0").with_address("10.0.0.9", 16));

        let properties = table.get(id).unwrap();
        assert_eq!(properties.addresses.len(), 1);
        assert_eq!(properties.addresses[0].to_cidr(), "10.0.0.9/16");
    }

    #[test]
    fn test_iteration_order_is_insertion_order() {
        let mut table = LinkTable::new();
        table.upsert(NetworkId::new(3), LinkProperties::named("c"));
        table.upsert(NetworkId::new(1), LinkProperties::named("a"));
        table.upsert(NetworkId::new(2), LinkProperties::named("b"));

        // Replacing an existing entry keeps its position.
        table.upsert(NetworkId::new(1), LinkProperties::named("a2"));

        let names: Vec<_> = table
            .entries()
            .map(|(_, p)| p.name().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["c", "a2", "b"]);
    }
}
