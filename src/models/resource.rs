//! Resource model.
//!
//! Resources are team members. Each has a daily capacity in hours and
//! performs one task at a time. A [`ResourcePool`] keeps members in their
//! declared order, which is the tie-break order for every scheduling choice.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A team member that can be assigned tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique member key.
    pub id: String,
    /// Working hours available per day.
    pub daily_capacity_hours: f64,
}

impl Resource {
    /// Creates a new resource.
    pub fn new(id: impl Into<String>, daily_capacity_hours: f64) -> Self {
        Self {
            id: id.into(),
            daily_capacity_hours,
        }
    }
}

/// An ordered, fixed pool of resources.
///
/// Serializes as an ordered map `{member_key: daily_capacity_hours}`, the
/// shape used by benchmark case files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePool {
    resources: Vec<Resource>,
}

impl ResourcePool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resource.
    pub fn with_resource(mut self, id: impl Into<String>, daily_capacity_hours: f64) -> Self {
        self.resources.push(Resource::new(id, daily_capacity_hours));
        self
    }

    /// Resources in declared order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the pool has no resources.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Position of a resource in declared order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.resources.iter().position(|r| r.id == id)
    }

    /// Whether the pool contains a resource with this id.
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Looks up a resource by id.
    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Resource ids in declared order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(|r| r.id.as_str())
    }
}

impl FromIterator<Resource> for ResourcePool {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

impl Serialize for ResourcePool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.resources.len()))?;
        for r in &self.resources {
            map.serialize_entry(&r.id, &r.daily_capacity_hours)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ResourcePool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PoolVisitor;

        impl<'de> Visitor<'de> for PoolVisitor {
            type Value = ResourcePool;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of member keys to daily capacity hours")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ResourcePool, A::Error> {
                let mut resources = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, hours)) = access.next_entry::<String, f64>()? {
                    resources.push(Resource::new(id, hours));
                }
                Ok(ResourcePool { resources })
            }
        }

        deserializer.deserialize_map(PoolVisitor)
    }
}
