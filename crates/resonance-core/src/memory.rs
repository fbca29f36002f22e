use crate::phase::{Element, Landmark};
use serde::{Deserialize, Serialize};

/// A saved photo tied to the element and landmark it was taken for.
/// Persistence lives outside the core; memories arrive by value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoMemory {
    pub id: String,
    pub photo_url: String,
    pub element: Element,
    pub landmark: Landmark,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

pub fn sort_newest_first(memories: &mut [PhotoMemory]) {
    memories.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Supplies memories when the corridor is entered.
pub trait MemorySource {
    fn load(&self) -> Vec<PhotoMemory>;
}

impl<F> MemorySource for F
where
    F: Fn() -> Vec<PhotoMemory>,
{
    fn load(&self) -> Vec<PhotoMemory> {
        self()
    }
}
