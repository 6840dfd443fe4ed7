use crate::state::Transform;

/// Stable handle to an object in the [`World`]. Ids increase monotonically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    SodaCan,
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub transform: Transform,
}

/// Owning collection of spawned objects.
///
/// Objects are only ever appended, so the vector stays sorted by id and
/// lookups are a binary search.
#[derive(Default, Debug)]
pub struct World {
    objects: Vec<SceneObject>,
    next_id: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, kind: ObjectKind, transform: Transform) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            kind,
            transform,
        });
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects
            .binary_search_by_key(&id, |o| o.id)
            .ok()
            .map(|i| &self.objects[i])
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        match self.objects.binary_search_by_key(&id, |o| o.id) {
            Ok(i) => Some(&mut self.objects[i]),
            Err(_) => None,
        }
    }

    /// Remove an object; any drop task still pointing at it is discarded on
    /// its next step.
    pub fn despawn(&mut self, id: ObjectId) -> Option<SceneObject> {
        let i = self.objects.binary_search_by_key(&id, |o| o.id).ok()?;
        Some(self.objects.remove(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn iter_kind(&self, kind: ObjectKind) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(move |o| o.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
