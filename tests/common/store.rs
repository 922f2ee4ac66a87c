use crate::common::objects::RawObject;
use async_trait::async_trait;
use bit_walk::ObjectStore;
use bit_walk::artifacts::objects::entry_mode::EntryMode;
use bit_walk::artifacts::objects::object::ObjectBox;
use bit_walk::artifacts::objects::object_id::ObjectId;
use bit_walk::artifacts::objects::object_type::ObjectType;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Object store backed by a map, with knobs for failures and latency
#[derive(Default)]
pub struct InMemoryStore {
    objects: HashMap<ObjectId, ObjectBox>,
    refs: HashMap<String, ObjectId>,
    failing: HashSet<ObjectId>,
    delays: HashMap<ObjectId, Duration>,
    loads: Mutex<Vec<ObjectId>>,
    ref_reads: AtomicUsize,
}

impl InMemoryStore {
    pub fn insert(&mut self, raw: RawObject) -> ObjectId {
        let oid = raw.oid();
        self.objects.insert(oid.clone(), raw.parse());
        oid
    }

    /// Commit of an empty tree at `seconds` past the epoch
    pub fn commit(&mut self, message: &str, parents: &[&ObjectId], seconds: i64) -> ObjectId {
        let tree = self.insert(RawObject::tree(&[]));
        self.insert(RawObject::commit(&tree, parents, seconds, message))
    }

    pub fn blob(&mut self, content: &str) -> ObjectId {
        self.insert(RawObject::blob(content))
    }

    pub fn tree(&mut self, entries: &[(&str, EntryMode, &ObjectId)]) -> ObjectId {
        self.insert(RawObject::tree(entries))
    }

    pub fn set_ref(&mut self, name: &str, oid: &ObjectId) {
        self.refs.insert(name.to_string(), oid.clone());
    }

    /// Make every load of `oid` fail as if the store were unreachable
    pub fn fail_on(&mut self, oid: &ObjectId) {
        self.failing.insert(oid.clone());
    }

    pub fn delay(&mut self, oid: &ObjectId, delay: Duration) {
        self.delays.insert(oid.clone(), delay);
    }

    pub fn loads(&self) -> Vec<ObjectId> {
        self.loads.lock().unwrap().clone()
    }

    pub fn load_count(&self, oid: &ObjectId) -> usize {
        self.loads().iter().filter(|loaded| *loaded == oid).count()
    }

    pub fn ref_reads(&self) -> usize {
        self.ref_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn load_object(
        &self,
        _kind: ObjectType,
        oid: &ObjectId,
    ) -> anyhow::Result<Option<ObjectBox>> {
        self.loads.lock().unwrap().push(oid.clone());

        if let Some(delay) = self.delays.get(oid) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(oid) {
            anyhow::bail!("connection reset while fetching {oid}");
        }

        Ok(self.objects.get(oid).cloned())
    }

    async fn read_ref(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        self.ref_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.refs.get(name).cloned())
    }
}
