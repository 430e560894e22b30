//! The generic document-collection engine.
//!
//! A collection is a single blob holding the ciphertext of
//! `{ "<collection>": [ ... ] }`.  Every operation starts from durable state:
//!
//! 1. read the blob (missing ⇒ empty collection),
//! 2. decrypt and parse it,
//! 3. materialize each element into a typed entity,
//! 4. for mutations, rewrite the whole array, re-encrypt and write it back.
//!
//! # Concurrency
//!
//! [`DocumentStore`] takes no locks.  A mutation is load → modify → persist
//! with nothing held across the gap, so two interleaved mutations of the same
//! collection lose one of the changes (last writer wins for the whole
//! collection, not per record).  Callers that may mutate a collection
//! concurrently must serialize those writes themselves, e.g. with one mutex
//! per collection name.

use std::marker::PhantomData;
use std::sync::Arc;

use agora_shared::Codec;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::byte_store::ByteStore;
use crate::error::{Corruption, Result, StoreError};
use crate::query::{self, Predicate, Queryable, Scalar};

/// A record stored in a collection's entity array.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// Collection name, also the name of the array field in the document.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Map one array element to an entity.
    fn from_document(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Map an entity to its array element.
    fn to_document(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadWrite,
    ReadOnly,
}

/// Engine bound to the collection of entity type `E`.
pub struct DocumentStore<E> {
    bytes: Arc<dyn ByteStore>,
    codec: Arc<Codec>,
    access: Access,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for DocumentStore<E> {
    fn clone(&self) -> Self {
        Self {
            bytes: Arc::clone(&self.bytes),
            codec: Arc::clone(&self.codec),
            access: self.access,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> DocumentStore<E> {
    pub fn open(bytes: Arc<dyn ByteStore>, codec: Arc<Codec>) -> Self {
        Self::with_access(bytes, codec, Access::ReadWrite)
    }

    /// Open a store whose `add`, `update`, `delete` and persist routine all
    /// fail with [`StoreError::UnsupportedOperation`].
    pub fn open_read_only(bytes: Arc<dyn ByteStore>, codec: Arc<Codec>) -> Self {
        Self::with_access(bytes, codec, Access::ReadOnly)
    }

    fn with_access(bytes: Arc<dyn ByteStore>, codec: Arc<Codec>, access: Access) -> Self {
        Self {
            bytes,
            codec,
            access,
            _entity: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        E::COLLECTION
    }

    pub fn access(&self) -> Access {
        self.access
    }

    // ------------------------------------------------------------------
    // Load / persist
    // ------------------------------------------------------------------

    fn load_documents(&self) -> Result<Vec<Value>> {
        let collection = E::COLLECTION;
        let blob = self
            .bytes
            .read(collection)
            .map_err(|source| StoreError::Read { collection, source })?;

        if blob.is_empty() {
            debug!(collection, "collection absent, starting empty");
            return Ok(Vec::new());
        }

        let text = self
            .codec
            .decrypt(&blob)
            .map_err(|e| StoreError::corrupt(collection, e))?;
        let items =
            parse_document(collection, &text).map_err(|e| StoreError::corrupt(collection, e))?;

        debug!(collection, bytes = blob.len(), elements = items.len(), "collection loaded");
        Ok(items)
    }

    fn materialize(&self, documents: Vec<Value>) -> Result<Vec<E>> {
        materialize(documents).map_err(|e| StoreError::corrupt(E::COLLECTION, e))
    }

    // Mutations keep the raw elements but still refuse to rewrite a
    // collection that does not materialize.
    fn load_validated_documents(&self) -> Result<Vec<Value>> {
        let documents = self.load_documents()?;
        self.materialize(documents.clone())?;
        Ok(documents)
    }

    fn load(&self) -> Result<Vec<E>> {
        let documents = self.load_documents()?;
        self.materialize(documents)
    }

    fn persist(&self, documents: Vec<Value>) -> Result<()> {
        self.ensure_writable("persist")?;
        let collection = E::COLLECTION;
        let elements = documents.len();

        let mut root = serde_json::Map::new();
        root.insert(collection.to_string(), Value::Array(documents));
        let text = serde_json::to_string(&Value::Object(root)).map_err(|e| StoreError::Encode {
            collection,
            reason: e.to_string(),
        })?;
        let blob = self.codec.encrypt(&text).map_err(|e| StoreError::Encode {
            collection,
            reason: e.to_string(),
        })?;

        self.bytes
            .write(collection, &blob)
            .map_err(|source| StoreError::PersistenceFailure { collection, source })?;

        debug!(collection, elements, bytes = blob.len(), "collection persisted");
        Ok(())
    }

    fn ensure_writable(&self, operation: &'static str) -> Result<()> {
        match self.access {
            Access::ReadWrite => Ok(()),
            Access::ReadOnly => {
                warn!(
                    collection = E::COLLECTION,
                    operation, "mutation rejected on read-only collection"
                );
                Err(StoreError::UnsupportedOperation {
                    collection: E::COLLECTION,
                    operation,
                })
            }
        }
    }

    fn encode(entity: &E) -> Result<Value> {
        entity.to_document().map_err(|e| StoreError::Encode {
            collection: E::COLLECTION,
            reason: e.to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn find_all(&self) -> Result<Vec<E>> {
        self.load()
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<E>> {
        Ok(self.load()?.into_iter().find(|e| e.id() == id))
    }

    /// First entity, in stored order, whose `field` equals `value`.
    pub fn find_by_attribute(&self, field: E::Field, value: impl Into<Scalar>) -> Result<Option<E>>
    where
        E: Queryable,
    {
        let predicate = Predicate::Eq(field, value.into());
        Ok(self.load()?.into_iter().find(|e| predicate.evaluate(e)))
    }

    /// Every entity matching `predicate`, in stored order, deduplicated by id.
    pub fn find_where(&self, predicate: &Predicate<E::Field>) -> Result<Vec<E>>
    where
        E: Queryable,
    {
        Ok(query::filter(self.load()?, predicate))
    }

    pub fn count_where(&self, predicate: &Predicate<E::Field>) -> Result<usize>
    where
        E: Queryable,
    {
        Ok(self.find_where(predicate)?.len())
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append `entity` and persist.  The entity is returned unchanged.
    pub fn add(&self, entity: E) -> Result<E> {
        self.ensure_writable("add")?;
        let mut documents = self.load_validated_documents()?;
        documents.push(Self::encode(&entity)?);
        self.persist(documents)?;
        debug!(collection = E::COLLECTION, id = %entity.id(), "entity added");
        Ok(entity)
    }

    /// Replace the stored entity with the same id.  Returns `None`, without
    /// writing anything, when no such entity exists; `update` never inserts.
    pub fn update(&self, entity: E) -> Result<Option<E>> {
        self.ensure_writable("update")?;
        let mut documents = self.load_validated_documents()?;

        let replacement = Self::encode(&entity)?;
        let mut replaced = false;
        for document in documents.iter_mut().filter(|d| document_id(d) == Some(entity.id())) {
            *document = replacement.clone();
            replaced = true;
        }

        if !replaced {
            debug!(collection = E::COLLECTION, id = %entity.id(), "update target not found");
            return Ok(None);
        }

        self.persist(documents)?;
        debug!(collection = E::COLLECTION, id = %entity.id(), "entity updated");
        Ok(Some(entity))
    }

    /// Remove the entity with `id`.  Returns `false`, without writing
    /// anything, when no such entity exists.
    pub fn delete(&self, id: &str) -> Result<bool> {
        self.ensure_writable("delete")?;
        let documents = self.load_validated_documents()?;

        if !documents.iter().any(|d| document_id(d) == Some(id)) {
            debug!(collection = E::COLLECTION, id, "delete target not found");
            return Ok(false);
        }

        let remaining: Vec<Value> = documents
            .into_iter()
            .filter(|d| document_id(d) != Some(id))
            .collect();
        self.persist(remaining)?;
        debug!(collection = E::COLLECTION, id, "entity deleted");
        Ok(true)
    }

    /// Run `apply` over every entity in stored order and persist once if any
    /// call returned `true`.  Returns how many entities were changed; with
    /// none changed nothing is written.
    pub fn update_where<F>(&self, mut apply: F) -> Result<usize>
    where
        F: FnMut(&mut E) -> bool,
    {
        self.ensure_writable("update_where")?;
        let mut entities = self.load()?;

        let mut changed = 0;
        for entity in entities.iter_mut() {
            if apply(entity) {
                changed += 1;
            }
        }
        if changed == 0 {
            debug!(collection = E::COLLECTION, "bulk update matched nothing");
            return Ok(0);
        }

        let documents = entities.iter().map(Self::encode).collect::<Result<Vec<_>>>()?;
        self.persist(documents)?;
        debug!(collection = E::COLLECTION, changed, "entities updated");
        Ok(changed)
    }

    /// Replace the whole collection with `entities`.
    pub fn replace_all(&self, entities: &[E]) -> Result<()> {
        self.ensure_writable("replace_all")?;
        let documents = entities.iter().map(Self::encode).collect::<Result<Vec<_>>>()?;
        self.persist(documents)
    }
}

/// Parse the plaintext `{ "<collection>": [ ... ] }` and return its elements.
pub(crate) fn parse_document(
    collection: &'static str,
    text: &str,
) -> std::result::Result<Vec<Value>, Corruption> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(mut root) => match root.remove(collection) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(Corruption::MissingArray(collection)),
        },
        _ => Err(Corruption::MissingArray(collection)),
    }
}

/// Map every element to `E`; the first malformed element fails the lot.
pub(crate) fn materialize<E: Entity>(
    documents: Vec<Value>,
) -> std::result::Result<Vec<E>, Corruption> {
    documents
        .into_iter()
        .enumerate()
        .map(|(index, document)| {
            E::from_document(document).map_err(|source| Corruption::Entity { index, source })
        })
        .collect()
}

fn document_id(document: &Value) -> Option<&str> {
    document.get("id").and_then(Value::as_str)
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Read access to a collection.  Every repository implements this.
pub trait ReadCollection<E: Entity> {
    fn documents(&self) -> &DocumentStore<E>;

    fn find_all(&self) -> Result<Vec<E>> {
        self.documents().find_all()
    }

    fn find_by_id(&self, id: &str) -> Result<Option<E>> {
        self.documents().find_by_id(id)
    }

    fn find_by_attribute(&self, field: E::Field, value: impl Into<Scalar>) -> Result<Option<E>>
    where
        E: Queryable,
    {
        self.documents().find_by_attribute(field, value)
    }

    fn find_where(&self, predicate: &Predicate<E::Field>) -> Result<Vec<E>>
    where
        E: Queryable,
    {
        self.documents().find_where(predicate)
    }
}

/// Mutation access to a collection.  Read-only repositories do not implement
/// it, so mutating them does not compile.
pub trait WriteCollection<E: Entity>: ReadCollection<E> {
    fn add(&self, entity: E) -> Result<E> {
        self.documents().add(entity)
    }

    fn update(&self, entity: E) -> Result<Option<E>> {
        self.documents().update(entity)
    }

    fn delete(&self, id: &str) -> Result<bool> {
        self.documents().delete(id)
    }

    fn update_where<F>(&self, apply: F) -> Result<usize>
    where
        F: FnMut(&mut E) -> bool,
    {
        self.documents().update_where(apply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_store::{FileByteStore, MemoryByteStore};
    use crate::error::Corruption;
    use crate::query::FieldValue;
    use agora_shared::crypto::generate_symmetric_key;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: String,
        name: String,
        size: i64,
        shiny: bool,
    }

    #[derive(Debug, Clone, Copy)]
    enum WidgetField {
        Name,
        Size,
        Shiny,
    }

    impl Entity for Widget {
        const COLLECTION: &'static str = "widgets";

        fn id(&self) -> &str {
            &self.id
        }
    }

    impl Queryable for Widget {
        type Field = WidgetField;

        fn field(&self, field: WidgetField) -> FieldValue<'_> {
            match field {
                WidgetField::Name => FieldValue::Str(&self.name),
                WidgetField::Size => FieldValue::Int(self.size),
                WidgetField::Shiny => FieldValue::Bool(self.shiny),
            }
        }
    }

    fn widget(id: &str, name: &str, size: i64) -> Widget {
        Widget {
            id: id.into(),
            name: name.into(),
            size,
            shiny: false,
        }
    }

    fn memory_store() -> (DocumentStore<Widget>, Arc<MemoryByteStore>, Arc<Codec>) {
        let bytes = Arc::new(MemoryByteStore::new());
        let codec = Arc::new(Codec::new(generate_symmetric_key()));
        let store = DocumentStore::open(bytes.clone(), codec.clone());
        (store, bytes, codec)
    }

    fn put_plaintext(bytes: &MemoryByteStore, codec: &Codec, text: &str) {
        bytes.put_raw("widgets", codec.encrypt(text).unwrap()).unwrap();
    }

    #[test]
    fn empty_collection_reads_as_empty_without_writing() {
        let (store, bytes, _) = memory_store();
        assert!(store.find_all().unwrap().is_empty());
        assert!(store.find_by_id("nope").unwrap().is_none());
        assert_eq!(bytes.write_count(), 0);
    }

    #[test]
    fn add_then_find_by_id_returns_equal_entity() {
        let (store, _, _) = memory_store();
        let w = widget("w1", "bolt", 3);

        let returned = store.add(w.clone()).unwrap();
        assert_eq!(returned, w);
        assert_eq!(store.find_by_id("w1").unwrap(), Some(w));
    }

    #[test]
    fn stored_document_has_collection_shape() {
        let (store, bytes, codec) = memory_store();
        store.add(widget("w1", "bolt", 3)).unwrap();

        let text = codec.decrypt(&bytes.raw("widgets").unwrap().unwrap()).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["widgets"][0]["id"], "w1");
        assert_eq!(doc.as_object().unwrap().len(), 1);
    }

    #[test]
    fn update_missing_returns_none_and_does_not_write() {
        let (store, bytes, _) = memory_store();
        store.add(widget("w1", "bolt", 3)).unwrap();
        let before = bytes.raw("widgets").unwrap().unwrap();
        let writes = bytes.write_count();

        assert!(store.update(widget("ghost", "x", 1)).unwrap().is_none());
        assert_eq!(bytes.write_count(), writes);
        assert_eq!(bytes.raw("widgets").unwrap().unwrap(), before);
        assert!(store.find_by_id("ghost").unwrap().is_none());
    }

    #[test]
    fn update_replaces_in_place() {
        let (store, _, _) = memory_store();
        store.add(widget("w1", "bolt", 3)).unwrap();
        store.add(widget("w2", "nut", 4)).unwrap();

        let changed = widget("w1", "bolt", 30);
        assert_eq!(store.update(changed.clone()).unwrap(), Some(changed.clone()));

        let all = store.find_all().unwrap();
        assert_eq!(all, vec![changed, widget("w2", "nut", 4)]);
    }

    #[test]
    fn delete_missing_returns_false_and_does_not_write() {
        let (store, bytes, _) = memory_store();
        store.add(widget("w1", "bolt", 3)).unwrap();
        let writes = bytes.write_count();

        assert!(!store.delete("ghost").unwrap());
        assert_eq!(bytes.write_count(), writes);
    }

    #[test]
    fn delete_removes_exactly_one_entity() {
        let (store, _, _) = memory_store();
        for (id, size) in [("a", 1), ("b", 2), ("c", 3)] {
            store.add(widget(id, "x", size)).unwrap();
        }

        assert!(store.delete("b").unwrap());
        assert_eq!(
            store.find_all().unwrap(),
            vec![widget("a", "x", 1), widget("c", "x", 3)]
        );
    }

    #[test]
    fn find_by_attribute_is_first_match_and_type_strict() {
        let (store, _, _) = memory_store();
        store.add(widget("a", "1", 7)).unwrap();
        store.add(widget("b", "7", 1)).unwrap();
        store.add(widget("c", "z", 1)).unwrap();

        let by_size = store.find_by_attribute(WidgetField::Size, 1i64).unwrap().unwrap();
        assert_eq!(by_size.id, "b");

        let by_name = store.find_by_attribute(WidgetField::Name, "1").unwrap().unwrap();
        assert_eq!(by_name.id, "a");

        // "7" the string only matches the name field, never the size field.
        let by_size_str = store.find_by_attribute(WidgetField::Size, "7").unwrap();
        assert!(by_size_str.is_none());
        assert!(store.find_by_attribute(WidgetField::Shiny, "false").unwrap().is_none());
    }

    #[test]
    fn find_where_and_count_where() {
        let (store, _, _) = memory_store();
        store.add(widget("a", "x", 1)).unwrap();
        store.add(widget("b", "x", 2)).unwrap();
        store.add(widget("c", "y", 1)).unwrap();

        let pred =
            Predicate::eq(WidgetField::Name, "x").and(Predicate::eq(WidgetField::Size, 1i64));
        assert_eq!(store.find_where(&pred).unwrap(), vec![widget("a", "x", 1)]);

        let either =
            Predicate::eq(WidgetField::Name, "x").or(Predicate::eq(WidgetField::Size, 1i64));
        assert_eq!(store.count_where(&either).unwrap(), 3);
    }

    #[test]
    fn tampered_blob_is_a_decryption_failure() {
        let (store, bytes, _) = memory_store();
        store.add(widget("a", "x", 1)).unwrap();

        let mut blob = bytes.raw("widgets").unwrap().unwrap();
        let mid = blob.len() / 2;
        blob[mid] ^= 0x80;
        bytes.put_raw("widgets", blob).unwrap();

        let err = store.find_all().unwrap_err();
        assert!(err.is_decryption_failure(), "{err}");
    }

    #[test]
    fn non_json_payload_is_corrupt() {
        let (store, bytes, codec) = memory_store();
        put_plaintext(&bytes, &codec, "not json at all");

        assert!(matches!(
            store.find_all().unwrap_err(),
            StoreError::CorruptCollection { cause: Corruption::Json(_), .. }
        ));
    }

    #[test]
    fn missing_or_wrong_array_field_is_corrupt() {
        let (store, bytes, codec) = memory_store();
        for text in ["[]", "{\"gizmos\": []}", "{\"widgets\": {}}", "42"] {
            put_plaintext(&bytes, &codec, text);
            assert!(
                matches!(
                    store.find_all().unwrap_err(),
                    StoreError::CorruptCollection { cause: Corruption::MissingArray("widgets"), .. }
                ),
                "{text}"
            );
        }
    }

    #[test]
    fn malformed_element_fails_whole_load() {
        let (store, bytes, codec) = memory_store();
        put_plaintext(
            &bytes,
            &codec,
            r#"{"widgets": [
                {"id": "a", "name": "x", "size": 1, "shiny": false},
                {"id": "b", "name": "x", "size": "big", "shiny": false}
            ]}"#,
        );

        match store.find_all().unwrap_err() {
            StoreError::CorruptCollection {
                cause: Corruption::Entity { index, .. },
                ..
            } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn mutation_refuses_to_rewrite_corrupt_collection() {
        let (store, bytes, codec) = memory_store();
        put_plaintext(&bytes, &codec, r#"{"widgets": [{"id": "a"}]}"#);

        assert!(store.add(widget("b", "x", 1)).is_err());
        assert!(store.delete("a").is_err());
        assert_eq!(bytes.write_count(), 0);
    }

    #[test]
    fn read_only_store_rejects_mutations_without_writing() {
        let (writable, bytes, codec) = memory_store();
        writable.add(widget("a", "x", 1)).unwrap();
        let before = bytes.raw("widgets").unwrap().unwrap();

        let store: DocumentStore<Widget> = DocumentStore::open_read_only(bytes.clone(), codec);
        assert_eq!(store.access(), Access::ReadOnly);

        let add = store.add(widget("b", "y", 2)).unwrap_err();
        let update = store.update(widget("a", "z", 9)).unwrap_err();
        let delete = store.delete("a").unwrap_err();
        let replace = store.replace_all(&[]).unwrap_err();
        let bulk = store.update_where(|_| true).unwrap_err();

        for (err, op) in [
            (add, "add"),
            (update, "update"),
            (delete, "delete"),
            (replace, "replace_all"),
            (bulk, "update_where"),
        ] {
            assert!(matches!(
                err,
                StoreError::UnsupportedOperation {
                    collection: "widgets",
                    operation,
                } if operation == op
            ));
        }
        assert_eq!(bytes.write_count(), 1);
        assert_eq!(bytes.raw("widgets").unwrap().unwrap(), before);
        assert_eq!(store.find_all().unwrap(), vec![widget("a", "x", 1)]);
    }

    #[test]
    fn failed_write_is_a_persistence_failure() {
        let (store, bytes, _) = memory_store();
        bytes.set_fail_writes(true);

        assert!(matches!(
            store.add(widget("a", "x", 1)).unwrap_err(),
            StoreError::PersistenceFailure { collection: "widgets", .. }
        ));
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn update_where_persists_once() {
        let (store, bytes, _) = memory_store();
        for (id, size) in [("a", 1), ("b", 2), ("c", 1)] {
            store.add(widget(id, "x", size)).unwrap();
        }
        let writes = bytes.write_count();

        let changed = store
            .update_where(|w| {
                if w.size != 1 {
                    return false;
                }
                w.shiny = true;
                true
            })
            .unwrap();
        assert_eq!(changed, 2);
        assert_eq!(bytes.write_count(), writes + 1);

        let shiny: Vec<_> = store
            .find_where(&Predicate::eq(WidgetField::Shiny, true))
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(shiny, vec!["a", "c"]);

        assert_eq!(store.update_where(|_| false).unwrap(), 0);
        assert_eq!(bytes.write_count(), writes + 1);
    }

    #[test]
    fn failed_update_where_changes_nothing() {
        let (store, bytes, _) = memory_store();
        store.add(widget("a", "x", 1)).unwrap();
        store.add(widget("b", "x", 2)).unwrap();
        let before = bytes.raw("widgets").unwrap().unwrap();
        bytes.set_fail_writes(true);

        let err = store
            .update_where(|w| {
                w.shiny = true;
                true
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::PersistenceFailure { .. }));
        assert_eq!(bytes.raw("widgets").unwrap().unwrap(), before);
        assert!(store.find_all().unwrap().iter().all(|w| !w.shiny));
    }

    #[test]
    fn replace_all_overwrites_collection() {
        let (store, _, _) = memory_store();
        store.add(widget("a", "x", 1)).unwrap();
        store.replace_all(&[widget("b", "y", 2)]).unwrap();
        assert_eq!(store.find_all().unwrap(), vec![widget("b", "y", 2)]);
    }

    #[test]
    fn file_backed_store_survives_reopen_and_rejects_other_keys() {
        let dir = TempDir::new().unwrap();
        let key = generate_symmetric_key();

        {
            let bytes = Arc::new(FileByteStore::new(dir.path()).unwrap());
            let store: DocumentStore<Widget> =
                DocumentStore::open(bytes, Arc::new(Codec::new(key)));
            store.add(widget("a", "x", 1)).unwrap();
        }

        let bytes: Arc<dyn ByteStore> = Arc::new(FileByteStore::new(dir.path()).unwrap());
        let reopened: DocumentStore<Widget> =
            DocumentStore::open(bytes.clone(), Arc::new(Codec::new(key)));
        assert_eq!(reopened.find_all().unwrap(), vec![widget("a", "x", 1)]);

        let wrong: DocumentStore<Widget> =
            DocumentStore::open(bytes, Arc::new(Codec::new(generate_symmetric_key())));
        assert!(wrong.find_all().unwrap_err().is_decryption_failure());
    }
}
