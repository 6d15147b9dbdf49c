use crate::codec::{decode_line, encode_line, CodecOptions, LineCodec};
use crate::{debug, info, warn, FieldValue, Fields, StoreError};
use std::fmt::Debug;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// A record type that can live in a [`RecordStore`].
///
/// Equality is the record's identity contract, it is what [`RecordStore::find`] and
/// [`RecordStore::remove`] compare with.
pub trait Record: LineCodec + Fields + PartialEq + Clone + Debug {
    /// Plural name used in log lines, e.g. `patients`.
    const KIND: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Initial capacity and growth increment of the buffer.
    pub chunk_size: usize,
    pub codec: CodecOptions,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_CHUNK_SIZE, codec: CodecOptions::default() }
    }
}

/// Ordered, file backed collection of records of one type.
///
/// Slots `[0, len)` hold the live records in insertion order. The buffer is pre-allocated
/// with `chunk_size` slots and extended by another chunk whenever it is full, it never
/// shrinks. Mutating the store while iterating is prevented by the borrow checker.
#[derive(Debug)]
pub struct RecordStore<T: Record> {
    items: Vec<T>,
    capacity: usize,
    path: PathBuf,
    options: StoreOptions,
}

impl<T: Record> RecordStore<T> {
    /// Creates the store and loads every line of `path` if the file exists.
    ///
    /// A single undecodable line fails the whole open, nothing is skipped.
    pub fn open(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self, StoreError> {
        let chunk_size = options.chunk_size.max(1);
        let options = StoreOptions { chunk_size, ..options };
        let mut store = Self {
            items: Vec::with_capacity(chunk_size),
            capacity: chunk_size,
            path: path.into(),
            options,
        };
        store.load()?;
        info!("Opened {} store at {} with {} records", T::KIND, store.path.display(), store.len());
        Ok(store)
    }

    fn load(&mut self) -> Result<(), StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No {} file at {}, starting empty", T::KIND, self.path.display());
                return Ok(());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| StoreError::io(&self.path, e))?;
            let record = decode_line::<T>(&line, &self.options.codec).map_err(|source| StoreError::MalformedRecord {
                path: self.path.clone(),
                line_no: index + 1,
                line: line.clone(),
                source,
            })?;
            self.add(record);
        }
        Ok(())
    }

    /// Appends `record` after the last live record. Duplicates are not detected.
    pub fn add(&mut self, record: T) {
        if self.items.len() == self.capacity {
            self.capacity += self.options.chunk_size;
            self.items.reserve_exact(self.capacity - self.items.len());
            debug!("Grew {} store to {} slots", T::KIND, self.capacity);
        }
        self.items.push(record);
    }

    /// Removes the first record equal to `record`, closing the gap. Returns whether one was found.
    pub fn remove(&mut self, record: &T) -> bool {
        match self.position(record) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn position(&self, record: &T) -> Option<usize> {
        self.iter().position(|item| item == record)
    }

    pub fn find(&self, record: &T) -> Option<&T> {
        self.iter().find(|item| *item == record)
    }

    pub fn find_by(&self, field: T::Field, value: impl Into<FieldValue>) -> Option<&T> {
        let value = value.into();
        self.iter().find(|item| item.matches(field, &value))
    }

    pub fn find_all_by(&self, field: T::Field, value: impl Into<FieldValue>) -> Vec<&T> {
        let value = value.into();
        self.iter().filter(|item| item.matches(field, &value)).collect()
    }

    pub fn find_mut_by(&mut self, field: T::Field, value: impl Into<FieldValue>) -> Option<&mut T> {
        let value = value.into();
        self.items.iter_mut().find(|item| item.matches(field, &value))
    }

    /// Like [`RecordStore::find_by`] with the field given by its symbolic name.
    /// An unknown name matches nothing.
    pub fn find_by_name(&self, field: &str, value: impl Into<FieldValue>) -> Option<&T> {
        self.resolve(field).and_then(|field| self.find_by(field, value))
    }

    pub fn find_all_by_name(&self, field: &str, value: impl Into<FieldValue>) -> Vec<&T> {
        match self.resolve(field) {
            Some(field) => self.find_all_by(field, value),
            None => Vec::new(),
        }
    }

    fn resolve(&self, field: &str) -> Option<T::Field> {
        match field.parse::<T::Field>() {
            Ok(field) => Some(field),
            Err(e) => {
                warn!("{} lookup on {}", e, T::KIND);
                None
            }
        }
    }

    /// Rewrites the backing file with one line per live record, creating directories as needed.
    pub fn persist(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }
        let file = File::create(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let mut writer = BufWriter::new(file);
        for record in self.iter() {
            writeln!(writer, "{}", encode_line(record, &self.options.codec)).map_err(|e| StoreError::io(&self.path, e))?;
        }
        writer.flush().map_err(|e| StoreError::io(&self.path, e))?;
        info!("Persisted {} {} to {}", self.len(), T::KIND, self.path.display());
        Ok(())
    }

    pub fn iter(&self) -> Records<'_, T> {
        Records { store: self, cursor: 0 }
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of allocated slots, live or not.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }
}

/// Cursor over the live prefix of a [`RecordStore`].
pub struct Records<'a, T: Record> {
    store: &'a RecordStore<T>,
    cursor: usize,
}

impl<'a, T: Record> Iterator for Records<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor < self.store.len() {
            let item = self.store.get(self.cursor);
            self.cursor += 1;
            item
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.store.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl<'a, T: Record> ExactSizeIterator for Records<'a, T> {}

impl<'a, T: Record> IntoIterator for &'a RecordStore<T> {
    type Item = &'a T;
    type IntoIter = Records<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;
    use crate::codec::parse_int;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, crate::Fields)]
    struct Item {
        name: String,
        #[field(name = "qty")]
        quantity: u32,
    }

    impl LineCodec for Item {
        const FIELD_COUNT: usize = 2;

        fn encode(&self, _options: &CodecOptions) -> Vec<String> {
            vec![self.name.clone(), self.quantity.to_string()]
        }

        fn decode(fields: &[&str], _options: &CodecOptions) -> Result<Self, DecodeError> {
            Ok(Item { name: fields[0].to_string(), quantity: parse_int("quantity", fields[1])? })
        }
    }

    impl Record for Item {
        const KIND: &'static str = "items";
    }

    fn item(name: &str, quantity: u32) -> Item {
        Item { name: name.to_string(), quantity }
    }

    fn open_in(dir: &TempDir, chunk_size: usize) -> RecordStore<Item> {
        let options = StoreOptions { chunk_size, ..StoreOptions::default() };
        RecordStore::open(dir.path().join("items.csv"), options).unwrap()
    }

    #[test]
    fn starts_empty_with_one_chunk() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir, DEFAULT_CHUNK_SIZE);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 1000);
        assert!(!store.path().exists(), "opening must not create the file");
    }

    #[test]
    fn grows_by_whole_chunks() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, 4);
        for i in 0..4 {
            store.add(item("a", i));
        }
        assert_eq!(store.capacity(), 4);
        store.add(item("b", 4));
        assert_eq!(store.capacity(), 8);
        assert_eq!(store.len(), 5);
        for i in 5..9 {
            store.add(item("c", i));
        }
        assert_eq!(store.capacity(), 12);
    }

    #[test]
    fn iterates_in_insertion_order() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, 2);
        let items: Vec<Item> = (0..7).map(|i| item(&format!("n{}", i), i)).collect();
        items.iter().cloned().for_each(|i| store.add(i));
        assert_eq!(store.iter().cloned().collect::<Vec<_>>(), items);
        assert_eq!(store.iter().len(), 7);
        // restartable
        assert_eq!(store.iter().count(), (&store).into_iter().count());
    }

    #[test]
    fn add_does_not_deduplicate() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, 10);
        store.add(item("a", 1));
        store.add(item("a", 1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_closes_the_gap() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, 3);
        for i in 0..5 {
            store.add(item("x", i));
        }
        assert!(store.remove(&item("x", 2)));
        let remaining: Vec<u32> = store.iter().map(|i| i.quantity).collect();
        assert_eq!(remaining, vec![0, 1, 3, 4]);
        assert_eq!(store.get(3), Some(&item("x", 4)));
        assert_eq!(store.get(4), None);
        assert_eq!(store.capacity(), 6, "removal never shrinks the buffer");
    }

    #[test]
    fn remove_missing_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, 3);
        store.add(item("x", 1));
        assert!(!store.remove(&item("y", 1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_takes_first_duplicate_only() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, 3);
        store.add(item("x", 1));
        store.add(item("y", 2));
        store.add(item("x", 1));
        assert!(store.remove(&item("x", 1)));
        assert_eq!(store.iter().cloned().collect::<Vec<_>>(), vec![item("y", 2), item("x", 1)]);
    }

    #[test]
    fn finds_by_record_and_by_field() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, 10);
        store.add(item("apple", 3));
        store.add(item("pear", 5));
        store.add(item("apple", 7));

        assert_eq!(store.find(&item("pear", 5)), Some(&item("pear", 5)));
        assert_eq!(store.find(&item("pear", 6)), None);

        assert_eq!(store.find_by(ItemField::Name, "apple"), Some(&item("apple", 3)));
        assert_eq!(store.find_by(ItemField::Quantity, 7), Some(&item("apple", 7)));
        assert_eq!(store.find_by(ItemField::Name, "plum"), None);

        let apples = store.find_all_by(ItemField::Name, "apple");
        assert_eq!(apples, vec![&item("apple", 3), &item("apple", 7)]);
        assert!(store.find_all_by(ItemField::Name, "plum").is_empty());
    }

    #[test]
    fn finds_by_symbolic_name() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, 10);
        store.add(item("apple", 3));
        store.add(item("pear", 3));

        assert_eq!(store.find_by_name("qty", 3), Some(&item("apple", 3)));
        assert_eq!(store.find_all_by_name("qty", 3).len(), 2);
        assert_eq!(store.find_by_name("quantity", 3), None);
        assert!(store.find_all_by_name("nope", "apple").is_empty());
        assert_eq!(ItemField::Quantity.name(), "qty");
        assert_eq!("name".parse::<ItemField>(), Ok(ItemField::Name));
    }

    #[test]
    fn find_mut_updates_in_place() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, 10);
        store.add(item("apple", 3));
        if let Some(found) = store.find_mut_by(ItemField::Name, "apple") {
            found.quantity = 4;
        }
        assert_eq!(store.get(0).map(|i| i.field_value(ItemField::Quantity)), Some(FieldValue::Int(4)));
    }

    #[test]
    fn persist_then_reopen_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("items.csv");
        let records = vec![item("a", 1), item("b", 2), item("c", 3)];
        {
            let mut store: RecordStore<Item> = RecordStore::open(&path, StoreOptions::default()).unwrap();
            records.iter().cloned().for_each(|r| store.add(r));
            store.persist().unwrap();
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "a;1\nb;2\nc;3\n");
        let reopened: RecordStore<Item> = RecordStore::open(&path, StoreOptions::default()).unwrap();
        assert_eq!(reopened.iter().cloned().collect::<Vec<_>>(), records);
    }

    #[test]
    fn persist_overwrites_instead_of_appending() {
        let dir = TempDir::new().unwrap();
        let mut store = open_in(&dir, 10);
        store.add(item("a", 1));
        store.add(item("b", 2));
        store.persist().unwrap();
        store.remove(&item("a", 1));
        store.persist().unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "b;2\n");
    }

    #[test]
    fn malformed_line_fails_the_whole_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.csv");
        fs::write(&path, "a;1\nb;2;extra\nc;3\n").unwrap();
        let err = RecordStore::<Item>::open(&path, StoreOptions::default()).unwrap_err();
        match err {
            StoreError::MalformedRecord { line_no, line, source, .. } => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "b;2;extra");
                assert!(matches!(source, DecodeError::FieldCount { expected: 2, found: 3 }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unparsable_number_names_line_and_cause() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.csv");
        fs::write(&path, "a;one\n").unwrap();
        let err = RecordStore::<Item>::open(&path, StoreOptions::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 1"), "{message}");
        assert!(message.contains("a;one"), "{message}");
        assert!(matches!(err, StoreError::MalformedRecord { source: DecodeError::Number { .. }, .. }));
    }

    #[test]
    fn unreadable_path_is_storage_error() {
        let dir = TempDir::new().unwrap();
        // a directory where the file should be
        let path = dir.path().join("items.csv");
        fs::create_dir_all(&path).unwrap();
        let err = open_in_path_or_error(&path);
        assert!(matches!(err, Some(StoreError::StorageIo { .. })), "{err:?}");
    }

    fn open_in_path_or_error(path: &Path) -> Option<StoreError> {
        match RecordStore::<Item>::open(path, StoreOptions::default()) {
            Ok(store) => store.persist().err(),
            Err(e) => Some(e),
        }
    }
}
