use super::Value;

/// Insertion-ordered mapping from values to values.
///
/// Keys are compared with [`Value::eql`], so `1` and `1.0` are distinct keys
/// and lookups are linear. Maps
/// matched against patterns are small, keeping declaration order makes
/// diagnostics deterministic.
#[derive(Debug, Clone, Default)]
pub struct MapValue(Vec<(Value, Value)>);

impl MapValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0
            .iter()
            .find_map(|(entry_key, value)| entry_key.eql(key).then_some(value))
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.0.iter().any(|(entry_key, _)| entry_key.eql(key))
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        if let Some((_, slot)) = self.0.iter_mut().find(|(entry_key, _)| entry_key.eql(&key)) {
            return Some(std::mem::replace(slot, value));
        }

        self.0.push((key, value));
        None
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.iter().map(|(key, value)| (key, value))
    }
}

impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|other| other == value))
    }
}

impl FromIterator<(Value, Value)> for MapValue {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        let mut map = MapValue::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
