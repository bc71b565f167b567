use std::sync::Arc;

#[derive(Debug)]
struct ObjectData {
    class_name: String,
}

/// Opaque host object. Two handles are equal only if they point at the same
/// allocation.
#[derive(Debug, Clone)]
pub struct ObjectValue(Arc<ObjectData>);

impl ObjectValue {
    pub fn new<T: Into<String>>(class_name: T) -> Self {
        ObjectValue(Arc::new(ObjectData {
            class_name: class_name.into(),
        }))
    }

    pub fn class_name(&self) -> &str {
        &self.0.class_name
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
