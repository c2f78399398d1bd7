use super::event::{EventHub, NavigationEvent, Property, PropertyValue};

/// A value that announces its changes on an [`EventHub`].
///
/// `set` emits `PropertyChanging` with the old value, stores the new value and
/// then emits `PropertyChanged`. Assigning the value it already holds emits
/// nothing.
#[derive(Debug, Clone)]
pub struct Observable<T> {
    property: Property,
    value: T,
}

impl<T> Observable<T>
where
    T: PartialEq + Clone + Into<PropertyValue>,
{
    pub fn new(property: Property, value: T) -> Observable<T> {
        Observable { property, value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn property(&self) -> Property {
        self.property
    }

    /// Returns `true` if the value changed.
    pub fn set(&mut self, value: T, hub: &mut EventHub) -> bool {
        if self.value == value {
            tracing::trace!(property = %self.property, "value unchanged, not notifying");
            return false;
        }

        hub.publish(NavigationEvent::PropertyChanging {
            property: self.property,
            value: self.value.clone().into(),
        });

        self.value = value;

        hub.publish(NavigationEvent::PropertyChanged {
            property: self.property,
            value: self.value.clone().into(),
        });

        true
    }
}
