use crate::raw::WireUnits;

/// Raw wire units whose field numbers the decoding schema did not know.
///
/// Kept verbatim, in arrival order, and re-emitted after the known fields
/// on encode so that older code forwards newer fields untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownFields {
    raw: Vec<u8>,
}

impl UnknownFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one complete wire unit (tag and payload).
    pub fn push_unit(&mut self, unit: &[u8]) {
        self.raw.extend_from_slice(unit);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Iterate over the preserved wire units.
    pub fn units(&self) -> WireUnits<'_> {
        WireUnits::new(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawValue;

    #[test]
    fn push_preserves_order_and_bytes() {
        let mut unknown = UnknownFields::new();
        unknown.push_unit(&[0x10, 0x07]);
        unknown.push_unit(&[0x1A, 0x01, b'z']);

        assert_eq!(unknown.as_bytes(), &[0x10, 0x07, 0x1A, 0x01, b'z']);
        assert_eq!(unknown.len(), 5);

        let values: Vec<_> = unknown.units().map(|unit| unit.unwrap().value).collect();
        assert_eq!(values, vec![RawValue::Varint(7), RawValue::Bytes(b"z")]);
    }

    #[test]
    fn clear_discards_everything() {
        let mut unknown = UnknownFields::new();
        unknown.push_unit(&[0x10, 0x07]);
        unknown.clear();
        assert!(unknown.is_empty());
    }
}
