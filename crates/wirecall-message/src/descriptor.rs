use crate::wire::{Tag, WireKind};

/// Semantic type of a scalar field. Each maps to exactly one wire kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Bytes,
    Bool,
    UInt32,
    UInt64,
    Int32,
    Int64,
    SInt32,
    SInt64,
    Fixed32,
    Fixed64,
}

impl FieldType {
    pub const fn wire_kind(self) -> WireKind {
        match self {
            Self::String | Self::Bytes => WireKind::LengthDelimited,
            Self::Bool
            | Self::UInt32
            | Self::UInt64
            | Self::Int32
            | Self::Int64
            | Self::SInt32
            | Self::SInt64 => WireKind::Varint,
            Self::Fixed32 => WireKind::Fixed32,
            Self::Fixed64 => WireKind::Fixed64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Bool => "bool",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::SInt32 => "sint32",
            Self::SInt64 => "sint64",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
        }
    }
}

/// Static description of one field of a message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub number: u32,
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldDescriptor {
    pub const fn new(number: u32, name: &'static str, ty: FieldType) -> Self {
        Self { number, name, ty }
    }

    pub const fn wire_kind(&self) -> WireKind {
        self.ty.wire_kind()
    }

    pub const fn tag(&self) -> Tag {
        Tag::new(self.number, self.ty.wire_kind())
    }
}

/// Look up a field by number in a message type's descriptor set.
pub fn find_field(
    fields: &'static [FieldDescriptor],
    number: u32,
) -> Option<&'static FieldDescriptor> {
    fields.iter().find(|field| field.number == number)
}
