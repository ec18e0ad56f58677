//! Type representation for package-level declarations.
//!
//! Only what constant evaluation and extraction need is modeled precisely:
//! predeclared basic types and package-local named types. Composite and
//! imported types are opaque.

use std::fmt;

/// Predeclared basic types plus the kinds of untyped constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedString,
    UntypedNil,
}

impl BasicKind {
    /// Look up a predeclared type name. `byte` and `rune` are aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<BasicKind> {
        let kind = match name {
            "bool" => BasicKind::Bool,
            "int" => BasicKind::Int,
            "int8" => BasicKind::Int8,
            "int16" => BasicKind::Int16,
            "int32" | "rune" => BasicKind::Int32,
            "int64" => BasicKind::Int64,
            "uint" => BasicKind::Uint,
            "uint8" | "byte" => BasicKind::Uint8,
            "uint16" => BasicKind::Uint16,
            "uint32" => BasicKind::Uint32,
            "uint64" => BasicKind::Uint64,
            "uintptr" => BasicKind::Uintptr,
            "float32" => BasicKind::Float32,
            "float64" => BasicKind::Float64,
            "complex64" => BasicKind::Complex64,
            "complex128" => BasicKind::Complex128,
            "string" => BasicKind::String,
            _ => return None,
        };
        Some(kind)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::UntypedBool => "untyped bool",
            BasicKind::UntypedInt => "untyped int",
            BasicKind::UntypedRune => "untyped rune",
            BasicKind::UntypedFloat => "untyped float",
            BasicKind::UntypedString => "untyped string",
            BasicKind::UntypedNil => "untyped nil",
        }
    }

    #[must_use]
    pub const fn is_untyped(self) -> bool {
        matches!(
            self,
            BasicKind::UntypedBool
                | BasicKind::UntypedInt
                | BasicKind::UntypedRune
                | BasicKind::UntypedFloat
                | BasicKind::UntypedString
                | BasicKind::UntypedNil
        )
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            BasicKind::Int
                | BasicKind::Int8
                | BasicKind::Int16
                | BasicKind::Int32
                | BasicKind::Int64
                | BasicKind::Uint
                | BasicKind::Uint8
                | BasicKind::Uint16
                | BasicKind::Uint32
                | BasicKind::Uint64
                | BasicKind::Uintptr
                | BasicKind::UntypedInt
                | BasicKind::UntypedRune
        )
    }

    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            BasicKind::Uint
                | BasicKind::Uint8
                | BasicKind::Uint16
                | BasicKind::Uint32
                | BasicKind::Uint64
                | BasicKind::Uintptr
        )
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            BasicKind::Float32 | BasicKind::Float64 | BasicKind::UntypedFloat
        )
    }

    #[must_use]
    pub const fn is_complex(self) -> bool {
        matches!(self, BasicKind::Complex64 | BasicKind::Complex128)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float() || self.is_complex()
    }

    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, BasicKind::Bool | BasicKind::UntypedBool)
    }

    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, BasicKind::String | BasicKind::UntypedString)
    }

    /// Whether constants may have this type.
    #[must_use]
    pub const fn is_constant_type(self) -> bool {
        !matches!(self, BasicKind::UntypedNil)
    }

    /// Inclusive value range of a sized integer kind. `int`, `uint` and
    /// `uintptr` are 64 bits wide.
    #[must_use]
    pub const fn integer_range(self) -> Option<(i128, i128)> {
        let range = match self {
            BasicKind::Int8 => (i8::MIN as i128, i8::MAX as i128),
            BasicKind::Int16 => (i16::MIN as i128, i16::MAX as i128),
            BasicKind::Int32 => (i32::MIN as i128, i32::MAX as i128),
            BasicKind::Int | BasicKind::Int64 => (i64::MIN as i128, i64::MAX as i128),
            BasicKind::Uint8 => (0, u8::MAX as i128),
            BasicKind::Uint16 => (0, u16::MAX as i128),
            BasicKind::Uint32 => (0, u32::MAX as i128),
            BasicKind::Uint | BasicKind::Uint64 | BasicKind::Uintptr => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }

    /// Size in bytes on a 64-bit target. Untyped kinds take the size of
    /// their default type.
    #[must_use]
    pub const fn size(self) -> Option<i128> {
        let size = match self {
            BasicKind::Bool | BasicKind::Int8 | BasicKind::Uint8 | BasicKind::UntypedBool => 1,
            BasicKind::Int16 | BasicKind::Uint16 => 2,
            BasicKind::Int32 | BasicKind::Uint32 | BasicKind::Float32 | BasicKind::UntypedRune => 4,
            BasicKind::Int
            | BasicKind::Int64
            | BasicKind::Uint
            | BasicKind::Uint64
            | BasicKind::Uintptr
            | BasicKind::Float64
            | BasicKind::Complex64
            | BasicKind::UntypedInt
            | BasicKind::UntypedFloat => 8,
            BasicKind::Complex128 | BasicKind::String | BasicKind::UntypedString => 16,
            BasicKind::UntypedNil => return None,
        };
        Some(size)
    }

    /// Rank used to pick the kind of a binary operation on two untyped
    /// numeric constants: the larger rank wins.
    pub(crate) const fn untyped_rank(self) -> u8 {
        match self {
            BasicKind::UntypedInt => 1,
            BasicKind::UntypedRune => 2,
            BasicKind::UntypedFloat => 3,
            _ => 0,
        }
    }
}

/// The type of a declared object.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Basic(BasicKind),
    /// A package-local defined type, by name.
    Named(String),
    /// A type from an imported package, by its qualified source text.
    External(String),
    TypeParam(String),
    /// Any other type: pointers, slices, structs, interfaces, instances.
    Composite,
    Invalid,
}

impl Type {
    #[must_use]
    pub fn is_untyped(&self) -> bool {
        matches!(self, Type::Basic(kind) if kind.is_untyped())
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Type::Invalid)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic(kind) => f.write_str(kind.name()),
            Type::Named(name) | Type::External(name) | Type::TypeParam(name) => f.write_str(name),
            Type::Composite => f.write_str("composite type"),
            Type::Invalid => f.write_str("invalid type"),
        }
    }
}

/// A method declared on a package-local named type.
#[derive(Clone, Debug)]
pub struct MethodInfo {
    pub name: String,
    pub pointer_receiver: bool,
    pub param_count: usize,
    /// Resolved result types.
    pub results: Vec<Type>,
}

impl MethodInfo {
    /// `String() string` with a value receiver: the method set of the value
    /// type then satisfies `fmt.Stringer`.
    #[must_use]
    pub fn is_value_stringer(&self) -> bool {
        self.name == "String"
            && !self.pointer_receiver
            && self.param_count == 0
            && self.results == [Type::Basic(BasicKind::String)]
    }
}

/// A type declared at package level.
#[derive(Clone, Debug)]
pub struct NamedType {
    pub name: String,
    /// Target name for `type A = B` where `B` is package-local.
    pub alias_of: Option<String>,
    /// Resolved underlying type; never `Type::Named`.
    pub underlying: Type,
    pub has_type_params: bool,
    pub methods: Vec<MethodInfo>,
}

impl NamedType {
    /// Static stringer facts of this type.
    #[must_use]
    pub fn stringer_facts(&self) -> StringerFacts {
        StringerFacts {
            is_stringer: self.methods.iter().any(MethodInfo::is_value_stringer),
            defines_string: self.methods.iter().any(|m| m.name == "String"),
        }
    }
}

/// What the package already declares about textual rendering of a type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringerFacts {
    /// A value-receiver `String() string` method exists.
    pub is_stringer: bool,
    /// Any method named `String` exists, whatever its signature.
    pub defines_string: bool,
}
