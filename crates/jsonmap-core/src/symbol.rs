//! Enumeration support for [`Document::get_enum`](crate::Document::get_enum).

use std::any::{type_name, TypeId};

/// A closed, programmer-controlled vocabulary that can be stored in a
/// document and recovered from text by exact member name.
///
/// ```
/// use jsonmap_core::Symbol;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Channel {
///     Web,
///     Mobile,
/// }
///
/// impl Symbol for Channel {
///     const VARIANTS: &'static [Self] = &[Channel::Web, Channel::Mobile];
///
///     fn name(&self) -> &'static str {
///         match self {
///             Channel::Web => "Web",
///             Channel::Mobile => "Mobile",
///         }
///     }
/// }
///
/// assert_eq!(Channel::from_name("Mobile"), Some(Channel::Mobile));
/// assert_eq!(Channel::from_name("mobile"), None);
/// ```
pub trait Symbol: Copy + 'static {
    /// Every member of the enumeration.
    const VARIANTS: &'static [Self];

    /// The member's name, as it appears in stored text.
    fn name(&self) -> &'static str;

    /// Resolves a member by exact, case-sensitive name.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|member| member.name() == name)
    }
}

/// A stored enumeration member, tagged with the enumeration it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolValue {
    type_id: TypeId,
    type_name: &'static str,
    name: &'static str,
}

impl SymbolValue {
    pub fn of<E: Symbol>(member: E) -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            type_name: type_name::<E>(),
            name: member.name(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if this member belongs to enumeration `E`.
    pub fn is<E: Symbol>(&self) -> bool {
        self.type_id == TypeId::of::<E>()
    }

    /// Recovers the member if it belongs to enumeration `E`.
    pub fn get<E: Symbol>(&self) -> Option<E> {
        if self.is::<E>() {
            E::from_name(self.name)
        } else {
            None
        }
    }
}
