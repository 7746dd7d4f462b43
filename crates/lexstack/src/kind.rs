/// Trait for token kind identifiers.
///
/// A token kind is the identity a [`crate::TokenType`] descriptor carries and
/// the tag every emitted [`crate::Token`] reports back. The engine is fully
/// generic over it: category hierarchies, keyword classification, and any
/// other grouping concerns live in the layers above.
///
/// The type should typically be a fieldless `Copy` enum.
///
/// ## Example
///
/// ```rust
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum MyTokenKind {
///     Ident,
///     Number,
///     Whitespace,
/// }
/// // No impl block needed: the trait is blanket-implemented.
/// fn assert_kind<K: lexstack::TokenKind>() {}
/// assert_kind::<MyTokenKind>();
/// ```
pub trait TokenKind:
    Copy + PartialEq + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static
{
}

impl<K> TokenKind for K where
    K: Copy + PartialEq + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static
{
}
