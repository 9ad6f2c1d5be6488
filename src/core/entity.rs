//! Record trait shared by every entity shown in a list

use crate::core::field::FieldValue;

/// A single domain entity displayed in a paginated list
///
/// Records are identified by an integer id that is unique within their kind.
/// The list renderer treats records opaquely (through column accessors);
/// the filter evaluator reads them by field name through [`Record::field`].
///
/// # Example
///
/// ```rust,ignore
/// impl Record for StatMetric {
///     fn kind() -> &'static str { "stat" }
///     fn id(&self) -> i64 { self.id }
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         match name {
///             "label" => Some(self.label.as_str().into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record: Clone + Send + Sync + 'static {
    /// Singular kind name (e.g. "product", "customer")
    fn kind() -> &'static str;

    /// Identifier, unique within the kind
    fn id(&self) -> i64;

    /// Read a named field for filtering
    ///
    /// Returns `None` when the record has no such field.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Names accepted by [`Record::field`]
    fn field_names() -> &'static [&'static str];
}

/// Find a record by id in a slice
pub fn find_by_id<R: Record>(records: &[R], id: i64) -> Option<&R> {
    records.iter().find(|r| r.id() == id)
}
