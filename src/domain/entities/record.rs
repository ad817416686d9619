use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Separator placed between field values when building a search haystack.
/// Keeps a needle from matching across the boundary of two adjacent values.
pub const SEARCH_SEPARATOR: char = '\u{1f}';

/// A single scalar field value of a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Maps an untyped cell (CSV, CLI input) to the narrowest matching value.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return FieldValue::Null;
        }
        match raw {
            "true" => return FieldValue::Bool(true),
            "false" => return FieldValue::Bool(false),
            _ => {}
        }
        if let Ok(value) = raw.parse::<i64>() {
            return FieldValue::Int(value);
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => FieldValue::Float(value),
            _ => FieldValue::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Textual form used for search and rendering.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null => Cow::Borrowed(""),
            FieldValue::Bool(value) => Cow::Borrowed(if *value { "true" } else { "false" }),
            FieldValue::Int(value) => Cow::Owned(value.to_string()),
            FieldValue::Float(value) => Cow::Owned(value.to_string()),
            FieldValue::Text(value) => Cow::Borrowed(value),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Int(_) | FieldValue::Float(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }

    /// Native ordering: `Null < Bool < numbers < Text`.
    ///
    /// Integers and floats compare exactly by numeric value (`-0.0 == 0`),
    /// text compares by code point. NaNs sit below (negative sign) or above
    /// every number. The order is total so it can drive a stable sort.
    pub fn cmp_native(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => cmp_floats(*a, *b),
            (FieldValue::Int(a), FieldValue::Float(b)) => cmp_int_float(*a, *b),
            (FieldValue::Float(a), FieldValue::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

fn cmp_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Exact comparison; `int as f64` would round above 2^53.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, the first float past `i64::MAX`.
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= I64_BOUND {
        return Ordering::Less;
    }
    if float < -I64_BOUND {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => cmp_floats(0.0, float - whole),
        unequal => unequal,
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Capability a record type exposes so a view can search and sort it.
pub trait Record {
    /// Every field name with its value, in the record's natural order.
    fn fields(&self) -> Vec<(&str, FieldValue)>;

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields()
            .into_iter()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, value)| value)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn fields(&self) -> Vec<(&str, FieldValue)> {
        (**self).fields()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        (**self).field(name)
    }
}

/// Lower-cased concatenation of the record's field values (never names).
///
/// With a non-empty `whitelist`, only the named fields contribute.
pub fn search_haystack<R: Record + ?Sized>(record: &R, whitelist: &[String]) -> String {
    let mut haystack = String::new();
    for (name, value) in record.fields() {
        if !whitelist.is_empty() && !whitelist.iter().any(|allowed| allowed == name) {
            continue;
        }
        if !haystack.is_empty() {
            haystack.push(SEARCH_SEPARATOR);
        }
        haystack.push_str(&value.as_text().to_lowercase());
    }
    haystack
}

/// An ordered set of named values; the record type produced by file sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, FieldValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Row::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Replaces the value of an existing field in place, or appends a new one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Record for Row {
    fn fields(&self) -> Vec<(&str, FieldValue)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, value) in iter {
            row.set(name, value);
        }
        row
    }
}
