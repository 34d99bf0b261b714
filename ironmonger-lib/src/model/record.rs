//! Dynamic storefront record

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use tablekit::CellValue;
use tablekit::Column;
use uuid::Uuid;

use super::Value;
use crate::error::FieldError;

/// A dynamic record from the storefront API.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing dynamic
/// access to any field of any resource (product, order, enquiry, quote).
/// Typed getter methods provide safe access with proper error handling.
///
/// # Example
///
/// ```
/// use ironmonger_lib::model::Record;
///
/// // Create a new record for writing
/// let record = Record::new()
///     .set("name", "Claw hammer")
///     .set("stock", 250i64);
///
/// // Access fields
/// assert_eq!(record.get_string("name").unwrap(), Some("Claw hammer"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// The unique identifier of the record, when the API supplied one.
    pub(crate) id: Option<Uuid>,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self {
            id: None,
            fields: HashMap::new(),
        }
    }

    /// Creates a new record with the given ID.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id: Some(id),
            fields: HashMap::new(),
        }
    }

    /// Returns the record ID, if set.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Sets the record ID.
    pub fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns a mutable reference to all fields.
    pub fn fields_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.fields
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets an f64 field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a Decimal field value.
    pub fn get_decimal(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Decimal(d)) => Ok(Some(*d)),
            Some(Value::Int(n)) => Ok(Some(Decimal::from(*n))), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "decimal",
                other.type_name(),
            )),
        }
    }

    /// Gets a UUID field value.
    pub fn get_guid(&self, field: &str) -> Result<Option<Uuid>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Guid(g)) => Ok(Some(*g)),
            Some(other) => Err(FieldError::type_mismatch(field, "guid", other.type_name())),
        }
    }

    /// Gets a DateTime field value.
    pub fn get_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::DateTime(dt)) => Ok(Some(*dt)),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "datetime",
                other.type_name(),
            )),
        }
    }

    // =========================================================================
    // Table bridging
    // =========================================================================

    /// Returns the field as a table cell value.
    ///
    /// Missing fields and explicit nulls both map to `None`, which is what
    /// the table core expects: neither matches a search, both sort last.
    pub fn cell(&self, field: &str) -> Option<CellValue> {
        match self.fields.get(field)? {
            Value::Null => None,
            Value::Bool(b) => Some(CellValue::Bool(*b)),
            Value::Int(n) => Some(CellValue::Int(*n)),
            Value::Float(n) => Some(CellValue::Float(*n)),
            Value::Decimal(d) => Some(CellValue::Decimal(*d)),
            Value::String(s) => Some(CellValue::Text(s.clone())),
            Value::Guid(g) => Some(CellValue::Text(g.to_string())),
            Value::DateTime(dt) => Some(CellValue::DateTime(*dt)),
            Value::Json(j) => Some(CellValue::Text(j.to_string())),
        }
    }

    /// Builds a table column that reads the given field from records.
    ///
    /// This is the direct-field-lookup accessor; columns needing derived
    /// values supply their own closure through [`Column::new`].
    pub fn column(field: impl Into<String>, header: impl Into<String>) -> Column<Record> {
        let key = field.into();
        let accessor_key = key.clone();
        Column::new(key, header, move |record: &Record| {
            record.cell(&accessor_key)
        })
    }
}
