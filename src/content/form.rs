use std::collections::HashMap;

use crate::domain::{ContentRecord, FieldKind, FieldSpec};
use crate::error::{AppError, Result};
use crate::store::Fields;

/// Raw text values as a submitted form carries them, keyed by field name.
pub type FormValues = HashMap<String, String>;

/// Coerce a create form against T's schema: every required field must be
/// present, defaults fill the gaps a select or number input would have
/// submitted anyway.
pub fn coerce_create<T: ContentRecord>(form: &FormValues) -> Result<Fields> {
    coerce(T::fields(), form, true)
}

/// Coerce an edit form: only fields actually present are merged, nothing
/// is required and no defaults apply.
pub fn coerce_edit<T: ContentRecord>(form: &FormValues) -> Result<Fields> {
    coerce(T::fields(), form, false)
}

fn coerce(specs: &[FieldSpec], form: &FormValues, create: bool) -> Result<Fields> {
    let mut fields = Fields::new();

    for spec in specs {
        let supplied = form
            .get(spec.name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty());

        let raw = match (supplied, create) {
            (Some(value), _) => value,
            (None, true) => match spec.default {
                Some(default) => default,
                None if spec.required => {
                    return Err(AppError::Validation(format!("{} is required", spec.name)));
                }
                None => continue,
            },
            (None, false) => continue,
        };

        fields.insert(spec.name.to_string(), coerce_value(spec, raw)?);
    }

    Ok(fields)
}

fn coerce_value(spec: &FieldSpec, raw: &str) -> Result<serde_json::Value> {
    match spec.kind {
        FieldKind::Text | FieldKind::Date | FieldKind::Time => {
            Ok(serde_json::Value::String(raw.to_string()))
        }
        FieldKind::Number => raw
            .parse::<i64>()
            .map(serde_json::Value::from)
            .map_err(|_| AppError::Validation(format!("{} must be a number", spec.name))),
        FieldKind::Enum(options) => {
            if options.contains(&raw) {
                Ok(serde_json::Value::String(raw.to_string()))
            } else {
                Err(AppError::Validation(format!("{} is not a valid {}", raw, spec.name)))
            }
        }
    }
}
