//! Field mutability metadata and model validation
//!
//! Each resource model declares a table of `FieldSpec`s instead of
//! hand-written per-field conditionals. The checks here walk that table:
//! read-only fields must come from the service, never the caller, and
//! create-only fields must not drift between the current and desired state
//! of an update.

use serde_json::Value;

use crate::error::HandlerError;

/// How a field may change over the resource lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// May be set at creation and changed on update
    Mutable,
    /// May be set at creation but never changed afterward
    CreateOnly,
    /// Populated only from service responses
    ReadOnly,
}

/// One field's name, mutability class, and accessor
pub struct FieldSpec<M> {
    pub name: &'static str,
    pub mutability: Mutability,
    pub get: fn(&M) -> Option<Value>,
}

impl<M> FieldSpec<M> {
    pub const fn new(
        name: &'static str,
        mutability: Mutability,
        get: fn(&M) -> Option<Value>,
    ) -> Self {
        Self {
            name,
            mutability,
            get,
        }
    }
}

/// Reject read-only fields supplied by the caller on create
pub fn ensure_read_only_absent<M>(
    fields: &[FieldSpec<M>],
    desired: &M,
) -> Result<(), HandlerError> {
    for field in fields {
        if field.mutability == Mutability::ReadOnly && (field.get)(desired).is_some() {
            return Err(HandlerError::invalid_input(format!(
                "{} is read-only and cannot be supplied",
                field.name
            )));
        }
    }
    Ok(())
}

/// Assert every create-only field is unchanged between the current object
/// and the desired model. An absent desired value means "no opinion" and
/// always passes.
pub fn ensure_create_only_unchanged<M>(
    fields: &[FieldSpec<M>],
    current: &M,
    desired: &M,
) -> Result<(), HandlerError> {
    for field in fields {
        if field.mutability != Mutability::CreateOnly {
            continue;
        }
        if let Some(wanted) = (field.get)(desired)
            && (field.get)(current) != Some(wanted)
        {
            return Err(HandlerError::NotUpdatable(field.name.to_string()));
        }
    }
    Ok(())
}

/// Non-empty string presence check, failing before any network call
pub fn require(name: &str, value: Option<&str>) -> Result<String, HandlerError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(HandlerError::invalid_input(format!("{} is required", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Model {
        name: Option<String>,
        description: Option<String>,
        status: Option<String>,
    }

    const FIELDS: &[FieldSpec<Model>] = &[
        FieldSpec::new(
            "Name",
            Mutability::CreateOnly,
            |m| m.name.as_ref().map(|v| json!(v)),
        ),
        FieldSpec::new(
            "Description",
            Mutability::Mutable,
            |m| m.description.as_ref().map(|v| json!(v)),
        ),
        FieldSpec::new(
            "Status",
            Mutability::ReadOnly,
            |m| m.status.as_ref().map(|v| json!(v)),
        ),
    ];

    fn model(name: Option<&str>, description: Option<&str>, status: Option<&str>) -> Model {
        Model {
            name: name.map(String::from),
            description: description.map(String::from),
            status: status.map(String::from),
        }
    }

    #[test]
    fn equal_create_only_values_pass() {
        let current = model(Some("x"), Some("old"), None);
        let desired = model(Some("x"), Some("new"), None);
        assert!(ensure_create_only_unchanged(FIELDS, &current, &desired).is_ok());
    }

    #[test]
    fn changed_create_only_value_is_fatal() {
        let current = model(Some("x"), None, None);
        let desired = model(Some("y"), None, None);
        let err = ensure_create_only_unchanged(FIELDS, &current, &desired).unwrap_err();
        match err {
            HandlerError::NotUpdatable(field) => assert_eq!(field, "Name"),
            other => panic!("expected NotUpdatable, got {:?}", other),
        }
    }

    #[test]
    fn absent_desired_value_means_no_opinion() {
        let current = model(Some("x"), None, None);
        let desired = model(None, Some("changed"), None);
        assert!(ensure_create_only_unchanged(FIELDS, &current, &desired).is_ok());
    }

    #[test]
    fn read_only_field_rejected_on_create() {
        let desired = model(Some("x"), None, Some("active"));
        let err = ensure_read_only_absent(FIELDS, &desired).unwrap_err();
        assert!(err.to_string().contains("Status"));
    }

    #[test]
    fn read_only_check_passes_when_absent() {
        let desired = model(Some("x"), Some("d"), None);
        assert!(ensure_read_only_absent(FIELDS, &desired).is_ok());
    }

    #[test]
    fn require_rejects_empty_and_missing() {
        assert!(require("Name", Some("ok")).is_ok());
        assert!(require("Name", Some("  ")).is_err());
        assert!(require("Name", None).is_err());
    }
}
