//! Allowed-values constraint for string fields.
//!
//! A rule is resolved once from an [`AllowedValuesProvider`] and then checks
//! candidate values by exact, case-sensitive equality. Rules are collected in
//! an [`AllowedValuesRegistry`] keyed by field identifier.

use std::borrow::Cow;
use std::collections::BTreeMap;

use thiserror::Error;
use validator::ValidationError;

/// Validation error code reported for values outside the allowed set.
pub const ALLOWED_VALUES_CODE: &str = "allowed_values";

/// Errors raised while building allowed-values rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllowedValuesError {
    #[error("No allowed values registered for key '{0}'")]
    UnknownKey(String),

    #[error("Field '{0}' already has an allowed-values rule")]
    DuplicateField(String),
}

/// Supplies the permitted literal values for a configuration key.
pub trait AllowedValuesProvider {
    /// Returns the allowed values for `key`, or `None` if the key is unknown.
    fn allowed_values(&self, key: &str) -> Option<Vec<String>>;
}

/// Static lookup tables work as providers directly.
impl AllowedValuesProvider for BTreeMap<&'static str, &'static [&'static str]> {
    fn allowed_values(&self, key: &str) -> Option<Vec<String>> {
        self.get(key)
            .map(|values| values.iter().map(|v| v.to_string()).collect())
    }
}

/// A resolved set of allowed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedValues {
    key: String,
    values: Vec<String>,
}

impl AllowedValues {
    /// Builds a rule from an explicit list. An empty list rejects every
    /// present value.
    pub fn new<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolves the rule for `key` from a provider.
    pub fn resolve<P>(provider: &P, key: &str) -> Result<Self, AllowedValuesError>
    where
        P: AllowedValuesProvider + ?Sized,
    {
        let values = provider
            .allowed_values(key)
            .ok_or_else(|| AllowedValuesError::UnknownKey(key.to_string()))?;
        Ok(Self::new(key, values))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns true if `value` is one of the allowed values.
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|allowed| allowed == value)
    }

    /// Allowed values joined by commas, in declaration order.
    pub fn joined(&self) -> String {
        self.values.join(",")
    }

    /// Checks an optional value. Absent values always pass.
    pub fn check(&self, value: Option<&str>) -> Result<(), ValidationError> {
        match value {
            None => Ok(()),
            Some(v) if self.contains(v) => Ok(()),
            Some(v) => {
                let mut err = ValidationError::new(ALLOWED_VALUES_CODE);
                err.message = Some(Cow::Owned(format!(
                    "'{}' is not valid. Allowed values are: [{}]",
                    v,
                    self.joined()
                )));
                err.add_param(Cow::Borrowed("value"), &v);
                err.add_param(Cow::Borrowed("allowed"), &self.values);
                Err(err)
            }
        }
    }
}

/// Field identifier to allowed-values rule.
#[derive(Debug, Clone, Default)]
pub struct AllowedValuesRegistry {
    rules: BTreeMap<String, AllowedValues>,
}

impl AllowedValuesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `field` with the values the provider supplies for `key`.
    ///
    /// Fails fast if the key is unknown or the field already has a rule.
    pub fn register<P>(
        &mut self,
        field: &str,
        provider: &P,
        key: &str,
    ) -> Result<&mut Self, AllowedValuesError>
    where
        P: AllowedValuesProvider + ?Sized,
    {
        let rule = AllowedValues::resolve(provider, key)?;
        self.insert(field, rule)
    }

    /// Registers `field` with an already resolved rule.
    pub fn insert(
        &mut self,
        field: &str,
        rule: AllowedValues,
    ) -> Result<&mut Self, AllowedValuesError> {
        if self.rules.contains_key(field) {
            return Err(AllowedValuesError::DuplicateField(field.to_string()));
        }
        self.rules.insert(field.to_string(), rule);
        Ok(self)
    }

    pub fn get(&self, field: &str) -> Option<&AllowedValues> {
        self.rules.get(field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks `value` against the rule for `field`. Fields without a rule pass.
    pub fn validate(&self, field: &str, value: Option<&str>) -> Result<(), ValidationError> {
        match self.rules.get(field) {
            Some(rule) => rule.check(value),
            None => Ok(()),
        }
    }
}
