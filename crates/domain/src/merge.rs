//! Copy-present-fields merge for optional-field records.
//!
//! Every `Some` field on the source replaces the same field on the target.
//! `None` fields on the source leave the target untouched. The merge is
//! shallow: nested records and lists are replaced as a whole.

/// Result of a merge: the fields that were copied, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    copied: Vec<&'static str>,
}

impl MergeOutcome {
    pub fn record(&mut self, field: &'static str) {
        self.copied.push(field);
    }

    pub fn copied(&self) -> &[&'static str] {
        &self.copied
    }

    pub fn is_empty(&self) -> bool {
        self.copied.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.copied.iter().any(|f| *f == field)
    }
}

/// Records whose present fields can be merged onto another instance.
pub trait MergeNonNull {
    /// Copies every present field of `src` onto `self`.
    fn merge_non_null(&mut self, src: &Self) -> MergeOutcome;
}

/// Implements [`MergeNonNull`] for a struct whose listed fields are `Option`s.
#[macro_export]
macro_rules! impl_merge_non_null {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::merge::MergeNonNull for $ty {
            fn merge_non_null(&mut self, src: &Self) -> $crate::merge::MergeOutcome {
                let mut outcome = $crate::merge::MergeOutcome::default();
                $(
                    if let Some(value) = &src.$field {
                        self.$field = Some(value.clone());
                        outcome.record(stringify!($field));
                    }
                )*
                $crate::__tracing::debug!(
                    record = stringify!($ty),
                    copied = outcome.copied().len(),
                    "Merged non-null fields"
                );
                outcome
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Contact {
        name: Option<String>,
        phone: Option<String>,
        age: Option<i32>,
    }

    impl_merge_non_null!(Contact { name, phone, age });

    #[test]
    fn test_present_fields_overwrite_target() {
        let mut target = Contact {
            name: Some("Old".into()),
            phone: Some("111".into()),
            age: Some(30),
        };
        let src = Contact {
            name: Some("New".into()),
            phone: None,
            age: Some(31),
        };

        let outcome = target.merge_non_null(&src);

        assert_eq!(target.name.as_deref(), Some("New"));
        assert_eq!(target.phone.as_deref(), Some("111"));
        assert_eq!(target.age, Some(31));
        assert_eq!(outcome.copied(), &["name", "age"]);
    }

    #[test]
    fn test_empty_source_changes_nothing() {
        let original = Contact {
            name: Some("Kept".into()),
            phone: None,
            age: Some(5),
        };
        let mut target = original.clone();

        let outcome = target.merge_non_null(&Contact::default());

        assert!(outcome.is_empty());
        assert_eq!(target, original);
    }

    #[test]
    fn test_fills_absent_target_fields() {
        let mut target = Contact::default();
        let src = Contact {
            name: None,
            phone: Some("222".into()),
            age: None,
        };

        let outcome = target.merge_non_null(&src);

        assert!(outcome.contains("phone"));
        assert!(!outcome.contains("name"));
        assert_eq!(target.phone.as_deref(), Some("222"));
    }
}
