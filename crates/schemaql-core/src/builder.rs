//! Fluent construction of type statements
//!
//! Every method builds one [`VarProperty`] and hands it to
//! [`StatementTypeBuilder::constrain`]. Invariants live in the property
//! constructors, not here.

use crate::argument::Argument;
use crate::error::Result;
use crate::pattern::Pattern;
use crate::property::{
    DataTypeProperty, HasAttributeTypeProperty, PlaysProperty, RegexProperty, RelatesProperty,
    SubProperty, ThenProperty, TypeProperty, VarProperty, WhenProperty,
};
use crate::statement::StatementType;
use crate::token::DataType;
use crate::variable::Variable;

/// Type statement properties
pub trait StatementTypeBuilder {
    /// Return a new type statement with `property` appended
    #[must_use]
    fn constrain(&self, property: VarProperty) -> StatementType;

    /// Match the type with this label (or built-in type)
    #[must_use]
    fn type_(&self, label: impl Into<TypeProperty>) -> StatementType {
        let label: TypeProperty = label.into();
        self.constrain(label.into())
    }

    /// Mark the type abstract, meaning it cannot have direct instances
    #[must_use]
    fn is_abstract(&self) -> StatementType {
        self.constrain(VarProperty::Abstract)
    }

    /// The type must be a subtype of `super_type`, directly or not
    #[must_use]
    fn sub(&self, super_type: impl Into<StatementType>) -> StatementType {
        self.constrain(SubProperty::new(super_type.into()).into())
    }

    /// The type must be a direct subtype of `super_type`
    #[must_use]
    fn sub_x(&self, super_type: impl Into<StatementType>) -> StatementType {
        self.constrain(SubProperty::explicit(super_type.into()).into())
    }

    /// The type owns `attribute_type` one-to-one
    #[must_use]
    fn key(&self, attribute_type: impl Into<StatementType>) -> StatementType {
        self.constrain(HasAttributeTypeProperty::key(attribute_type.into()).into())
    }

    /// The type owns `attribute_type`
    #[must_use]
    fn has(&self, attribute_type: impl Into<StatementType>) -> StatementType {
        self.constrain(HasAttributeTypeProperty::new(attribute_type.into()).into())
    }

    /// The type owns `attribute_type`, with extra arguments such as a default
    fn has_with(
        &self,
        attribute_type: impl Into<StatementType>,
        args: impl IntoIterator<Item = Argument>,
    ) -> Result<StatementType> {
        let property = HasAttributeTypeProperty::with_arguments(attribute_type.into(), false, args)?;
        Ok(self.constrain(property.into()))
    }

    /// Instances of the type may play `role`
    #[must_use]
    fn plays(&self, role: impl Into<StatementType>) -> StatementType {
        self.constrain(PlaysProperty::new(role.into(), false).into())
    }

    /// The relation type declares a fresh `role`
    #[must_use]
    fn relates(&self, role: impl Into<StatementType>) -> StatementType {
        self.constrain(RelatesProperty::new(role.into(), None).into())
    }

    /// The relation type declares `role` as a specialisation of `super_role`
    #[must_use]
    fn relates_as(
        &self,
        role: impl Into<StatementType>,
        super_role: impl Into<StatementType>,
    ) -> StatementType {
        self.constrain(RelatesProperty::new(role.into(), Some(super_role.into())).into())
    }

    #[must_use]
    fn datatype(&self, data_type: DataType) -> StatementType {
        self.constrain(DataTypeProperty::new(data_type).into())
    }

    /// Like [`datatype`](Self::datatype), converting external input first
    fn datatype_str(&self, data_type: &str) -> Result<StatementType> {
        Ok(self.datatype(data_type.parse()?))
    }

    /// Values of the attribute type must match `regex`
    #[must_use]
    fn regex(&self, regex: impl Into<String>) -> StatementType {
        self.constrain(RegexProperty::new(regex).into())
    }

    /// Premise of this rule
    #[must_use]
    fn when(&self, pattern: impl Into<Pattern>) -> StatementType {
        self.constrain(WhenProperty::new(pattern.into()).into())
    }

    /// Conclusion of this rule
    #[must_use]
    fn then(&self, pattern: impl Into<Pattern>) -> StatementType {
        self.constrain(ThenProperty::new(pattern.into()).into())
    }
}

impl StatementTypeBuilder for StatementType {
    fn constrain(&self, property: VarProperty) -> StatementType {
        self.with_property(property)
    }
}

impl StatementTypeBuilder for Variable {
    fn constrain(&self, property: VarProperty) -> StatementType {
        StatementType::new(self.clone()).with_property(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::token::{self, Param, TypeToken};

    #[test]
    fn test_builder_chain() {
        let person = Variable::named("p")
            .type_("person")
            .sub(TypeToken::Entity)
            .key("id")
            .has("name")
            .plays("employee");

        let keywords: Vec<_> = person.properties().iter().map(|p| p.keyword()).collect();
        assert_eq!(
            keywords,
            vec![
                token::Property::Type,
                token::Property::Sub,
                token::Property::Key,
                token::Property::Has,
                token::Property::Plays,
            ]
        );
        assert_eq!(person.label(), Some("person"));
    }

    #[test]
    fn test_key_is_has_with_key_flag() {
        let statement = Variable::named("x").key("id");
        match statement.properties().iter().next() {
            Some(VarProperty::HasAttributeType(p)) => {
                assert!(p.is_key());
                assert_eq!(p.attribute_type().label(), Some("id"));
                assert!(p.default_value().is_none());
            }
            other => panic!("expected has/key property, got {:?}", other),
        }
    }

    #[test]
    fn test_has_with_rejects_duplicate_kinds() {
        let result = Variable::named("x").has_with(
            "name",
            [Argument::default_value(1), Argument::default_value(2)],
        );
        assert_eq!(result.unwrap_err(), Error::DuplicateArgumentKind(Param::Default));
    }

    #[test]
    fn test_datatype_str() {
        let attr = Variable::named("a").datatype_str("LONG").unwrap();
        assert_eq!(attr.to_string(), "$a datatype long;");

        let err = Variable::named("a").datatype_str("int").unwrap_err();
        assert_eq!(err, Error::UnknownDataType("int".to_string()));
    }

    #[test]
    fn test_builder_does_not_touch_receiver() {
        let base = Variable::named("x").type_("person");
        let _ = base.is_abstract();
        let _ = base.has("name");
        assert_eq!(base.properties().len(), 1);
    }
}
