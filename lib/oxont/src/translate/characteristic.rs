use crate::error::OntError;
use crate::factory::ObjectKind;
use crate::graph::{Scope, is_iri};
use crate::model::{Axiom, AxiomType, Wrapped};
use crate::translate::{
    AxiomTranslator, ObjectReader, ObjectWriter, claimed_by, subject_is, subject_term, unexpected,
    with_type,
};
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::vocab::rdf;
use oxrdf::{NamedNodeRef, Triple};

/// `P rdf:type owl:XProperty`: a property characteristic.
#[derive(Debug)]
pub(super) struct CharacteristicTranslator {
    axiom_type: AxiomType,
    rdf_type: NamedNodeRef<'static>,
    property: ObjectKind,
    yields_to: &'static [AxiomType],
}

const fn object(
    axiom_type: AxiomType,
    rdf_type: NamedNodeRef<'static>,
) -> CharacteristicTranslator {
    CharacteristicTranslator {
        axiom_type,
        rdf_type,
        property: ObjectKind::ObjectPropertyExpression,
        yields_to: &[],
    }
}

pub(super) static FUNCTIONAL_OBJECT_PROPERTY: CharacteristicTranslator =
    object(AxiomType::FunctionalObjectProperty, owl::FUNCTIONAL_PROPERTY);
pub(super) static INVERSE_FUNCTIONAL_OBJECT_PROPERTY: CharacteristicTranslator = object(
    AxiomType::InverseFunctionalObjectProperty,
    owl::INVERSE_FUNCTIONAL_PROPERTY,
);
pub(super) static REFLEXIVE_OBJECT_PROPERTY: CharacteristicTranslator =
    object(AxiomType::ReflexiveObjectProperty, owl::REFLEXIVE_PROPERTY);
pub(super) static IRREFLEXIVE_OBJECT_PROPERTY: CharacteristicTranslator =
    object(AxiomType::IrreflexiveObjectProperty, owl::IRREFLEXIVE_PROPERTY);
pub(super) static SYMMETRIC_OBJECT_PROPERTY: CharacteristicTranslator =
    object(AxiomType::SymmetricObjectProperty, owl::SYMMETRIC_PROPERTY);
pub(super) static ASYMMETRIC_OBJECT_PROPERTY: CharacteristicTranslator =
    object(AxiomType::AsymmetricObjectProperty, owl::ASYMMETRIC_PROPERTY);
pub(super) static TRANSITIVE_OBJECT_PROPERTY: CharacteristicTranslator =
    object(AxiomType::TransitiveObjectProperty, owl::TRANSITIVE_PROPERTY);

pub(super) static FUNCTIONAL_DATA_PROPERTY: CharacteristicTranslator = CharacteristicTranslator {
    axiom_type: AxiomType::FunctionalDataProperty,
    rdf_type: owl::FUNCTIONAL_PROPERTY,
    property: ObjectKind::DataProperty,
    yields_to: &[AxiomType::FunctionalObjectProperty],
};

impl AxiomTranslator for CharacteristicTranslator {
    fn axiom_type(&self) -> AxiomType {
        self.axiom_type
    }

    fn candidates(&self, view: &ModelView<'_>, scope: Scope) -> Box<dyn Iterator<Item = Triple>> {
        Box::new(with_type(view, scope, self.rdf_type))
    }

    fn matches(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        triple.predicate == rdf::TYPE
            && is_iri(&triple.object, self.rdf_type)
            && subject_is(triple, view, self.property)
            && !claimed_by(triple, view, self.yields_to)
    }

    fn to_axiom(
        &self,
        triple: &Triple,
        reader: &mut ObjectReader<'_>,
    ) -> Result<Wrapped<Axiom>, OntError> {
        let mut triples = vec![triple.clone()];
        let subject = subject_term(triple);
        if self.axiom_type == AxiomType::FunctionalDataProperty {
            let property = reader.data_property(&subject)?;
            return Ok(Wrapped::new(Axiom::FunctionalDataProperty(property), triples));
        }
        let property = reader
            .object_property_expression(&subject)?
            .drain_into(&mut triples);
        let axiom = match self.axiom_type {
            AxiomType::FunctionalObjectProperty => Axiom::FunctionalObjectProperty(property),
            AxiomType::InverseFunctionalObjectProperty => {
                Axiom::InverseFunctionalObjectProperty(property)
            }
            AxiomType::ReflexiveObjectProperty => Axiom::ReflexiveObjectProperty(property),
            AxiomType::IrreflexiveObjectProperty => Axiom::IrreflexiveObjectProperty(property),
            AxiomType::SymmetricObjectProperty => Axiom::SymmetricObjectProperty(property),
            AxiomType::AsymmetricObjectProperty => Axiom::AsymmetricObjectProperty(property),
            AxiomType::TransitiveObjectProperty => Axiom::TransitiveObjectProperty(property),
            axiom_type => {
                return Err(OntError::InvalidAxiom(format!(
                    "{axiom_type} is not a property characteristic"
                )));
            }
        };
        Ok(Wrapped::new(axiom, triples))
    }

    fn write(&self, axiom: &Axiom, writer: &mut ObjectWriter<'_>) -> Result<Vec<Triple>, OntError> {
        if axiom.axiom_type() != self.axiom_type {
            return Err(unexpected(self.axiom_type, axiom));
        }
        let subject = match axiom {
            Axiom::FunctionalDataProperty(property) => property.iri().clone().into(),
            Axiom::FunctionalObjectProperty(property)
            | Axiom::InverseFunctionalObjectProperty(property)
            | Axiom::ReflexiveObjectProperty(property)
            | Axiom::IrreflexiveObjectProperty(property)
            | Axiom::SymmetricObjectProperty(property)
            | Axiom::AsymmetricObjectProperty(property)
            | Axiom::TransitiveObjectProperty(property) => {
                writer.object_property_expression(property)
            }
            _ => return Err(unexpected(self.axiom_type, axiom)),
        };
        Ok(vec![writer.add_term(&subject, rdf::TYPE, self.rdf_type)?])
    }
}
