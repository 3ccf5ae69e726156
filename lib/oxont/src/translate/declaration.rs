use crate::error::OntError;
use crate::factory::entity_kind;
use crate::graph::Scope;
use crate::model::{Axiom, AxiomType, Entity, EntityType, Wrapped};
use crate::translate::{
    AxiomTranslator, ObjectReader, ObjectWriter, subject_is, unexpected, with_type,
};
use crate::view::ModelView;
use oxrdf::vocab::rdf;
use oxrdf::{Subject, Term, Triple};

/// `E rdf:type T` with `T` one of the six declaration types.
#[derive(Debug)]
pub(super) struct DeclarationTranslator;

pub(super) static DECLARATION: DeclarationTranslator = DeclarationTranslator;

fn declared_type(triple: &Triple) -> Option<EntityType> {
    if triple.predicate != rdf::TYPE {
        return None;
    }
    match &triple.object {
        Term::NamedNode(object) => EntityType::from_rdf_type(object.as_ref()),
        _ => None,
    }
}

impl AxiomTranslator for DeclarationTranslator {
    fn axiom_type(&self) -> AxiomType {
        AxiomType::Declaration
    }

    fn candidates(&self, view: &ModelView<'_>, scope: Scope) -> Box<dyn Iterator<Item = Triple>> {
        let by_type = EntityType::ALL.map(|t| with_type(view, scope, t.rdf_type()));
        Box::new(by_type.into_iter().flatten())
    }

    fn matches(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        declared_type(triple).is_some_and(|t| {
            matches!(triple.subject, Subject::NamedNode(_))
                && subject_is(triple, view, entity_kind(t))
        })
    }

    fn to_axiom(
        &self,
        triple: &Triple,
        _reader: &mut ObjectReader<'_>,
    ) -> Result<Wrapped<Axiom>, OntError> {
        match (declared_type(triple), &triple.subject) {
            (Some(entity_type), Subject::NamedNode(iri)) => Ok(Wrapped::new(
                Axiom::Declaration(Entity::new(entity_type, iri.clone())),
                vec![triple.clone()],
            )),
            _ => Err(OntError::InvalidAxiom(format!("{triple} is not a declaration"))),
        }
    }

    fn write(&self, axiom: &Axiom, writer: &mut ObjectWriter<'_>) -> Result<Vec<Triple>, OntError> {
        let Axiom::Declaration(entity) = axiom else {
            return Err(unexpected(AxiomType::Declaration, axiom));
        };
        Ok(vec![writer.add(
            entity.iri().clone(),
            rdf::TYPE,
            entity.entity_type().rdf_type(),
        )])
    }
}
