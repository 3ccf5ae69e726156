use crate::content::ContentCache;
use crate::error::OntError;
use crate::graph::Scope;
use crate::model::{Axiom, AxiomType, Entity, EntityType, Primitive};
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::NamedNode;
use rustc_hash::FxHashSet;

/// The entities of the type that exist in the scope.
///
/// These are the declared ones, the builtins used by some axiom (`owl:Thing` is also used by
/// the object cardinality restrictions without filler) and, for a local listing, the entities
/// declared in an import that the base graph refers to.
pub(crate) fn entities(
    cache: &mut ContentCache,
    view: ModelView<'_>,
    entity_type: EntityType,
    scope: Scope,
) -> Result<Vec<Entity>, OntError> {
    let mut found = Found::default();
    for axiom in cache.axioms(view, scope, AxiomType::Declaration)? {
        if let Axiom::Declaration(entity) = axiom.axiom {
            if entity.entity_type() == entity_type {
                found.push(entity);
            }
        }
    }

    let imported = if scope == Scope::Local && !view.graph().imports().is_empty() {
        declared_iris(cache, view, entity_type, Scope::Global)?
    } else {
        FxHashSet::default()
    };
    let builtins = view.personality().builtins();
    let mut implicit_thing = false;
    for axiom_type in AxiomType::ALL {
        for axiom in cache.axioms(view, scope, axiom_type)? {
            implicit_thing |= axiom.axiom.uses_implicit_thing();
            for primitive in axiom.primitives() {
                let Primitive::Entity(entity) = primitive else {
                    continue;
                };
                if entity.entity_type() == entity_type
                    && (builtins.contains(entity_type, entity.iri())
                        || imported.contains(entity.iri()))
                {
                    found.push(entity);
                }
            }
        }
    }
    if implicit_thing && entity_type == EntityType::Class {
        found.push(Entity::new(EntityType::Class, owl::THING.into_owned()));
    }
    Ok(found.entities)
}

fn declared_iris(
    cache: &mut ContentCache,
    view: ModelView<'_>,
    entity_type: EntityType,
    scope: Scope,
) -> Result<FxHashSet<NamedNode>, OntError> {
    Ok(cache
        .axioms(view, scope, AxiomType::Declaration)?
        .into_iter()
        .filter_map(|axiom| match axiom.axiom {
            Axiom::Declaration(entity) if entity.entity_type() == entity_type => {
                Some(entity.iri().clone())
            }
            _ => None,
        })
        .collect())
}

#[derive(Default)]
struct Found {
    entities: Vec<Entity>,
    seen: FxHashSet<NamedNode>,
}

impl Found {
    fn push(&mut self, entity: Entity) {
        if self.seen.insert(entity.iri().clone()) {
            self.entities.push(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OntConfig;
    use crate::factory::Personality;
    use crate::graph::{SharedGraph, UnionGraph};
    use oxrdf::vocab::{rdf, rdfs};
    use oxrdf::{BlankNode, Literal, Triple};

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    fn iris(entities: &[Entity]) -> FxHashSet<NamedNode> {
        entities.iter().map(|e| e.iri().clone()).collect()
    }

    #[test]
    fn unions_declared_builtin_and_imported_classes() {
        let imported = SharedGraph::new();
        imported.extend(&[
            Triple::new(iri("I"), rdf::TYPE, owl::CLASS),
            Triple::new(iri("Unused"), rdf::TYPE, owl::CLASS),
        ]);
        let base = SharedGraph::new();
        let restriction = BlankNode::default();
        base.extend(&[
            Triple::new(iri("A"), rdf::TYPE, owl::CLASS),
            Triple::new(iri("p"), rdf::TYPE, owl::OBJECT_PROPERTY),
            Triple::new(iri("A"), rdfs::SUB_CLASS_OF, iri("I")),
            Triple::new(iri("A"), rdfs::SUB_CLASS_OF, owl::NOTHING),
            Triple::new(restriction.clone(), rdf::TYPE, owl::RESTRICTION),
            Triple::new(restriction.clone(), owl::ON_PROPERTY, iri("p")),
            Triple::new(
                restriction.clone(),
                owl::MIN_CARDINALITY,
                Literal::new_typed_literal("1", oxrdf::vocab::xsd::NON_NEGATIVE_INTEGER),
            ),
            Triple::new(iri("A"), rdfs::SUB_CLASS_OF, restriction),
        ]);
        let mut graph = UnionGraph::new(base);
        graph.add_import(UnionGraph::new(imported));
        let personality = Personality::new(Default::default());
        let config = OntConfig::default();
        let view = ModelView::new(&graph, &personality, &config);
        let mut cache = ContentCache::default();

        let local = entities(&mut cache, view, EntityType::Class, Scope::Local).unwrap();
        let expected: FxHashSet<NamedNode> = [
            iri("A"),
            iri("I"),
            owl::NOTHING.into_owned(),
            owl::THING.into_owned(),
        ]
        .into_iter()
        .collect();
        assert_eq!(iris(&local), expected);
        assert_eq!(local.len(), expected.len());

        let global = entities(&mut cache, view, EntityType::Class, Scope::Global).unwrap();
        assert!(iris(&global).contains(&iri("Unused")));

        let properties =
            entities(&mut cache, view, EntityType::ObjectProperty, Scope::Local).unwrap();
        assert_eq!(
            properties,
            vec![Entity::new(EntityType::ObjectProperty, iri("p"))]
        );
    }
}
