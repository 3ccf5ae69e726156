use crate::config::PunningMode;
use crate::error::ConversionError;
use crate::factory::{
    CommonFactory, MultiFactory, ObjectFactory, ObjectKind, OntFilter, OntFinder, OntObject,
};
use crate::model::EntityType;
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{NamedNode, NamedNodeRef, Term};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Arc, OnceLock};

const RDF_PLAIN_LITERAL: NamedNodeRef<'static> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral");

const XSD_DATATYPES: [NamedNodeRef<'static>; 29] = [
    xsd::ANY_URI,
    xsd::BASE_64_BINARY,
    xsd::BOOLEAN,
    xsd::BYTE,
    xsd::DATE_TIME,
    xsd::DATE_TIME_STAMP,
    xsd::DECIMAL,
    xsd::DOUBLE,
    xsd::FLOAT,
    xsd::HEX_BINARY,
    xsd::INT,
    xsd::INTEGER,
    xsd::LANGUAGE,
    xsd::LONG,
    xsd::NAME,
    xsd::NC_NAME,
    xsd::NEGATIVE_INTEGER,
    xsd::NMTOKEN,
    xsd::NON_NEGATIVE_INTEGER,
    xsd::NON_POSITIVE_INTEGER,
    xsd::NORMALIZED_STRING,
    xsd::POSITIVE_INTEGER,
    xsd::SHORT,
    xsd::STRING,
    xsd::TOKEN,
    xsd::UNSIGNED_BYTE,
    xsd::UNSIGNED_INT,
    xsd::UNSIGNED_LONG,
    xsd::UNSIGNED_SHORT,
];

/// Entities that exist without any declaration, like `owl:Thing` or `xsd:string`.
#[derive(Debug, Clone)]
pub struct Builtins {
    classes: Arc<FxHashSet<NamedNode>>,
    datatypes: Arc<FxHashSet<NamedNode>>,
    object_properties: Arc<FxHashSet<NamedNode>>,
    data_properties: Arc<FxHashSet<NamedNode>>,
    annotation_properties: Arc<FxHashSet<NamedNode>>,
    individuals: Arc<FxHashSet<NamedNode>>,
}

impl Builtins {
    /// The OWL 2 builtin vocabulary.
    pub fn standard() -> Self {
        fn set<'a>(iris: impl IntoIterator<Item = NamedNodeRef<'a>>) -> Arc<FxHashSet<NamedNode>> {
            Arc::new(iris.into_iter().map(NamedNodeRef::into_owned).collect())
        }
        let datatypes = XSD_DATATYPES.into_iter().chain([
            rdfs::LITERAL,
            rdf::XML_LITERAL,
            rdf::LANG_STRING,
            RDF_PLAIN_LITERAL,
            owl::REAL,
            owl::RATIONAL,
        ]);
        Self {
            classes: set([owl::THING, owl::NOTHING]),
            datatypes: set(datatypes),
            object_properties: set([owl::TOP_OBJECT_PROPERTY, owl::BOTTOM_OBJECT_PROPERTY]),
            data_properties: set([owl::TOP_DATA_PROPERTY, owl::BOTTOM_DATA_PROPERTY]),
            annotation_properties: set([
                rdfs::LABEL,
                rdfs::COMMENT,
                rdfs::SEE_ALSO,
                rdfs::IS_DEFINED_BY,
                owl::DEPRECATED,
                owl::VERSION_INFO,
                owl::PRIOR_VERSION,
                owl::BACKWARD_COMPATIBLE_WITH,
                owl::INCOMPATIBLE_WITH,
            ]),
            individuals: Arc::default(),
        }
    }

    pub fn get(&self, entity_type: EntityType) -> &Arc<FxHashSet<NamedNode>> {
        match entity_type {
            EntityType::Class => &self.classes,
            EntityType::Datatype => &self.datatypes,
            EntityType::ObjectProperty => &self.object_properties,
            EntityType::DataProperty => &self.data_properties,
            EntityType::AnnotationProperty => &self.annotation_properties,
            EntityType::NamedIndividual => &self.individuals,
        }
    }

    pub fn contains(&self, entity_type: EntityType, iri: &NamedNode) -> bool {
        self.get(entity_type).contains(iri)
    }

    fn all(&self) -> impl Iterator<Item = &NamedNode> {
        EntityType::ALL.into_iter().flat_map(|t| self.get(t).iter())
    }
}

/// The RDF, RDFS and OWL terms that can't be used as entities.
fn reserved_vocabulary(builtins: &Builtins) -> FxHashSet<NamedNode> {
    let mut reserved = [
        rdf::TYPE,
        rdf::PROPERTY,
        rdf::LIST,
        rdf::FIRST,
        rdf::REST,
        rdf::NIL,
        rdf::STATEMENT,
        rdf::SUBJECT,
        rdf::PREDICATE,
        rdf::OBJECT,
        rdfs::CLASS,
        rdfs::RESOURCE,
        rdfs::DATATYPE,
        rdfs::SUB_CLASS_OF,
        rdfs::SUB_PROPERTY_OF,
        rdfs::DOMAIN,
        rdfs::RANGE,
        rdfs::MEMBER,
        rdfs::CONTAINER,
        rdfs::CONTAINER_MEMBERSHIP_PROPERTY,
        owl::CLASS,
        owl::RESTRICTION,
        owl::ONTOLOGY,
        owl::OBJECT_PROPERTY,
        owl::DATATYPE_PROPERTY,
        owl::ANNOTATION_PROPERTY,
        owl::NAMED_INDIVIDUAL,
        owl::ONTOLOGY_PROPERTY,
        owl::DEPRECATED_CLASS,
        owl::DEPRECATED_PROPERTY,
        owl::AXIOM,
        owl::ANNOTATION,
        owl::ALL_DISJOINT_CLASSES,
        owl::ALL_DISJOINT_PROPERTIES,
        owl::ALL_DIFFERENT,
        owl::NEGATIVE_PROPERTY_ASSERTION,
        owl::FUNCTIONAL_PROPERTY,
        owl::INVERSE_FUNCTIONAL_PROPERTY,
        owl::REFLEXIVE_PROPERTY,
        owl::IRREFLEXIVE_PROPERTY,
        owl::SYMMETRIC_PROPERTY,
        owl::ASYMMETRIC_PROPERTY,
        owl::TRANSITIVE_PROPERTY,
        owl::DATA_RANGE,
        owl::IMPORTS,
        owl::VERSION_IRI,
        owl::EQUIVALENT_CLASS,
        owl::DISJOINT_WITH,
        owl::DISJOINT_UNION_OF,
        owl::MEMBERS,
        owl::DISTINCT_MEMBERS,
        owl::EQUIVALENT_PROPERTY,
        owl::PROPERTY_DISJOINT_WITH,
        owl::PROPERTY_CHAIN_AXIOM,
        owl::INVERSE_OF,
        owl::HAS_KEY,
        owl::SAME_AS,
        owl::DIFFERENT_FROM,
        owl::SOURCE_INDIVIDUAL,
        owl::ASSERTION_PROPERTY,
        owl::TARGET_INDIVIDUAL,
        owl::TARGET_VALUE,
        owl::ANNOTATED_SOURCE,
        owl::ANNOTATED_PROPERTY,
        owl::ANNOTATED_TARGET,
        owl::ON_PROPERTY,
        owl::ON_PROPERTIES,
        owl::ON_CLASS,
        owl::ON_DATA_RANGE,
        owl::ON_DATATYPE,
        owl::WITH_RESTRICTIONS,
        owl::DATATYPE_COMPLEMENT_OF,
        owl::SOME_VALUES_FROM,
        owl::ALL_VALUES_FROM,
        owl::HAS_VALUE,
        owl::HAS_SELF,
        owl::MIN_CARDINALITY,
        owl::MAX_CARDINALITY,
        owl::CARDINALITY,
        owl::MIN_QUALIFIED_CARDINALITY,
        owl::MAX_QUALIFIED_CARDINALITY,
        owl::QUALIFIED_CARDINALITY,
        owl::INTERSECTION_OF,
        owl::UNION_OF,
        owl::COMPLEMENT_OF,
        owl::ONE_OF,
    ]
    .map(NamedNodeRef::into_owned)
    .into_iter()
    .collect::<FxHashSet<_>>();
    for builtin in builtins.all() {
        reserved.remove(builtin);
    }
    reserved
}

/// The declaration types an IRI of the given type must not also have.
fn forbidden_types(mode: PunningMode, entity_type: EntityType) -> Vec<NamedNodeRef<'static>> {
    let mut forbidden = Vec::new();
    if mode == PunningMode::Lax {
        return forbidden;
    }
    match entity_type {
        EntityType::Class => forbidden.push(rdfs::DATATYPE),
        EntityType::Datatype => forbidden.push(owl::CLASS),
        EntityType::ObjectProperty => {
            forbidden.push(owl::DATATYPE_PROPERTY);
            if mode == PunningMode::Strict {
                forbidden.push(owl::ANNOTATION_PROPERTY);
            }
        }
        EntityType::DataProperty => {
            forbidden.push(owl::OBJECT_PROPERTY);
            if mode == PunningMode::Strict {
                forbidden.push(owl::ANNOTATION_PROPERTY);
            }
        }
        EntityType::AnnotationProperty => {
            if mode == PunningMode::Strict {
                forbidden.push(owl::OBJECT_PROPERTY);
                forbidden.push(owl::DATATYPE_PROPERTY);
            }
        }
        EntityType::NamedIndividual => (),
    }
    forbidden
}

/// The registry of typed views: one factory per [`ObjectKind`], the builtin and reserved
/// vocabularies and the punning rules.
#[derive(Debug)]
pub struct Personality {
    mode: PunningMode,
    builtins: Builtins,
    reserved: Arc<FxHashSet<NamedNode>>,
    factories: FxHashMap<ObjectKind, Arc<dyn ObjectFactory>>,
}

impl Personality {
    /// Builds the standard OWL 2 personality for the given punning mode.
    pub fn new(mode: PunningMode) -> Self {
        let builtins = Builtins::standard();
        let reserved = Arc::new(reserved_vocabulary(&builtins));
        let mut personality = Self {
            mode,
            builtins,
            reserved,
            factories: FxHashMap::default(),
        };
        personality.register_standard_factories();
        personality
    }

    /// A personality shared by all the ontologies using the same punning mode.
    pub fn shared(mode: PunningMode) -> Arc<Self> {
        static STRICT: OnceLock<Arc<Personality>> = OnceLock::new();
        static MEDIUM: OnceLock<Arc<Personality>> = OnceLock::new();
        static LAX: OnceLock<Arc<Personality>> = OnceLock::new();
        let cell = match mode {
            PunningMode::Strict => &STRICT,
            PunningMode::Medium => &MEDIUM,
            PunningMode::Lax => &LAX,
        };
        Arc::clone(cell.get_or_init(|| Arc::new(Self::new(mode))))
    }

    #[inline]
    pub fn mode(&self) -> PunningMode {
        self.mode
    }

    #[inline]
    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// Returns `true` if the IRI belongs to the RDF/RDFS/OWL vocabulary and is not a builtin.
    #[inline]
    pub fn is_reserved(&self, iri: &NamedNode) -> bool {
        self.reserved.contains(iri)
    }

    #[inline]
    pub fn factory(&self, kind: ObjectKind) -> Option<&Arc<dyn ObjectFactory>> {
        self.factories.get(&kind)
    }

    pub fn can_as(&self, node: &Term, kind: ObjectKind, view: &ModelView<'_>) -> bool {
        self.factory(kind).is_some_and(|f| f.can_wrap(node, view))
    }

    pub fn get_as(&self, node: &Term, kind: ObjectKind, view: &ModelView<'_>) -> Option<OntObject> {
        self.factory(kind)?.create_instance(node, view)
    }

    /// Views the node as the kind or fails with a [`ConversionError`].
    pub fn as_kind(
        &self,
        node: &Term,
        kind: ObjectKind,
        view: &ModelView<'_>,
    ) -> Result<OntObject, ConversionError> {
        match self.factory(kind) {
            Some(factory) => factory.wrap(node, view),
            None => Err(ConversionError::new(
                node.clone(),
                format!("no factory is registered for {kind}"),
            )),
        }
    }

    /// All the nodes of the import closure that can be viewed as the kind.
    pub fn objects<'a>(
        &'a self,
        kind: ObjectKind,
        view: ModelView<'a>,
    ) -> Box<dyn Iterator<Item = OntObject> + 'a> {
        match self.factory(kind) {
            Some(factory) => factory.iter(view),
            None => Box::new(std::iter::empty()),
        }
    }

    fn register(&mut self, factory: impl ObjectFactory + 'static) {
        self.factories.insert(factory.kind(), Arc::new(factory));
    }

    fn register_composite(
        &mut self,
        kind: ObjectKind,
        finder: Option<OntFinder>,
        filter: Option<OntFilter>,
        kinds: &[ObjectKind],
    ) {
        let delegates = kinds
            .iter()
            .filter_map(|k| self.factories.get(k).cloned())
            .collect::<Vec<_>>();
        debug_assert_eq!(
            delegates.len(),
            kinds.len(),
            "{kind} is registered before some of its delegates"
        );
        let factory = MultiFactory::new(kind, finder, filter, delegates);
        debug_assert!(factory.is_ok(), "{kind} has no delegate");
        if let Ok(factory) = factory {
            self.register(factory);
        }
    }

    fn entity_factory(&self, entity_type: EntityType) -> CommonFactory {
        let rdf_type = entity_type.rdf_type();
        let kind = entity_kind(entity_type);
        let mut typed = OntFilter::has_type(rdf_type);
        if entity_type == EntityType::NamedIndividual {
            typed = typed.or(OntFilter::has_object(
                rdf::TYPE,
                OntFilter::Kind(ObjectKind::ClassExpression),
            ));
        } else {
            typed = typed.or(OntFilter::InSet(Arc::clone(self.builtins.get(entity_type))));
        }
        let mut filter = OntFilter::Uri
            .and(OntFilter::InSet(Arc::clone(&self.reserved)).negate())
            .and(typed);
        let forbidden = forbidden_types(self.mode, entity_type);
        if !forbidden.is_empty() {
            filter = filter.and(OntFilter::has_any_type(forbidden).negate());
        }
        CommonFactory::new(kind, OntFinder::by_type(rdf_type), filter)
    }

    fn register_standard_factories(&mut self) {
        for entity_type in EntityType::ALL {
            let factory = self.entity_factory(entity_type);
            self.register(factory);
        }

        // Individuals and property expressions
        self.register(CommonFactory::new(
            ObjectKind::AnonymousIndividual,
            OntFinder::Any,
            OntFilter::Blank
                .and(
                    OntFilter::has_any_type([
                        owl::CLASS,
                        owl::RESTRICTION,
                        rdfs::DATATYPE,
                        owl::ALL_DISJOINT_CLASSES,
                        owl::ALL_DISJOINT_PROPERTIES,
                        owl::ALL_DIFFERENT,
                        owl::NEGATIVE_PROPERTY_ASSERTION,
                        owl::AXIOM,
                        owl::ANNOTATION,
                        owl::ONTOLOGY,
                    ])
                    .negate(),
                )
                .and(OntFilter::has_predicate(rdf::FIRST).negate())
                .and(OntFilter::has_predicate(owl::INVERSE_OF).negate()),
        ));
        self.register(CommonFactory::new(
            ObjectKind::InverseObjectProperty,
            OntFinder::ByPredicate(owl::INVERSE_OF.into_owned()),
            OntFilter::Blank.and(OntFilter::has_object(
                owl::INVERSE_OF,
                OntFilter::Kind(ObjectKind::ObjectProperty),
            )),
        ));
        self.register_composite(
            ObjectKind::ObjectPropertyExpression,
            None,
            None,
            &[ObjectKind::ObjectProperty, ObjectKind::InverseObjectProperty],
        );
        self.register_composite(
            ObjectKind::Individual,
            None,
            None,
            &[ObjectKind::NamedIndividual, ObjectKind::AnonymousIndividual],
        );

        // Class expressions
        let ope = ObjectKind::ObjectPropertyExpression;
        let dp = ObjectKind::DataProperty;
        for (kind, predicates, property) in [
            (ObjectKind::ObjectSomeValuesFrom, &[owl::SOME_VALUES_FROM][..], ope),
            (ObjectKind::DataSomeValuesFrom, &[owl::SOME_VALUES_FROM][..], dp),
            (ObjectKind::ObjectAllValuesFrom, &[owl::ALL_VALUES_FROM][..], ope),
            (ObjectKind::DataAllValuesFrom, &[owl::ALL_VALUES_FROM][..], dp),
            (ObjectKind::ObjectHasValue, &[owl::HAS_VALUE][..], ope),
            (ObjectKind::DataHasValue, &[owl::HAS_VALUE][..], dp),
            (ObjectKind::ObjectHasSelf, &[owl::HAS_SELF][..], ope),
            (
                ObjectKind::ObjectMinCardinality,
                &[owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY][..],
                ope,
            ),
            (
                ObjectKind::ObjectMaxCardinality,
                &[owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY][..],
                ope,
            ),
            (
                ObjectKind::ObjectExactCardinality,
                &[owl::CARDINALITY, owl::QUALIFIED_CARDINALITY][..],
                ope,
            ),
            (
                ObjectKind::DataMinCardinality,
                &[owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY][..],
                dp,
            ),
            (
                ObjectKind::DataMaxCardinality,
                &[owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY][..],
                dp,
            ),
            (
                ObjectKind::DataExactCardinality,
                &[owl::CARDINALITY, owl::QUALIFIED_CARDINALITY][..],
                dp,
            ),
        ] {
            self.register(common(kind, owl::RESTRICTION, restriction(predicates, property)));
        }
        for (kind, predicate) in [
            (ObjectKind::ObjectUnionOf, owl::UNION_OF),
            (ObjectKind::ObjectIntersectionOf, owl::INTERSECTION_OF),
            (ObjectKind::ObjectComplementOf, owl::COMPLEMENT_OF),
            (ObjectKind::ObjectOneOf, owl::ONE_OF),
        ] {
            self.register(common(kind, owl::CLASS, blank_typed(owl::CLASS, predicate)));
        }
        self.register_composite(
            ObjectKind::ClassExpression,
            None,
            Some(OntFilter::Uri.or(
                OntFilter::Blank.and(OntFilter::has_any_type([owl::CLASS, owl::RESTRICTION])),
            )),
            &[
                ObjectKind::Class,
                ObjectKind::ObjectSomeValuesFrom,
                ObjectKind::DataSomeValuesFrom,
                ObjectKind::ObjectAllValuesFrom,
                ObjectKind::DataAllValuesFrom,
                ObjectKind::ObjectHasValue,
                ObjectKind::DataHasValue,
                ObjectKind::ObjectHasSelf,
                ObjectKind::ObjectMinCardinality,
                ObjectKind::ObjectMaxCardinality,
                ObjectKind::ObjectExactCardinality,
                ObjectKind::DataMinCardinality,
                ObjectKind::DataMaxCardinality,
                ObjectKind::DataExactCardinality,
                ObjectKind::ObjectUnionOf,
                ObjectKind::ObjectIntersectionOf,
                ObjectKind::ObjectComplementOf,
                ObjectKind::ObjectOneOf,
            ],
        );

        // Data ranges
        for (kind, predicate) in [
            (ObjectKind::DataComplementOf, owl::DATATYPE_COMPLEMENT_OF),
            (ObjectKind::DataOneOf, owl::ONE_OF),
            (ObjectKind::DataUnionOf, owl::UNION_OF),
            (ObjectKind::DataIntersectionOf, owl::INTERSECTION_OF),
        ] {
            self.register(common(kind, rdfs::DATATYPE, blank_typed(rdfs::DATATYPE, predicate)));
        }
        self.register(common(
            ObjectKind::DatatypeRestriction,
            rdfs::DATATYPE,
            blank_typed(rdfs::DATATYPE, owl::ON_DATATYPE)
                .and(OntFilter::has_predicate(owl::WITH_RESTRICTIONS)),
        ));
        self.register_composite(
            ObjectKind::DataRange,
            Some(OntFinder::by_type(rdfs::DATATYPE)),
            Some(OntFilter::Uri.or(OntFilter::has_type(rdfs::DATATYPE))),
            &[
                ObjectKind::Datatype,
                ObjectKind::DataComplementOf,
                ObjectKind::DatatypeRestriction,
                ObjectKind::DataOneOf,
                ObjectKind::DataUnionOf,
                ObjectKind::DataIntersectionOf,
            ],
        );

        self.register_composite(
            ObjectKind::Entity,
            None,
            Some(OntFilter::Uri),
            &[
                ObjectKind::Class,
                ObjectKind::Datatype,
                ObjectKind::ObjectProperty,
                ObjectKind::DataProperty,
                ObjectKind::AnnotationProperty,
                ObjectKind::NamedIndividual,
            ],
        );
    }
}

fn blank_typed(rdf_type: NamedNodeRef<'_>, predicate: NamedNodeRef<'_>) -> OntFilter {
    OntFilter::Blank
        .and(OntFilter::has_type(rdf_type))
        .and(OntFilter::has_predicate(predicate))
}

/// `owl:Restriction` bnodes with one of the predicates on a property of the given kind.
fn restriction(predicates: &[NamedNodeRef<'_>], property: ObjectKind) -> OntFilter {
    let any_predicate = OntFilter::Or(
        predicates
            .iter()
            .map(|p| OntFilter::has_predicate(*p))
            .collect(),
    );
    OntFilter::Blank
        .and(OntFilter::has_type(owl::RESTRICTION))
        .and(any_predicate)
        .and(OntFilter::has_object(owl::ON_PROPERTY, OntFilter::Kind(property)))
}

fn common(kind: ObjectKind, rdf_type: NamedNodeRef<'_>, filter: OntFilter) -> CommonFactory {
    CommonFactory::new(kind, OntFinder::by_type(rdf_type), filter)
}

/// The object kind of the entity type.
pub(crate) fn entity_kind(entity_type: EntityType) -> ObjectKind {
    match entity_type {
        EntityType::Class => ObjectKind::Class,
        EntityType::Datatype => ObjectKind::Datatype,
        EntityType::ObjectProperty => ObjectKind::ObjectProperty,
        EntityType::DataProperty => ObjectKind::DataProperty,
        EntityType::AnnotationProperty => ObjectKind::AnnotationProperty,
        EntityType::NamedIndividual => ObjectKind::NamedIndividual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OntConfig;
    use crate::graph::{SharedGraph, UnionGraph, build_list};
    use oxrdf::{BlankNode, Triple};

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    fn union(triples: &[Triple]) -> UnionGraph {
        let graph = SharedGraph::new();
        graph.extend(triples);
        UnionGraph::new(graph)
    }

    fn typed(name: &str, rdf_types: &[NamedNodeRef<'_>]) -> Vec<Triple> {
        rdf_types
            .iter()
            .map(|t| Triple::new(iri(name), rdf::TYPE, *t))
            .collect()
    }

    #[test]
    fn resolves_anonymous_data_union() {
        let node = BlankNode::default();
        let (head, mut triples) = build_list(&[xsd::STRING.into(), xsd::INTEGER.into()]);
        triples.push(Triple::new(node.clone(), rdf::TYPE, rdfs::DATATYPE));
        triples.push(Triple::new(node.clone(), owl::UNION_OF, head));
        let graph = union(&triples);
        let personality = Personality::new(PunningMode::Medium);
        let config = OntConfig::default();
        let view = ModelView::new(&graph, &personality, &config);
        let node = Term::from(node);
        assert_eq!(
            personality
                .as_kind(&node, ObjectKind::DataRange, &view)
                .unwrap()
                .kind(),
            ObjectKind::DataUnionOf
        );
        assert!(!view.can_as(&node, ObjectKind::ClassExpression));
        assert!(!view.can_as(&node, ObjectKind::AnonymousIndividual));
    }

    #[test]
    fn resolves_restriction_kind() {
        let node = BlankNode::default();
        let mut triples = typed("p", &[owl::OBJECT_PROPERTY]);
        triples.extend(typed("C", &[owl::CLASS]));
        triples.extend([
            Triple::new(node.clone(), rdf::TYPE, owl::RESTRICTION),
            Triple::new(node.clone(), owl::ON_PROPERTY, iri("p")),
            Triple::new(node.clone(), owl::SOME_VALUES_FROM, iri("C")),
        ]);
        let graph = union(&triples);
        let personality = Personality::new(PunningMode::Medium);
        let config = OntConfig::default();
        let view = ModelView::new(&graph, &personality, &config);
        let object = view
            .get_as(&node.into(), ObjectKind::ClassExpression)
            .unwrap();
        assert_eq!(object.kind(), ObjectKind::ObjectSomeValuesFrom);
        assert_eq!(
            personality
                .objects(ObjectKind::ObjectSomeValuesFrom, view)
                .count(),
            1
        );
    }

    #[test]
    fn reserved_vocabulary_is_never_an_entity() {
        let graph = union(&[Triple::new(rdf::TYPE, rdf::TYPE, owl::CLASS)]);
        let personality = Personality::new(PunningMode::Lax);
        let config = OntConfig::default();
        let view = ModelView::new(&graph, &personality, &config);
        assert!(personality.is_reserved(&rdf::TYPE.into_owned()));
        assert!(!view.can_as(&rdf::TYPE.into(), ObjectKind::Class));
        assert!(view.can_as(&owl::THING.into(), ObjectKind::Class));
        assert!(view.can_as(&xsd::STRING.into(), ObjectKind::Datatype));
        assert!(view.can_as(&rdfs::LABEL.into(), ObjectKind::AnnotationProperty));
    }

    #[test]
    fn punning_modes() {
        let mut triples = typed("x", &[owl::CLASS, rdfs::DATATYPE]);
        triples.extend(typed("p", &[owl::OBJECT_PROPERTY, owl::ANNOTATION_PROPERTY]));
        let graph = union(&triples);
        let config = OntConfig::default();
        let x = Term::from(iri("x"));
        let p = Term::from(iri("p"));

        let lax = Personality::new(PunningMode::Lax);
        let view = ModelView::new(&graph, &lax, &config);
        assert!(view.can_as(&x, ObjectKind::Class));
        assert!(view.can_as(&x, ObjectKind::Datatype));

        let medium = Personality::new(PunningMode::Medium);
        let view = ModelView::new(&graph, &medium, &config);
        assert!(!view.can_as(&x, ObjectKind::Class));
        assert!(!view.can_as(&x, ObjectKind::Datatype));
        assert!(view.can_as(&p, ObjectKind::ObjectProperty));
        assert!(view.can_as(&p, ObjectKind::AnnotationProperty));

        let strict = Personality::new(PunningMode::Strict);
        let view = ModelView::new(&graph, &strict, &config);
        assert!(!view.can_as(&p, ObjectKind::ObjectProperty));
        assert!(!view.can_as(&p, ObjectKind::AnnotationProperty));
    }

    #[test]
    fn composite_kinds_are_registered() {
        for mode in [PunningMode::Strict, PunningMode::Medium, PunningMode::Lax] {
            let personality = Personality::new(mode);
            for kind in [
                ObjectKind::Entity,
                ObjectKind::Individual,
                ObjectKind::ObjectPropertyExpression,
                ObjectKind::ClassExpression,
                ObjectKind::DataRange,
            ] {
                assert!(personality.factory(kind).is_some(), "{kind} in {mode:?}");
            }
        }
    }

    #[test]
    fn shared_personalities_are_reused() {
        assert!(Arc::ptr_eq(
            &Personality::shared(PunningMode::Strict),
            &Personality::shared(PunningMode::Strict)
        ));
        assert!(!Arc::ptr_eq(
            &Personality::shared(PunningMode::Strict),
            &Personality::shared(PunningMode::Lax)
        ));
    }
}
