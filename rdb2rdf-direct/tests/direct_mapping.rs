use rdb2rdf_direct::{map_database, DirectMapper, DirectMappingConfig, DirectMappingError};
use rdb2rdf_graph_ir::{Datatype, Dataset, DatasetCollectorSink, Statement, Term};
use rdb2rdf_relational::{Database, TableData};
use rdb2rdf_vocab::{rdf, xsd};

fn config() -> DirectMappingConfig {
    DirectMappingConfig::new("http://ex/")
}

fn run(db: &Database) -> (Dataset, rdb2rdf_direct::DirectMappingReport) {
    let mut sink = DatasetCollectorSink::new();
    let report = map_database(db, &config(), &mut sink).unwrap();
    let mut dataset = sink.finish();
    dataset.dedupe();
    (dataset, report)
}

fn triple(s: &str, p: &str, o: Term) -> Statement {
    Statement::new(Term::iri(s), Term::iri(p), o)
}

fn shop() -> Database {
    Database::new(vec![
        TableData::new("orders")
            .column("id", "INT")
            .column("customer_id", "INT")
            .primary_key(["id"])
            .foreign_key(["customer_id"], "customers", ["id"])
            .row([Some("1"), Some("7")]),
        TableData::new("customers")
            .column("id", "INT")
            .column("name", "VARCHAR(50)")
            .primary_key(["id"])
            .row([Some("7"), Some("Ann")]),
    ])
    .unwrap()
}

#[test]
fn orders_and_customers_end_to_end() {
    let (ds, report) = run(&shop());

    let int = |v: &str| Term::typed(v, Datatype::from_iri(xsd::INT));
    let expected = [
        triple("http://ex/orders/id=1", rdf::TYPE, Term::iri("http://ex/orders")),
        triple(
            "http://ex/orders/id=1",
            "http://ex/orders#customer_id",
            Term::iri("http://ex/customers/id=7"),
        ),
        triple("http://ex/orders/id=1", "http://ex/orders#id", int("1")),
        triple("http://ex/customers/id=7", rdf::TYPE, Term::iri("http://ex/customers")),
        triple("http://ex/customers/id=7", "http://ex/customers#name", Term::string("Ann")),
        triple("http://ex/customers/id=7", "http://ex/customers#id", int("7")),
    ];
    for st in &expected {
        assert!(ds.contains(st), "missing {st}");
    }
    assert_eq!(ds.len(), expected.len());
    assert_eq!(report.broken_references, 0);
    assert_eq!(report.statements, expected.len());
}

#[test]
fn rows_without_primary_key_get_stable_blank_nodes() {
    let db = Database::new(vec![TableData::new("log")
        .column("msg", "TEXT")
        .row([Some("a")])
        .row([Some("a")])])
    .unwrap();

    let cfg = config();
    let mut mapper = DirectMapper::new(&db, &cfg);
    let table = db.table("log").unwrap();
    let first = table.rows()[0];
    let second = table.rows()[1];

    let s1 = mapper.subject_node(table, first).unwrap();
    let s2 = mapper.subject_node(table, second).unwrap();
    assert!(s1.is_blank() && s2.is_blank());
    assert_ne!(s1, s2);
    assert_eq!(mapper.subject_node(table, first).unwrap(), s1);
    assert_eq!(mapper.report().blank_nodes, 2);

    // Two identical rows still yield two distinct subjects.
    let (ds, _) = run(&db);
    assert_eq!(ds.len(), 4);
}

#[test]
fn primary_key_subject_is_pure_function_of_key_values() {
    let db = Database::new(vec![TableData::new("t")
        .column("a", "INT")
        .column("b", "VARCHAR(5)")
        .column("c", "TEXT")
        .primary_key(["b", "a"])
        .row([Some("1"), Some("x y"), Some("first")])])
    .unwrap();

    let cfg = config();
    let mut mapper = DirectMapper::new(&db, &cfg);
    let table = db.table("t").unwrap();
    let subject = mapper.subject_node(table, table.rows()[0]).unwrap();
    assert_eq!(subject, Term::iri("http://ex/t/b=x%20y,a=1"));
}

fn people_chain(with_broken_link: bool) -> Database {
    let person_id = if with_broken_link { "99" } else { "1" };
    Database::new(vec![
        TableData::new("people")
            .column("id", "INT")
            .column("name", "TEXT")
            .primary_key(["id"])
            .row([Some("1"), Some("Bob")]),
        TableData::new("students")
            .column("id", "INT")
            .column("school", "TEXT")
            .primary_key(["id"])
            .foreign_key(["id"], "people", ["id"])
            .row([Some(person_id), Some("MIT")]),
        TableData::new("grads")
            .column("id", "INT")
            .column("thesis", "TEXT")
            .primary_key(["id"])
            .foreign_key(["id"], "students", ["id"])
            .row([Some(person_id), Some("RDF")]),
    ])
    .unwrap()
}

#[test]
fn primary_is_candidate_key_chain_resolves_to_root() {
    let (ds, report) = run(&people_chain(false));
    let root = "http://ex/people/id=1";

    assert!(ds.contains(&triple(root, rdf::TYPE, Term::iri("http://ex/people"))));
    assert!(ds.contains(&triple(root, rdf::TYPE, Term::iri("http://ex/students"))));
    assert!(ds.contains(&triple(root, rdf::TYPE, Term::iri("http://ex/grads"))));
    assert!(ds.contains(&triple(root, "http://ex/grads#thesis", Term::string("RDF"))));
    assert!(ds.contains(&triple(root, "http://ex/students#school", Term::string("MIT"))));
    // The delegating key column is a literal, not a reference.
    assert!(ds.contains(&triple(
        root,
        "http://ex/grads#id",
        Term::typed("1", Datatype::from_iri(xsd::INT)),
    )));

    let own = Term::iri("http://ex/grads/id=1");
    assert_eq!(ds.with_subject(&own).count(), 0);
    assert_eq!(report.broken_references, 0);
}

#[test]
fn broken_chain_counts_once_and_keeps_other_triples() {
    let (ds, report) = run(&people_chain(true));

    // students(99) and grads(99) both break: each row counts once.
    assert_eq!(report.broken_references, 2);

    let grads = Term::iri("http://ex/grads/id=99");
    let own: Vec<_> = ds.with_subject(&grads).collect();
    assert!(own
        .iter()
        .any(|st| st.predicate == Term::iri("http://ex/grads#thesis")));
    assert!(own
        .iter()
        .all(|st| st.predicate != Term::iri("http://ex/grads#id")));
    assert!(ds.contains(&triple(
        "http://ex/grads/id=99",
        rdf::TYPE,
        Term::iri("http://ex/grads")
    )));
}

#[test]
fn null_and_blob_values_are_skipped() {
    let db = Database::new(vec![TableData::new("files")
        .column("id", "INT")
        .column("label", "TEXT")
        .column("data", "BLOB")
        .primary_key(["id"])
        .row([Some("1"), None, Some("00ff")])])
    .unwrap();

    let (ds, report) = run(&db);
    assert_eq!(ds.len(), 2); // rdf:type + id
    assert_eq!(report.skipped_blob_values, 1);
}

#[test]
fn null_foreign_key_is_not_broken() {
    let db = Database::new(vec![
        TableData::new("orders")
            .column("id", "INT")
            .column("customer_id", "INT")
            .primary_key(["id"])
            .foreign_key(["customer_id"], "customers", ["id"])
            .row([Some("1"), None])
            .row([Some("2"), Some("404")]),
        TableData::new("customers").column("id", "INT").primary_key(["id"]),
    ])
    .unwrap();

    let (_, report) = run(&db);
    assert_eq!(report.broken_references, 1);
}

#[test]
fn unmapped_sql_type_is_fatal() {
    let db = Database::new(vec![TableData::new("shapes")
        .column("id", "INT")
        .column("area", "GEOMETRY")
        .primary_key(["id"])
        .row([Some("1"), Some("POLYGON(...)")])])
    .unwrap();

    let mut sink = DatasetCollectorSink::new();
    let err = map_database(&db, &config(), &mut sink).unwrap_err();
    assert!(matches!(err, DirectMappingError::UnmappedSqlType { .. }));
}

#[test]
fn rerun_produces_same_statements() {
    let (first, _) = run(&people_chain(false));
    let (second, _) = run(&people_chain(false));
    assert_eq!(first, second);
}

#[test]
fn composite_foreign_key_predicate_lists_columns() {
    let db = Database::new(vec![
        TableData::new("child")
            .column("id", "INT")
            .column("x", "INT")
            .column("y", "INT")
            .primary_key(["id"])
            .foreign_key(["x", "y"], "parent", ["a", "b"])
            .row([Some("1"), Some("1"), Some("2")]),
        TableData::new("parent")
            .column("a", "INT")
            .column("b", "INT")
            .primary_key(["a", "b"])
            .row([Some("1"), Some("2")]),
    ])
    .unwrap();

    let (ds, report) = run(&db);
    let int = |v: &str| Term::typed(v, Datatype::from_iri(xsd::INT));
    let child = "http://ex/child/id=1";
    assert!(ds.contains(&triple(
        child,
        "http://ex/child#x,y",
        Term::iri("http://ex/parent/a=1,b=2"),
    )));
    // A composite key does not hide its columns' literals.
    assert!(ds.contains(&triple(child, "http://ex/child#x", int("1"))));
    assert!(ds.contains(&triple(child, "http://ex/child#y", int("2"))));
    assert_eq!(ds.len(), 8);
    assert_eq!(report.broken_references, 0);
}

#[test]
fn foreign_key_to_non_unique_columns_references_every_match() {
    let db = Database::new(vec![
        TableData::new("items")
            .column("id", "INT")
            .column("color", "VARCHAR(10)")
            .primary_key(["id"])
            .foreign_key(["color"], "tags", ["label"])
            .row([Some("1"), Some("red")]),
        TableData::new("tags")
            .column("id", "INT")
            .column("label", "VARCHAR(10)")
            .primary_key(["id"])
            .row([Some("10"), Some("red")])
            .row([Some("11"), Some("red")])
            .row([Some("12"), Some("blue")]),
    ])
    .unwrap();

    let (ds, report) = run(&db);
    let item = Term::iri("http://ex/items/id=1");
    let mut targets: Vec<_> = ds
        .with_subject(&item)
        .filter(|st| st.predicate == Term::iri("http://ex/items#color"))
        .map(|st| st.object.clone())
        .collect();
    targets.sort();
    assert_eq!(
        targets,
        vec![Term::iri("http://ex/tags/id=10"), Term::iri("http://ex/tags/id=11")]
    );
    // The unary key column is a reference only, never a literal.
    assert_eq!(ds.with_subject(&item).count(), 4);
    assert_eq!(report.broken_references, 0);
}

#[test]
fn invalid_base_uri_is_reported_for_classes_and_predicates() {
    let db = Database::new(vec![TableData::new("t")
        .column("id", "INT")
        .column("name", "TEXT")
        .primary_key(["id"])
        .row([Some("1"), Some("a")])
        .row([Some("2"), Some("b")])])
    .unwrap();

    let mut sink = DatasetCollectorSink::new();
    let cfg = DirectMappingConfig::new("http://ex/a b/");
    let report = map_database(&db, &cfg, &mut sink).unwrap();
    // Two subjects, one class and two predicates.
    assert_eq!(report.invalid_uris, 5);
    assert_eq!(report.statements, 6);

    let (_, clean) = run(&db);
    assert_eq!(clean.invalid_uris, 0);
}

#[test]
fn null_primary_key_value_is_reported() {
    let db = Database::new(vec![TableData::new("t")
        .column("id", "INT")
        .column("name", "TEXT")
        .primary_key(["id"])
        .row([None, Some("orphan")])
        .row([Some("2"), Some("ok")])])
    .unwrap();

    let (ds, report) = run(&db);
    assert_eq!(report.null_key_subjects, 1);
    assert!(ds.contains(&triple(
        "http://ex/t/id=",
        "http://ex/t#name",
        Term::string("orphan"),
    )));
}
