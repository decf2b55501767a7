use docschema::convert;
use docschema::relation::{self, Cardinality};
use docschema::sql::{map_type, parse_sql};
use docschema::strategy::Strategy;
use serde_json::json;

const SHOP_SQL: &str = r#"
-- Shop schema
CREATE TABLE users (
    id INT PRIMARY KEY,
    name VARCHAR(50) NOT NULL
);

/* orders belong to users */
CREATE TABLE orders (
    id INT PRIMARY KEY,
    user_id INT,
    FOREIGN KEY (user_id) REFERENCES users(id)
);
"#;

#[test]
fn users_orders_scenario() {
    let result = convert(SHOP_SQL);
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(
        value["collections"]["users"]["fields"]["id"],
        json!({"type": "Number", "required": true, "primaryKey": true})
    );
    assert_eq!(
        value["collections"]["users"]["fields"]["name"],
        json!({"type": "String", "required": true})
    );
    assert_eq!(
        value["collections"]["orders"]["relationships"],
        json!([{
            "relationType": "N:1",
            "with": "users",
            "foreignField": "user_id",
            "strategy": "referencing",
            "description": "Référence vers la collection users via le champ user_id pour éviter la duplication et faciliter la mise à jour."
        }])
    );
    assert_eq!(
        value["relationships_analysis"],
        json!(["La relation N:1 entre orders et users utilise la stratégie de référencement, avec le champ \"user_id\"."])
    );
}

#[test]
fn two_junction_tables_all_many_to_many() {
    let sql = r#"
        CREATE TABLE students (id INT PRIMARY KEY, name TEXT);
        CREATE TABLE courses (id INT PRIMARY KEY, title TEXT);
        CREATE TABLE enrollments (
            student_id INT,
            course_id INT,
            FOREIGN KEY (student_id) REFERENCES students(id),
            FOREIGN KEY (course_id) REFERENCES courses(id)
        );
        CREATE TABLE teachings (
            course_id INT,
            student_id INT,
            FOREIGN KEY (course_id) REFERENCES courses(id),
            FOREIGN KEY (student_id) REFERENCES students(id)
        );
    "#;
    let result = convert(sql);

    let rels: Vec<_> = ["enrollments", "teachings"]
        .iter()
        .flat_map(|t| result.collections[*t].relationships.iter())
        .collect();
    assert_eq!(rels.len(), 4);
    for rel in rels {
        assert_eq!(rel.relation_type, Cardinality::ManyToMany);
        assert_eq!(rel.strategy, Strategy::Referencing);
    }
    assert_eq!(result.relationships_analysis.len(), 4);
    assert!(result.relationships_analysis[0].starts_with("La relation N:M entre enrollments et students"));
    assert!(result.relationships_analysis[3].starts_with("La relation N:M entre teachings et students"));
}

#[test]
fn junction_with_primary_key_foreign_key_stays_many_to_many() {
    let sql = r#"
        CREATE TABLE tags (id INT PRIMARY KEY);
        CREATE TABLE posts (id INT PRIMARY KEY);
        CREATE TABLE post_tags (
            post_id INT PRIMARY KEY,
            tag_id INT,
            FOREIGN KEY (post_id) REFERENCES posts(id),
            FOREIGN KEY (tag_id) REFERENCES tags(id)
        );
    "#;
    let result = convert(sql);
    let post_tags = &result.collections["post_tags"];

    assert!(post_tags
        .relationships
        .iter()
        .all(|r| r.relation_type == Cardinality::ManyToMany && r.strategy == Strategy::Referencing));
    assert!(!post_tags.fields.keys().any(|k| k.starts_with("posts_")));
}

#[test]
fn one_to_one_embeds_prefixed_fields() {
    let sql = r#"
        CREATE TABLE accounts (id INT PRIMARY KEY, email VARCHAR(120) NOT NULL, active BOOLEAN);
        CREATE TABLE settings (
            account_id INT PRIMARY KEY,
            theme VARCHAR(20),
            locale CHAR(5),
            FOREIGN KEY (account_id) REFERENCES accounts(id)
        );
    "#;
    let result = convert(sql);
    let value = serde_json::to_value(&result.collections["settings"]).unwrap();

    assert_eq!(
        value["fields"],
        json!({
            "account_id": {"type": "Number", "required": true, "primaryKey": true, "foreignKey": true},
            "theme": {"type": "String", "required": false},
            "locale": {"type": "String", "required": false},
            "accounts_id": {"type": "Number", "embeddedFrom": "accounts"},
            "accounts_email": {"type": "String", "embeddedFrom": "accounts"},
            "accounts_active": {"type": "Boolean", "embeddedFrom": "accounts"}
        })
    );
    assert_eq!(value["relationships"][0]["strategy"], json!("embedding"));
    assert_eq!(
        value["relationships"][0]["description"],
        json!("Les données complètes de accounts sont intégrées dans le document settings sous forme d'objet imbriqué.")
    );
    assert!(result.relationships_analysis[0].contains("stratégie de imbrication"));
}

#[test]
fn dangling_reference_yields_relationship_without_fields() {
    let sql = r#"
        CREATE TABLE invoices (
            id INT,
            customer_id INT PRIMARY KEY,
            amount DECIMAL(10,2),
            FOREIGN KEY (customer_id) REFERENCES customers(id)
        );
    "#;
    let schema = parse_sql(sql);
    let rels = relation::analyze(&schema);
    assert_eq!(rels.len(), 1);
    assert_eq!(rels[0].to, "customers");
    assert_eq!(rels[0].cardinality, Cardinality::OneToOne);

    let result = convert(sql);
    let invoices = &result.collections["invoices"];
    assert_eq!(invoices.fields.len(), 3);
    assert_eq!(invoices.relationships[0].strategy, Strategy::Embedding);
    assert!(!result.collections.contains_key("customers"));
}

#[test]
fn tables_without_foreign_keys_have_no_relationships() {
    let result = convert("CREATE TABLE a (id INT PRIMARY KEY); CREATE TABLE b (id INT, label TEXT);");
    assert_eq!(result.collections.len(), 2);
    assert!(result.collections.values().all(|c| c.relationships.is_empty()));
    assert!(result.relationships_analysis.is_empty());
}

#[test]
fn conversion_is_idempotent() {
    let first = convert(SHOP_SQL);
    let second = convert(SHOP_SQL);
    assert_eq!(first, second);
    assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
}

#[test]
fn collection_order_follows_declaration() {
    let result = convert(
        "CREATE TABLE zeta (id INT); CREATE TABLE alpha (id INT); CREATE TABLE Mid (id INT);",
    );
    let names: Vec<&str> = result.collections.keys().map(|s| s.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn precision_suffix_never_changes_type() {
    for (bare, sized) in [
        ("VARCHAR", "VARCHAR(100)"),
        ("DECIMAL", "DECIMAL(10,2)"),
        ("CHAR", "CHAR(2)"),
        ("INT", "INT(11)"),
        ("TIMESTAMP", "TIMESTAMP(3)"),
        ("FLOAT", "FLOAT(7,4)"),
    ] {
        assert_eq!(map_type(bare), map_type(sized), "{sized}");
    }
}

#[test]
fn garbage_input_is_empty_result() {
    let result = convert("this is not ( sql at all;");
    assert!(result.is_empty());
    assert!(result.relationships_analysis.is_empty());
}

#[test]
fn apostrophe_in_double_quoted_comment_keeps_table() {
    let result = convert(
        "CREATE TABLE a (id INT, note TEXT COMMENT \"l'adresse\"); \
         CREATE TABLE b (id INT, x VARCHAR(5) DEFAULT 'y');",
    );
    let names: Vec<&str> = result.collections.keys().map(|s| s.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(result.collections["a"].fields.len(), 2);
}
