//! Whole-table reflection: scenarios, diagnostics, options and headers.

mod common;

use common::{ansi_parser, kinds, parse_clean, reflect, table_text};
use singlestore_ddl::reflection::DiagnosticKind;
use singlestore_ddl::schema::{KeyKind, ReferentialAction};
use singlestore_ddl::types::{DataType, VectorElementType};

const SCENARIO_A: &str = "CREATE TABLE `t` (
  `id` int(11) NOT NULL,
  `name` varchar(50) DEFAULT NULL,
  PRIMARY KEY (`id`),
  SHARD KEY (`id`)
)";

#[test]
fn test_scenario_primary_and_shard_key() {
    let table = parse_clean(SCENARIO_A);
    assert_eq!(table.table_name.as_deref(), Some("t"));
    assert_eq!(table.charset, "utf8mb4");
    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name"]);
    assert_eq!(kinds(&table), vec![KeyKind::Primary, KeyKind::Shard]);
    assert_eq!(table.keys[0].column_names(), vec!["id"]);
    assert_eq!(table.keys[1].column_names(), vec!["id"]);
}

#[test]
fn test_scenario_empty_sort_key() {
    let table = parse_clean(&table_text(&["  `id` int(11) NOT NULL", "  SORT KEY ()"]));
    assert_eq!(kinds(&table), vec![KeyKind::Sort]);
    assert!(table.sort_key().unwrap().columns.is_empty());
    assert!(table.shard_key().is_none());
}

#[test]
fn test_scenario_two_vector_indexes() {
    let table = parse_clean(&table_text(&[
        "  `id` bigint(20) NOT NULL",
        "  `a` vector(3, F32) NOT NULL",
        "  `b` vector(8, I16) NOT NULL",
        r#"  VECTOR INDEX `ix_a` (`a`) INDEX_OPTIONS='{"index_type":"AUTO","metric_type":"DOT_PRODUCT"}'"#,
        r#"  VECTOR INDEX `ix_b` (`b`) INDEX_OPTIONS='{"metric_type":"EUCLIDEAN_DISTANCE"}'"#,
    ]));
    let vectors: Vec<_> = table.vector_indexes().collect();
    assert_eq!(vectors.len(), 2);
    assert_eq!(vectors[0].name.as_deref(), Some("ix_a"));
    assert_eq!(
        vectors[0].index_options.as_deref(),
        Some(r#"{"index_type":"AUTO","metric_type":"DOT_PRODUCT"}"#)
    );
    assert_eq!(vectors[1].name.as_deref(), Some("ix_b"));
    assert_eq!(
        vectors[1].index_options.as_deref(),
        Some(r#"{"metric_type":"EUCLIDEAN_DISTANCE"}"#)
    );
    assert_eq!(
        table.column("b").unwrap().data_type,
        DataType::Vector {
            dimensions: 8,
            element: VectorElementType::I16
        }
    );
}

#[test]
fn test_unknown_line_keeps_everything_else() {
    let text = table_text(&[
        "  `id` int(11) NOT NULL",
        "  PRIMARY KEY (`id`)",
        "  HOLOGRAPHIC INDEX `h` (`id`) WITH SPARKLES",
        "  SHARD KEY (`id`)",
    ]);
    let reflection = reflect(&text);
    assert_eq!(reflection.diagnostics.len(), 1);
    let diag = &reflection.diagnostics[0];
    assert_eq!(diag.kind, DiagnosticKind::UnknownSchemaContent);
    assert_eq!(diag.line, "  HOLOGRAPHIC INDEX `h` (`id`) WITH SPARKLES,");
    assert!(diag.message.contains("HOLOGRAPHIC"));
    assert_eq!(reflection.table.columns.len(), 1);
    assert_eq!(kinds(&reflection.table), vec![KeyKind::Primary, KeyKind::Shard]);
}

#[test]
fn test_unbalanced_quote_is_unknown_content() {
    let reflection = reflect(&table_text(&["  `id` int(11) NOT NULL", "  SHARD KEY (`id)"]));
    assert!(reflection.table.keys.is_empty());
    assert_eq!(
        reflection
            .diagnostics_of(DiagnosticKind::UnknownSchemaContent)
            .count(),
        1
    );
}

#[test]
fn test_empty_and_trailing_lines() {
    let text = format!("\n{SCENARIO_A}\n\n\n");
    let table = parse_clean(&text);
    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.keys.len(), 2);
}

#[test]
fn test_empty_input() {
    let reflection = reflect("");
    assert!(reflection.is_clean());
    assert_eq!(reflection.table.table_name, None);
    assert!(reflection.table.columns.is_empty());
}

#[test]
fn test_crlf_line_endings() {
    let text = SCENARIO_A.replace('\n', "\r\n");
    let table = parse_clean(&text);
    assert_eq!(table.columns.len(), 2);
    assert_eq!(kinds(&table), vec![KeyKind::Primary, KeyKind::Shard]);
}

#[test]
fn test_table_options_line() {
    let text = "CREATE ROWSTORE TABLE `t` (
  `id` int(11) NOT NULL,
  PRIMARY KEY (`id`)
) ENGINE=InnoDB AUTO_INCREMENT=17 DEFAULT CHARSET=utf8mb4 AUTOSTATS_ENABLED=TRUE COMMENT='orders ''2024'''";
    let table = parse_clean(text);
    assert!(table.table_type.rowstore);
    assert_eq!(table.table_option("engine"), Some("InnoDB"));
    assert_eq!(table.table_option("default_charset"), Some("utf8mb4"));
    assert_eq!(table.table_option("autostats_enabled"), Some("TRUE"));
    assert_eq!(table.table_option("comment"), Some("orders '2024'"));
    assert_eq!(table.table_option("auto_increment"), None);
}

#[test]
fn test_inline_table_options() {
    let table = parse_clean(&table_text(&[
        "  `id` int(11) NOT NULL",
        "  SORT KEY (`id`)",
        "  COMPRESSION=SPARSE",
    ]));
    assert_eq!(table.table_option("compression"), Some("SPARSE"));
    assert_eq!(table.keys.len(), 1);
}

#[test]
fn test_inline_table_options_before_last_line() {
    let table = parse_clean(&table_text(&[
        "  `id` int(11) NOT NULL",
        "  COMPRESSION=SPARSE",
        "  SORT KEY (`id`)",
    ]));
    assert_eq!(table.table_option("compression"), Some("SPARSE"));
    assert_eq!(kinds(&table), vec![KeyKind::Sort]);
}

#[test]
fn test_empty_key_column_entry_is_unknown_content() {
    let reflection = reflect(&table_text(&["  `a` int(11) NOT NULL", "  SORT KEY (`a`,,)"]));
    assert!(reflection.table.keys.is_empty());
    assert_eq!(
        reflection
            .diagnostics_of(DiagnosticKind::UnknownSchemaContent)
            .count(),
        1
    );
}

#[test]
fn test_reference_table_header() {
    let table = parse_clean("CREATE ROWSTORE REFERENCE TABLE `countries` (\n  `code` char(2) NOT NULL\n)");
    assert_eq!(table.table_name.as_deref(), Some("countries"));
    assert!(table.table_type.reference);
    assert!(table.table_type.rowstore);
    assert!(!table.table_type.is_columnstore());
}

#[test]
fn test_column_group() {
    let table = parse_clean(&table_text(&[
        "  `id` int(11) NOT NULL",
        "  SORT KEY (`id`)",
        "  COLUMN GROUP `cg` (*)",
    ]));
    assert_eq!(table.column_groups.len(), 1);
    assert_eq!(table.column_groups[0].name.as_deref(), Some("cg"));
    assert_eq!(table.keys.len(), 1);
}

#[test]
fn test_foreign_key_and_check() {
    let table = parse_clean(&table_text(&[
        "  `id` int(11) NOT NULL",
        "  `parent_id` int(11) DEFAULT NULL",
        "  CONSTRAINT `fk_parent` FOREIGN KEY (`parent_id`) REFERENCES `shop`.`parents` (`id`) ON DELETE CASCADE",
        "  CONSTRAINT `ck_id` CHECK ((`id` > 0))",
    ]));
    let fk = &table.fk_constraints[0];
    assert_eq!(fk.name, "fk_parent");
    assert_eq!(fk.local_columns, vec!["parent_id"]);
    assert_eq!(fk.referred_schema.as_deref(), Some("shop"));
    assert_eq!(fk.referred_table, "parents");
    assert_eq!(fk.on_delete, Some(ReferentialAction::Cascade));
    assert_eq!(fk.on_update, None);
    assert_eq!(table.ck_constraints[0].sqltext, "(`id` > 0)");
    assert!(table.keys.is_empty());
}

#[test]
fn test_column_diagnostics() {
    let reflection = reflect(&table_text(&[
        "  `id` int(11) NOT NULL",
        "  `tags` set('a', 'b') DEFAULT NULL",
        "  `sketch` hyperloglog NOT NULL",
    ]));
    assert_eq!(reflection.table.columns.len(), 3);
    assert_eq!(
        reflection
            .diagnostics_of(DiagnosticKind::IncompleteColumnDefinition)
            .count(),
        1
    );
    assert_eq!(
        reflection
            .diagnostics_of(DiagnosticKind::UnrecognizedColumnType)
            .count(),
        1
    );
    assert!(!reflection.table.column("tags").unwrap().full);
}

#[test]
fn test_ansi_quotes() {
    let text = "CREATE TABLE \"t\" (
  \"order-id\" bigint(20) NOT NULL,
  \"a\"\"b\" int(11) DEFAULT NULL,
  PRIMARY KEY (\"order-id\"),
  SHARD KEY (\"order-id\"),
  SORT KEY (\"a\"\"b\" DESC)
)";
    let reflection = ansi_parser().parse(text, "latin1");
    assert!(reflection.is_clean(), "{:?}", reflection.diagnostics);
    let table = reflection.table;
    assert_eq!(table.charset, "latin1");
    assert_eq!(table.columns[1].name, "a\"b");
    assert_eq!(table.shard_key().unwrap().column_names(), vec!["order-id"]);
    assert_eq!(table.sort_key().unwrap().column_names(), vec!["a\"b"]);
}

#[test]
fn test_parsers_share_across_threads() {
    let parser = std::sync::Arc::new(common::parser());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let parser = std::sync::Arc::clone(&parser);
            std::thread::spawn(move || parser.parse(SCENARIO_A, "utf8mb4"))
        })
        .collect();
    for handle in handles {
        let reflection = handle.join().unwrap();
        assert_eq!(reflection.table.keys.len(), 2);
    }
}
