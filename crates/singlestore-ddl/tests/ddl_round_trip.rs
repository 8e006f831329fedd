//! Rendering reflected definitions and parsing them back.

mod common;

use common::{ansi_parser, parse_clean};
use singlestore_ddl::ddl::DdlRenderer;
use singlestore_ddl::dialect::SingleStoreDialect;
use singlestore_ddl::schema::ParsedTableDefinition;

/// Verifies that rendering is a fixed point: render(parse(text)) parses
/// back to a definition that renders to the same text, with identical
/// keys and options.
fn round_trip(text: &str) -> ParsedTableDefinition {
    let renderer = DdlRenderer::default();
    let first = parse_clean(text);
    let rendered1 = renderer.create_table(&first);
    let second = parse_clean(&rendered1);
    let rendered2 = renderer.create_table(&second);
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:\n{text}\n  First:\n{rendered1}\n  Second:\n{rendered2}"
    );
    assert_eq!(first.keys, second.keys);
    assert_eq!(first.table_options, second.table_options);
    assert_eq!(first.table_type, second.table_type);
    second
}

#[test]
fn test_round_trip_storage_keys() {
    let text = "CREATE TABLE `events` (
  `id` bigint(20) NOT NULL AUTO_INCREMENT,
  `ts` datetime(6) NOT NULL,
  `kind` enum('click','view','it''s') DEFAULT 'view',
  `payload` JSON COLLATE utf8mb4_bin,
  PRIMARY KEY (`id`,`ts`),
  SHARD KEY `__SHARDKEY` (`id`),
  SORT KEY `__UNORDERED` (`ts` DESC),
  KEY `ix_kind` (`kind`) USING HASH COMMENT 'by kind'
) AUTOSTATS_ENABLED=TRUE AUTOSTATS_CARDINALITY_MODE=INCREMENTAL SQL_MODE='STRICT_ALL_TABLES'";
    round_trip(text);
}

#[test]
fn test_round_trip_vector_and_keyless_shard() {
    let text = r#"CREATE TABLE `docs` (
  `id` int(11) NOT NULL,
  `embedding` vector(4, F32) NOT NULL,
  `total` AS `id` * 2 PERSISTED bigint(20),
  VECTOR INDEX `ix_emb` (`embedding`) INDEX_OPTIONS='{"metric_type":"DOT_PRODUCT"}',
  SHARD KEY (),
  COLUMN GROUP `cg_all` (*)
) COMMENT='line\none'"#;
    let table = round_trip(text);
    assert!(table.shard_key().unwrap().is_keyless_shard());
    assert_eq!(table.table_option("comment"), Some("line\none"));
}

#[test]
fn test_round_trip_all_columns_key() {
    let text = "CREATE TABLE `wide` (
  `id` int(11) NOT NULL,
  `body` text,
  KEY `cs` ALL COLUMNS,
  SORT KEY ()
)";
    let table = round_trip(text);
    let key = table.indexes().next().unwrap();
    assert!(key.all_columns);
    assert!(DdlRenderer::default()
        .create_table(&table)
        .contains("  KEY `cs` ALL COLUMNS,\n"));
}

#[test]
fn test_round_trip_foreign_keys() {
    let text = "CREATE ROWSTORE TABLE `child` (
  `id` int(11) NOT NULL,
  `parent_id` int(11) DEFAULT NULL,
  PRIMARY KEY (`id`),
  CONSTRAINT `fk` FOREIGN KEY (`parent_id`) REFERENCES `parent` (`id`) ON DELETE SET NULL ON UPDATE CASCADE
)";
    round_trip(text);
}

#[test]
fn test_round_trip_ansi_quotes() {
    let text = "CREATE TABLE \"t\" (
  \"a\"\"b\" int(11) NOT NULL,
  SHARD KEY (\"a\"\"b\")
)";
    let parser = ansi_parser();
    let first = parser.parse(text, "utf8mb4").table;
    let renderer =
        DdlRenderer::for_dialect(&SingleStoreDialect::new().with_ansi_quotes(true)).unwrap();
    let rendered = renderer.create_table(&first);
    assert!(rendered.contains("SHARD KEY (\"a\"\"b\")"), "{rendered}");
    let second = parser.parse(&rendered, "utf8mb4");
    assert!(second.is_clean(), "{:?}", second.diagnostics);
    assert_eq!(first.keys, second.table.keys);
    assert_eq!(renderer.create_table(&second.table), rendered);
}
