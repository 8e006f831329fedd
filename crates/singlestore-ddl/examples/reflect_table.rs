//! Parses a `SHOW CREATE TABLE` result and prints what was recovered.
//!
//! Run with: `cargo run -p singlestore-ddl --example reflect_table`

use singlestore_ddl::ddl::DdlRenderer;
use singlestore_ddl::dialect::{Dialect, SingleStoreDialect};

const ORDERS: &str = r#"CREATE TABLE `orders` (
  `id` bigint(20) NOT NULL AUTO_INCREMENT,
  `customer_id` int(11) NOT NULL,
  `placed_at` datetime(6) NOT NULL,
  `embedding` vector(4, F32) NOT NULL,
  `status` enum('new','paid','shipped') DEFAULT 'new',
  PRIMARY KEY (`id`,`customer_id`),
  SHARD KEY `__SHARDKEY` (`customer_id`),
  SORT KEY `__UNORDERED` (`placed_at` DESC),
  VECTOR INDEX `ix_embedding` (`embedding`) INDEX_OPTIONS='{"metric_type":"DOT_PRODUCT"}',
  FUTURE INDEX `ix_unknown` (`status`)
) AUTOSTATS_ENABLED=TRUE AUTOSTATS_CARDINALITY_MODE=INCREMENTAL SQL_MODE='STRICT_ALL_TABLES'"#;

fn main() -> Result<(), singlestore_ddl::Error> {
    let dialect = SingleStoreDialect::new();
    let parser = dialect.table_definition_parser()?;
    let reflection = parser.parse(ORDERS, "utf8mb4");
    let table = &reflection.table;

    println!("Table: {}", table.table_name.as_deref().unwrap_or("?"));
    for column in &table.columns {
        println!(
            "  column {:<12} {:<16} nullable={}",
            column.name,
            column.data_type,
            column.nullable
        );
    }
    for key in &table.keys {
        println!(
            "  {:<14} {:<14} {:?}",
            key.kind.keyword(),
            key.name.as_deref().unwrap_or("-"),
            key.column_names()
        );
    }
    for (name, value) in &table.table_options {
        println!("  option {name} = {value}");
    }
    for diagnostic in &reflection.diagnostics {
        println!("  warning: {diagnostic}");
    }

    println!();
    println!("{}", DdlRenderer::for_dialect(&dialect)?.create_table(table));
    Ok(())
}
