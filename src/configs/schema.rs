use crate::models::{AuditTable, ReadingTable, StationTable, Table};

pub struct SchemaManager {
    tables: Vec<Box<dyn Table>>,
}

impl SchemaManager {
    pub fn new(mut tables: Vec<Box<dyn Table>>) -> Self {
        Self::sort_tables(&mut tables);
        Self { tables }
    }

    // Order tables so that every table comes after the tables it references.
    fn sort_tables(tables: &mut Vec<Box<dyn Table>>) {
        let mut remaining = std::mem::take(tables);
        let mut sorted: Vec<Box<dyn Table>> = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let ready: Vec<usize> = remaining
                .iter()
                .enumerate()
                .filter(|(_, table)| {
                    table
                        .dependencies()
                        .iter()
                        .all(|dep| sorted.iter().any(|done| done.name() == *dep))
                })
                .map(|(index, _)| index)
                .collect();

            assert!(
                !ready.is_empty(),
                "Circular dependency detected or unresolved dependencies exist."
            );

            for &index in ready.iter().rev() {
                sorted.push(remaining.swap_remove(index));
            }
        }

        *tables = sorted;
    }

    pub fn create_schema(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.create()).collect()
    }

    pub fn dispose_schema(&self) -> Vec<String> {
        self.tables.iter().rev().map(|table| table.dispose()).collect()
    }
}

impl Default for SchemaManager {
    fn default() -> Self {
        SchemaManager::new(vec![
            Box::new(StationTable),
            Box::new(ReadingTable),
            Box::new(AuditTable),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockStationTable;
    impl Table for MockStationTable {
        fn name(&self) -> &'static str {
            "pluviometros"
        }

        fn create(&self) -> String {
            "CREATE TABLE pluviometros;".to_string()
        }

        fn dispose(&self) -> String {
            "DROP TABLE pluviometros;".to_string()
        }

        fn dependencies(&self) -> Vec<&'static str> {
            vec![]
        }
    }

    struct MockReadingTable;
    impl Table for MockReadingTable {
        fn name(&self) -> &'static str {
            "dados_pluviometros"
        }

        fn create(&self) -> String {
            "CREATE TABLE dados_pluviometros;".to_string()
        }

        fn dispose(&self) -> String {
            "DROP TABLE dados_pluviometros;".to_string()
        }

        fn dependencies(&self) -> Vec<&'static str> {
            vec!["pluviometros"]
        }
    }

    #[test]
    fn test_referenced_tables_created_first() {
        let tables: Vec<Box<dyn Table>> =
            vec![Box::new(MockReadingTable), Box::new(MockStationTable)];

        let manager = SchemaManager::new(tables);
        let statements = manager.create_schema();

        assert_eq!(statements[0], "CREATE TABLE pluviometros;");
        assert_eq!(statements[1], "CREATE TABLE dados_pluviometros;");
    }

    #[test]
    fn test_dispose_reverses_creation_order() {
        let tables: Vec<Box<dyn Table>> =
            vec![Box::new(MockReadingTable), Box::new(MockStationTable)];

        let manager = SchemaManager::new(tables);
        let statements = manager.dispose_schema();

        assert_eq!(statements[0], "DROP TABLE dados_pluviometros;");
        assert_eq!(statements[1], "DROP TABLE pluviometros;");
    }
}
