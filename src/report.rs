use std::fmt;

use crate::data::aggregate::SurvivalByClass;
use crate::data::model::{ColumnType, Table};
use crate::data::passenger::PassengerClass;

// ---------------------------------------------------------------------------
// Dataset summary
// ---------------------------------------------------------------------------

/// Record count and schema of a loaded table, for the console and the
/// "Dataset" tab.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub records: usize,
    pub columns: Vec<(String, ColumnType)>,
}

impl DatasetSummary {
    pub fn of(table: &Table) -> Self {
        Self {
            records: table.len(),
            columns: table
                .columns()
                .iter()
                .map(|c| (c.name.clone(), c.dtype))
                .collect(),
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset information:")?;
        writeln!(f, "Number of records: {}", self.records)?;
        writeln!(f, "Number of columns: {}", self.columns.len())?;
        writeln!(f)?;
        writeln!(f, "Columns and data types:")?;
        let width = self.columns.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        for (name, dtype) in &self.columns {
            writeln!(f, "{name:<width$}  {dtype}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Class summary
// ---------------------------------------------------------------------------

/// One line per class with its survival rate, e.g. `Class 1: 63.0%`.
pub fn class_summary(by_class: &SurvivalByClass) -> String {
    let mut out = String::from("Survival rate by class:\n");
    for class in PassengerClass::ALL {
        out.push_str(&format!(
            "Class {class}: {:.1}%\n",
            by_class.class(class).rate()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::aggregate::GroupStats;

    #[test]
    fn dataset_summary_lists_columns() {
        let table = Table::from_raw(
            vec!["Survived".into(), "Sex".into(), "Age".into()],
            vec![
                vec!["1".into(), "female".into(), "29".into()],
                vec!["0".into(), "male".into(), "".into()],
            ],
        );
        let summary = DatasetSummary::of(&table);
        assert_eq!(summary.records, 2);
        let text = summary.to_string();
        assert!(text.contains("Number of records: 2"));
        assert!(text.contains("Number of columns: 3"));
        assert!(text.contains("Survived  int64"));
        assert!(text.contains("Sex       object"));
        assert!(text.contains("Age       float64"));
    }

    #[test]
    fn class_summary_matches_aggregates() {
        let by_class = SurvivalByClass {
            classes: BTreeMap::from([
                (PassengerClass::First, GroupStats { survivors: 136, total: 216 }),
                (PassengerClass::Second, GroupStats { survivors: 87, total: 184 }),
                (PassengerClass::Third, GroupStats { survivors: 119, total: 491 }),
            ]),
            overall: GroupStats { survivors: 342, total: 891 },
        };
        assert_eq!(
            class_summary(&by_class),
            "Survival rate by class:\nClass 1: 63.0%\nClass 2: 47.3%\nClass 3: 24.2%\n"
        );
    }

    #[test]
    fn class_summary_reports_empty_classes_as_zero() {
        let by_class = SurvivalByClass {
            classes: BTreeMap::from([(
                PassengerClass::First,
                GroupStats { survivors: 1, total: 2 },
            )]),
            overall: GroupStats { survivors: 1, total: 2 },
        };
        let text = class_summary(&by_class);
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Class 1: 50.0%\n"));
        assert!(text.contains("Class 2: 0.0%\n"));
        assert!(text.contains("Class 3: 0.0%\n"));
    }
}
