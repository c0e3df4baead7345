use std::fmt;

use serde::Serialize;

use super::model::{CellValue, ColumnType, Table};
use crate::error::AggregationError;

pub const SURVIVED: &str = "Survived";
pub const PCLASS: &str = "Pclass";
pub const SEX: &str = "Sex";
pub const AGE: &str = "Age";

pub const MALE: &str = "male";
pub const FEMALE: &str = "female";

static NULL: CellValue = CellValue::Null;

// ---------------------------------------------------------------------------
// AgeGroup – fixed age bins
// ---------------------------------------------------------------------------

/// Age bucket. Bins are right-open except the last, which includes 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeGroup {
    Child,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::Child,
        AgeGroup::YoungAdult,
        AgeGroup::Adult,
        AgeGroup::MiddleAged,
        AgeGroup::Senior,
    ];

    /// Bin edges: `[0,18) [18,30) [30,45) [45,60) [60,100]`.
    pub const EDGES: [f64; 6] = [0.0, 18.0, 30.0, 45.0, 60.0, 100.0];

    /// Bucket an age. Ages outside `[0, 100]` (and NaN) have no group.
    pub fn from_age(age: f64) -> Option<AgeGroup> {
        let last = Self::EDGES[Self::EDGES.len() - 1];
        if !(Self::EDGES[0]..=last).contains(&age) {
            return None;
        }
        let idx = Self::EDGES[1..]
            .iter()
            .position(|&upper| age < upper)
            .unwrap_or(Self::ALL.len() - 1);
        Some(Self::ALL[idx])
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Child => "0-17",
            AgeGroup::YoungAdult => "18-29",
            AgeGroup::Adult => "30-44",
            AgeGroup::MiddleAged => "45-59",
            AgeGroup::Senior => "60+",
        }
    }

    /// Position in [`AgeGroup::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PassengerClass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl PassengerClass {
    pub const ALL: [PassengerClass; 3] = [
        PassengerClass::First,
        PassengerClass::Second,
        PassengerClass::Third,
    ];

    pub fn from_number(n: i64) -> Option<PassengerClass> {
        match n {
            1 => Some(PassengerClass::First),
            2 => Some(PassengerClass::Second),
            3 => Some(PassengerClass::Third),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            PassengerClass::First => "1st Class",
            PassengerClass::Second => "2nd Class",
            PassengerClass::Third => "3rd Class",
        }
    }
}

impl fmt::Display for PassengerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// ---------------------------------------------------------------------------
// Passenger – the typed view of one row
// ---------------------------------------------------------------------------

/// The columns the analyses read, extracted from one table row.
#[derive(Debug, Clone, PartialEq)]
pub struct Passenger {
    pub survived: bool,
    pub pclass: Option<PassengerClass>,
    pub sex: String,
    pub age: Option<f64>,
}

impl Passenger {
    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age.and_then(AgeGroup::from_age)
    }
}

/// Column positions of the required fields, checked against the table schema.
#[derive(Debug, Clone, Copy)]
pub struct PassengerSchema {
    survived: usize,
    pclass: usize,
    sex: usize,
    age: usize,
}

impl PassengerSchema {
    /// Locate and type-check the required columns.
    ///
    /// `Survived` and `Pclass` must be numeric (or bool for `Survived`), `Sex`
    /// must be text and `Age` numeric. Types are not checked on an empty
    /// table, where every column is inferred as all-absent.
    pub fn resolve(table: &Table) -> Result<Self, AggregationError> {
        let find = |name: &'static str,
                    accepts: fn(ColumnType) -> bool,
                    expected: &'static str|
         -> Result<usize, AggregationError> {
            let idx = table
                .column_index(name)
                .ok_or(AggregationError::MissingColumn(name))?;
            let found = table.columns()[idx].dtype;
            if accepts(found) || table.is_empty() {
                Ok(idx)
            } else {
                Err(AggregationError::ColumnType {
                    column: name,
                    expected,
                    found: found.name(),
                })
            }
        };

        Ok(PassengerSchema {
            survived: find(
                SURVIVED,
                |t| t.is_numeric() || t == ColumnType::Bool,
                "int64",
            )?,
            pclass: find(PCLASS, ColumnType::is_numeric, "int64")?,
            sex: find(SEX, |t| t == ColumnType::Text, "object")?,
            age: find(AGE, ColumnType::is_numeric, "float64")?,
        })
    }

    /// Extract the typed view of row `row_no`. Cells past the end of a short
    /// row read as `Null`.
    pub fn passenger(&self, row_no: usize, row: &[CellValue]) -> Result<Passenger, AggregationError> {
        let invalid = |column: &'static str, value: &CellValue| AggregationError::InvalidValue {
            row: row_no,
            column,
            value: value.to_string(),
        };
        let cell = |idx: usize| row.get(idx).unwrap_or(&NULL);

        let survived_cell = cell(self.survived);
        let survived = match survived_cell.as_i64() {
            Some(0) => false,
            Some(1) => true,
            _ => return Err(invalid(SURVIVED, survived_cell)),
        };

        let pclass_cell = cell(self.pclass);
        let pclass = if pclass_cell.is_null() {
            None
        } else {
            let class = pclass_cell
                .as_i64()
                .and_then(PassengerClass::from_number)
                .ok_or_else(|| invalid(PCLASS, pclass_cell))?;
            Some(class)
        };

        let sex_cell = cell(self.sex);
        let sex = sex_cell
            .as_str()
            .ok_or_else(|| invalid(SEX, sex_cell))?
            .to_string();

        let age = cell(self.age).as_f64().filter(|a| !a.is_nan());

        Ok(Passenger {
            survived,
            pclass,
            sex,
            age,
        })
    }
}

/// Resolve the schema and extract every row of `table`.
pub fn passengers(table: &Table) -> Result<Vec<Passenger>, AggregationError> {
    let schema = PassengerSchema::resolve(table)?;
    table
        .rows()
        .enumerate()
        .map(|(i, row)| schema.passenger(i, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        Table::from_raw(
            ["PassengerId", SURVIVED, PCLASS, SEX, AGE]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn age_group_boundaries() {
        assert_eq!(AgeGroup::from_age(0.0), Some(AgeGroup::Child));
        assert_eq!(AgeGroup::from_age(17.99), Some(AgeGroup::Child));
        assert_eq!(AgeGroup::from_age(18.0), Some(AgeGroup::YoungAdult));
        assert_eq!(AgeGroup::from_age(30.0), Some(AgeGroup::Adult));
        assert_eq!(AgeGroup::from_age(45.0), Some(AgeGroup::MiddleAged));
        assert_eq!(AgeGroup::from_age(60.0), Some(AgeGroup::Senior));
        assert_eq!(AgeGroup::from_age(100.0), Some(AgeGroup::Senior));
        assert_eq!(AgeGroup::from_age(100.5), None);
        assert_eq!(AgeGroup::from_age(-1.0), None);
        assert_eq!(AgeGroup::from_age(f64::NAN), None);
    }

    #[test]
    fn every_age_in_range_has_exactly_one_group() {
        for tenth in 0..=1000 {
            let age = f64::from(tenth) / 10.0;
            let group = AgeGroup::from_age(age).unwrap();
            let lo = AgeGroup::EDGES[group.index()];
            let hi = AgeGroup::EDGES[group.index() + 1];
            assert!(lo <= age && (age < hi || age == 100.0), "{age} -> {group}");
            assert_eq!(AgeGroup::from_age(age), Some(group));
        }
    }

    #[test]
    fn extracts_typed_passengers() {
        let t = table(&[&["1", "1", "1", "female", "29"], &["2", "0", "", "male", ""]]);
        let ps = passengers(&t).unwrap();
        assert_eq!(
            ps[0],
            Passenger {
                survived: true,
                pclass: Some(PassengerClass::First),
                sex: FEMALE.into(),
                age: Some(29.0),
            }
        );
        assert_eq!(ps[1].pclass, None);
        assert_eq!(ps[1].age, None);
        assert_eq!(ps[1].age_group(), None);
    }

    #[test]
    fn missing_column_is_reported() {
        let t = Table::from_raw(
            vec![SURVIVED.into(), SEX.into(), AGE.into()],
            vec![vec!["1".into(), "male".into(), "3".into()]],
        );
        assert_eq!(
            passengers(&t).unwrap_err(),
            AggregationError::MissingColumn(PCLASS)
        );
    }

    #[test]
    fn wrong_column_type_is_reported() {
        let t = table(&[&["1", "1", "1", "female", "unknown"]]);
        assert_eq!(
            passengers(&t).unwrap_err(),
            AggregationError::ColumnType {
                column: AGE,
                expected: "float64",
                found: "object",
            }
        );
    }

    #[test]
    fn out_of_domain_values_are_reported() {
        let t = table(&[&["1", "2", "1", "female", "29"]]);
        assert!(matches!(
            passengers(&t).unwrap_err(),
            AggregationError::InvalidValue { row: 0, column: SURVIVED, .. }
        ));

        let t = table(&[&["1", "1", "4", "female", "29"]]);
        assert!(matches!(
            passengers(&t).unwrap_err(),
            AggregationError::InvalidValue { row: 0, column: PCLASS, .. }
        ));

        let t = table(&[&["1", "1", "1", "female", "29"], &["2", "1", "1", "", "29"]]);
        assert!(matches!(
            passengers(&t).unwrap_err(),
            AggregationError::InvalidValue { row: 1, column: SEX, .. }
        ));
    }

    #[test]
    fn short_row_reads_missing_cells_as_null() {
        let t = table(&[&["1", "1", "1", "female", "29"]]);
        let schema = PassengerSchema::resolve(&t).unwrap();
        assert_eq!(
            schema.passenger(3, &[CellValue::Integer(7)]).unwrap_err(),
            AggregationError::InvalidValue {
                row: 3,
                column: SURVIVED,
                value: "<null>".into(),
            }
        );

        let ps = passengers(&table(&[&["1", "0", "3", "male"]])).unwrap();
        assert_eq!(ps[0].age, None);
    }
}
